pub mod chunker;
pub mod normalizer;

pub use chunker::{split_into_chunks, DEFAULT_MAX_CHUNK_CHARS};
pub use normalizer::normalize_text;
