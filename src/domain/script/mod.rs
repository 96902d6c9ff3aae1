pub mod composer;
pub mod speaker;

pub use composer::{compose_script, LineKind, ScriptLine};
pub use speaker::Speaker;
