pub mod dto;
pub mod error;
pub mod service;

pub use dto::PodcastResponse;
pub use error::PodcastError;
pub use service::{PipelineSettings, PodcastReport, PodcastService, PodcastServiceApi, ScriptPreview};
