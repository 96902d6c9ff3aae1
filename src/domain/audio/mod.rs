pub mod assembler;
pub mod segment;
pub mod staging;
pub mod synthesizer;
pub mod voice;

pub use assembler::{assemble, export};
pub use segment::AudioSegment;
pub use staging::StagingArea;
pub use synthesizer::{synthesize_script, SynthesisOutcome};
pub use voice::{SpeechSettings, VoiceBinding, DEFAULT_SPEECH_RATE};
