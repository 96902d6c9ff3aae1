pub mod audio_storage_repository;
pub mod espeak_speech_repository;
pub mod openai_speech_repository;
pub mod polly_speech_repository;
pub mod speech_repository;
pub mod text_extraction_repository;

pub use audio_storage_repository::{AudioStorageRepository, FsAudioStorageRepository};
pub use espeak_speech_repository::EspeakSpeechRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use speech_repository::SpeechRepository;
pub use text_extraction_repository::{DocumentTextExtractor, TextExtractionRepository};
