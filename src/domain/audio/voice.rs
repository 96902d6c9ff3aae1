use crate::domain::podcast::PodcastError;
use crate::domain::script::Speaker;

/// Default speaking rate, in words per minute
pub const DEFAULT_SPEECH_RATE: u32 = 160;

/// Engine settings for one pipeline run, handed to every synthesis call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSettings {
    pub rate: u32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: DEFAULT_SPEECH_RATE,
        }
    }
}

/// Which engine voice each host speaks with for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceBinding {
    alex: String,
    brenda: String,
}

impl VoiceBinding {
    /// Bind the first two available voices to the hosts.
    ///
    /// With a single voice both hosts share it; with none synthesis is
    /// impossible.
    pub fn resolve(voices: &[String]) -> Result<Self, PodcastError> {
        match voices {
            [] => Err(PodcastError::NoVoicesAvailable),
            [only] => {
                tracing::warn!(
                    voice = %only,
                    "Only one voice available, both speakers will sound the same"
                );
                Ok(Self {
                    alex: only.clone(),
                    brenda: only.clone(),
                })
            }
            [first, second, ..] => Ok(Self {
                alex: first.clone(),
                brenda: second.clone(),
            }),
        }
    }

    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Alex => &self.alex,
            Speaker::Brenda => &self.brenda,
        }
    }

    pub fn is_shared(&self) -> bool {
        self.alex == self.brenda
    }
}
