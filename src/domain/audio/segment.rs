use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read};
use std::path::Path;

/// Decoded 16-bit PCM audio with interleaved channels
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl AudioSegment {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            channels: channels.max(1),
            sample_rate,
            samples,
        }
    }

    /// A segment with no audio; adopts the format of whatever is appended first
    pub fn empty() -> Self {
        Self::new(1, 0, Vec::new())
    }

    /// Mono segment from raw signed 16-bit little-endian PCM
    pub fn from_pcm_le(bytes: &[u8], sample_rate: u32) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(1, sample_rate, samples)
    }

    pub fn from_wav_file(path: &Path) -> Result<Self, String> {
        let reader = WavReader::open(path)
            .map_err(|e| format!("Failed to open WAV file {:?}: {}", path, e))?;
        Self::from_reader(reader)
    }

    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, String> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| format!("Failed to parse WAV data: {}", e))?;
        Self::from_reader(reader)
    }

    fn from_reader<R: Read>(mut reader: WavReader<R>) -> Result<Self, String> {
        let spec = reader.spec();

        let samples: Result<Vec<i16>, hound::Error> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, bits) if bits <= 16 => reader.samples::<i16>().collect(),
            (SampleFormat::Int, bits) => {
                let shift = bits - 16;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| (v >> shift) as i16))
                    .collect()
            }
            (SampleFormat::Float, _) => reader
                .samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect(),
        };

        let samples = samples.map_err(|e| format!("Failed to decode WAV samples: {}", e))?;
        Ok(Self::new(spec.channels, spec.sample_rate, samples))
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Append another segment, converting it to this segment's format first
    pub fn append(&mut self, other: AudioSegment) {
        if self.is_empty() {
            *self = other;
            return;
        }

        let other = other.conform(self.channels, self.sample_rate);
        self.samples.extend(other.samples);
    }

    /// Convert to the given channel count and sample rate.
    ///
    /// Channels are averaged down to mono or duplicated up from mono; other
    /// layouts keep the leading channels and repeat the last one. Rate
    /// conversion picks the nearest preceding source frame.
    pub fn conform(self, channels: u16, sample_rate: u32) -> Self {
        let channels = channels.max(1);
        if self.channels == channels && self.sample_rate == sample_rate {
            return self;
        }

        let source_channels = self.channels as usize;
        let target_channels = channels as usize;
        let frames: Vec<&[i16]> = self.samples.chunks_exact(source_channels).collect();

        let target_frames = if self.sample_rate == 0 || self.sample_rate == sample_rate {
            frames.len()
        } else {
            (frames.len() as u64 * sample_rate as u64 / self.sample_rate as u64) as usize
        };

        let mut samples = Vec::with_capacity(target_frames * target_channels);
        for index in 0..target_frames {
            let source_index = if target_frames == frames.len() {
                index
            } else {
                ((index as u64 * self.sample_rate as u64 / sample_rate as u64) as usize)
                    .min(frames.len() - 1)
            };
            let frame = frames[source_index];

            if target_channels == 1 {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                samples.push((sum / source_channels as i32) as i16);
            } else {
                for channel in 0..target_channels {
                    samples.push(frame[channel.min(source_channels - 1)]);
                }
            }
        }

        Self::new(channels, sample_rate, samples)
    }

    /// Encode as a 16-bit PCM WAV file
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, String> {
        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut buffer = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut buffer), spec)
                .map_err(|e| format!("Failed to create WAV writer: {}", e))?;
            for &sample in &self.samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| format!("Failed to write WAV sample: {}", e))?;
            }
            writer
                .finalize()
                .map_err(|e| format!("Failed to finalize WAV data: {}", e))?;
        }

        Ok(buffer)
    }
}
