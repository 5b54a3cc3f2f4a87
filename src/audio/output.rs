use super::resampler::resample_audio;
use crate::{Pdf2AudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, StreamConfig};
use crossbeam_channel::{bounded, select};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Time left for the last device buffer to reach the speakers after the
/// callback reports the end of the samples
const DRAIN_TAIL: Duration = Duration::from_millis(250);

/// Mono samples being fed to the output callback
#[derive(Debug, Default)]
pub struct PlaybackBuffer {
    samples: Vec<f32>,
    position: usize,
}

impl PlaybackBuffer {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Fill one interleaved device buffer, duplicating each mono sample across
    /// `channels`, and pad with silence once the samples run out
    ///
    /// Returns true when every sample has been handed out.
    pub fn fill(&mut self, data: &mut [f32], channels: usize) -> bool {
        let channels = channels.max(1);
        let frames_needed = data.len() / channels;
        let frames_available = (self.samples.len() - self.position).min(frames_needed);

        for (frame, &sample) in data
            .chunks_mut(channels)
            .zip(&self.samples[self.position..self.position + frames_available])
        {
            frame.fill(sample);
        }
        data[frames_available * channels..].fill(0.0);

        self.position += frames_available;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.samples.len()
    }
}

/// The default output device
pub struct AudioOutput {
    device: Device,
    config: StreamConfig,
}

impl AudioOutput {
    /// Create a new audio output with the default output device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host.default_output_device().ok_or_else(|| {
            Pdf2AudioError::AudioDeviceError("No output device available".into())
        })?;

        info!(
            "Using output device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_output_config()
            .map_err(|e| {
                Pdf2AudioError::AudioDeviceError(format!("Failed to get output config: {}", e))
            })?
            .into();

        Ok(Self { device, config })
    }

    /// Get the sample rate of the output device
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Get the number of channels
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Play mono samples and block until they have been played
    pub fn play_blocking(&self, samples: &[f32], sample_rate: u32) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }

        let resampled = resample_audio(samples, sample_rate, self.sample_rate())?;
        let duration_secs = resampled.len() as f32 / self.sample_rate() as f32;
        let channels = self.config.channels as usize;
        let buffer = Arc::new(Mutex::new(PlaybackBuffer::new(resampled)));
        let callback_buffer = Arc::clone(&buffer);

        let (done_tx, done_rx) = bounded::<()>(1);
        let (err_tx, err_rx) = bounded::<String>(1);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if callback_buffer.lock().fill(data, channels) {
                        let _ = done_tx.try_send(());
                    }
                },
                move |err| {
                    error!("Audio output stream error: {}", err);
                    let _ = err_tx.try_send(err.to_string());
                },
                None,
            )
            .map_err(|e| {
                Pdf2AudioError::AudioDeviceError(format!("Failed to build output stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            Pdf2AudioError::AudioDeviceError(format!("Failed to start output stream: {}", e))
        })?;

        info!("Started audio playback ({:.1}s)", duration_secs);

        select! {
            recv(done_rx) -> _ => {
                std::thread::sleep(DRAIN_TAIL);
            }
            recv(err_rx) -> msg => {
                return Err(Pdf2AudioError::AudioDeviceError(
                    msg.unwrap_or_else(|_| "Output stream closed".to_string()),
                ));
            }
        }

        drop(stream);
        debug!("Playback finished: {}", buffer.lock().is_finished());
        info!("Stopped audio playback");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_duplicates_across_channels() {
        let mut buffer = PlaybackBuffer::new(vec![0.1, 0.2]);
        let mut data = [9.0f32; 6];

        let finished = buffer.fill(&mut data, 2);

        assert!(finished);
        assert_eq!(data, [0.1, 0.1, 0.2, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn test_fill_across_several_callbacks() {
        let mut buffer = PlaybackBuffer::new(vec![0.1, 0.2, 0.3]);
        let mut data = [0.0f32; 2];

        assert!(!buffer.fill(&mut data, 1));
        assert_eq!(data, [0.1, 0.2]);

        assert!(buffer.fill(&mut data, 1));
        assert_eq!(data, [0.3, 0.0]);

        assert!(buffer.fill(&mut data, 1));
        assert_eq!(data, [0.0, 0.0]);
    }

    #[test]
    fn test_empty_buffer_is_finished() {
        let mut buffer = PlaybackBuffer::default();
        let mut data = [1.0f32; 4];
        assert!(buffer.fill(&mut data, 2));
        assert_eq!(data, [0.0; 4]);
    }

    #[test]
    fn test_audio_output_creation() {
        // No output device in most CI environments
        if let Ok(output) = AudioOutput::new() {
            assert!(output.sample_rate() > 0);
            assert!(output.channels() > 0);
        }
    }
}
