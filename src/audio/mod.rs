#[cfg(feature = "audio-io")]
pub mod output;
pub mod resampler;
pub mod wav;

#[cfg(feature = "audio-io")]
pub use output::{AudioOutput, PlaybackBuffer};
pub use resampler::resample_audio;
pub use wav::write_wav;
