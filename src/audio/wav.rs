use crate::{Pdf2AudioError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;
use tracing::info;

/// Write mono f32 samples (range -1.0 to 1.0) as a 16-bit PCM WAV file,
/// replacing any existing file at `path`
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let io_error = |what: &str, e: hound::Error| {
        Pdf2AudioError::IOError(format!("Failed to {} {}: {}", what, path.display(), e))
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| io_error("create", e))?;
    for &sample in samples {
        writer
            .write_sample(to_pcm16(sample))
            .map_err(|e| io_error("write", e))?;
    }
    writer.finalize().map_err(|e| io_error("finalize", e))?;

    info!(
        "Wrote {} samples ({} Hz) to {}",
        samples.len(),
        sample_rate,
        path.display()
    );
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
