use crate::{Pdf2AudioError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Frames handed to rubato in one call
const BLOCK_FRAMES: usize = 1024;

/// Convert mono speech from the model's sample rate to the device's
///
/// Rates that already match are passed through untouched.
pub fn resample_audio(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == 0 || output_rate == 0 {
        return Err(Pdf2AudioError::AudioProcessingError(
            "Sample rates must be greater than 0".into(),
        ));
    }
    if input_rate == output_rate || input.is_empty() {
        return Ok(input.to_vec());
    }

    let ratio = output_rate as f64 / input_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, BLOCK_FRAMES, 1).map_err(|e| {
        Pdf2AudioError::AudioProcessingError(format!("Failed to create resampler: {}", e))
    })?;

    let expected_len = (input.len() as f64 * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(expected_len + BLOCK_FRAMES);

    // SincFixedIn takes exactly BLOCK_FRAMES per call; the last block is zero-padded
    for block in input.chunks(BLOCK_FRAMES) {
        let mut padded = block.to_vec();
        padded.resize(BLOCK_FRAMES, 0.0);

        let mut resampled = resampler.process(&[padded], None).map_err(|e| {
            Pdf2AudioError::AudioProcessingError(format!("Resampling failed: {}", e))
        })?;
        output.append(&mut resampled[0]);
    }

    output.truncate(expected_len);
    debug!(
        "Resampled {} Hz -> {} Hz: {} -> {} samples",
        input_rate,
        output_rate,
        input.len(),
        output.len()
    );

    Ok(output)
}
