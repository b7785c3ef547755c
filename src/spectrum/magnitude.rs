//! Complex spectrum to per-bin magnitude.

use crate::error::SpectrumError;

/// Modulus of every (re, im) pair of an interleaved spectrum.
pub fn magnitudes(interleaved: &[f64]) -> Result<Vec<f64>, SpectrumError> {
    if interleaved.len() % 2 != 0 {
        return Err(SpectrumError::InvalidSpectrumLength {
            len: interleaved.len(),
        });
    }

    Ok(interleaved
        .chunks_exact(2)
        .map(|pair| (pair[0] * pair[0] + pair[1] * pair[1]).sqrt())
        .collect())
}
