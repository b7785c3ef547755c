//! Analysis windows.

use std::f64::consts::PI;

use crate::params::WindowType;

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f64 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f64) / (size as f64 - 1.0)).cos())
}

/// Multiply `samples` by the window in place
pub fn apply_window(samples: &mut [f64], window: WindowType) {
    match window {
        WindowType::Rect => {}
        WindowType::Hann => {
            let size = samples.len();
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample *= hann_window(i, size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_rect_leaves_samples() {
        let mut samples = vec![1.0, 2.0, 3.0, 4.0];
        apply_window(&mut samples, WindowType::Rect);
        assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.0]);

        apply_window(&mut samples, WindowType::Hann);
        assert_eq!(samples[0], 0.0);
    }
}
