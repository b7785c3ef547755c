//! Recursive radix-2 decimation-in-time FFT.

// DFT/FFT math formulas have uppercase variables.
#![allow(non_snake_case)]

use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use std::f64::consts::PI;

use super::ComplexSpectrum;
use crate::error::SpectrumError;

/// Forward DFT of a real sequence whose length is a power of two.
///
/// Returns the interleaved spectrum (2N values). Fails with
/// `InvalidInputLength` for empty or non-power-of-two input without
/// allocating any output.
pub fn fft(samples: &[f64]) -> Result<ComplexSpectrum, SpectrumError> {
    let N = samples.len();
    if !N.is_power_of_two() {
        return Err(SpectrumError::InvalidInputLength { len: N });
    }

    let mut bins = vec![Complex::<f64>::zero(); N];
    decimate(samples, 0, 1, &mut bins);
    Ok(ComplexSpectrum::from_bins(&bins))
}

/// Transform the subsequence `samples[offset], samples[offset + stride], ...`
/// of length `out.len()` into `out`.
///
/// `out` is split in place: the even subsequence's transform lands in the
/// lower half, the odd one's in the upper half, and the butterfly combines
/// them index by index.
fn decimate(samples: &[f64], offset: usize, stride: usize, out: &mut [Complex<f64>]) {
    let N = out.len();
    if N == 1 {
        out[0] = Complex::new(samples[offset], 0.0);
        return;
    }

    let half = N / 2;
    let (even, odd) = out.split_at_mut(half);
    decimate(samples, offset, stride * 2, even);
    decimate(samples, offset + stride, stride * 2, odd);

    for k in 0..half {
        let twiddle = Complex::from_polar(1.0, -2.0 * PI * k as f64 / N as f64);
        let E = even[k];
        let O = twiddle * odd[k];
        even[k] = E + O;
        odd[k] = E - O;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    fn reference(samples: &[f64]) -> Vec<Complex<f64>> {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(samples.len());
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut buffer);
        buffer
    }

    fn sinusoid(n: usize, bin: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * bin as f64 * i as f64 / n as f64).cos())
            .collect()
    }

    #[test]
    fn test_output_is_twice_input_length() {
        for exp in 0..=11 {
            let n = 1usize << exp;
            let samples: Vec<f64> = (0..n).map(|i| (i % 7) as f64).collect();
            let spectrum = fft(&samples).unwrap();
            assert_eq!(spectrum.as_interleaved().len(), 2 * n);
            assert_eq!(spectrum.bin_count(), n);
        }
    }

    #[test]
    fn test_single_sample_is_its_own_spectrum() {
        let spectrum = fft(&[3.5]).unwrap();
        assert_eq!(spectrum.as_interleaved(), &[3.5, 0.0]);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert_eq!(
            fft(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err(),
            SpectrumError::InvalidInputLength { len: 5 }
        );
        assert_eq!(
            fft(&[]).unwrap_err(),
            SpectrumError::InvalidInputLength { len: 0 }
        );
    }

    #[test]
    fn test_constant_input_is_pure_dc() {
        let n = 64;
        let spectrum = fft(&vec![2.0; n]).unwrap();

        let dc = spectrum.bin(0).unwrap();
        assert!((dc.re - 2.0 * n as f64).abs() < 1e-9);
        assert!(dc.im.abs() < 1e-9);

        for k in 1..n {
            assert!(spectrum.bin(k).unwrap().norm() < 1e-9, "bin {} leaked", k);
        }
    }

    #[test]
    fn test_sinusoid_peaks_at_bin_and_mirror() {
        let n = 256;
        let f = 19;
        let spectrum = fft(&sinusoid(n, f, 1.0)).unwrap();
        let mags = spectrum.magnitudes();

        assert!((mags[f] - n as f64 / 2.0).abs() < 1e-6);
        assert!((mags[n - f] - n as f64 / 2.0).abs() < 1e-6);
        for (k, &m) in mags.iter().enumerate() {
            if k != f && k != n - f {
                assert!(m < 1e-6, "bin {} = {}", k, m);
            }
        }
    }

    #[test]
    fn test_matches_rustfft() {
        for &n in &[2usize, 8, 64, 1024, 2048] {
            let samples: Vec<f64> = (0..n)
                .map(|i| {
                    let t = i as f64 / n as f64;
                    (2.0 * PI * 3.0 * t).sin() + 0.5 * (2.0 * PI * 17.0 * t).cos() + 0.1
                })
                .collect();

            let ours = fft(&samples).unwrap();
            let expected = reference(&samples);
            let scale = expected.iter().map(|c| c.norm()).fold(0.0, f64::max);

            for (k, want) in expected.iter().enumerate() {
                let got = ours.bin(k).unwrap();
                assert!(
                    (got - want).norm() <= 1e-6 * scale,
                    "n={} bin {}: {} vs {}",
                    n,
                    k,
                    got,
                    want
                );
            }
        }
    }

    #[test]
    fn test_linearity() {
        let n = 128;
        let x: Vec<f64> = (0..n).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
        let y: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).sin()).collect();
        let (a, b) = (2.5, -0.75);

        let combined: Vec<f64> = x.iter().zip(&y).map(|(x, y)| a * x + b * y).collect();
        let lhs = fft(&combined).unwrap();
        let fx = fft(&x).unwrap();
        let fy = fft(&y).unwrap();

        for ((l, x), y) in lhs
            .as_interleaved()
            .iter()
            .zip(fx.as_interleaved())
            .zip(fy.as_interleaved())
        {
            assert!((l - (a * x + b * y)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let samples = sinusoid(32, 4, 3.0);
        let before = samples.clone();
        let _ = fft(&samples).unwrap();
        assert_eq!(samples, before);
    }
}
