//! Peak normalization guard.
//!
//! Amplitude-changing stages (clipping with gain, echo summation) can push a
//! buffer outside ±1.0. Every such stage finishes by dividing the buffer by
//! its peak plus a small epsilon:
//!
//! ```text
//! y[n] = x[n] / (max|x| + ε)
//! ```
//!
//! The epsilon keeps an all-zero buffer all-zero instead of dividing by zero.

/// Epsilon added to the peak before dividing.
pub const NORMALIZE_EPSILON: f32 = 1e-9;

/// Maximum absolute sample value, 0.0 for an empty slice.
#[inline]
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Peak-normalize `samples` in place.
///
/// After this call `max|x|` is 1.0 (within `NORMALIZE_EPSILON`), or the
/// buffer is still silent if it was silent.
///
/// # Example
///
/// ```rust
/// use fxchain_core::normalize;
///
/// let mut samples = vec![0.25, -0.5, 0.1];
/// normalize(&mut samples);
/// assert!((samples[1] + 1.0).abs() < 1e-6);
/// ```
pub fn normalize(samples: &mut [f32]) {
    let scale = 1.0 / (peak(samples) + NORMALIZE_EPSILON);
    for sample in samples.iter_mut() {
        *sample *= scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_of_empty_is_zero() {
        assert_eq!(peak(&[]), 0.0);
    }

    #[test]
    fn peak_uses_absolute_value() {
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
    }

    #[test]
    fn normalize_scales_to_unity_peak() {
        let mut samples = vec![0.2, -0.4, 0.1];
        normalize(&mut samples);
        assert!((peak(&samples) - 1.0).abs() < 1e-6);
        assert!((samples[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn normalize_silence_stays_silent() {
        let mut samples = vec![0.0; 64];
        normalize(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn normalize_already_normalized_is_noop() {
        let mut samples = vec![1.0, -0.5, 0.25];
        let before = samples.clone();
        normalize(&mut samples);
        for (a, b) in samples.iter().zip(&before) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn normalize_attenuates_hot_signal() {
        let mut samples = vec![4.0, -2.0];
        normalize(&mut samples);
        assert!((samples[0] - 1.0).abs() < 1e-6);
        assert!((samples[1] + 0.5).abs() < 1e-6);
    }
}
