//! Derivative smoothing and adaptive threshold.
//!
//! The derivative is negated after kernel smoothing. A falling raw IR level
//! means more absorbing blood in the optical path, so peaks of the negated
//! derivative mark the sharp upstroke of each pulse.

use crate::config::{HAMMING_SUM, HAMMING_TAPS};
use crate::dsp::smoothing::moving_average_in_place;

/// First difference `out[k] = input[k + 1] - input[k]`. Returns `input.len() - 1`.
pub fn first_difference(
    input: &[i32],
    out: &mut [i32],
) -> usize {
    if input.len() < 2 {
        return 0;
    }
    let len = (input.len() - 1).min(out.len());
    for (dst, pair) in out[..len].iter_mut().zip(input.windows(2)) {
        *dst = pair[1] - pair[0];
    }
    len
}

/// Convolve with the 5-tap Hamming kernel, normalise by the tap sum and negate.
///
/// Returns `input.len() - taps + 1` outputs.
pub fn hamming_smooth(
    input: &[i32],
    out: &mut [i32],
) -> usize {
    let taps = HAMMING_TAPS.len();
    if input.len() < taps {
        return 0;
    }
    let len = (input.len() - taps + 1).min(out.len());
    for (dst, window) in out[..len].iter_mut().zip(input.windows(taps)) {
        let sum: i64 = window
            .iter()
            .zip(HAMMING_TAPS.iter())
            .map(|(&x, &w)| i64::from(x) * i64::from(w))
            .sum();
        *dst = -(sum / i64::from(HAMMING_SUM)) as i32;
    }
    len
}

/// Full derivative chain used for peak detection.
///
/// `smoothed` -> first difference -> 2-point average -> Hamming kernel.
/// `slope` is scratch for the intermediate signal; the result lands in `out`.
/// Returns the number of valid samples in `out`.
pub fn derivative_signal(
    smoothed: &[i32],
    slope: &mut [i32],
    out: &mut [i32],
) -> usize {
    let slope_len = first_difference(smoothed, slope);
    let slope_len = moving_average_in_place(&mut slope[..slope_len], 2);
    hamming_smooth(&slope[..slope_len], out)
}

/// Mean absolute value, the minimum peak height for the detector.
pub fn mean_abs(signal: &[i32]) -> i32 {
    if signal.is_empty() {
        return 0;
    }
    let sum: i64 = signal.iter().map(|&v| i64::from(v).abs()).sum();
    (sum / signal.len() as i64) as i32
}

// =============================================================================
// Unit Tests
// =============================================================================
