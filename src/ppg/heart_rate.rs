//! Heart rate from peak-to-peak intervals.

use heapless::Vec;

use super::Rejection;
use crate::config::{HR_MAX_BPM, HR_MIN_BPM, MAX_PEAK_DISTANCE, MAX_PEAKS, MIN_PEAK_DISTANCE, SAMPLE_RATE_HZ};
use crate::dsp::median;

/// Estimate heart rate in BPM from ascending peak indices.
///
/// Intervals outside `[MIN_PEAK_DISTANCE, MAX_PEAK_DISTANCE]` are dropped,
/// the rest are reduced to their median and converted with truncating
/// division. A rate outside `[HR_MIN_BPM, HR_MAX_BPM]` is rejected even
/// though it was computed.
pub fn estimate_heart_rate(peaks: &[usize]) -> Result<i32, Rejection> {
    if peaks.len() < 2 {
        return Err(Rejection::TooFewPeaks);
    }

    let mut intervals: Vec<i32, MAX_PEAKS> = Vec::new();
    for pair in peaks.windows(2) {
        let interval = pair[1].saturating_sub(pair[0]);
        if (MIN_PEAK_DISTANCE..=MAX_PEAK_DISTANCE).contains(&interval) {
            intervals.push(interval as i32).ok();
        }
    }

    let interval = median(&mut intervals).ok_or(Rejection::NoValidInterval)?;
    if interval <= 0 {
        return Err(Rejection::NoValidInterval);
    }

    let bpm = (60 * SAMPLE_RATE_HZ as i32) / interval;
    if (HR_MIN_BPM as i32..=HR_MAX_BPM as i32).contains(&bpm) {
        Ok(bpm)
    } else {
        ppg_debug!("hr {} bpm outside physiological range", bpm);
        Err(Rejection::HeartRateOutOfRange)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_peaks() {
        assert_eq!(estimate_heart_rate(&[]), Err(Rejection::TooFewPeaks));
        assert_eq!(estimate_heart_rate(&[120]), Err(Rejection::TooFewPeaks));
    }

    #[test]
    fn test_median_interval_odd() {
        // Intervals 83, 83, 84 -> 83 -> 6000 / 83 = 72
        assert_eq!(estimate_heart_rate(&[10, 93, 176, 260]), Ok(72));
    }

    #[test]
    fn test_median_interval_even() {
        // Intervals 80, 80, 90, 90 -> (80 + 90) / 2 = 85 -> 70
        assert_eq!(estimate_heart_rate(&[0, 80, 160, 250, 340]), Ok(70));
    }

    #[test]
    fn test_out_of_bounds_intervals_are_ignored() {
        // 20 is too short and 160 too long; only 100 remains -> 60 bpm
        assert_eq!(estimate_heart_rate(&[0, 20, 120, 280]), Ok(60));
    }

    #[test]
    fn test_no_valid_interval() {
        assert_eq!(estimate_heart_rate(&[0, 160]), Err(Rejection::NoValidInterval));
        assert_eq!(estimate_heart_rate(&[0, 10, 20]), Err(Rejection::NoValidInterval));
    }

    #[test]
    fn test_rate_gate_upper_bound() {
        // Interval 33 is the minimum distance but 6000 / 33 = 181 > 180
        assert_eq!(estimate_heart_rate(&[0, 33]), Err(Rejection::HeartRateOutOfRange));
        // Interval 34 -> 176
        assert_eq!(estimate_heart_rate(&[0, 34]), Ok(176));
    }

    #[test]
    fn test_rate_gate_lower_bound() {
        // Interval 150 -> exactly 40 bpm
        assert_eq!(estimate_heart_rate(&[0, 150]), Ok(40));
    }

    #[test]
    fn test_result_within_bounds() {
        for interval in MIN_PEAK_DISTANCE..=MAX_PEAK_DISTANCE {
            if let Ok(bpm) = estimate_heart_rate(&[5, 5 + interval]) {
                assert!((HR_MIN_BPM as i32..=HR_MAX_BPM as i32).contains(&bpm));
            }
        }
    }
}
