//! Peak detection on the smoothed derivative.
//!
//! Two passes:
//!
//! 1. [`peaks_above_height`] scans left to right for local maxima above the
//!    threshold, resolving plateaus to their last sample.
//! 2. [`remove_close_peaks`] keeps the strongest peak of every cluster closer
//!    than the minimum pulse distance. Ordering by amplitude first means a
//!    stronger late peak wins over a weaker early one in the same cluster,
//!    which left-to-right distance gating would get wrong.

use heapless::Vec;

use crate::config::MAX_PEAKS;

/// Ascending peak indices, at most `MAX_PEAKS`.
pub type PeakList = Vec<usize, MAX_PEAKS>;

/// Find local maxima strictly above `min_height`.
///
/// A sample qualifies if it is greater than its left neighbour and not
/// smaller than its right neighbour. Equal neighbours form a plateau that
/// must drop afterwards; its last sample is recorded and the scan resumes
/// past the drop. Recording stops once `MAX_PEAKS` candidates are held.
pub fn peaks_above_height(
    signal: &[i32],
    min_height: i32,
) -> PeakList {
    let mut peaks = PeakList::new();
    let n = signal.len();
    let mut i = 1;

    while i + 1 < n {
        if signal[i] > min_height && signal[i] > signal[i - 1] {
            // Find the plateau width (1 for a sharp peak)
            let mut width = 1;
            while i + width < n && signal[i + width] == signal[i] {
                width += 1;
            }
            if i + width < n && signal[i] > signal[i + width] {
                if peaks.push(i + width - 1).is_err() {
                    break;
                }
                i += width + 1;
            } else {
                i += width;
            }
        } else {
            i += 1;
        }
    }

    peaks
}

/// Drop peaks that sit closer than `min_distance` to a stronger peak.
///
/// Peaks are visited from the largest amplitude down (equal amplitudes keep
/// the earlier index first); each is kept only if it is at least
/// `min_distance` away from every peak already kept. Survivors are returned
/// to ascending index order.
pub fn remove_close_peaks(
    peaks: &mut PeakList,
    signal: &[i32],
    min_distance: usize,
) {
    let mut by_height = peaks.clone();
    by_height.sort_unstable_by(|&a, &b| signal[b].cmp(&signal[a]).then(a.cmp(&b)));

    peaks.clear();
    for loc in by_height {
        if peaks.iter().all(|&kept| kept.abs_diff(loc) >= min_distance) {
            peaks.push(loc).ok();
        }
    }

    peaks.sort_unstable();
}

/// Above-height scan followed by proximity pruning.
pub fn find_peaks(
    signal: &[i32],
    min_height: i32,
    min_distance: usize,
) -> PeakList {
    let mut peaks = peaks_above_height(signal, min_height);
    remove_close_peaks(&mut peaks, signal, min_distance);
    peaks
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharp_peaks() {
        let peaks = peaks_above_height(&[0, 5, 3, 7, 2], 1);
        assert_eq!(peaks.as_slice(), &[1, 3]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let peaks = peaks_above_height(&[0, 5, 0, 6, 0], 5);
        assert_eq!(peaks.as_slice(), &[3]);
    }

    #[test]
    fn test_plateau_takes_last_sample() {
        let peaks = peaks_above_height(&[0, 5, 5, 5, 1, 0], 1);
        assert_eq!(peaks.as_slice(), &[3]);
    }

    #[test]
    fn test_plateau_running_off_the_end_is_ignored() {
        let peaks = peaks_above_height(&[0, 5, 5, 5], 1);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_plateau_followed_by_rise_is_not_a_peak() {
        let peaks = peaks_above_height(&[0, 5, 5, 8, 0], 1);
        assert_eq!(peaks.as_slice(), &[3]);
    }

    #[test]
    fn test_edges_are_never_peaks() {
        let peaks = peaks_above_height(&[9, 1, 1, 9], 0);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_short_signals() {
        assert!(peaks_above_height(&[], 0).is_empty());
        assert!(peaks_above_height(&[5], 0).is_empty());
        assert!(peaks_above_height(&[1, 5], 0).is_empty());
    }

    #[test]
    fn test_candidate_cap() {
        let mut signal = [0i32; 100];
        for i in (1..100).step_by(4) {
            signal[i] = 10;
        }
        let peaks = peaks_above_height(&signal, 1);
        assert_eq!(peaks.len(), MAX_PEAKS);
        assert_eq!(peaks[0], 1);
        assert_eq!(peaks[MAX_PEAKS - 1], 1 + 4 * (MAX_PEAKS - 1));
    }

    #[test]
    fn test_pruning_keeps_stronger_later_peak() {
        let mut signal = [0i32; 60];
        signal[10] = 100;
        signal[20] = 200;
        signal[50] = 150;
        let peaks = find_peaks(&signal, 1, 33);
        // 20 beats 10; 50 is 30 from 20, still too close.
        assert_eq!(peaks.as_slice(), &[20]);
    }

    #[test]
    fn test_pruning_keeps_distant_peaks() {
        let mut signal = [0i32; 120];
        signal[10] = 100;
        signal[20] = 200;
        signal[60] = 150;
        signal[100] = 120;
        let peaks = find_peaks(&signal, 1, 33);
        assert_eq!(peaks.as_slice(), &[20, 60, 100]);
    }

    #[test]
    fn test_pruning_equal_heights_prefers_earlier() {
        let mut signal = [0i32; 40];
        signal[10] = 100;
        signal[20] = 100;
        let peaks = find_peaks(&signal, 1, 33);
        assert_eq!(peaks.as_slice(), &[10]);
    }

    #[test]
    fn test_pruning_distance_is_inclusive() {
        let mut signal = [0i32; 60];
        signal[10] = 100;
        signal[43] = 90;
        let peaks = find_peaks(&signal, 1, 33);
        assert_eq!(peaks.as_slice(), &[10, 43]);
    }

    #[test]
    fn test_pruning_result_is_ascending() {
        let mut signal = [0i32; 200];
        signal[150] = 300;
        signal[20] = 100;
        signal[90] = 200;
        let peaks = find_peaks(&signal, 1, 33);
        assert_eq!(peaks.as_slice(), &[20, 90, 150]);
    }
}
