//! Valley location in the raw IR signal.

use heapless::Vec;

use crate::config::{HAMMING_TAPS, MAX_PEAKS, VALLEY_SEARCH_RADIUS};

/// Ascending valley indices into the raw IR window, at most `MAX_PEAKS`.
pub type ValleyList = Vec<usize, MAX_PEAKS>;

/// Offset from a derivative peak to its nominal valley (half the kernel width).
const VALLEY_OFFSET: usize = HAMMING_TAPS.len() / 2;

/// Refine each derivative peak into the true IR minimum nearby.
///
/// The nominal valley `m = peak + VALLEY_OFFSET` is searched over
/// `m - VALLEY_SEARCH_RADIUS ..= m + VALLEY_SEARCH_RADIUS` in `raw_ir` for the
/// first strict minimum. A peak whose search window would run outside
/// `raw_ir` yields no valley; it is dropped, not replaced.
pub fn locate_valleys(
    peaks: &[usize],
    raw_ir: &[u32],
) -> ValleyList {
    let mut valleys = ValleyList::new();

    for &peak in peaks {
        let m = peak + VALLEY_OFFSET;
        if m < VALLEY_SEARCH_RADIUS || m + VALLEY_SEARCH_RADIUS >= raw_ir.len() {
            continue;
        }

        let start = m - VALLEY_SEARCH_RADIUS;
        let end = m + VALLEY_SEARCH_RADIUS;
        let mut min_idx = start;
        for i in start + 1..=end {
            if raw_ir[i] < raw_ir[min_idx] {
                min_idx = i;
            }
        }
        valleys.push(min_idx).ok();
    }

    valleys
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WINDOW_LEN;

    fn flat_with_dip(dip_at: usize) -> [u32; 100] {
        let mut ir = [50_000u32; 100];
        ir[dip_at] = 40_000;
        ir
    }

    #[test]
    fn test_finds_minimum_within_radius() {
        let ir = flat_with_dip(26);
        // peak 20 -> nominal 22 -> search 17..=27
        let valleys = locate_valleys(&[20], &ir);
        assert_eq!(valleys.as_slice(), &[26]);
    }

    #[test]
    fn test_minimum_outside_radius_is_not_found() {
        let ir = flat_with_dip(40);
        let valleys = locate_valleys(&[20], &ir);
        // Flat window: first sample of the search range wins
        assert_eq!(valleys.as_slice(), &[17]);
    }

    #[test]
    fn test_first_of_equal_minima_wins() {
        let mut ir = [50_000u32; 100];
        ir[19] = 100;
        ir[25] = 100;
        let valleys = locate_valleys(&[20], &ir);
        assert_eq!(valleys.as_slice(), &[19]);
    }

    #[test]
    fn test_window_leaving_left_edge_is_dropped() {
        let ir = flat_with_dip(3);
        // peak 2 -> nominal 4 -> would start at -1
        let valleys = locate_valleys(&[2, 40], &ir);
        assert_eq!(valleys.len(), 1);
    }

    #[test]
    fn test_window_leaving_right_edge_is_dropped() {
        let ir = flat_with_dip(95);
        // peak 93 -> nominal 95 -> would end at 100 == buffer length
        let valleys = locate_valleys(&[40, 93], &ir);
        assert_eq!(valleys.len(), 1);
        // peak 92 -> nominal 94 -> ends at 99, the last raw sample
        let valleys = locate_valleys(&[40, 92], &ir);
        assert_eq!(valleys.as_slice(), &[37, 95]);
    }

    #[test]
    fn test_valley_near_end_of_full_window() {
        // Search 482..=492 lies inside the raw window even though it passes
        // the end of the derivative signal
        let ir = [50_000u32; WINDOW_LEN];
        let valleys = locate_valleys(&[40, 485], &ir);
        assert_eq!(valleys.as_slice(), &[37, 482]);
    }

    #[test]
    fn test_last_searchable_peak_in_full_window() {
        let mut ir = [50_000u32; WINDOW_LEN];
        ir[WINDOW_LEN - 1] = 40_000;
        // nominal 494 -> search 489..=499
        let valleys = locate_valleys(&[WINDOW_LEN - 8], &ir);
        assert_eq!(valleys.as_slice(), &[WINDOW_LEN - 1]);
        assert!(locate_valleys(&[WINDOW_LEN - 7], &ir).is_empty());
    }

    #[test]
    fn test_no_peaks_no_valleys() {
        let ir = [50_000u32; 100];
        assert!(locate_valleys(&[], &ir).is_empty());
    }
}
