//! Red/IR ratio-of-ratios between consecutive valleys.
//!
//! For each valley pair the systolic maximum of each twice-smoothed channel is
//! located, the DC baseline under it is interpolated linearly between the two
//! valley values, and the AC component is the maximum minus that baseline.
//!
//! `ratio = (red_ac * ir_max * RATIO_SCALE) / (ir_ac * red_max)`
//!
//! The products overflow 32 bits for real signals, so they run in `i64`.

use heapless::Vec;

use crate::config::{MAX_RATIOS, MIN_VALLEY_GAP, RATIO_SCALE};

/// Fixed-point ratios in valley order, at most `MAX_RATIOS`.
pub type RatioList = Vec<i32, MAX_RATIOS>;

/// AC and DC of one channel over one pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pulse {
    ac: i64,
    dc_max: i64,
}

/// Compute one ratio per usable valley pair.
///
/// Pairs at most `MIN_VALLEY_GAP` apart, pairs reaching past either channel,
/// and pairs with a non-positive AC, DC or product are skipped rather than
/// recorded. Stops once `MAX_RATIOS` values are held.
pub fn compute_ratios(
    valleys: &[usize],
    ir_smooth: &[i32],
    red_smooth: &[i32],
) -> RatioList {
    let len = ir_smooth.len().min(red_smooth.len());
    let mut ratios = RatioList::new();

    for pair in valleys.windows(2) {
        if ratios.is_full() {
            break;
        }
        let (v0, v1) = (pair[0], pair[1]);
        if v1 <= v0 + MIN_VALLEY_GAP || v1 >= len {
            continue;
        }

        let ir = pulse_between(ir_smooth, v0, v1);
        let red = pulse_between(red_smooth, v0, v1);
        if let Some(ratio) = ratio_of_ratios(ir, red) {
            ratios.push(ratio).ok();
        }
    }

    ratios
}

/// Maximum over `[v0, v1)` and its height above the interpolated baseline.
fn pulse_between(
    signal: &[i32],
    v0: usize,
    v1: usize,
) -> Pulse {
    let mut max_idx = v0;
    for i in v0 + 1..v1 {
        if signal[i] > signal[max_idx] {
            max_idx = i;
        }
    }

    let left = i64::from(signal[v0]);
    let right = i64::from(signal[v1]);
    let baseline = left + (right - left) * (max_idx - v0) as i64 / (v1 - v0) as i64;
    let max = i64::from(signal[max_idx]);

    Pulse {
        ac: max - baseline,
        dc_max: max,
    }
}

fn ratio_of_ratios(
    ir: Pulse,
    red: Pulse,
) -> Option<i32> {
    if ir.ac <= 0 || red.ac <= 0 || ir.dc_max <= 0 || red.dc_max <= 0 {
        return None;
    }
    let numerator = red.ac * ir.dc_max * RATIO_SCALE;
    let denominator = ir.ac * red.dc_max;
    if numerator <= 0 || denominator <= 0 {
        return None;
    }
    i32::try_from(numerator / denominator).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
