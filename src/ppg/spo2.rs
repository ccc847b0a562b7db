//! SpO2 lookup from the median ratio.

use super::Rejection;
use crate::config::spo2_for_ratio;
use crate::dsp::median;

/// Reduce the ratios to their median and map it through the calibration table.
///
/// `ratios` is sorted in place.
pub fn estimate_spo2(ratios: &mut [i32]) -> Result<i32, Rejection> {
    let ratio = median(ratios).ok_or(Rejection::NoUsableRatio)?;
    match spo2_for_ratio(ratio) {
        Some(spo2) => Ok(i32::from(spo2)),
        None => {
            ppg_debug!("ratio {} outside calibration table", ratio);
            Err(Rejection::RatioOutOfRange)
        }
    }
}
