//! Window-to-reading pipeline.
//!
//! ```text
//! raw IR/RED ──► DC gate ──► DC removal ──► amplitude gate ──► MA4
//!                                                               │
//!                      ┌──── derivative (diff, avg, Hamming) ◄──┘
//!                      ▼
//!           threshold ──► peaks ──► heart rate
//!                           │
//!                           ▼
//!                        valleys ──► ratios (MA4 of raw IR/RED) ──► SpO2
//! ```
//!
//! Every intermediate signal lives in [`Scratch`], owned by the
//! [`PpgProcessor`]. Each stage fully overwrites the region it later reads, so
//! nothing from the previous window can leak into the next one.

use super::heart_rate::estimate_heart_rate;
use super::ratio::compute_ratios;
use super::spo2::estimate_spo2;
use super::valley::locate_valleys;
use super::{Reading, Rejection};
use crate::config::{DC_MAX, DC_MIN, MA_WIDTH, MIN_AMPLITUDE_ABS, MIN_AMPLITUDE_RATIO, MIN_PEAK_DISTANCE, WINDOW_LEN};
use crate::dsp::{channel_mean, derivative_signal, find_peaks, mean_abs, moving_average, moving_average_in_place, peak_to_peak, remove_dc};
use crate::error::{Channel, PpgError};

// =============================================================================
// Scratch Storage
// =============================================================================

/// Intermediate signals for one window.
pub struct Scratch {
    /// DC-removed, then moving-averaged IR.
    filtered: [i32; WINDOW_LEN],
    /// First difference and its 2-point average.
    slope: [i32; WINDOW_LEN],
    /// Kernel-smoothed, negated derivative.
    derivative: [i32; WINDOW_LEN],
    /// Moving average of raw IR for the ratio stage.
    ir_smooth: [i32; WINDOW_LEN],
    /// Moving average of raw RED for the ratio stage.
    red_smooth: [i32; WINDOW_LEN],
}

impl Scratch {
    pub const fn new() -> Self {
        Self {
            filtered: [0; WINDOW_LEN],
            slope: [0; WINDOW_LEN],
            derivative: [0; WINDOW_LEN],
            ir_smooth: [0; WINDOW_LEN],
            red_smooth: [0; WINDOW_LEN],
        }
    }
}

impl Default for Scratch {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Processor
// =============================================================================

/// Heart rate and SpO2 estimator with its own scratch storage.
///
/// One processor per sensor. The scratch is about 10 KB, so on the target the
/// processor is best placed in a `static` rather than on a task stack.
pub struct PpgProcessor {
    scratch: Scratch,
}

impl PpgProcessor {
    pub const fn new() -> Self {
        Self {
            scratch: Scratch::new(),
        }
    }

    /// Process one window of chronologically ordered samples.
    ///
    /// Both channels must hold at least `WINDOW_LEN` samples; only the first
    /// `WINDOW_LEN` are used. A short or empty channel is a caller error and
    /// nothing is computed. Poor signal quality is not an error: the reading
    /// comes back with the affected metrics invalid.
    pub fn process(
        &mut self,
        ir: &[u32],
        red: &[u32],
    ) -> Result<Reading, PpgError> {
        let ir = window_of(ir, Channel::Ir)?;
        let red = window_of(red, Channel::Red)?;
        let Scratch {
            filtered,
            slope,
            derivative,
            ir_smooth,
            red_smooth,
        } = &mut self.scratch;

        // Off-skin or saturated front-end
        let ir_mean = channel_mean(ir);
        let red_mean = channel_mean(red);
        if !dc_in_range(ir_mean) || !dc_in_range(red_mean) {
            ppg_debug!("dc out of range: ir={} red={}", ir_mean, red_mean);
            return Ok(Reading::rejected(Rejection::DcOutOfRange));
        }

        let len = remove_dc(ir, ir_mean, &mut filtered[..]);
        let amplitude = peak_to_peak(&filtered[..len]);
        if amplitude < MIN_AMPLITUDE_ABS || (amplitude as u32) < ir_mean / MIN_AMPLITUDE_RATIO {
            ppg_debug!("ir amplitude {} too low for mean {}", amplitude, ir_mean);
            return Ok(Reading::rejected(Rejection::LowAmplitude));
        }

        let len = moving_average_in_place(&mut filtered[..len], MA_WIDTH);
        let derivative_len = derivative_signal(&filtered[..len], &mut slope[..], &mut derivative[..]);
        let derivative = &derivative[..derivative_len];

        let threshold = mean_abs(derivative);
        let peaks = find_peaks(derivative, threshold, MIN_PEAK_DISTANCE);
        let heart_rate = estimate_heart_rate(&peaks);

        let valleys = locate_valleys(&peaks, ir);
        let spo2 = if valleys.len() < 2 {
            Err(Rejection::TooFewValleys)
        } else {
            let ir_len = moving_average(ir, &mut ir_smooth[..], MA_WIDTH);
            let red_len = moving_average(red, &mut red_smooth[..], MA_WIDTH);
            let mut ratios = compute_ratios(&valleys, &ir_smooth[..ir_len], &red_smooth[..red_len]);
            estimate_spo2(&mut ratios)
        };

        Ok(Reading::from_stages(heart_rate, spo2))
    }
}

impl Default for PpgProcessor {
    fn default() -> Self { Self::new() }
}

/// One-shot entry point with stack-allocated scratch.
///
/// Needs roughly 10 KB of stack. Use a long-lived [`PpgProcessor`] where that
/// is too much.
pub fn calc_hr_spo2(
    ir: &[u32],
    red: &[u32],
) -> Result<Reading, PpgError> {
    PpgProcessor::new().process(ir, red)
}

fn window_of(
    samples: &[u32],
    channel: Channel,
) -> Result<&[u32], PpgError> {
    samples.get(..WINDOW_LEN).ok_or_else(|| {
        ppg_warn!("{} window too short: {} samples", channel.name(), samples.len());
        PpgError::InsufficientSamples {
            channel,
            required: WINDOW_LEN,
            actual: samples.len(),
        }
    })
}

#[inline]
fn dc_in_range(mean: u32) -> bool { (DC_MIN..=DC_MAX).contains(&mean) }

// =============================================================================
// Unit Tests
// =============================================================================
