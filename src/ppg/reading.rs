//! Pipeline output types.

use crate::config::INVALID_VALUE;

/// Why a metric was marked invalid for this window.
///
/// These are signal-quality judgements, not errors: the caller should treat
/// them as "no reading this cycle" and keep supplying windows.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Rejection {
    /// Raw mean of a channel outside the plausible DC range (off-wrist or saturated).
    DcOutOfRange,
    /// IR pulsatile amplitude too small to trust.
    LowAmplitude,
    /// Fewer than two confirmed pulse peaks.
    TooFewPeaks,
    /// No peak-to-peak interval within the physiological distance bounds.
    NoValidInterval,
    /// Computed heart rate outside the physiological BPM range.
    HeartRateOutOfRange,
    /// Fewer than two valleys could be located.
    TooFewValleys,
    /// No valley pair produced a usable ratio.
    NoUsableRatio,
    /// Median ratio outside the calibration table range.
    RatioOutOfRange,
}

/// One metric of a reading: a value plus its validity flag.
///
/// An invalid estimate always carries [`INVALID_VALUE`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Estimate {
    value: i32,
    valid: bool,
}

impl Estimate {
    /// Invalid estimate holding the sentinel.
    pub const INVALID: Self = Self {
        value: INVALID_VALUE,
        valid: false,
    };

    /// Valid estimate.
    #[inline]
    pub const fn valid(value: i32) -> Self { Self { value, valid: true } }

    /// Raw value, [`INVALID_VALUE`] when invalid.
    #[inline]
    pub const fn value(&self) -> i32 { self.value }

    /// Whether the estimate passed its quality gates.
    #[inline]
    pub const fn is_valid(&self) -> bool { self.valid }

    /// The value if valid.
    #[inline]
    pub const fn get(&self) -> Option<i32> { if self.valid { Some(self.value) } else { None } }
}

impl Default for Estimate {
    fn default() -> Self { Self::INVALID }
}

impl From<Result<i32, Rejection>> for Estimate {
    fn from(result: Result<i32, Rejection>) -> Self {
        match result {
            Ok(value) => Self::valid(value),
            Err(_) => Self::INVALID,
        }
    }
}

/// Heart rate and SpO2 computed from one window.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Reading {
    /// Heart rate in beats per minute.
    pub heart_rate: Estimate,
    /// Oxygen saturation in percent.
    pub spo2: Estimate,
    /// Reason the heart rate is invalid, if it is.
    pub hr_rejection: Option<Rejection>,
    /// Reason SpO2 is invalid, if it is.
    pub spo2_rejection: Option<Rejection>,
}

impl Reading {
    /// Both metrics invalid, no reason recorded. Used when the caller broke the
    /// entry contract or before the first window has been processed.
    pub const INVALID: Self = Self {
        heart_rate: Estimate::INVALID,
        spo2: Estimate::INVALID,
        hr_rejection: None,
        spo2_rejection: None,
    };

    /// Both metrics rejected for the same reason.
    pub const fn rejected(reason: Rejection) -> Self {
        Self {
            heart_rate: Estimate::INVALID,
            spo2: Estimate::INVALID,
            hr_rejection: Some(reason),
            spo2_rejection: Some(reason),
        }
    }

    /// Build a reading from the per-metric stage results.
    pub fn from_stages(
        heart_rate: Result<i32, Rejection>,
        spo2: Result<i32, Rejection>,
    ) -> Self {
        Self {
            heart_rate: heart_rate.into(),
            spo2: spo2.into(),
            hr_rejection: heart_rate.err(),
            spo2_rejection: spo2.err(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_estimate_holds_sentinel() {
        assert_eq!(Estimate::INVALID.value(), -999);
        assert!(!Estimate::INVALID.is_valid());
        assert_eq!(Estimate::INVALID.get(), None);
        assert_eq!(Estimate::default(), Estimate::INVALID);
    }

    #[test]
    fn test_valid_estimate() {
        let e = Estimate::valid(72);
        assert!(e.is_valid());
        assert_eq!(e.value(), 72);
        assert_eq!(e.get(), Some(72));
    }

    #[test]
    fn test_estimate_from_rejection() {
        let e = Estimate::from(Err(Rejection::TooFewPeaks));
        assert_eq!(e, Estimate::INVALID);
    }

    #[test]
    fn test_rejected_reading() {
        let r = Reading::rejected(Rejection::DcOutOfRange);
        assert_eq!(r.heart_rate.value(), -999);
        assert_eq!(r.spo2.value(), -999);
        assert_eq!(r.hr_rejection, Some(Rejection::DcOutOfRange));
        assert_eq!(r.spo2_rejection, Some(Rejection::DcOutOfRange));
    }

    #[test]
    fn test_from_stages_independent_metrics() {
        let r = Reading::from_stages(Ok(72), Err(Rejection::TooFewValleys));
        assert_eq!(r.heart_rate.get(), Some(72));
        assert!(!r.spo2.is_valid());
        assert_eq!(r.hr_rejection, None);
        assert_eq!(r.spo2_rejection, Some(Rejection::TooFewValleys));
    }

    #[test]
    fn test_default_reading_is_invalid() {
        assert_eq!(Reading::default(), Reading::INVALID);
    }
}
