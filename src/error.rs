//! Caller contract violations.
//!
//! Only argument errors are errors. A window that fails a signal-quality gate
//! still produces a [`Reading`](crate::ppg::Reading) with `valid = false`; see
//! [`Rejection`](crate::ppg::Rejection).

use core::fmt;

/// Optical channel of the sensor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Channel {
    /// Infrared LED channel.
    Ir,
    /// Red LED channel.
    Red,
}

impl Channel {
    /// Short lowercase name for log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ir => "ir",
            Self::Red => "red",
        }
    }
}

/// Hard error returned by the pipeline entry points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PpgError {
    /// A channel holds fewer samples than one processing window.
    /// An empty slice (the counterpart of a missing buffer) lands here as well.
    InsufficientSamples {
        channel: Channel,
        required: usize,
        actual: usize,
    },
}

impl PpgError {
    /// Legacy integer status code of the sensor layer (0 = ok, -1 = parameter error).
    pub const fn status(&self) -> i32 {
        match self {
            Self::InsufficientSamples { .. } => -1,
        }
    }
}

impl fmt::Display for PpgError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::InsufficientSamples {
                channel,
                required,
                actual,
            } => write!(f, "{} window too short: {} of {} samples", channel.name(), actual, required),
        }
    }
}

impl core::error::Error for PpgError {}

// =============================================================================
// Unit Tests
// =============================================================================
