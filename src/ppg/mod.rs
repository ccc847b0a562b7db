//! Heart rate and SpO2 estimation.
//!
//! - `pipeline`: [`PpgProcessor`] and the [`calc_hr_spo2`] entry point
//! - `heart_rate`: Peak intervals to BPM
//! - `valley`: Valley refinement in the raw IR signal
//! - `ratio`: Red/IR ratio-of-ratios per pulse
//! - `spo2`: Median ratio through the calibration table
//! - `reading`: [`Reading`], [`Estimate`] and [`Rejection`]
//!
//! The stages are exposed individually so they can be tested and profiled in
//! isolation; normal callers only need the processor.

pub mod heart_rate;
pub mod pipeline;
pub mod ratio;
pub mod reading;
pub mod spo2;
pub mod valley;

pub use heart_rate::estimate_heart_rate;
pub use pipeline::{PpgProcessor, Scratch, calc_hr_spo2};
pub use ratio::{RatioList, compute_ratios};
pub use reading::{Estimate, Reading, Rejection};
pub use spo2::estimate_spo2;
pub use valley::{ValleyList, locate_valleys};
