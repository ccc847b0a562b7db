//! PPG library - heart rate and SpO2 estimation for MAX30102-class optical sensors.
//!
//! This library contains the signal-processing core and the sample plumbing
//! around it. Everything here is platform independent and can be tested on the
//! host machine. The binary (`main.rs`) uses this library and adds the
//! embedded-specific code.
//!
//! - [`config`]: Sampling, filter and gating constants plus the SpO2 table
//! - [`dsp`]: Integer filters, threshold estimation and peak detection
//! - [`ppg`]: Heart rate, valley, ratio and SpO2 stages and the pipeline entry
//! - [`sensor`]: FIFO sample decode, sliding window and monitor
//! - [`profiling`]: Cycle counter and memory helpers
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
mod log;

pub mod config;
pub mod dsp;
pub mod error;
pub mod ppg;
pub mod profiling;
pub mod sensor;

// Re-export commonly used items
pub use error::{Channel, PpgError};
pub use ppg::{Estimate, PpgProcessor, Reading, Rejection, calc_hr_spo2};
pub use sensor::{PpgMonitor, Sample, SampleWindow};
