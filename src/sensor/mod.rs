//! Sample plumbing between the optical front-end and the pipeline.
//!
//! - `sample`: FIFO record decode
//! - `window`: Circular buffer with the pipeline cadence
//! - `monitor`: Window plus processor, caches the latest reading
//! - `synthetic`: Sine-wave source for the demo task and tests

mod monitor;
mod sample;
mod synthetic;
mod window;

pub use monitor::PpgMonitor;
pub use sample::{FIFO_RECORD_LEN, Sample};
pub use synthetic::SyntheticPpg;
pub use window::SampleWindow;
