//! Profiling utilities.
//!
//! - `cpu_cycles`: DWT cycle counter spans against the pipeline cadence budget
//! - `timing`: Last/max/average pipeline run times
//! - `memory`: Stack usage and static footprint of the monitor

mod cpu_cycles;
mod memory;
mod timing;

pub use cpu_cycles::{CADENCE_PERIOD_US, calc_load_percent, cycles_since, cycles_to_us, cycles_to_us_at, freq_hz, init, read, span};
pub use memory::{MONITOR_SIZE, MemoryStats, SCRATCH_SIZE, WINDOW_SIZE};
pub use timing::PipelineTiming;
