//! Memory profiling utilities for RP2350.
//!
//! # Memory Layout (RP2350)
//!
//! - RAM: 512KB at 0x20000000 (striped across SRAM0-7)
//!
//! # Stack
//!
//! Embassy uses a single main stack growing down from the top of RAM, so
//! usage is the distance from the current MSP to `RAM_END`. On the host the
//! stack pointer reads as 0 and only the static footprint is meaningful.

use core::mem::size_of;

use crate::ppg::Scratch;
use crate::sensor::{PpgMonitor, SampleWindow};

const RAM_START: u32 = 0x2000_0000;
const RAM_SIZE: u32 = 512 * 1024;
const RAM_END: u32 = RAM_START + RAM_SIZE;

/// Pipeline scratch signals.
pub const SCRATCH_SIZE: usize = size_of::<Scratch>();

/// Raw sample ring buffer.
pub const WINDOW_SIZE: usize = size_of::<SampleWindow>();

/// Complete monitor: ring buffer, linearised copy and scratch.
pub const MONITOR_SIZE: usize = size_of::<PpgMonitor>();

/// Memory statistics snapshot.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct MemoryStats {
    /// Current stack pointer value (MSP register).
    pub stack_ptr: u32,
    /// Stack usage in bytes.
    pub stack_used: u32,
    /// RAM left for the stack after static allocations (approximate).
    pub stack_total: u32,
    /// Known static RAM usage (monitor plus an estimate for everything else).
    pub static_ram: u32,
    /// Total RAM available.
    pub ram_total: u32,
}

impl MemoryStats {
    /// Collect current memory statistics.
    ///
    /// The stack total is an estimate; there is no linker symbol access.
    pub fn collect() -> Self {
        let stack_ptr = stack_pointer();
        let stack_used = if stack_ptr == 0 { 0 } else { RAM_END.saturating_sub(stack_ptr) };

        // Monitor plus ~32KB for executor, channels and other statics
        let static_estimate = MONITOR_SIZE as u32 + 32 * 1024;
        let stack_total = RAM_SIZE.saturating_sub(static_estimate);

        Self {
            stack_ptr,
            stack_used,
            stack_total,
            static_ram: static_estimate,
            ram_total: RAM_SIZE,
        }
    }

    /// Stack usage as a percentage.
    pub fn stack_percent(&self) -> u32 {
        if self.stack_total > 0 {
            (self.stack_used * 100) / self.stack_total
        } else {
            0
        }
    }

    /// Static RAM usage as a percentage of total.
    pub fn static_percent(&self) -> u32 {
        if self.ram_total > 0 {
            (self.static_ram * 100) / self.ram_total
        } else {
            0
        }
    }
}

#[inline]
fn stack_pointer() -> u32 {
    #[cfg(target_arch = "arm")]
    {
        cortex_m::register::msp::read()
    }
    #[cfg(not(target_arch = "arm"))]
    {
        0
    }
}

// =============================================================================
// Tests
// =============================================================================
