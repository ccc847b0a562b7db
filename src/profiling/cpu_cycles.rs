//! Pipeline timing on the Cortex-M33 DWT cycle counter.
//!
//! A pipeline run has to finish within one cadence period (`ALGO_STEP`
//! samples, 250 ms at 100 Hz) or the sample channel backs up. Runs are
//! measured as a span of CYCCNT counts and compared against that budget.
//!
//! CYCCNT is 32 bits and wraps every ~28.6 s at 150 MHz, so a span taken with
//! `wrapping_sub` is exact for anything shorter than the cadence period. On
//! the host the counter reads as 0 and only the arithmetic is exercised.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{ALGO_STEP, SAMPLE_RATE_HZ};

/// Core clock assumed until [`init`] runs (stock RP2350).
const DEFAULT_FREQ_HZ: u32 = 150_000_000;

/// Fastest core clock accepted by [`init`].
const MAX_FREQ_HZ: u32 = 500_000_000;

/// Microseconds between two pipeline runs.
pub const CADENCE_PERIOD_US: u32 = (ALGO_STEP * 1_000_000 / SAMPLE_RATE_HZ) as u32;

/// Spans longer than one cadence period at the fastest clock are not a
/// pipeline run but a stale start stamp; they are reported as 0.
const MAX_SPAN_CYCLES: u32 = (MAX_FREQ_HZ as u64 * CADENCE_PERIOD_US as u64 / 1_000_000) as u32;

static CPU_FREQ_HZ: AtomicU32 = AtomicU32::new(DEFAULT_FREQ_HZ);

/// DWT and debug-control registers.
#[cfg(target_arch = "arm")]
mod dwt {
    pub const DEMCR: *mut u32 = 0xE000_EDFC as *mut u32;
    pub const DEMCR_TRCENA: u32 = 1 << 24;
    pub const CTRL: *mut u32 = 0xE000_1000 as *mut u32;
    pub const CTRL_CYCCNTENA: u32 = 1;
    pub const CYCCNT: *const u32 = 0xE000_1004 as *const u32;
}

/// Record the core clock and start the cycle counter.
///
/// Call after `embassy_rp::init()`. Calling it again only updates the clock.
pub fn init(freq_hz: u32) {
    CPU_FREQ_HZ.store(freq_hz.clamp(100_000_000, MAX_FREQ_HZ), Ordering::Relaxed);

    // Trace must be enabled before the counter
    #[cfg(target_arch = "arm")]
    unsafe {
        use core::ptr::{read_volatile, write_volatile};

        write_volatile(dwt::DEMCR, read_volatile(dwt::DEMCR) | dwt::DEMCR_TRCENA);
        write_volatile(dwt::CTRL, read_volatile(dwt::CTRL) | dwt::CTRL_CYCCNTENA);
    }
}

/// Current CYCCNT value. Always 0 on the host.
#[inline]
pub fn read() -> u32 {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::ptr::read_volatile(dwt::CYCCNT)
    }
    #[cfg(not(target_arch = "arm"))]
    {
        0
    }
}

/// Cycles from `start` (a previous [`read`]) until now.
#[inline]
pub fn cycles_since(start: u32) -> u32 { span(start, read()) }

/// Counter span between two stamps, 0 if longer than one cadence period.
#[inline]
pub fn span(
    start: u32,
    end: u32,
) -> u32 {
    match end.wrapping_sub(start) {
        cycles if cycles > MAX_SPAN_CYCLES => 0,
        cycles => cycles,
    }
}

/// Configured core clock in Hz.
#[inline]
pub fn freq_hz() -> u32 { CPU_FREQ_HZ.load(Ordering::Relaxed) }

/// Convert cycles to microseconds at the configured clock.
#[inline]
pub fn cycles_to_us(cycles: u32) -> u32 { cycles_to_us_at(cycles, freq_hz()) }

/// Convert cycles to microseconds at `freq_hz`. Returns 0 for a zero clock.
pub fn cycles_to_us_at(
    cycles: u32,
    freq_hz: u32,
) -> u32 {
    if freq_hz == 0 {
        return 0;
    }
    ((u64::from(cycles) * 1_000_000) / u64::from(freq_hz)) as u32
}

/// Share of the cadence period spent in the pipeline, in percent (0-100).
pub fn calc_load_percent(
    cycles_used: u32,
    period_us: u32,
    freq_hz: u32,
) -> u32 {
    if period_us == 0 || cycles_used == 0 {
        return 0;
    }

    let cycles_available = (u64::from(freq_hz) * u64::from(period_us)) / 1_000_000;
    if cycles_available == 0 {
        return 0;
    }

    let load = (u64::from(cycles_used) * 100) / cycles_available;
    load.min(100) as u32
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
