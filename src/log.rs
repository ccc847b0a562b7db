//! Logging macros for library code.
//!
//! On the ARM target these forward to `defmt`, which the firmware binary wires
//! to RTT. On the host (tests, the demo binary) they compile to nothing but
//! still evaluate their arguments by reference so values that are only logged
//! do not trigger unused-variable warnings.
//!
//! # Usage
//!
//! ```ignore
//! ppg_debug!("hr rejected: {} peaks", peak_count);
//! ppg_warn!("window too short: {} < {}", actual, required);
//! ```

/// Log a message at Debug level.
macro_rules! ppg_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        defmt::debug!($fmt $(, $arg)*);
        #[cfg(not(target_arch = "arm"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

/// Log a message at Warn level.
macro_rules! ppg_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        defmt::warn!($fmt $(, $arg)*);
        #[cfg(not(target_arch = "arm"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}
