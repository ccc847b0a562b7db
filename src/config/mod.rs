//! Pipeline configuration.
//!
//! - `algorithm`: Sampling, filtering, peak and gating constants
//! - `calibration`: SpO2 lookup table and ratio bounds
//!
//! Everything is a compile-time constant. Changing the sensor's optical or
//! electrical characteristics means recomputing the calibration table, not
//! passing parameters at runtime.

pub mod algorithm;
pub mod calibration;

// Re-export algorithm constants at config level for convenience
pub use algorithm::{
    ALGO_STEP,
    DC_MAX,
    DC_MIN,
    HAMMING_SUM,
    HAMMING_TAPS,
    HR_MAX_BPM,
    HR_MIN_BPM,
    INVALID_VALUE,
    MA_WIDTH,
    MAX_PEAK_DISTANCE,
    MAX_PEAKS,
    MAX_RATIOS,
    MIN_AMPLITUDE_ABS,
    MIN_AMPLITUDE_RATIO,
    MIN_PEAK_DISTANCE,
    MIN_VALLEY_GAP,
    RATIO_SCALE,
    SAMPLE_MASK,
    SAMPLE_RATE_HZ,
    VALLEY_SEARCH_RADIUS,
    WINDOW_LEN,
    WINDOW_SECONDS,
};
// Re-export calibration at config level for convenience
pub use calibration::{RATIO_MIN_EXCLUSIVE, SPO2_TABLE, SPO2_TABLE_SIZE, spo2_for_ratio};
