//! Sampling, filtering and gating constants.
//!
//! # Compile-Time Validation
//!
//! Derived values (window length, peak distances) are computed as `const` and
//! each group carries `const` assertions, so a misconfigured bound fails the
//! build instead of silently producing garbage readings.

// =============================================================================
// Sampling Configuration
// =============================================================================

/// Sensor sampling rate in Hz.
pub const SAMPLE_RATE_HZ: usize = 100;

/// Length of one processing window in seconds.
pub const WINDOW_SECONDS: usize = 5;

/// Number of samples per channel in one processing window (5 s at 100 Hz).
pub const WINDOW_LEN: usize = SAMPLE_RATE_HZ * WINDOW_SECONDS;

/// Number of new samples between two pipeline runs (0.25 s at 100 Hz).
pub const ALGO_STEP: usize = 25;

/// ADC samples are 18 bits wide.
pub const SAMPLE_MASK: u32 = 0x0003_FFFF;

const _: () = assert!(ALGO_STEP > 0 && ALGO_STEP <= WINDOW_LEN);

// =============================================================================
// Result Sentinel
// =============================================================================

/// Value reported for a metric that failed its quality gate.
/// Never a valid physiological value.
pub const INVALID_VALUE: i32 = -999;

// =============================================================================
// Filter Configuration
// =============================================================================

/// Moving-average width used for both smoothing passes.
pub const MA_WIDTH: usize = 4;

/// Hamming-like smoothing kernel applied to the derivative (512 * hamming(5)).
pub const HAMMING_TAPS: [i32; 5] = [41, 276, 512, 276, 41];

/// Sum of `HAMMING_TAPS`, the kernel normaliser.
pub const HAMMING_SUM: i32 = {
    let mut sum = 0;
    let mut i = 0;
    while i < HAMMING_TAPS.len() {
        sum += HAMMING_TAPS[i];
        i += 1;
    }
    sum
};

const _: () = assert!(HAMMING_SUM == 1146);
const _: () = assert!(HAMMING_TAPS.len() % 2 == 1);
const _: () = assert!(MA_WIDTH > 0 && MA_WIDTH < WINDOW_LEN);

// =============================================================================
// Signal Quality Gates
// =============================================================================

/// Lowest plausible raw DC level. Below this the sensor is not on skin.
pub const DC_MIN: u32 = 1_000;

/// Highest plausible raw DC level. Above this the front-end is saturated.
pub const DC_MAX: u32 = 200_000;

/// Minimum IR peak-to-peak amplitude in ADC counts.
pub const MIN_AMPLITUDE_ABS: i32 = 500;

/// Minimum IR peak-to-peak amplitude relative to the IR mean (mean / 50 = 2 %).
pub const MIN_AMPLITUDE_RATIO: u32 = 50;

const _: () = assert!(DC_MIN < DC_MAX);
const _: () = assert!(DC_MAX <= SAMPLE_MASK);

// =============================================================================
// Heart Rate Bounds
// =============================================================================

/// Lowest heart rate reported as valid.
pub const HR_MIN_BPM: usize = 40;

/// Highest heart rate reported as valid.
pub const HR_MAX_BPM: usize = 180;

/// Closest two pulses may be, in samples (one beat at `HR_MAX_BPM`).
pub const MIN_PEAK_DISTANCE: usize = {
    let d = (SAMPLE_RATE_HZ * 60) / HR_MAX_BPM;
    if d < WINDOW_LEN - 1 { d } else { WINDOW_LEN - 1 }
};

/// Furthest apart two consecutive pulses may be, in samples (one beat at `HR_MIN_BPM`).
pub const MAX_PEAK_DISTANCE: usize = (SAMPLE_RATE_HZ * 60) / HR_MIN_BPM;

const _: () = assert!(HR_MIN_BPM < HR_MAX_BPM);
const _: () = assert!(MIN_PEAK_DISTANCE < MAX_PEAK_DISTANCE);

// =============================================================================
// Peak / Valley / Ratio Configuration
// =============================================================================

/// Maximum number of peak candidates kept per window.
pub const MAX_PEAKS: usize = 15;

/// Maximum number of ratio-of-ratios values kept per window.
pub const MAX_RATIOS: usize = 5;

/// Half-width of the raw IR valley search around each nominal valley.
pub const VALLEY_SEARCH_RADIUS: usize = 5;

/// Consecutive valleys must be more than this many samples apart to yield a ratio.
pub const MIN_VALLEY_GAP: usize = 10;

/// Fixed-point multiplier applied to the ratio so it indexes the SpO2 table.
pub const RATIO_SCALE: i64 = 20;

// At most one peak per MIN_PEAK_DISTANCE fits in a window.
const _: () = assert!(MAX_PEAKS >= WINDOW_LEN / MIN_PEAK_DISTANCE);
const _: () = assert!(MIN_VALLEY_GAP < MIN_PEAK_DISTANCE);

// =============================================================================
// Unit Tests
// =============================================================================
