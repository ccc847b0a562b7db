//! Integer signal-processing primitives.
//!
//! - `smoothing`: Channel mean, DC removal, peak-to-peak and moving averages
//! - `derivative`: First difference, Hamming-kernel smoothing and threshold
//! - `peaks`: Above-threshold peak scan and amplitude-biased proximity pruning
//! - `stats`: Median of small fixed-capacity lists
//!
//! All arithmetic is integer with truncating division so results are
//! bit-reproducible on every target. Functions write into caller-provided
//! slices and return the number of valid output samples.

pub mod derivative;
pub mod peaks;
pub mod smoothing;
pub mod stats;

pub use derivative::{derivative_signal, first_difference, hamming_smooth, mean_abs};
pub use peaks::{PeakList, find_peaks, peaks_above_height, remove_close_peaks};
pub use smoothing::{channel_mean, moving_average, moving_average_in_place, peak_to_peak, remove_dc};
pub use stats::median;
