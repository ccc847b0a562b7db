//! Sliding window of the most recent samples.
//!
//! Samples arrive one at a time from the sensor task and are stored in a pair
//! of circular buffers. The pipeline wants a chronological slice, so
//! [`SampleWindow::linearize`] copies the buffer out oldest-first before each
//! run.

use super::Sample;
use crate::config::{ALGO_STEP, WINDOW_LEN};

// =============================================================================
// Sample Window Structure
// =============================================================================

/// Circular buffer of the last `WINDOW_LEN` samples per channel.
pub struct SampleWindow {
    ir: [u32; WINDOW_LEN],
    red: [u32; WINDOW_LEN],
    /// Next slot to write.
    index: usize,
    /// Valid samples, saturates at `WINDOW_LEN`.
    count: usize,
    /// Samples since the pipeline last became due.
    since_due: usize,
}

impl SampleWindow {
    pub const fn new() -> Self {
        Self {
            ir: [0; WINDOW_LEN],
            red: [0; WINDOW_LEN],
            index: 0,
            count: 0,
            since_due: 0,
        }
    }

    /// Store a sample, overwriting the oldest one once full.
    ///
    /// Returns `true` when the pipeline is due: the moment the window first
    /// fills, then every `ALGO_STEP` samples.
    pub fn push(
        &mut self,
        sample: Sample,
    ) -> bool {
        self.ir[self.index] = sample.ir;
        self.red[self.index] = sample.red;
        self.index = (self.index + 1) % WINDOW_LEN;
        if self.count < WINDOW_LEN {
            self.count += 1;
        }

        self.since_due += 1;
        if self.is_full() && self.since_due >= ALGO_STEP {
            self.since_due = 0;
            true
        } else {
            false
        }
    }

    /// Copy the window into `ir` and `red`, oldest sample first.
    ///
    /// Returns the number of samples written, limited by the shorter output.
    pub fn linearize(
        &self,
        ir: &mut [u32],
        red: &mut [u32],
    ) -> usize {
        let oldest = (self.index + WINDOW_LEN - self.count) % WINDOW_LEN;
        let n = self.count.min(ir.len()).min(red.len());
        for i in 0..n {
            let src = (oldest + i) % WINDOW_LEN;
            ir[i] = self.ir[src];
            red[i] = self.red[src];
        }
        n
    }

    #[inline]
    pub const fn len(&self) -> usize { self.count }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    #[inline]
    pub const fn is_full(&self) -> bool { self.count == WINDOW_LEN }

    /// Drop all samples, e.g. after the finger was lifted.
    pub fn reset(&mut self) {
        self.index = 0;
        self.count = 0;
        self.since_due = 0;
    }
}

impl Default for SampleWindow {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
