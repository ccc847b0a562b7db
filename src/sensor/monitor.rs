//! Continuous heart rate and SpO2 monitoring from a sample stream.

use super::{Sample, SampleWindow};
use crate::config::WINDOW_LEN;
use crate::ppg::{PpgProcessor, Reading};

/// Sample window, linearisation buffers and processor for one sensor.
///
/// Roughly 26 KB, so firmware keeps it in a `static`.
pub struct PpgMonitor {
    window: SampleWindow,
    ir: [u32; WINDOW_LEN],
    red: [u32; WINDOW_LEN],
    processor: PpgProcessor,
    last: Reading,
}

impl PpgMonitor {
    pub const fn new() -> Self {
        Self {
            window: SampleWindow::new(),
            ir: [0; WINDOW_LEN],
            red: [0; WINDOW_LEN],
            processor: PpgProcessor::new(),
            last: Reading::INVALID,
        }
    }

    /// Add one sample. Returns a fresh reading whenever the pipeline ran.
    pub fn push(
        &mut self,
        sample: Sample,
    ) -> Option<Reading> {
        if !self.window.push(sample) {
            return None;
        }

        let n = self.window.linearize(&mut self.ir, &mut self.red);
        let reading = match self.processor.process(&self.ir[..n], &self.red[..n]) {
            Ok(reading) => reading,
            Err(err) => {
                ppg_warn!("pipeline refused window: {}", err);
                Reading::INVALID
            }
        };
        self.last = reading;
        Some(reading)
    }

    /// Most recent reading, invalid before the first full window.
    #[inline]
    pub const fn reading(&self) -> Reading { self.last }

    /// Last valid heart rate in BPM, 0 when there is none.
    pub fn heart_rate_bpm(&self) -> u32 {
        match self.last.heart_rate.get() {
            Some(bpm) => bpm as u32,
            None => 0,
        }
    }

    /// Last valid SpO2 in percent.
    pub fn spo2_percent(&self) -> Option<u8> { self.last.spo2.get().map(|v| v as u8) }

    /// Samples currently buffered.
    #[inline]
    pub const fn buffered(&self) -> usize { self.window.len() }

    /// Forget all samples and the cached reading.
    pub fn reset(&mut self) {
        self.window.reset();
        self.last = Reading::INVALID;
    }
}

impl Default for PpgMonitor {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALGO_STEP;
    use crate::ppg::{Rejection, calc_hr_spo2};
    use crate::sensor::SyntheticPpg;

    #[test]
    fn test_no_reading_before_full_window() {
        let mut monitor = PpgMonitor::new();
        let mut source = SyntheticPpg::new(72);
        for _ in 0..WINDOW_LEN - 1 {
            assert!(monitor.push(source.next_sample()).is_none());
        }
        assert_eq!(monitor.reading(), Reading::INVALID);
        assert_eq!(monitor.heart_rate_bpm(), 0);
        assert_eq!(monitor.spo2_percent(), None);
        assert_eq!(monitor.buffered(), WINDOW_LEN - 1);
    }

    #[test]
    fn test_synthetic_stream() {
        let mut monitor = PpgMonitor::new();
        let mut source = SyntheticPpg::new(72);
        let mut readings = 0;
        for _ in 0..WINDOW_LEN + 4 * ALGO_STEP {
            if monitor.push(source.next_sample()).is_some() {
                readings += 1;
            }
        }
        assert_eq!(readings, 5);

        let hr = monitor.heart_rate_bpm();
        assert!((69..=75).contains(&hr), "hr = {hr}");
        let spo2 = monitor.spo2_percent().expect("spo2 should be valid");
        assert!((95..=100).contains(&spo2), "spo2 = {spo2}");
    }

    #[test]
    fn test_reading_matches_direct_call() {
        let mut monitor = PpgMonitor::new();
        let mut source = SyntheticPpg::new(72);
        let mut ir = std::vec::Vec::new();
        let mut red = std::vec::Vec::new();
        let mut reading = None;
        for _ in 0..WINDOW_LEN {
            let s = source.next_sample();
            ir.push(s.ir);
            red.push(s.red);
            reading = monitor.push(s);
        }
        assert_eq!(reading, Some(calc_hr_spo2(&ir, &red).unwrap()));
    }

    #[test]
    fn test_finger_lifted() {
        let mut monitor = PpgMonitor::new();
        let mut source = SyntheticPpg::new(72);
        for _ in 0..WINDOW_LEN {
            monitor.push(source.next_sample());
        }
        // Ambient light only
        let mut last = None;
        for _ in 0..WINDOW_LEN {
            last = monitor.push(Sample::new(200, 300)).or(last);
        }
        let reading = last.expect("pipeline should have run");
        assert_eq!(reading.hr_rejection, Some(Rejection::DcOutOfRange));
        assert_eq!(monitor.heart_rate_bpm(), 0);
    }

    #[test]
    fn test_reset() {
        let mut monitor = PpgMonitor::new();
        let mut source = SyntheticPpg::new(72);
        for _ in 0..WINDOW_LEN {
            monitor.push(source.next_sample());
        }
        monitor.reset();
        assert_eq!(monitor.buffered(), 0);
        assert_eq!(monitor.reading(), Reading::INVALID);
    }
}
