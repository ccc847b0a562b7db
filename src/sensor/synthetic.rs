//! Synthetic PPG source for demos and tests.
//!
//! Produces `dc + amplitude * sin(2π f t / fs)` per channel, both channels in
//! phase. Uses `micromath` so it runs on the target without `libm`.

use core::f32::consts::TAU;

use micromath::F32;

use super::Sample;
use crate::config::SAMPLE_RATE_HZ;

/// Default DC level of both channels in ADC counts.
const DEFAULT_DC: f32 = 50_000.0;

/// Default IR pulse amplitude.
const DEFAULT_IR_AMPLITUDE: f32 = 5_000.0;

/// Default RED pulse amplitude (0.66 of IR, ~98 % SpO2).
const DEFAULT_RED_AMPLITUDE: f32 = 3_300.0;

/// Sine generator stepping one sample per call.
#[derive(Clone, Debug)]
pub struct SyntheticPpg {
    phase: f32,
    step: f32,
    dc: f32,
    ir_amplitude: f32,
    red_amplitude: f32,
}

impl SyntheticPpg {
    /// Pulse at `heart_rate_bpm` with the default amplitudes.
    pub fn new(heart_rate_bpm: u32) -> Self {
        Self::with_amplitudes(heart_rate_bpm, DEFAULT_DC, DEFAULT_IR_AMPLITUDE, DEFAULT_RED_AMPLITUDE)
    }

    pub fn with_amplitudes(
        heart_rate_bpm: u32,
        dc: f32,
        ir_amplitude: f32,
        red_amplitude: f32,
    ) -> Self {
        let freq_hz = heart_rate_bpm as f32 / 60.0;
        Self {
            phase: 0.0,
            step: TAU * freq_hz / SAMPLE_RATE_HZ as f32,
            dc,
            ir_amplitude,
            red_amplitude,
        }
    }

    /// Next sample pair.
    pub fn next_sample(&mut self) -> Sample {
        let s = F32(self.phase).sin().0;
        // Keep the phase small so f32 precision does not degrade over time
        self.phase += self.step;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        Sample::new(
            to_counts(self.dc + self.red_amplitude * s),
            to_counts(self.dc + self.ir_amplitude * s),
        )
    }
}

impl Iterator for SyntheticPpg {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> { Some(self.next_sample()) }
}

#[inline]
fn to_counts(value: f32) -> u32 { (value + 0.5).max(0.0) as u32 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_dc() {
        let mut source = SyntheticPpg::new(72);
        let first = source.next_sample();
        assert!(first.ir.abs_diff(50_000) <= 2);
        assert!(first.red.abs_diff(50_000) <= 2);
    }

    #[test]
    fn test_stays_within_amplitude() {
        let source = SyntheticPpg::new(72);
        for s in source.take(1000) {
            assert!((44_990..=55_010).contains(&s.ir), "ir = {}", s.ir);
            assert!((46_690..=53_310).contains(&s.red), "red = {}", s.red);
        }
    }

    #[test]
    fn test_period_matches_rate() {
        // 60 bpm at 100 Hz: one period every 100 samples
        let source = SyntheticPpg::with_amplitudes(60, 10_000.0, 1_000.0, 500.0);
        let ir: std::vec::Vec<u32> = source.take(400).map(|s| s.ir).collect();
        let rising_crossings = ir
            .windows(2)
            .filter(|p| p[0] < 10_000 && p[1] >= 10_000)
            .count();
        assert!((3..=5).contains(&rising_crossings), "crossings = {rising_crossings}");
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let mut source = SyntheticPpg::with_amplitudes(60, 0.0, 1_000.0, 1_000.0);
        for _ in 0..100 {
            let s = source.next_sample();
            assert!(s.ir <= 1_001);
        }
    }
}
