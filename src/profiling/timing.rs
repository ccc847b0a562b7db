//! Running statistics over pipeline execution times.

/// Cycle counts of pipeline runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct PipelineTiming {
    /// Cycles of the most recent run.
    pub last: u32,
    /// Longest run seen so far.
    pub max: u32,
    /// Sum over all counted runs.
    total: u64,
    /// Number of runs counted.
    runs: u32,
}

impl PipelineTiming {
    pub const fn new() -> Self {
        Self {
            last: 0,
            max: 0,
            total: 0,
            runs: 0,
        }
    }

    /// Record one run. Zero-cycle samples are measurement errors and skipped.
    pub fn record(
        &mut self,
        cycles: u32,
    ) {
        if cycles == 0 {
            return;
        }
        self.last = cycles;
        self.max = self.max.max(cycles);
        self.total = self.total.saturating_add(u64::from(cycles));
        self.runs = self.runs.saturating_add(1);
    }

    /// Mean cycles per run, 0 before the first run.
    pub fn average(&self) -> u32 {
        if self.runs == 0 {
            0
        } else {
            (self.total / u64::from(self.runs)) as u32
        }
    }

    /// Number of runs recorded.
    #[inline]
    pub const fn runs(&self) -> u32 { self.runs }

    pub fn reset(&mut self) { *self = Self::new(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timing() {
        let t = PipelineTiming::new();
        assert_eq!(t.average(), 0);
        assert_eq!(t.runs(), 0);
        assert_eq!(t, PipelineTiming::default());
    }

    #[test]
    fn test_record_tracks_last_max_average() {
        let mut t = PipelineTiming::new();
        t.record(300);
        t.record(500);
        t.record(100);
        assert_eq!(t.last, 100);
        assert_eq!(t.max, 500);
        assert_eq!(t.average(), 300);
        assert_eq!(t.runs(), 3);
    }

    #[test]
    fn test_zero_sample_skipped() {
        let mut t = PipelineTiming::new();
        t.record(400);
        t.record(0);
        assert_eq!(t.last, 400);
        assert_eq!(t.runs(), 1);
    }

    #[test]
    fn test_reset() {
        let mut t = PipelineTiming::new();
        t.record(400);
        t.reset();
        assert_eq!(t, PipelineTiming::new());
    }
}
