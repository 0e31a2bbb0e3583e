//! Per-agent step timing counters.
//!
//! Owned by a single agent and cleared at episode boundaries.

use std::fmt;
use std::time::Duration;

/// Aggregated step timings for the current episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceStats {
    pub avg_step_time: Duration,
    pub max_step_time: Duration,
    pub min_step_time: Duration,
    pub total_steps: u64,
}

impl fmt::Display for PerformanceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance ({} steps):", self.total_steps)?;
        writeln!(f, "  Avg step time: {:?}", self.avg_step_time)?;
        writeln!(f, "  Max step time: {:?}", self.max_step_time)?;
        write!(f, "  Min step time: {:?}", self.min_step_time)
    }
}

/// Running step-time aggregates; constant size however long the episode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    total_nanos: u128,
    max_step_time: Duration,
    min_step_time: Duration,
    total_steps: u64,
}

impl StepTimings {
    pub fn record(&mut self, elapsed: Duration) {
        if self.total_steps == 0 {
            self.max_step_time = elapsed;
            self.min_step_time = elapsed;
        } else {
            self.max_step_time = self.max_step_time.max(elapsed);
            self.min_step_time = self.min_step_time.min(elapsed);
        }
        self.total_nanos += elapsed.as_nanos();
        self.total_steps += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// `None` until at least one step has been recorded.
    pub fn stats(&self) -> Option<PerformanceStats> {
        if self.total_steps == 0 {
            return None;
        }
        let avg_nanos = self.total_nanos / u128::from(self.total_steps);
        Some(PerformanceStats {
            avg_step_time: Duration::from_nanos(u64::try_from(avg_nanos).unwrap_or(u64::MAX)),
            max_step_time: self.max_step_time,
            min_step_time: self.min_step_time,
            total_steps: self.total_steps,
        })
    }
}
