//! Step guard: wall-clock budget, panic containment, and timing.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::{error, warn};

use super::clock::Clock;
use super::metrics::StepTimings;
use crate::action::Action;

/// Budget view handed to a running decision.
///
/// Lets multi-stage decisions bail out early once the budget is spent.
pub struct Deadline<'a> {
    clock: &'a dyn Clock,
    started: Duration,
    budget: Duration,
}

impl Deadline<'_> {
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started)
    }

    pub fn exceeded(&self) -> bool {
        self.elapsed() > self.budget
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}

/// Runs one decision per call and enforces the safe fallback.
///
/// The decision's action is replaced by [`Action::hold`] when the step ran
/// over budget or the decision panicked.
pub struct StepGuard {
    clock: Box<dyn Clock>,
    budget: Duration,
    timings: StepTimings,
}

impl StepGuard {
    pub fn new(clock: Box<dyn Clock>, budget: Duration) -> Self {
        Self {
            clock,
            budget,
            timings: StepTimings::default(),
        }
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    pub fn timings(&self) -> &StepTimings {
        &self.timings
    }

    pub fn reset(&mut self) {
        self.timings.reset();
    }

    /// Runs one guarded decision and records its wall-clock time.
    ///
    /// # Arguments
    ///
    /// * `agent_id` - Identifier attached to warnings about this step
    /// * `decide` - The decision; may poll the [`Deadline`] to give up early
    ///
    /// # Returns
    ///
    /// The decision's action, or [`Action::hold`] if it panicked or ran
    /// past the budget.
    pub fn run<F>(&mut self, agent_id: &str, decide: F) -> Action
    where
        F: FnOnce(&Deadline<'_>) -> Action,
    {
        let deadline = Deadline {
            clock: self.clock.as_ref(),
            started: self.clock.now(),
            budget: self.budget,
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| decide(&deadline)));
        let elapsed = deadline.elapsed();
        self.timings.record(elapsed);

        match outcome {
            Ok(action) if elapsed <= self.budget => action,
            Ok(_) => {
                warn!(
                    agent = agent_id,
                    elapsed_us = elapsed.as_micros() as u64,
                    budget_us = self.budget.as_micros() as u64,
                    "step over budget, holding position"
                );
                Action::hold()
            }
            Err(_) => {
                error!(agent = agent_id, "decision panicked, holding position");
                Action::hold()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, Command};
    use crate::agent::clock::ManualClock;
    use crate::types::Direction;

    fn busy_action() -> Action {
        let mut a = Action::hold();
        a.escort = Command::heading(ActionKind::Move, Direction::North);
        a
    }

    #[test]
    fn passes_action_within_budget() {
        let mut guard = StepGuard::new(Box::new(ManualClock::new()), Duration::from_millis(10));
        let action = guard.run("t", |_| busy_action());
        assert_eq!(action, busy_action());
        assert_eq!(guard.timings().total_steps(), 1);
    }

    #[test]
    fn over_budget_holds() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let mut guard = StepGuard::new(Box::new(clock), Duration::from_millis(10));
        let action = guard.run("t", |_| {
            handle.advance(Duration::from_millis(11));
            busy_action()
        });
        assert!(action.is_hold());
        let stats = guard.timings().stats().unwrap();
        assert_eq!(stats.max_step_time, Duration::from_millis(11));
    }

    #[test]
    fn exactly_on_budget_passes() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let mut guard = StepGuard::new(Box::new(clock), Duration::from_millis(10));
        let action = guard.run("t", |_| {
            handle.advance(Duration::from_millis(10));
            busy_action()
        });
        assert_eq!(action, busy_action());
    }

    #[test]
    fn deadline_reports_progress() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let mut guard = StepGuard::new(Box::new(clock), Duration::from_millis(10));
        guard.run("t", |deadline| {
            assert!(!deadline.exceeded());
            handle.advance(Duration::from_millis(20));
            assert!(deadline.exceeded());
            assert_eq!(deadline.budget(), Duration::from_millis(10));
            Action::hold()
        });
    }

    #[test]
    fn panic_is_contained() {
        let mut guard = StepGuard::new(Box::new(ManualClock::new()), Duration::from_millis(10));
        let action = guard.run("t", |_| panic!("boom"));
        assert!(action.is_hold());
        assert_eq!(guard.timings().total_steps(), 1);
    }
}
