//! Immediate and recurring execution of the journal pipeline

use crate::application::pipeline::EntryPipeline;
use crate::application::publish::PublishResult;
use crate::domain::ScheduleTime;
use crate::error::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{error, info};

/// Longest single sleep while waiting for a trigger, so wall-clock jumps
/// (suspend, NTP) are noticed.
const MAX_SLEEP: Duration = Duration::from_secs(60);

/// Source of time for the recurring loop
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Block until `deadline` has passed.
    fn sleep_until(&self, deadline: DateTime<Local>);
}

/// The real local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep_until(&self, deadline: DateTime<Local>) {
        loop {
            let remaining = match (deadline - Local::now()).to_std() {
                Ok(d) if !d.is_zero() => d,
                _ => return,
            };
            std::thread::sleep(remaining.min(MAX_SLEEP));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next trigger
    Idle,
    /// A pipeline invocation is in flight
    Running,
}

/// Outcome of one triggered cycle
#[derive(Debug)]
pub struct CycleReport {
    pub date: NaiveDate,
    pub outcome: Result<PublishResult>,
}

pub struct Scheduler<P, C> {
    pipeline: P,
    clock: C,
    state: Rc<Cell<SchedulerState>>,
}

impl<P: EntryPipeline, C: Clock> Scheduler<P, C> {
    pub fn new(pipeline: P, clock: C) -> Self {
        Scheduler {
            pipeline,
            clock,
            state: Rc::new(Cell::new(SchedulerState::Idle)),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state.get()
    }

    /// Shared view of the state that stays current while a pipeline
    /// invocation is in flight.
    pub fn state_watch(&self) -> Rc<Cell<SchedulerState>> {
        Rc::clone(&self.state)
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Run the pipeline once for `date` and hand the result to the caller.
    pub fn run_immediate(&mut self, date: NaiveDate) -> Result<PublishResult> {
        self.state.set(SchedulerState::Running);
        let result = self.pipeline.run(date);
        self.state.set(SchedulerState::Idle);
        result
    }

    /// Fire once a day at `at`, forever. Failures are logged and the loop
    /// waits for the next trigger.
    pub fn run_recurring(&mut self, at: ScheduleTime) {
        self.run_recurring_while(at, |_| true);
    }

    /// Like [`Scheduler::run_recurring`], stopping once `keep_going`
    /// returns false for a finished cycle. Returns the number of cycles run.
    pub fn run_recurring_while<F>(&mut self, at: ScheduleTime, mut keep_going: F) -> usize
    where
        F: FnMut(&CycleReport) -> bool,
    {
        let mut cycles = 0;
        loop {
            // Computed after the previous cycle finished, so triggers that
            // elapsed while running are skipped rather than queued.
            let next = at.next_local_after(self.clock.now());
            info!("Next journal entry scheduled for {}", next.format("%Y-%m-%d %H:%M %Z"));
            self.clock.sleep_until(next);

            let report = self.run_cycle(self.clock.now().date_naive());
            cycles += 1;
            if !keep_going(&report) {
                return cycles;
            }
        }
    }

    fn run_cycle(&mut self, date: NaiveDate) -> CycleReport {
        let outcome = self.run_immediate(date);
        match &outcome {
            Ok(result) => info!(
                "Journal entry for {} committed as {}",
                date.format("%Y-%m-%d"),
                result.commit.sha
            ),
            Err(e) => error!(
                "Journal cycle for {} failed: {}",
                date.format("%Y-%m-%d"),
                e
            ),
        }
        CycleReport { date, outcome }
    }
}
