//! Deferred task queue driven by the sim clock.
//!
//! The host scheduling model is a single cooperative thread: deferred work
//! is described as data, queued with a run-at time, and drained once per
//! update tick. A drained task executes as its own atomic step; nothing ever
//! observes a task half-run.

/// Work that runs later, described as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Rebuild one node's target index.
    RebuildIndex { node_id: u32 },
}

#[derive(Debug, Clone)]
struct Scheduled {
    run_at: f64,
    task: DeferredTask,
}

/// Tasks waiting for their run-at time.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<Scheduled>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run once the clock reaches `now + delay`.
    pub fn call_delayed(&mut self, now: f64, delay: f64, task: DeferredTask) {
        self.tasks.push(Scheduled {
            run_at: now + delay,
            task,
        });
    }

    /// Remove and return every task due at-or-before `now`, in the order
    /// they were queued.
    pub fn drain_due(&mut self, now: f64) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());
        for scheduled in self.tasks.drain(..) {
            if scheduled.run_at <= now {
                due.push(scheduled.task);
            } else {
                waiting.push(scheduled);
            }
        }
        self.tasks = waiting;
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
