use super::{
    event::{ProcessRow, SchedEvent},
    observer::{InvariantChecker, Observer, Recorder},
    state::{Pid, Priority, ProcessSpec, SchedCtx, Ticks},
};
use crate::{
    config::SchedConfig,
    error::SchedError,
    scheduler::{EnqueueFlags, MLQ_ENQ_ADMIT, MLQ_ENQ_AGED, MLQ_ENQ_REQUEUE, Scheduler},
};

pub struct MlqCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    checker: InvariantChecker,
}

impl<S: Scheduler> MlqCore<S> {
    pub fn new(config: SchedConfig) -> Result<Self, SchedError> {
        config.validate()?;
        let mut ctx = SchedCtx::new(&config);
        let scheduler = S::init(&mut ctx);
        debug_assert_eq!(
            ctx.level_dsq_ids.len(),
            config.num_queues,
            "Scheduler::init must create one DSQ per level"
        );
        Ok(Self {
            ctx,
            scheduler,
            checker: InvariantChecker::new(),
        })
    }

    /// Admits a process into the queue named by its priority.
    /// Nothing is touched when the descriptor is rejected.
    pub fn add_process(&mut self, spec: ProcessSpec) -> Result<(), SchedError> {
        if spec.priority >= self.ctx.num_queues {
            return Err(SchedError::PriorityOutOfRange {
                priority: spec.priority,
                num_queues: self.ctx.num_queues,
            });
        }
        if spec.burst_time == 0 {
            return Err(SchedError::NonPositiveBurst {
                pid: spec.pid,
                burst_time: 0,
            });
        }
        if self.ctx.contains_process(spec.pid) {
            return Err(SchedError::DuplicatePid(spec.pid));
        }

        let pid = self.ctx.create_process(spec);
        self.scheduler.enqueue(&mut self.ctx, pid, MLQ_ENQ_ADMIT);
        log::debug!(
            "admitted P{pid} arrival={} burst={} level={}",
            spec.arrival_time,
            spec.burst_time,
            spec.priority
        );
        Ok(())
    }

    /// Drains every queue and returns the trace. A drained scheduler yields nothing.
    pub fn run(&mut self) -> Vec<SchedEvent> {
        let mut recorder = Recorder::new();
        self.run_with(&mut recorder);
        recorder.into_events()
    }

    /// Drains every queue, handing each event to `observer` as it happens.
    /// Returns the number of dispatches performed.
    pub fn run_with<O: Observer + ?Sized>(&mut self, observer: &mut O) -> u64 {
        if !self.ctx.any_queued() {
            return 0;
        }

        log::info!(
            "run start: clock={} levels={} quantum={}",
            self.ctx.clock,
            self.ctx.num_queues,
            self.ctx.time_quantum
        );
        let mut dispatches = 0;
        let mut passes = 0u64;
        while self.ctx.any_queued() {
            dispatches += self.pass(observer);
            passes += 1;
        }
        self.scheduler.exit(&mut self.ctx);
        log::info!(
            "run end: clock={} dispatches={dispatches} passes={passes}",
            self.ctx.clock
        );
        dispatches
    }

    // One ascending sweep over all levels
    fn pass<O: Observer + ?Sized>(&mut self, observer: &mut O) -> u64 {
        let mut dispatches = 0;
        for level in 0..self.ctx.num_queues {
            if self.dispatch_level(level, observer) {
                dispatches += 1;
            }
        }
        dispatches
    }

    // Return true if a process was picked from `level`
    fn dispatch_level<O: Observer + ?Sized>(&mut self, level: Priority, observer: &mut O) -> bool {
        if self.ctx.level_is_empty(level) {
            return false;
        }
        let Some(pid) = self.scheduler.dispatch(&mut self.ctx, level) else {
            return false;
        };
        self.ctx.set_running(pid);

        let clock = self.ctx.clock;
        let last_level = self.ctx.num_queues - 1;
        let level_drained = self.ctx.level_is_empty(level);

        let priority = self.ctx.process(pid).priority;
        log::trace!("clock={clock} running P{pid} priority={priority}");
        observer.notify(&SchedEvent::Step {
            clock,
            pid,
            priority,
        });

        // In its own block to avoid double-mutable-borrow
        let (aged, remaining) = {
            let process = self.ctx.process_mut(pid);
            process.dispatches += 1;
            // A process picked before its arrival has not waited
            process.waiting_time += clock.saturating_sub(process.arrival_time);

            let aged = level_drained && process.priority < last_level;
            if aged {
                process.priority += 1;
            }
            (aged, process.burst_time)
        };
        if aged {
            log::debug!("level {level} drained, P{pid} moves to level {}", level + 1);
        }

        let quantum = self.ctx.time_quantum;
        if remaining > quantum {
            self.ctx.advance_time(quantum);
            let now = self.ctx.clock;
            let process = self.ctx.process_mut(pid);
            process.burst_time -= quantum;
            process.arrival_time = now;

            let mut flags: EnqueueFlags = MLQ_ENQ_REQUEUE;
            if aged {
                flags |= MLQ_ENQ_AGED;
            }
            self.scheduler.enqueue(&mut self.ctx, pid, flags);
        } else {
            self.ctx.advance_time(remaining);
            self.ctx.mark_finished(pid);
            log::debug!("P{pid} finished at clock={}", self.ctx.clock);
        }

        observer.notify(&SchedEvent::Row(self.ctx.process(pid).row()));
        self.checker.check(&self.ctx);
        true
    }

    /// Latest state of every admitted process, ordered by pid.
    pub fn records(&self) -> Vec<ProcessRow> {
        let mut rows: Vec<ProcessRow> = self.ctx.processes.iter().map(|p| p.row()).collect();
        rows.sort_by_key(|row| row.pid);
        rows
    }

    pub fn all_processes_finished(&self) -> bool {
        self.ctx.processes.iter().all(|p| p.is_finished())
    }

    pub fn now(&self) -> Ticks {
        self.ctx.clock
    }

    pub fn queued(&self, level: Priority) -> usize {
        self.ctx.level_len(level)
    }

    pub fn process_count(&self) -> usize {
        self.ctx.processes.len()
    }

    pub fn dispatch_count(&self, pid: Pid) -> Option<u64> {
        self.ctx
            .contains_process(pid)
            .then(|| self.ctx.process(pid).dispatches)
    }

    pub fn checker(&self) -> &InvariantChecker {
        &self.checker
    }
}
