use rand::prelude::*;
use rustc_hash::FxHashSet;

use crate::{
    core::{MlqCore, Pid, Priority, ProcessSpec, Ticks},
    error::SchedError,
    scheduler::Scheduler,
};

/// Initial process list of a simulation, validated from raw numeric entry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: Vec<ProcessSpec>,
    pids: FxHashSet<Pid>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one descriptor as typed by a user. The priority range is checked
    /// later, against the queue count of the scheduler it is loaded into.
    pub fn register(
        &mut self,
        pid: Pid,
        arrival_time: i64,
        burst_time: i64,
        priority: i64,
    ) -> Result<(), SchedError> {
        if self.pids.contains(&pid) {
            return Err(SchedError::DuplicatePid(pid));
        }
        let arrival = Ticks::try_from(arrival_time)
            .map_err(|_| SchedError::NegativeArrival { pid, arrival_time })?;
        let burst = match Ticks::try_from(burst_time) {
            Ok(burst) if burst > 0 => burst,
            _ => return Err(SchedError::NonPositiveBurst { pid, burst_time }),
        };
        let level = Priority::try_from(priority)
            .map_err(|_| SchedError::NegativePriority { pid, priority })?;

        self.insert(ProcessSpec {
            pid,
            arrival_time: arrival,
            burst_time: burst,
            priority: level,
        });
        Ok(())
    }

    /// `count` processes, pids `0..count`, all sharing the same parameters.
    pub fn uniform(
        count: u64,
        arrival_time: i64,
        burst_time: i64,
        priority: i64,
    ) -> Result<Self, SchedError> {
        let mut registry = Self::new();
        for pid in 0..count {
            registry.register(pid, arrival_time, burst_time, priority)?;
        }
        Ok(registry)
    }

    /// Seeded random workload: arrivals in `0..=max_arrival`, bursts in `1..=max_burst`,
    /// priorities spread over `num_queues` levels.
    pub fn random(
        count: u64,
        num_queues: usize,
        max_arrival: Ticks,
        max_burst: Ticks,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut registry = Self::new();

        for pid in 0..count {
            registry.insert(ProcessSpec {
                pid,
                arrival_time: rng.random_range(0..=max_arrival),
                burst_time: rng.random_range(1..=max_burst.max(1)),
                priority: rng.random_range(0..num_queues.max(1)),
            });
        }

        registry
    }

    fn insert(&mut self, spec: ProcessSpec) {
        self.pids.insert(spec.pid);
        self.specs.push(spec);
    }

    pub fn specs(&self) -> &[ProcessSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Adds every descriptor in registration order, stopping at the first rejection.
    pub fn load_into<S: Scheduler>(&self, core: &mut MlqCore<S>) -> Result<(), SchedError> {
        for spec in &self.specs {
            core.add_process(*spec)?;
        }
        Ok(())
    }
}
