use super::{
    record::ProcessRecord,
    registry::Registry,
    stats::{self, Summary},
};
use crate::{
    config::SchedConfig,
    core::{MlqCore, Observer, Recorder, SchedEvent},
    error::SchedError,
    scheduler::Scheduler,
};

/// Full outcome of one simulation run.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub events: Vec<SchedEvent>,
    pub records: Vec<ProcessRecord>,
    pub summary: Summary,
}

/// One simulation: a fresh scheduler loaded from a registry.
pub struct Sim<S: Scheduler> {
    pub core: MlqCore<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(registry: &Registry, config: SchedConfig) -> Result<Self, SchedError> {
        let mut core = MlqCore::<S>::new(config)?;
        registry.load_into(&mut core)?;
        Ok(Self { core })
    }

    pub fn run(&mut self) -> Result<SimReport, SchedError> {
        let mut recorder = Recorder::new();
        self.run_with(&mut recorder);
        let records = self.records();
        let summary = stats::summarize(&records)?;
        Ok(SimReport {
            events: recorder.into_events(),
            records,
            summary,
        })
    }

    /// Streams events to `observer`; statistics are left to the caller.
    pub fn run_with<O: Observer + ?Sized>(&mut self, observer: &mut O) -> u64 {
        self.core.run_with(observer)
    }

    pub fn records(&self) -> Vec<ProcessRecord> {
        let mut records: Vec<ProcessRecord> =
            self.core.ctx.processes.iter().map(ProcessRecord::from).collect();
        records.sort_by_key(|r| r.pid);
        records
    }

    pub fn all_processes_finished(&self) -> bool {
        self.core.all_processes_finished()
    }
}
