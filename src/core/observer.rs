use super::{
    event::SchedEvent,
    state::{ProcessState, SchedCtx},
};

/// One-way consumer of scheduler events. Called synchronously from the run loop.
pub trait Observer {
    fn notify(&mut self, event: &SchedEvent);
}

impl<F: FnMut(&SchedEvent)> Observer for F {
    fn notify(&mut self, event: &SchedEvent) {
        self(event)
    }
}

/// Keeps every event in emission order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<SchedEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<SchedEvent> {
        self.events
    }
}

impl Observer for Recorder {
    fn notify(&mut self, event: &SchedEvent) {
        self.events.push(*event);
    }
}

/// Cross-checks process table and queue membership after every dispatch.
#[derive(Debug, Default)]
pub struct InvariantChecker {
    step: u64,
}

impl InvariantChecker {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn check(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        for process in &ctx.processes {
            let pid = process.pid;
            debug_assert!(
                process.priority < ctx.num_queues,
                "Process {pid} priority {} outside 0..{}",
                process.priority,
                ctx.num_queues
            );
            debug_assert_ne!(
                process.state,
                ProcessState::Running,
                "Process {pid} still Running between dispatches"
            );
            debug_assert_eq!(
                process.state == ProcessState::Finished,
                process.is_finished(),
                "Process {pid} state disagrees with remaining burst {}",
                process.burst_time
            );
        }

        for (&pid, &dsq_id) in &ctx.proc_to_dsq {
            let process = ctx.process(pid);
            debug_assert_ne!(
                process.state,
                ProcessState::Finished,
                "Finished process {pid} still present in DSQ {dsq_id:?}"
            );
            debug_assert_eq!(
                ctx.level_dsq_ids.get(process.priority),
                Some(&dsq_id),
                "Process {pid} queued away from its priority level"
            );
            if let Some(dsq) = ctx.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(pid),
                    "proc_to_dsq claims process {pid} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "proc_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }
    }
}
