use crate::core::{Pid, Priority, Process, ProcessRow, Ticks};

/// Final outcome of one process, as reported once the queues have drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub final_priority: Priority,
    pub waiting_time: Ticks,
    pub dispatches: u64,
    pub completion_time: Option<Ticks>,
}

impl ProcessRecord {
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time
            .map(|done| done.saturating_sub(self.arrival_time))
    }

    pub fn row(&self) -> ProcessRow {
        ProcessRow {
            pid: self.pid,
            arrival_time: self.arrival_time,
            priority: self.final_priority,
            burst_time: 0,
            waiting_time: self.waiting_time,
        }
    }
}

impl From<&Process> for ProcessRecord {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            arrival_time: process.initial_arrival,
            burst_time: process.initial_burst,
            final_priority: process.priority,
            waiting_time: process.waiting_time,
            dispatches: process.dispatches,
            completion_time: process.completion_time,
        }
    }
}
