use crate::core::{Pid, Priority, Ticks};

/// Snapshot of a process taken right after one of its dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub priority: Priority,
    pub burst_time: Ticks,
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    // Clock and priority as seen when the process was picked
    Step {
        clock: Ticks,
        pid: Pid,
        priority: Priority,
    },
    Row(ProcessRow),
}

impl SchedEvent {
    pub fn pid(&self) -> Pid {
        match self {
            SchedEvent::Step { pid, .. } => *pid,
            SchedEvent::Row(row) => row.pid,
        }
    }

    pub fn as_row(&self) -> Option<&ProcessRow> {
        match self {
            SchedEvent::Row(row) => Some(row),
            SchedEvent::Step { .. } => None,
        }
    }
}

/// Row snapshots of a trace, in emission order.
pub fn rows(events: &[SchedEvent]) -> Vec<ProcessRow> {
    events.iter().filter_map(SchedEvent::as_row).copied().collect()
}
