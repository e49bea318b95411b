use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

use crate::{config::SchedConfig, core::event::ProcessRow};

pub type Pid = u64;
pub type Ticks = u64;
// Queue index; 0 is served first
pub type Priority = usize;
new_key_type! {
    pub struct DsqId;
}

/// Heap key of a process inside a priority-keyed queue.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank {
    pub priority: Priority,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so the lowest (priority, seq) must compare greatest
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    Finished,
}

/// Validated process descriptor handed to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub pid: Pid,
    pub state: ProcessState,
    // Overwritten with the re-entry clock after every unfinished quantum
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub waiting_time: Ticks,
    pub initial_arrival: Ticks,
    pub initial_burst: Ticks,
    pub dispatches: u64,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            state: ProcessState::Ready,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            waiting_time: 0,
            initial_arrival: spec.arrival_time,
            initial_burst: spec.burst_time,
            dispatches: 0,
            completion_time: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.burst_time == 0
    }

    pub fn row(&self) -> ProcessRow {
        ProcessRow {
            pid: self.pid,
            arrival_time: self.arrival_time,
            priority: self.priority,
            burst_time: self.burst_time,
            waiting_time: self.waiting_time,
        }
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        procs: VecDeque<Pid>,
    },
    Priq {
        procs: KeyedPriorityQueue<Pid, Rank>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::Priq { procs } => procs.get_priority(&pid).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Priq { procs } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the run loop and the queue policies share: clock, process table, queues.
#[derive(Debug)]
pub struct SchedCtx {
    pub clock: Ticks,
    pub time_quantum: Ticks,
    pub num_queues: usize,
    pub processes: Vec<Process>,
    pub dsqs: SlotMap<DsqId, Dsq>,
    // One DSQ per priority level, filled by Scheduler::init
    pub level_dsq_ids: Vec<DsqId>,
    pub proc_to_dsq: FxHashMap<Pid, DsqId>,
    pid_to_index: FxHashMap<Pid, usize>,

    // Increment upon every push, keeps priority-keyed queues stable
    next_seq: u64,
}

impl SchedCtx {
    pub fn new(config: &SchedConfig) -> Self {
        Self {
            clock: 0,
            time_quantum: config.time_quantum,
            num_queues: config.num_queues,
            processes: Vec::new(),
            dsqs: SlotMap::with_capacity_and_key(config.num_queues),
            level_dsq_ids: Vec::with_capacity(config.num_queues),
            proc_to_dsq: FxHashMap::default(),
            pid_to_index: FxHashMap::default(),
            next_seq: 0,
        }
    }

    pub fn create_process(&mut self, spec: ProcessSpec) -> Pid {
        debug_assert!(
            !self.pid_to_index.contains_key(&spec.pid),
            "Pid {} already admitted",
            spec.pid
        );
        self.pid_to_index.insert(spec.pid, self.processes.len());
        self.processes.push(Process::new(spec));
        spec.pid
    }

    pub fn contains_process(&self, pid: Pid) -> bool {
        self.pid_to_index.contains_key(&pid)
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.clock = self.clock.saturating_add(delta);
    }

    pub fn create_level_fifo(&mut self) -> DsqId {
        let id = self.dsqs.insert(Dsq::new_fifo());
        self.level_dsq_ids.push(id);
        id
    }

    pub fn create_level_priq(&mut self) -> DsqId {
        let id = self.dsqs.insert(Dsq::new_priq());
        self.level_dsq_ids.push(id);
        id
    }

    fn dsq_push(&mut self, dsq_id: DsqId, pid: Pid, rank: Option<Rank>) {
        assert!(
            !self.proc_to_dsq.contains_key(&pid),
            "Process {pid} already present in some DSQ"
        );

        let process = self.process_mut(pid);
        debug_assert!(
            process.state != ProcessState::Finished && process.burst_time > 0,
            "Finished process {pid} must not be enqueued"
        );
        process.state = ProcessState::Ready;
        let priority = process.priority;

        let seq = self.next_seq;
        self.next_seq += 1;

        let Some(dsq) = self.dsqs.get_mut(dsq_id) else {
            debug_assert!(false, "Unknown DSQ {dsq_id:?}");
            return;
        };
        match dsq {
            Dsq::Fifo { procs } => procs.push_back(pid),
            Dsq::Priq { procs } => {
                procs.push(pid, rank.unwrap_or(Rank { priority, seq }));
            }
        };

        self.proc_to_dsq.insert(pid, dsq_id);
    }

    pub fn dsq_push_fifo(&mut self, dsq_id: DsqId, pid: Pid) {
        self.dsq_push(dsq_id, pid, None);
    }

    pub fn dsq_push_priq(&mut self, dsq_id: DsqId, pid: Pid, rank: Rank) {
        self.dsq_push(dsq_id, pid, Some(rank));
    }

    pub fn dsq_pop(&mut self, dsq_id: DsqId) -> Option<Pid> {
        let dsq = self.dsqs.get_mut(dsq_id)?;
        let pid = match dsq {
            Dsq::Fifo { procs } => procs.pop_front(),
            Dsq::Priq { procs } => procs.pop().map(|p| p.0),
        }?;

        let removed = self.proc_to_dsq.remove(&pid);
        debug_assert!(removed.is_some(), "Process {pid} missing DSQ membership");

        Some(pid)
    }

    pub fn next_rank(&self, pid: Pid) -> Rank {
        Rank {
            priority: self.process(pid).priority,
            seq: self.next_seq,
        }
    }

    pub fn level_dsq(&self, level: Priority) -> DsqId {
        self.level_dsq_ids[level]
    }

    pub fn level_len(&self, level: Priority) -> usize {
        self.dsqs
            .get(self.level_dsq(level))
            .map_or(0, |dsq| dsq.len())
    }

    pub fn level_is_empty(&self, level: Priority) -> bool {
        self.level_len(level) == 0
    }

    pub fn any_queued(&self) -> bool {
        !self.proc_to_dsq.is_empty()
    }

    pub fn process_in_any_dsq(&self, pid: Pid) -> bool {
        self.proc_to_dsq.contains_key(&pid)
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.processes[self.pid_to_index[&pid]]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        let index = self.pid_to_index[&pid];
        &mut self.processes[index]
    }

    pub fn set_running(&mut self, pid: Pid) {
        debug_assert!(
            !self.proc_to_dsq.contains_key(&pid),
            "Running process {pid} must not be enqueued"
        );
        self.process_mut(pid).state = ProcessState::Running;
    }

    pub fn mark_finished(&mut self, pid: Pid) {
        debug_assert!(
            !self.proc_to_dsq.contains_key(&pid),
            "Finishing process {pid} that is still enqueued"
        );
        let clock = self.clock;
        let process = self.process_mut(pid);
        debug_assert!(
            process.state == ProcessState::Running,
            "Process {pid} must have been running before marked finished"
        );
        process.state = ProcessState::Finished;
        process.burst_time = 0;
        process.completion_time = Some(clock);
    }
}
