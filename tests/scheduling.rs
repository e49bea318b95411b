use mlq_model::{
    ErrorKind, MlqCore, ProcessRow, ProcessSpec, Registry, SchedConfig, SchedError, SchedEvent,
    Scheduler, Sim,
    core::{Pid, Ticks},
    scheduler::{FifoScheduler, PriqScheduler},
    sim::{average_waiting_time, stats::final_rows},
};
use rustc_hash::FxHashMap;

fn spec(pid: Pid, arrival_time: Ticks, burst_time: Ticks, priority: usize) -> ProcessSpec {
    ProcessSpec {
        pid,
        arrival_time,
        burst_time,
        priority,
    }
}

fn rows(events: &[SchedEvent]) -> Vec<ProcessRow> {
    mlq_model::core::event::rows(events)
}

fn step_clocks(events: &[SchedEvent]) -> Vec<Ticks> {
    events
        .iter()
        .filter_map(|e| match e {
            SchedEvent::Step { clock, .. } => Some(*clock),
            SchedEvent::Row(_) => None,
        })
        .collect()
}

// Upper bound on dispatches: every dispatch consumes a full quantum or finishes a process
fn dispatch_bound(registry: &Registry, quantum: Ticks) -> usize {
    registry
        .specs()
        .iter()
        .map(|s| s.burst_time.div_ceil(quantum) as usize)
        .sum()
}

#[test]
fn scenario_single_process_walks_down_the_levels() {
    let mut core = MlqCore::<FifoScheduler>::new(SchedConfig::new(3, 2).unwrap()).unwrap();
    core.add_process(spec(0, 0, 5, 0)).unwrap();

    let events = core.run();
    let steps: Vec<_> = events
        .iter()
        .filter_map(|e| match *e {
            SchedEvent::Step {
                clock, priority, ..
            } => Some((clock, priority)),
            SchedEvent::Row(_) => None,
        })
        .collect();
    assert_eq!(steps, vec![(0, 0), (2, 1), (4, 2)]);

    let bursts: Vec<Ticks> = rows(&events).iter().map(|r| r.burst_time).collect();
    assert_eq!(bursts, vec![3, 1, 0]);
    assert_eq!(core.now(), 5);
    assert_eq!(core.records()[0].waiting_time, 0);
}

#[test]
fn scenario_two_equal_processes_both_complete() {
    let registry = Registry::uniform(2, 0, 3, 0).unwrap();
    let mut sim = Sim::<FifoScheduler>::new(&registry, SchedConfig::default()).unwrap();
    let report = sim.run().unwrap();

    let finals = final_rows(&rows(&report.events));
    assert_eq!(finals.len(), 2);
    assert!(finals.iter().all(|r| r.burst_time == 0));

    let avg = average_waiting_time(&rows(&report.events)).unwrap();
    assert!(avg.is_finite() && avg >= 0.0);
    assert_eq!(avg, report.summary.average_waiting_time);
}

#[test]
fn scenario_priority_equal_to_queue_count_is_rejected() {
    let mut core = MlqCore::<FifoScheduler>::new(SchedConfig::default()).unwrap();
    core.add_process(spec(0, 0, 2, 0)).unwrap();

    let err = core.add_process(spec(1, 0, 2, 3)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(core.process_count(), 1);
    assert_eq!(core.queued(0), 1);

    // Trace is the same as if the rejected call never happened
    let events = core.run();
    assert!(events.iter().all(|e| e.pid() == 0));
}

#[test]
fn scenario_average_over_nothing_is_division_by_zero() {
    let err = average_waiting_time(&[]).unwrap_err();
    assert_eq!(err, SchedError::DivisionByZero);
    assert_eq!(err.kind(), ErrorKind::DivisionByZero);
}

#[test]
fn drained_scheduler_runs_to_zero_events() {
    let mut core = MlqCore::<FifoScheduler>::new(SchedConfig::default()).unwrap();
    assert!(core.run().is_empty());

    core.add_process(spec(0, 0, 7, 1)).unwrap();
    assert!(!core.run().is_empty());
    assert!(core.run().is_empty());
    assert!(core.run().is_empty());
}

#[test]
fn invalid_construction_is_invalid_argument() {
    for (queues, quantum) in [(0, 2), (3, 0), (0, 0)] {
        let err = SchedConfig::new(queues, quantum).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

fn check_properties<S: Scheduler>(registry: &Registry, config: SchedConfig) {
    let quantum = config.time_quantum;
    let num_queues = config.num_queues;
    let bound = dispatch_bound(registry, quantum);

    let mut core = MlqCore::<S>::new(config).unwrap();
    registry.load_into(&mut core).unwrap();

    let mut events = Vec::new();
    let dispatches = core.run_with(&mut |e: &SchedEvent| {
        events.push(*e);
        assert!(events.len() <= 2 * bound, "run exceeded {bound} dispatches");
    });
    assert_eq!(dispatches as usize, events.len() / 2);
    assert!(dispatches as usize <= bound);

    // Conservation
    let finals = final_rows(&rows(&events));
    assert_eq!(finals.len(), registry.len());
    assert!(finals.iter().all(|r| r.burst_time == 0));

    // Monotonic, bounded priority; monotonic waiting time; remaining burst only shrinks
    let mut last: FxHashMap<Pid, ProcessRow> = FxHashMap::default();
    for row in rows(&events) {
        assert!(row.priority < num_queues);
        if let Some(prev) = last.get(&row.pid) {
            assert!(prev.priority <= row.priority);
            assert!(prev.waiting_time <= row.waiting_time);
            assert!(prev.burst_time > row.burst_time);
        }
        last.insert(row.pid, row);
    }

    // Clock advances by a full quantum or by the remaining burst of the finishing process
    let clocks = step_clocks(&events);
    let row_list = rows(&events);
    for (i, pair) in clocks.windows(2).enumerate() {
        let delta = pair[1] - pair[0];
        let finished = row_list[i].burst_time == 0;
        if finished {
            assert!(delta >= 1 && delta <= quantum);
        } else {
            assert_eq!(delta, quantum);
        }
    }
    let total: Ticks = registry.specs().iter().map(|s| s.burst_time).sum();
    assert_eq!(core.now(), total);
}

#[test]
fn random_workloads_hold_invariants() {
    for seed in 0..40 {
        let num_queues = 1 + (seed as usize % 4);
        let quantum = 1 + seed % 3;
        let registry = Registry::random(12, num_queues, 9, 11, seed);
        let config = SchedConfig::new(num_queues, quantum).unwrap();
        check_properties::<FifoScheduler>(&registry, config.clone());
        check_properties::<PriqScheduler>(&registry, config);
    }
}

#[test]
fn policies_agree_on_every_trace() {
    for seed in 100..120 {
        let registry = Registry::random(10, 3, 5, 9, seed);

        let mut fifo = Sim::<FifoScheduler>::new(&registry, SchedConfig::default()).unwrap();
        let mut priq = Sim::<PriqScheduler>::new(&registry, SchedConfig::default()).unwrap();
        assert_eq!(fifo.run().unwrap().events, priq.run().unwrap().events);
    }
}
