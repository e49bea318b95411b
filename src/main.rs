use std::process::ExitCode;

use mlq_model::{
    QueuePolicy, Registry, SchedConfig, SchedError, Scheduler, Sim,
    config::env_parse,
    core::SchedEvent,
    logger,
    scheduler::{FifoScheduler, PriqScheduler},
};

const USAGE: &str = "usage: mlq_model [NUM_PROCESSES ARRIVAL BURST PRIORITY]";

fn main() -> ExitCode {
    if let Err(e) = logger::init(logger::level_from_env()) {
        eprintln!("logger: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match SchedConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(e),
    };

    let registry = match build_registry(&args, &config) {
        Some(Ok(registry)) => registry,
        Some(Err(e)) => return fail(e),
        None => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let outcome = match config.policy {
        QueuePolicy::Fifo => simulate::<FifoScheduler>(&registry, config),
        QueuePolicy::Priq => simulate::<PriqScheduler>(&registry, config),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

// None on malformed command line
fn build_registry(args: &[String], config: &SchedConfig) -> Option<Result<Registry, SchedError>> {
    match args {
        [] => {
            let seed = env_parse("MLQ_SEED").unwrap_or(0);
            log::info!("no process list given, generating 8 processes with seed {seed}");
            Some(Ok(Registry::random(8, config.num_queues, 6, 7, seed)))
        }
        [count, arrival, burst, priority] => {
            let count: u64 = count.parse().ok()?;
            let arrival: i64 = arrival.parse().ok()?;
            let burst: i64 = burst.parse().ok()?;
            let priority: i64 = priority.parse().ok()?;
            Some(Registry::uniform(count, arrival, burst, priority))
        }
        _ => None,
    }
}

fn simulate<S: Scheduler>(registry: &Registry, config: SchedConfig) -> Result<(), SchedError> {
    let mut sim = Sim::<S>::new(registry, config)?;
    let report = sim.run()?;

    println!(
        "{:>8} {:>13} {:>9} {:>11} {:>13}",
        "Process", "Arrival Time", "Priority", "Burst Time", "Waiting Time"
    );
    for event in &report.events {
        match event {
            SchedEvent::Step {
                clock,
                pid,
                priority,
            } => println!("Clock: {clock}, Running Process: P{pid}, Priority: {priority}"),
            SchedEvent::Row(row) => println!(
                "{:>8} {:>13} {:>9} {:>11} {:>13}",
                format!("P{}", row.pid),
                row.arrival_time,
                row.priority,
                row.burst_time,
                row.waiting_time
            ),
        }
    }

    let summary = &report.summary;
    println!();
    println!("Processes: {}", summary.processes);
    println!("Dispatches: {}", summary.dispatches);
    println!("Makespan: {} ticks", summary.makespan);
    println!("Average Waiting Time: {:.2}", summary.average_waiting_time);
    println!("Average Turnaround Time: {:.2}", summary.average_turnaround_time);
    Ok(())
}

fn fail(e: SchedError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::FAILURE
}
