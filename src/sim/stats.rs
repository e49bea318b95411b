use average::{Estimate, Mean};
use rustc_hash::FxHashMap;

use super::record::ProcessRecord;
use crate::{
    core::{ProcessRow, Ticks},
    error::SchedError,
};

/// Last row of every pid, ordered by pid.
pub fn final_rows(rows: &[ProcessRow]) -> Vec<ProcessRow> {
    let mut last: FxHashMap<_, ProcessRow> = FxHashMap::default();
    for row in rows {
        last.insert(row.pid, *row);
    }
    let mut rows: Vec<ProcessRow> = last.into_values().collect();
    rows.sort_by_key(|row| row.pid);
    rows
}

/// Mean of the final waiting time of each distinct pid. Accepts a full trace.
pub fn average_waiting_time(rows: &[ProcessRow]) -> Result<f64, SchedError> {
    let rows = final_rows(rows);
    avg(rows.iter().map(|row| row.waiting_time))
}

/// Mean of completion minus first arrival, over finished processes only.
pub fn average_turnaround_time(records: &[ProcessRecord]) -> Result<f64, SchedError> {
    avg(records.iter().filter_map(ProcessRecord::turnaround_time))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub processes: usize,
    pub dispatches: u64,
    pub makespan: Ticks,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

pub fn summarize(records: &[ProcessRecord]) -> Result<Summary, SchedError> {
    let rows: Vec<ProcessRow> = records.iter().map(ProcessRecord::row).collect();
    Ok(Summary {
        processes: records.len(),
        dispatches: records.iter().map(|r| r.dispatches).sum(),
        makespan: records
            .iter()
            .filter_map(|r| r.completion_time)
            .max()
            .unwrap_or(0),
        average_waiting_time: average_waiting_time(&rows)?,
        average_turnaround_time: average_turnaround_time(records)?,
    })
}

fn avg(iter: impl Iterator<Item = Ticks>) -> Result<f64, SchedError> {
    let mean: Mean = iter.map(|t| t as f64).collect();
    if mean.is_empty() {
        return Err(SchedError::DivisionByZero);
    }
    Ok(mean.estimate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pid: u64, waiting_time: Ticks) -> ProcessRow {
        ProcessRow {
            pid,
            arrival_time: 0,
            priority: 0,
            burst_time: 0,
            waiting_time,
        }
    }

    #[test]
    fn empty_input_is_division_by_zero() {
        assert_eq!(average_waiting_time(&[]), Err(SchedError::DivisionByZero));
        assert_eq!(average_turnaround_time(&[]), Err(SchedError::DivisionByZero));
        assert_eq!(summarize(&[]), Err(SchedError::DivisionByZero));
    }

    #[test]
    fn averages_last_row_per_pid() {
        let trace = [row(0, 0), row(1, 2), row(0, 4), row(1, 3)];
        assert_eq!(final_rows(&trace), vec![row(0, 4), row(1, 3)]);
        assert_eq!(average_waiting_time(&trace), Ok(3.5));
    }

    #[test]
    fn summary_over_records() {
        let records = [
            ProcessRecord {
                pid: 0,
                arrival_time: 0,
                burst_time: 3,
                final_priority: 0,
                waiting_time: 2,
                dispatches: 2,
                completion_time: Some(5),
            },
            ProcessRecord {
                pid: 1,
                arrival_time: 1,
                burst_time: 3,
                final_priority: 1,
                waiting_time: 2,
                dispatches: 2,
                completion_time: Some(6),
            },
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.processes, 2);
        assert_eq!(summary.dispatches, 4);
        assert_eq!(summary.makespan, 6);
        assert_eq!(summary.average_waiting_time, 2.0);
        assert_eq!(summary.average_turnaround_time, 5.0);
    }
}
