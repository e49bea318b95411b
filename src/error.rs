use crate::core::state::{Pid, Priority};

/// Broad classification of a [`SchedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    DivisionByZero,
}

/// Errors raised at the scheduler boundary (construction, insertion, aggregation).
/// Error codes in range 0x01xx (argument checks) and 0x02xx (statistics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// Priority does not name an existing queue (0x0101)
    PriorityOutOfRange { priority: Priority, num_queues: usize },
    /// Scheduler configured with zero queues (0x0102)
    NoQueues,
    /// Scheduler configured with a zero time quantum (0x0103)
    ZeroQuantum,
    /// Arrival time below zero (0x0104)
    NegativeArrival { pid: Pid, arrival_time: i64 },
    /// Burst time of zero or below (0x0105)
    NonPositiveBurst { pid: Pid, burst_time: i64 },
    /// Priority below zero (0x0106)
    NegativePriority { pid: Pid, priority: i64 },
    /// Pid already admitted (0x0107)
    DuplicatePid(Pid),
    /// Aggregate requested over zero processes (0x0201)
    DivisionByZero,
}

impl SchedError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            SchedError::DivisionByZero => ErrorKind::DivisionByZero,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Numeric error code for logs.
    pub const fn code(&self) -> u16 {
        match self {
            SchedError::PriorityOutOfRange { .. } => 0x0101,
            SchedError::NoQueues => 0x0102,
            SchedError::ZeroQuantum => 0x0103,
            SchedError::NegativeArrival { .. } => 0x0104,
            SchedError::NonPositiveBurst { .. } => 0x0105,
            SchedError::NegativePriority { .. } => 0x0106,
            SchedError::DuplicatePid(_) => 0x0107,
            SchedError::DivisionByZero => 0x0201,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SchedError::PriorityOutOfRange { .. } => "Priority out of range",
            SchedError::NoQueues => "At least one queue is required",
            SchedError::ZeroQuantum => "Time quantum must be positive",
            SchedError::NegativeArrival { .. } => "Arrival time must not be negative",
            SchedError::NonPositiveBurst { .. } => "Burst time must be positive",
            SchedError::NegativePriority { .. } => "Priority must not be negative",
            SchedError::DuplicatePid(_) => "Duplicate pid",
            SchedError::DivisionByZero => "Average over zero processes",
        }
    }
}

impl std::fmt::Display for SchedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04X}: {}", self.code(), self.name())?;
        match self {
            SchedError::PriorityOutOfRange {
                priority,
                num_queues,
            } => write!(f, " ({priority} not in 0..{num_queues})"),
            SchedError::NegativeArrival { pid, arrival_time } => {
                write!(f, " (P{pid}: {arrival_time})")
            }
            SchedError::NonPositiveBurst { pid, burst_time } => {
                write!(f, " (P{pid}: {burst_time})")
            }
            SchedError::NegativePriority { pid, priority } => write!(f, " (P{pid}: {priority})"),
            SchedError::DuplicatePid(pid) => write!(f, " (P{pid})"),
            SchedError::NoQueues | SchedError::ZeroQuantum | SchedError::DivisionByZero => Ok(()),
        }
    }
}

impl std::error::Error for SchedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_split_arguments_from_aggregation() {
        assert_eq!(SchedError::NoQueues.kind(), ErrorKind::InvalidArgument);
        assert_eq!(SchedError::DuplicatePid(3).kind(), ErrorKind::InvalidArgument);
        assert_eq!(SchedError::DivisionByZero.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn display_carries_code_and_detail() {
        let err = SchedError::PriorityOutOfRange {
            priority: 3,
            num_queues: 3,
        };
        assert_eq!(err.to_string(), "E0101: Priority out of range (3 not in 0..3)");
        assert_eq!(
            SchedError::DivisionByZero.to_string(),
            "E0201: Average over zero processes"
        );
    }
}
