use std::str::FromStr;

use crate::{core::Ticks, error::SchedError};

pub const DEFAULT_NUM_QUEUES: usize = 3;
pub const DEFAULT_TIME_QUANTUM: Ticks = 2;

/// Queue discipline applied inside every priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueuePolicy {
    #[default]
    Fifo,
    Priq,
}

impl FromStr for QueuePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(QueuePolicy::Fifo),
            "priq" | "heap" => Ok(QueuePolicy::Priq),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedConfig {
    pub num_queues: usize,
    // Shared by every level
    pub time_quantum: Ticks,
    pub policy: QueuePolicy,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            num_queues: DEFAULT_NUM_QUEUES,
            time_quantum: DEFAULT_TIME_QUANTUM,
            policy: QueuePolicy::default(),
        }
    }
}

impl SchedConfig {
    pub fn new(num_queues: usize, time_quantum: Ticks) -> Result<Self, SchedError> {
        let config = Self {
            num_queues,
            time_quantum,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_policy(mut self, policy: QueuePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.num_queues == 0 {
            return Err(SchedError::NoQueues);
        }
        if self.time_quantum == 0 {
            return Err(SchedError::ZeroQuantum);
        }
        Ok(())
    }

    /// Defaults overridden by `MLQ_QUEUES`, `MLQ_QUANTUM` and `MLQ_POLICY`.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Result<Self, SchedError> {
        let mut config = Self::default();
        if let Some(num_queues) = env_parse("MLQ_QUEUES") {
            config.num_queues = num_queues;
        }
        if let Some(time_quantum) = env_parse("MLQ_QUANTUM") {
            config.time_quantum = time_quantum;
        }
        if let Some(policy) = env_parse("MLQ_POLICY") {
            config.policy = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
