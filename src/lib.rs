pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod scheduler;
pub mod sim;

pub use config::{QueuePolicy, SchedConfig};
pub use crate::core::{MlqCore, ProcessRow, ProcessSpec, SchedEvent};
pub use error::{ErrorKind, SchedError};
pub use scheduler::Scheduler;
pub use sim::{Registry, Sim, SimReport};
