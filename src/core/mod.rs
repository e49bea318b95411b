pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::MlqCore;
pub use event::{ProcessRow, SchedEvent};
pub use observer::{InvariantChecker, Observer, Recorder};
pub use state::{
    Dsq, DsqId, Pid, Priority, Process, ProcessSpec, ProcessState, Rank, SchedCtx, Ticks,
};
