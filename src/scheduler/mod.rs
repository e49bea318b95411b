pub mod fifo;
pub mod priq;

use crate::core::{
    Pid, Priority,
    state::SchedCtx,
};
pub use fifo::FifoScheduler;
pub use priq::PriqScheduler;

pub type EnqueueFlags = u64;

// First insertion through add_process
pub const MLQ_ENQ_ADMIT: EnqueueFlags = 1 << 0;
// Re-entry after an unfinished quantum
pub const MLQ_ENQ_REQUEUE: EnqueueFlags = 1 << 1;
// Priority was raised by the aging rule before re-entry
pub const MLQ_ENQ_AGED: EnqueueFlags = 1 << 2;

/// Queue discipline of a multilevel queue. The run loop owns clock, quantum and aging;
/// the policy only decides how a level stores and releases its processes.
pub trait Scheduler {
    /// Must create exactly `ctx.num_queues` level DSQs, in priority order.
    fn init(ctx: &mut SchedCtx) -> Self;

    fn exit(&mut self, _ctx: &mut SchedCtx) {}

    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut SchedCtx, level: Priority) -> Option<Pid>;
}
