use super::{EnqueueFlags, Pid, Priority, SchedCtx, Scheduler};

/// Round-robin within each level: processes leave a level in the order they entered it.
pub struct FifoScheduler;

impl Scheduler for FifoScheduler {
    fn init(ctx: &mut SchedCtx) -> Self {
        for _ in 0..ctx.num_queues {
            ctx.create_level_fifo();
        }
        Self
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, flags: EnqueueFlags) {
        let _ = flags;
        let dsq = ctx.level_dsq(ctx.process(pid).priority);
        ctx.dsq_push_fifo(dsq, pid);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx, level: Priority) -> Option<Pid> {
        ctx.dsq_pop(ctx.level_dsq(level))
    }
}
