use super::{EnqueueFlags, MLQ_ENQ_AGED, Pid, Priority, SchedCtx, Scheduler};

/// Levels keyed on the process `priority` field, lowest first, ties in enqueue order.
/// Every member of a level normally shares the level's priority, so the order only
/// departs from FIFO if a priority changes while the process is queued.
pub struct PriqScheduler {
    aged: u64,
}

impl PriqScheduler {
    pub fn aged(&self) -> u64 {
        self.aged
    }
}

impl Scheduler for PriqScheduler {
    fn init(ctx: &mut SchedCtx) -> Self {
        for _ in 0..ctx.num_queues {
            ctx.create_level_priq();
        }
        Self { aged: 0 }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, flags: EnqueueFlags) {
        if flags & MLQ_ENQ_AGED != 0 {
            self.aged += 1;
        }
        let rank = ctx.next_rank(pid);
        let dsq = ctx.level_dsq(rank.priority);
        ctx.dsq_push_priq(dsq, pid, rank);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx, level: Priority) -> Option<Pid> {
        ctx.dsq_pop(ctx.level_dsq(level))
    }

    fn exit(&mut self, _ctx: &mut SchedCtx) {
        log::debug!("priq: {} aged re-entries", self.aged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SchedConfig,
        core::ProcessSpec,
        scheduler::{MLQ_ENQ_ADMIT, MLQ_ENQ_REQUEUE},
    };

    fn admit(ctx: &mut SchedCtx, sched: &mut PriqScheduler, pid: Pid, priority: Priority) {
        ctx.create_process(ProcessSpec {
            pid,
            arrival_time: 0,
            burst_time: 3,
            priority,
        });
        sched.enqueue(ctx, pid, MLQ_ENQ_ADMIT);
    }

    #[test]
    fn equal_priorities_leave_in_enqueue_order() {
        let mut ctx = SchedCtx::new(&SchedConfig::default());
        let mut sched = PriqScheduler::init(&mut ctx);
        admit(&mut ctx, &mut sched, 5, 2);
        admit(&mut ctx, &mut sched, 1, 2);
        admit(&mut ctx, &mut sched, 3, 2);

        assert_eq!(sched.dispatch(&mut ctx, 2), Some(5));
        assert_eq!(sched.dispatch(&mut ctx, 2), Some(1));
        assert_eq!(sched.dispatch(&mut ctx, 2), Some(3));
    }

    #[test]
    fn counts_aged_reentries() {
        let mut ctx = SchedCtx::new(&SchedConfig::default());
        let mut sched = PriqScheduler::init(&mut ctx);
        admit(&mut ctx, &mut sched, 0, 0);

        let pid = sched.dispatch(&mut ctx, 0).unwrap();
        ctx.process_mut(pid).priority = 1;
        sched.enqueue(&mut ctx, pid, MLQ_ENQ_REQUEUE | MLQ_ENQ_AGED);

        assert_eq!(sched.aged(), 1);
        assert_eq!(ctx.level_len(1), 1);
        assert_eq!(sched.dispatch(&mut ctx, 1), Some(0));
    }
}
