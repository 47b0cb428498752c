use super::{Policy, Scheduler};
use crate::core::{ProcIdx, ReadyQueue, SimCtx, Ticks};
use crate::error::SimError;
use crate::sim::PlatformProfile;

/// Round robin inside each priority level, strict priority across levels.
pub struct PrrScheduler {
    ready: ReadyQueue,
    quantum: Ticks,
}

impl Scheduler for PrrScheduler {
    fn init(policy: Policy, profile: &PlatformProfile) -> Result<Self, SimError> {
        if policy != Policy::PriorityRoundRobin {
            return Err(SimError::PolicyMismatch {
                policy,
                scheduler: "priority round robin",
            });
        }
        Ok(Self {
            ready: ReadyQueue::buckets(profile.queue_capacity),
            quantum: profile.time_quantum.get(),
        })
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) -> Result<(), SimError> {
        self.ready.push(proc, ctx.record(proc))
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }

    fn slice(&self, ctx: &SimCtx, proc: ProcIdx) -> Ticks {
        self.quantum.min(ctx.record(proc).remaining_time)
    }

    fn ready(&self) -> &ReadyQueue {
        &self.ready
    }
}
