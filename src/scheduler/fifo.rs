use super::{Policy, Scheduler};
use crate::core::{ProcIdx, ReadyQueue, SimCtx, Ticks};
use crate::error::SimError;
use crate::sim::PlatformProfile;

/// Single FIFO ready queue. Without a quantum this is FCFS; with one it is
/// round robin.
pub struct FifoScheduler {
    ready: ReadyQueue,
    quantum: Option<Ticks>,
}

impl Scheduler for FifoScheduler {
    fn init(policy: Policy, profile: &PlatformProfile) -> Result<Self, SimError> {
        let quantum = match policy {
            Policy::Fcfs => None,
            Policy::RoundRobin => Some(profile.time_quantum.get()),
            Policy::Srtf
            | Policy::Sjf
            | Policy::PriorityPreemptive
            | Policy::PriorityNonPreemptive
            | Policy::PriorityRoundRobin => {
                return Err(SimError::PolicyMismatch {
                    policy,
                    scheduler: "fifo",
                });
            }
        };
        Ok(Self {
            ready: ReadyQueue::fifo(profile.queue_capacity),
            quantum,
        })
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) -> Result<(), SimError> {
        self.ready.push(proc, ctx.record(proc))
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }

    fn slice(&self, ctx: &SimCtx, proc: ProcIdx) -> Ticks {
        let remaining = ctx.record(proc).remaining_time;
        self.quantum.map_or(remaining, |quantum| quantum.min(remaining))
    }

    fn ready(&self) -> &ReadyQueue {
        &self.ready
    }
}
