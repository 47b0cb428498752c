use super::{IdleAdvance, Policy, Scheduler};
use crate::core::{ProcIdx, RankKey, ReadyQueue, SimCtx, Ticks};
use crate::error::SimError;
use crate::sim::PlatformProfile;

/// Always runs the ready process with the smallest rank (remaining time,
/// burst time or priority value). Preemptive variants re-rank after every
/// unit of CPU time; the others run the pick to completion.
pub struct PriqScheduler {
    ready: ReadyQueue,
    preemptive: bool,
}

impl Scheduler for PriqScheduler {
    fn init(policy: Policy, profile: &PlatformProfile) -> Result<Self, SimError> {
        let by = match policy {
            Policy::Srtf => RankKey::RemainingTime,
            Policy::Sjf => RankKey::BurstTime,
            Policy::PriorityPreemptive | Policy::PriorityNonPreemptive => RankKey::Priority,
            Policy::Fcfs | Policy::RoundRobin | Policy::PriorityRoundRobin => {
                return Err(SimError::PolicyMismatch {
                    policy,
                    scheduler: "priority queue",
                });
            }
        };
        Ok(Self {
            ready: ReadyQueue::ranked(by, profile.queue_capacity),
            preemptive: policy.is_preemptive(),
        })
    }

    // Re-enqueueing after a slice re-ranks with the updated remaining time
    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) -> Result<(), SimError> {
        self.ready.push(proc, ctx.record(proc))
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }

    fn slice(&self, ctx: &SimCtx, proc: ProcIdx) -> Ticks {
        if self.preemptive {
            1
        } else {
            ctx.record(proc).remaining_time
        }
    }

    fn idle_advance(&self) -> IdleAdvance {
        if self.preemptive {
            IdleAdvance::Tick
        } else {
            IdleAdvance::NextArrival
        }
    }

    fn ready(&self) -> &ReadyQueue {
        &self.ready
    }
}
