pub mod fifo;
pub mod priq;
pub mod prr;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{ProcIdx, ReadyQueue, SimCtx, Ticks};
use crate::error::SimError;
use crate::sim::PlatformProfile;
pub use fifo::FifoScheduler;
pub use priq::PriqScheduler;
pub use prr::PrrScheduler;

/// How the clock moves when nothing is ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAdvance {
    // One unit at a time, re-checking arrivals after each
    Tick,
    NextArrival,
}

/// The scheduling algorithms the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    Fcfs,
    Srtf,
    Sjf,
    RoundRobin,
    PriorityPreemptive,
    PriorityNonPreemptive,
    PriorityRoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 7] = [
        Policy::Fcfs,
        Policy::Srtf,
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::PriorityPreemptive,
        Policy::PriorityNonPreemptive,
        Policy::PriorityRoundRobin,
    ];

    /// Preemptive line-up used for the short-quantum profile.
    pub fn linux_suite() -> [Policy; 5] {
        [
            Policy::Fcfs,
            Policy::Srtf,
            Policy::RoundRobin,
            Policy::PriorityPreemptive,
            Policy::PriorityRoundRobin,
        ]
    }

    /// Non-preemptive line-up used for the long-quantum profile.
    pub fn windows_suite() -> [Policy; 5] {
        [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::RoundRobin,
            Policy::PriorityNonPreemptive,
            Policy::PriorityRoundRobin,
        ]
    }

    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Policy::Srtf | Policy::PriorityPreemptive | Policy::RoundRobin | Policy::PriorityRoundRobin
        )
    }

    /// Policies that stably sort their copy of the workload by
    /// `(arrival_time, id)` before running.
    pub fn arrival_ordered(self) -> bool {
        matches!(
            self,
            Policy::Fcfs | Policy::RoundRobin | Policy::PriorityRoundRobin
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Srtf => "SRTF - Preemptive",
            Policy::Sjf => "SJF - Non-Preemptive",
            Policy::RoundRobin => "Round Robin",
            Policy::PriorityPreemptive => "Priority Preemptive",
            Policy::PriorityNonPreemptive => "Priority Non-Preemptive",
            Policy::PriorityRoundRobin => "Priority RR",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-policy queue discipline plugged into [`crate::core::SchedCore`].
pub trait Scheduler {
    /// Fails with [`SimError::PolicyMismatch`] for policies this queue
    /// discipline does not implement.
    fn init(policy: Policy, profile: &PlatformProfile) -> Result<Self, SimError>
    where
        Self: Sized;

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) -> Result<(), SimError>;

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<ProcIdx>;

    /// Upper bound on how long `proc` may hold the CPU once dispatched.
    fn slice(&self, ctx: &SimCtx, proc: ProcIdx) -> Ticks;

    fn idle_advance(&self) -> IdleAdvance {
        IdleAdvance::NextArrival
    }

    fn ready(&self) -> &ReadyQueue;
}
