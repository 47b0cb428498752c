use std::fmt;

use thiserror::Error;

use crate::scheduler::Policy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadIssue {
    Empty,
    DuplicateId(String),
    NonPositiveBurst(String),
    NegativeArrival(String),
}

impl fmt::Display for WorkloadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "workload has no processes"),
            Self::DuplicateId(id) => write!(f, "process id {id} appears more than once"),
            Self::NonPositiveBurst(id) => write!(f, "process {id} has a non-positive burst time"),
            Self::NegativeArrival(id) => write!(f, "process {id} has a negative arrival time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid workload: {0}")]
    InvalidWorkload(WorkloadIssue),

    #[error("invalid platform profile: {0}")]
    InvalidProfile(&'static str),

    /// A ready queue was asked to hold more processes than its bound.
    #[error("ready queue capacity of {capacity} processes exceeded")]
    QueueCapacityExceeded { capacity: usize },

    #[error("comparison registry already holds {capacity} runs")]
    RegistryFull { capacity: usize },

    /// The scheduler type cannot run the requested policy.
    #[error("{scheduler} scheduler cannot run {policy}")]
    PolicyMismatch {
        policy: Policy,
        scheduler: &'static str,
    },
}
