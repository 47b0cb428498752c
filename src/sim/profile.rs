use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use crate::core::SimTime;
use crate::error::SimError;

pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

const LINUX_QUANTUM: NonZeroU64 = NonZeroU64::new(2).unwrap();
const WINDOWS_QUANTUM: NonZeroU64 = NonZeroU64::new(4).unwrap();

/// Platform constants a run is parameterized by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProfile {
    pub name: String,
    /// Longest contiguous slice a round-robin dispatch may use.
    pub time_quantum: NonZeroU64,
    /// Simulated time charged for every context switch.
    pub context_switch_penalty: SimTime,
    /// Bound on every ready queue used during a run.
    pub queue_capacity: usize,
}

impl PlatformProfile {
    pub fn new(name: impl Into<String>, time_quantum: NonZeroU64, context_switch_penalty: SimTime) -> Self {
        Self {
            name: name.into(),
            time_quantum,
            context_switch_penalty,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Short quantum, 0.1 unit switch cost.
    pub fn linux() -> Self {
        Self::new("Linux", LINUX_QUANTUM, 0.1)
    }

    /// Long quantum, 0.05 unit switch cost.
    pub fn windows() -> Self {
        Self::new("Windows", WINDOWS_QUANTUM, 0.05)
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.context_switch_penalty.is_finite() {
            return Err(SimError::InvalidProfile("context switch penalty must be finite"));
        }
        if self.context_switch_penalty < 0.0 {
            return Err(SimError::InvalidProfile("context switch penalty must not be negative"));
        }
        if self.queue_capacity == 0 {
            return Err(SimError::InvalidProfile("queue capacity must be at least one"));
        }
        Ok(())
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::linux()
    }
}
