use crate::error::SimError;
use crate::scheduler::Policy;

use super::metrics::PerformanceMetrics;

/// Append-only table of per-run metrics, one slot per policy run, read once
/// every run has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRegistry {
    entries: Vec<PerformanceMetrics>,
    capacity: usize,
}

impl ComparisonRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, metrics: PerformanceMetrics) -> Result<(), SimError> {
        if self.entries.len() >= self.capacity {
            return Err(SimError::RegistryFull {
                capacity: self.capacity,
            });
        }
        self.entries.push(metrics);
        Ok(())
    }

    pub fn entries(&self) -> &[PerformanceMetrics] {
        &self.entries
    }

    pub fn get(&self, policy: Policy) -> Option<&PerformanceMetrics> {
        self.entries.iter().find(|metrics| metrics.policy == policy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn best_by_turnaround(&self) -> Option<&PerformanceMetrics> {
        self.min_by(|metrics| metrics.avg_turnaround_time)
    }

    pub fn best_by_waiting(&self) -> Option<&PerformanceMetrics> {
        self.min_by(|metrics| metrics.avg_waiting_time)
    }

    pub fn fewest_context_switches(&self) -> Option<&PerformanceMetrics> {
        self.min_by(|metrics| metrics.total_context_switches as f64)
    }

    pub fn highest_overhead(&self) -> Option<&PerformanceMetrics> {
        self.entries
            .iter()
            .max_by(|a, b| a.cs_overhead_percent.total_cmp(&b.cs_overhead_percent))
    }

    // First recorded run wins ties
    fn min_by(&self, key: impl Fn(&PerformanceMetrics) -> f64) -> Option<&PerformanceMetrics> {
        self.entries
            .iter()
            .reduce(|best, metrics| if key(metrics) < key(best) { metrics } else { best })
    }
}

impl Default for ComparisonRegistry {
    fn default() -> Self {
        Self::with_capacity(Policy::ALL.len())
    }
}
