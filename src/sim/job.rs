use rand::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{ProcessRecord, Ticks};
use crate::error::{SimError, WorkloadIssue};

/// A process as handed over by the workload supplier, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub arrival_time: i64,
    pub burst_time: i64,
    pub priority: i32,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64, priority: i32) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            arrival_time,
            burst_time,
            priority,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    // Caller validates first
    fn into_record(self) -> ProcessRecord {
        ProcessRecord::new(
            self.id,
            self.label,
            self.arrival_time as Ticks,
            self.burst_time as Ticks,
            self.priority,
        )
    }
}

/// Validated, immutable set of processes. Every run works on its own clone
/// of the records.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    records: Vec<ProcessRecord>,
}

impl Workload {
    pub fn new(specs: Vec<ProcessSpec>) -> Result<Self, SimError> {
        if specs.is_empty() {
            return Err(SimError::InvalidWorkload(WorkloadIssue::Empty));
        }

        let mut seen = FxHashSet::default();
        let mut records = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.id.clone()) {
                return Err(SimError::InvalidWorkload(WorkloadIssue::DuplicateId(spec.id)));
            }
            if spec.burst_time <= 0 {
                return Err(SimError::InvalidWorkload(WorkloadIssue::NonPositiveBurst(spec.id)));
            }
            if spec.arrival_time < 0 {
                return Err(SimError::InvalidWorkload(WorkloadIssue::NegativeArrival(spec.id)));
            }

            records.push(spec.into_record());
        }

        Ok(Self { records })
    }

    /// The five backend services of the reference comparison.
    pub fn canonical() -> Self {
        let specs = vec![
            ProcessSpec::new("P1", 0, 6, 2).labelled("Web Request Handler (Nginx)"),
            ProcessSpec::new("P2", 1, 4, 1).labelled("Authentication Service"),
            ProcessSpec::new("P3", 2, 8, 1).labelled("Database Query Processor"),
            ProcessSpec::new("P4", 0, 3, 4).labelled("Logging & Monitoring Agent"),
            ProcessSpec::new("P5", 3, 10, 5).labelled("Backup/Batch Analytics"),
        ];
        Self {
            records: specs.into_iter().map(ProcessSpec::into_record).collect(),
        }
    }

    /// Seeded random workload: at every tick a process arrives with
    /// probability `p_arrival`, and is short with probability `p_short`.
    /// Always yields at least one process. Ids are zero-padded (`P01`..`P20`
    /// for 20 ticks) so lexical order, which breaks ranking ties, matches
    /// generation order.
    pub fn bernoulli(
        ticks: Ticks,
        p_arrival: f64,
        p_short: f64,
        short_ticks: Ticks,
        long_ticks: Ticks,
        seed: u64,
    ) -> Self {
        let ticks = ticks.max(1);
        let width = ticks.to_string().len();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut records = Vec::new();

        for t in 0..ticks {
            let forced = records.is_empty() && t + 1 == ticks;
            if rng.random::<f64>() < p_arrival || forced {
                let burst = if rng.random::<f64>() < p_short {
                    short_ticks
                } else {
                    long_ticks
                };
                let priority = rng.random_range(0..=5);

                records.push(ProcessRecord::new(
                    format!("P{:0width$}", records.len() + 1),
                    "",
                    t,
                    burst.max(1),
                    priority,
                ));
            }
        }

        Self { records }
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_burst(&self) -> Ticks {
        self.records.iter().map(|record| record.burst_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_workload() {
        assert_eq!(
            Workload::new(Vec::new()),
            Err(SimError::InvalidWorkload(WorkloadIssue::Empty))
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let specs = vec![ProcessSpec::new("A", 0, 1, 0), ProcessSpec::new("A", 1, 2, 0)];
        assert_eq!(
            Workload::new(specs),
            Err(SimError::InvalidWorkload(WorkloadIssue::DuplicateId("A".into())))
        );
    }

    #[test]
    fn rejects_non_positive_bursts_and_negative_arrivals() {
        assert_eq!(
            Workload::new(vec![ProcessSpec::new("A", 0, 0, 0)]),
            Err(SimError::InvalidWorkload(WorkloadIssue::NonPositiveBurst("A".into())))
        );
        assert_eq!(
            Workload::new(vec![ProcessSpec::new("B", -1, 3, 0)]),
            Err(SimError::InvalidWorkload(WorkloadIssue::NegativeArrival("B".into())))
        );
    }

    #[test]
    fn valid_specs_become_fresh_records() {
        let workload = Workload::new(vec![ProcessSpec::new("A", 2, 5, 3).labelled("svc")]).unwrap();
        let record = &workload.records()[0];

        assert_eq!(record.label, "svc");
        assert_eq!(record.remaining_time, 5);
        assert_eq!(record.response_time, None);
        assert!(!record.completed);
    }

    #[test]
    fn canonical_workload_matches_reference_services() {
        let workload = Workload::canonical();
        assert_eq!(workload.len(), 5);
        assert_eq!(workload.total_burst(), 31);
        assert_eq!(workload.records()[2].label, "Database Query Processor");
    }

    #[test]
    fn bernoulli_is_seeded_and_never_empty() {
        let a = Workload::bernoulli(50, 0.3, 0.3, 2, 6, 7);
        let b = Workload::bernoulli(50, 0.3, 0.3, 2, 6, 7);
        assert_eq!(a, b);

        let sparse = Workload::bernoulli(5, 0.0, 0.5, 1, 3, 0);
        assert_eq!(sparse.len(), 1);
        assert_eq!(sparse.records()[0].arrival_time, 4);
    }

    #[test]
    fn bernoulli_ids_sort_in_generation_order() {
        let dense = Workload::bernoulli(12, 1.0, 0.5, 1, 3, 3);
        let ids: Vec<_> = dense.records().iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids.len(), 12);
        assert_eq!(ids[0], "P01");
        assert_eq!(ids[9], "P10");
        assert!(ids.is_sorted());
    }
}
