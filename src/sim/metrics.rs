use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::{ProcessRecord, SimTime};
use crate::scheduler::Policy;

use super::PlatformProfile;

/// Aggregate outcome of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub policy: Policy,
    pub profile: String,
    pub avg_turnaround_time: SimTime,
    pub avg_waiting_time: SimTime,
    pub avg_response_time: SimTime,
    /// Processes finished per unit of simulated time.
    pub throughput: f64,
    /// Share of elapsed time spent on actual bursts, in percent.
    pub cpu_utilization: f64,
    pub total_context_switches: u32,
    pub total_cs_penalty: SimTime,
    /// Sum of burst times.
    pub effective_cpu_time: SimTime,
    /// Latest completion time.
    pub total_time: SimTime,
    pub cs_overhead_percent: f64,
}

impl PerformanceMetrics {
    /// Reduces a finished run. A zero elapsed time yields zero rates
    /// instead of dividing by it.
    pub fn calculate(
        policy: Policy,
        profile: &PlatformProfile,
        records: &[ProcessRecord],
        context_switches: u32,
    ) -> Self {
        let avg = |field: fn(&ProcessRecord) -> Option<SimTime>| {
            records
                .iter()
                .map(|record| field(record).unwrap_or_default())
                .collect::<Mean>()
                .estimate()
        };

        let total_time = records
            .iter()
            .filter_map(|record| record.completion_time)
            .fold(0.0, SimTime::max);
        let effective_cpu_time = records
            .iter()
            .map(|record| record.burst_time as SimTime)
            .sum::<SimTime>();
        let total_cs_penalty = context_switches as SimTime * profile.context_switch_penalty;

        let rate = |value: f64| if total_time > 0.0 { value / total_time } else { 0.0 };

        Self {
            policy,
            profile: profile.name.clone(),
            avg_turnaround_time: avg(|record| record.turnaround_time),
            avg_waiting_time: avg(|record| record.waiting_time),
            avg_response_time: avg(|record| record.response_time),
            throughput: rate(records.len() as f64),
            cpu_utilization: rate(effective_cpu_time) * 100.0,
            total_context_switches: context_switches,
            total_cs_penalty,
            effective_cpu_time,
            total_time,
            cs_overhead_percent: rate(total_cs_penalty) * 100.0,
        }
    }
}
