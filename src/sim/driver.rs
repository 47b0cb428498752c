use tracing::info;

use super::job::Workload;
use super::metrics::PerformanceMetrics;
use super::profile::PlatformProfile;
use super::registry::ComparisonRegistry;
use crate::{
    core::{GanttChart, ProcIdx, ProcessRecord, SchedCore, SimEvent, SimTime},
    error::SimError,
    scheduler::{FifoScheduler, Policy, PriqScheduler, PrrScheduler, Scheduler},
};

/// Everything one policy run hands to the reporting side.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub policy: Policy,
    pub records: Vec<ProcessRecord>,
    pub gantt: GanttChart,
    pub context_switches: u32,
    pub events: Vec<SimEvent>,
    pub metrics: PerformanceMetrics,
}

impl RunReport {
    pub fn record(&self, id: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Order in which processes finished.
    pub fn completion_order(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Completed { process, .. } => Some(self.records[*process].id.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One policy run over a private copy of a workload.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    policy: Policy,
    profile: PlatformProfile,
}

impl<S: Scheduler> Sim<S> {
    /// Fails when `S` does not implement `policy`, so a report's label
    /// always matches the discipline that produced it.
    pub fn new(policy: Policy, workload: &Workload, profile: &PlatformProfile) -> Result<Self, SimError> {
        Ok(Self {
            core: SchedCore::<S>::new(policy, workload.records().to_vec(), profile)?,
            policy,
            profile: profile.clone(),
        })
    }

    pub fn step(&mut self) -> Result<Option<ProcIdx>, SimError> {
        self.core.step()
    }

    pub fn all_completed(&self) -> bool {
        self.core.all_completed()
    }

    pub fn now(&self) -> SimTime {
        self.core.now()
    }

    pub fn finish(self) -> RunReport {
        let ctx = self.core.into_ctx();
        let metrics =
            PerformanceMetrics::calculate(self.policy, &self.profile, &ctx.records, ctx.context_switches);
        info!(
            policy = %self.policy,
            profile = %self.profile.name,
            processes = ctx.records.len(),
            switches = ctx.context_switches,
            total_time = metrics.total_time,
            "run finished"
        );

        RunReport {
            policy: self.policy,
            records: ctx.records,
            gantt: ctx.gantt,
            context_switches: ctx.context_switches,
            events: ctx.events,
            metrics,
        }
    }
}

fn simulate<S: Scheduler>(
    policy: Policy,
    workload: &Workload,
    profile: &PlatformProfile,
) -> Result<RunReport, SimError> {
    let mut sim = Sim::<S>::new(policy, workload, profile)?;
    while !sim.all_completed() {
        sim.step()?;
    }
    Ok(sim.finish())
}

/// Runs `policy` over a fresh copy of `workload`. Runs never share state, so
/// their order does not matter.
pub fn run_policy(
    policy: Policy,
    workload: &Workload,
    profile: &PlatformProfile,
) -> Result<RunReport, SimError> {
    profile.validate()?;
    info!(policy = %policy, profile = %profile.name, processes = workload.len(), "run started");

    match policy {
        Policy::Fcfs | Policy::RoundRobin => simulate::<FifoScheduler>(policy, workload, profile),
        Policy::Srtf
        | Policy::Sjf
        | Policy::PriorityPreemptive
        | Policy::PriorityNonPreemptive => simulate::<PriqScheduler>(policy, workload, profile),
        Policy::PriorityRoundRobin => simulate::<PrrScheduler>(policy, workload, profile),
    }
}

/// Runs every policy in order and collects their metrics into a fresh
/// registry sized for exactly these runs.
pub fn compare(
    workload: &Workload,
    policies: &[Policy],
    profile: &PlatformProfile,
) -> Result<(Vec<RunReport>, ComparisonRegistry), SimError> {
    let mut registry = ComparisonRegistry::with_capacity(policies.len());
    let mut reports = Vec::with_capacity(policies.len());

    for &policy in policies {
        let report = run_policy(policy, workload, profile)?;
        registry.record(report.metrics.clone())?;
        reports.push(report);
    }

    Ok((reports, registry))
}
