use std::num::NonZeroU64;

use sched_model::{
    ComparisonRegistry, PlatformProfile, Policy, RunReport, SimError, Workload,
    scheduler::{FifoScheduler, PriqScheduler, PrrScheduler},
    sim::{ReportSink, Sim, compare, deliver, run_policy},
};

const EPS: f64 = 1e-6;

fn workloads() -> Vec<Workload> {
    let mut workloads = vec![Workload::canonical()];
    workloads.extend((0..8).map(|seed| Workload::bernoulli(30, 0.3, 0.3, 2, 6, seed)));
    // Sparse arrivals leave the CPU idle between processes
    workloads.extend((0..4).map(|seed| Workload::bernoulli(40, 0.08, 0.5, 1, 3, seed)));
    workloads
}

fn every_run() -> impl Iterator<Item = (Workload, RunReport)> {
    let profiles = [
        PlatformProfile::linux(),
        PlatformProfile::windows(),
        // Free switches with the shortest quantum: back-to-back slices of
        // different processes must still count as switches
        PlatformProfile::new("ideal", NonZeroU64::MIN, 0.0),
        PlatformProfile::new("batch", NonZeroU64::new(1_000).unwrap(), 0.25),
    ];
    workloads().into_iter().flat_map(move |workload| {
        let profiles = profiles.clone();
        Policy::ALL.into_iter().flat_map(move |policy| {
            let workload = workload.clone();
            profiles.clone().into_iter().map(move |profile| {
                let report = run_policy(policy, &workload, &profile).unwrap();
                (workload.clone(), report)
            })
        })
    })
}

#[test]
fn per_process_timings_are_consistent() {
    for (_, report) in every_run() {
        for record in &report.records {
            let ctx = format!("{} under {}", record.id, report.policy);
            assert!(record.completed, "{ctx}");
            assert_eq!(record.remaining_time, 0, "{ctx}");

            let arrival = record.arrival_time as f64;
            let burst = record.burst_time as f64;
            let completion = record.completion_time.unwrap();
            let turnaround = record.turnaround_time.unwrap();
            let waiting = record.waiting_time.unwrap();
            let response = record.response_time.unwrap();
            let start = record.start_time.unwrap();

            assert!((turnaround - (completion - arrival)).abs() < EPS, "{ctx}");
            assert!((waiting - (turnaround - burst)).abs() < EPS, "{ctx}");
            assert!(waiting > -EPS, "{ctx}");
            assert!(response >= 0.0, "{ctx}");
            assert!((response - (start - arrival)).abs() < EPS, "{ctx}");
            assert!(completion + EPS >= arrival + burst, "{ctx}");
        }
    }
}

#[test]
fn trace_accounts_for_every_unit_of_work() {
    for (workload, report) in every_run() {
        let policy = report.policy;
        let total_burst = workload.total_burst() as f64;

        assert!((report.metrics.effective_cpu_time - total_burst).abs() < EPS, "{policy}");
        assert_eq!(report.gantt.context_switches(), report.context_switches, "{policy}");
        assert_eq!(report.metrics.total_context_switches, report.context_switches);

        let ran: f64 = report.gantt.entries().iter().map(|entry| entry.duration()).sum();
        assert!((ran - total_burst).abs() < EPS, "{policy}");

        for pair in report.gantt.entries().windows(2) {
            assert_ne!(pair[0].process, pair[1].process, "{policy}: adjacent entries not merged");
            assert!(pair[0].end <= pair[1].start + EPS, "{policy}: overlapping entries");
        }

        let per_process: u32 = report.records.iter().map(|r| r.context_switches).sum();
        assert_eq!(per_process, report.context_switches, "{policy}");
    }
}

#[test]
fn non_preemptive_policies_run_each_process_once() {
    for (_, report) in every_run() {
        if report.policy.is_preemptive() {
            continue;
        }

        for record in &report.records {
            let intervals: Vec<_> = report.gantt.intervals_of(&record.id).collect();
            assert_eq!(intervals.len(), 1, "{} under {}", record.id, report.policy);
            assert!((intervals[0].duration() - record.burst_time as f64).abs() < EPS);
        }
    }
}

#[test]
fn metrics_follow_from_the_records() {
    for (_, report) in every_run() {
        let m = &report.metrics;
        let latest = report
            .records
            .iter()
            .filter_map(|record| record.completion_time)
            .fold(0.0, f64::max);

        assert_eq!(m.total_time, latest);
        assert!((m.throughput - report.records.len() as f64 / latest).abs() < EPS);
        assert!(m.cpu_utilization <= 100.0 + EPS);
        assert!(m.cs_overhead_percent >= 0.0);
    }
}

#[test]
fn runs_are_deterministic() {
    let workload = Workload::bernoulli(30, 0.4, 0.3, 2, 6, 42);
    let profile = PlatformProfile::linux();

    for policy in Policy::ALL {
        let first = run_policy(policy, &workload, &profile).unwrap();
        let second = run_policy(policy, &workload, &profile).unwrap();
        assert_eq!(first, second, "{policy}");
    }
}

#[test]
fn stepping_reports_each_completion_once() {
    let workload = Workload::canonical();
    let mut sim =
        Sim::<FifoScheduler>::new(Policy::Fcfs, &workload, &PlatformProfile::linux()).unwrap();

    let mut finished = Vec::new();
    while !sim.all_completed() {
        if let Some(proc) = sim.step().unwrap() {
            finished.push(proc);
        }
    }

    assert_eq!(finished, [0, 1, 2, 3, 4]);
    assert!((sim.now() - 31.4).abs() < EPS);
    assert_eq!(sim.finish().completion_order(), ["P1", "P4", "P2", "P3", "P5"]);
}

#[test]
fn scheduler_type_must_implement_the_policy() {
    let workload = Workload::canonical();
    let profile = PlatformProfile::linux();

    assert!(matches!(
        Sim::<FifoScheduler>::new(Policy::Srtf, &workload, &profile),
        Err(SimError::PolicyMismatch { policy: Policy::Srtf, .. })
    ));
    assert!(matches!(
        Sim::<PriqScheduler>::new(Policy::RoundRobin, &workload, &profile),
        Err(SimError::PolicyMismatch { policy: Policy::RoundRobin, .. })
    ));
    assert!(matches!(
        Sim::<PrrScheduler>::new(Policy::Fcfs, &workload, &profile),
        Err(SimError::PolicyMismatch { policy: Policy::Fcfs, .. })
    ));

    for policy in [Policy::Srtf, Policy::Sjf, Policy::PriorityPreemptive, Policy::PriorityNonPreemptive] {
        assert!(Sim::<PriqScheduler>::new(policy, &workload, &profile).is_ok(), "{policy}");
    }
}

#[derive(Default)]
struct CountingSink {
    runs: Vec<Policy>,
    comparisons: usize,
}

impl ReportSink for CountingSink {
    fn report_run(&mut self, report: &RunReport) {
        self.runs.push(report.policy);
    }

    fn report_comparison(&mut self, registry: &ComparisonRegistry) {
        assert_eq!(registry.len(), self.runs.len());
        self.comparisons += 1;
    }
}

#[test]
fn deliver_feeds_runs_then_the_comparison() {
    let suite = Policy::linux_suite();
    let (reports, registry) =
        compare(&Workload::canonical(), &suite, &PlatformProfile::linux()).unwrap();

    let mut sink = CountingSink::default();
    deliver(&mut sink, &reports, &registry);

    assert_eq!(sink.runs, suite);
    assert_eq!(sink.comparisons, 1);
}
