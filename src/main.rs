use std::num::NonZeroU64;
use std::process::ExitCode;

use average::Estimate;
use clap::{Parser, ValueEnum};
use sched_model::{
    ComparisonRegistry, PlatformProfile, Policy, RunReport, Workload,
    sim::{ReportSink, compare, deliver},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    Linux,
    Windows,
}

/// Compare CPU scheduling policies on a simulated workload
#[derive(Parser, Debug)]
#[command(name = "sched-model")]
struct Args {
    /// Platform profile, also selects the policy line-up
    #[arg(short, long, value_enum, default_value_t = ProfileArg::Linux)]
    profile: ProfileArg,

    /// Override the profile's time quantum
    #[arg(short, long)]
    quantum: Option<NonZeroU64>,

    /// Override the profile's context switch penalty
    #[arg(long)]
    penalty: Option<f64>,

    /// Generate a Bernoulli workload instead of the canonical five processes
    #[arg(long, default_value_t = false)]
    random: bool,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Arrival window for --random
    #[arg(long, default_value_t = 20)]
    ticks: u64,
}

struct TextSink;

impl ReportSink for TextSink {
    fn report_run(&mut self, report: &RunReport) {
        let m = &report.metrics;
        println!("\n== {} ({})", report.policy, m.profile);
        println!(
            "{:<8} {:<30} {:>4} {:>4} {:>4} {:>8} {:>8} {:>8} {:>8} {:>4}",
            "Process", "Service", "AT", "BT", "Pri", "CT", "TAT", "WT", "RT", "CS"
        );

        let mut records: Vec<_> = report.records.iter().collect();
        records.sort_by(|a, b| a.arrival_time.cmp(&b.arrival_time).then_with(|| a.id.cmp(&b.id)));
        for r in records {
            let label: String = r.label.chars().take(30).collect();
            println!(
                "{:<8} {:<30} {:>4} {:>4} {:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>4}",
                r.id,
                label,
                r.arrival_time,
                r.burst_time,
                r.priority,
                r.completion_time.unwrap_or_default(),
                r.turnaround_time.unwrap_or_default(),
                r.waiting_time.unwrap_or_default(),
                r.response_time.unwrap_or_default(),
                r.context_switches
            );
        }

        println!("Average turnaround time:  {:.2}", m.avg_turnaround_time);
        println!("Average waiting time:     {:.2}", m.avg_waiting_time);
        println!("Average response time:    {:.2}", m.avg_response_time);
        println!("Context switches:         {}", m.total_context_switches);
        println!("Context switch penalty:   {:.2}", m.total_cs_penalty);
        println!("Effective CPU time:       {:.2}", m.effective_cpu_time);
        println!("Total time:               {:.2}", m.total_time);
        println!("CPU utilization:          {:.2}%", m.cpu_utilization);
        println!("Context switch overhead:  {:.2}%", m.cs_overhead_percent);
        println!("Throughput:               {:.4} processes/unit", m.throughput);

        let order: Vec<_> = report.gantt.execution_order().collect();
        println!(
            "Execution order: {} ({} context switches)",
            order.join(" -> "),
            report.gantt.context_switches()
        );
    }

    fn report_comparison(&mut self, registry: &ComparisonRegistry) {
        println!(
            "\n{:<26} {:>8} {:>8} {:>8} {:>6} {:>10} {:>8} {:>8}",
            "Algorithm", "TAT", "WT", "RT", "CS", "CS Pen", "CPU%", "CS OH%"
        );
        for m in registry.entries() {
            println!(
                "{:<26} {:>8.2} {:>8.2} {:>8.2} {:>6} {:>10.2} {:>8.2} {:>8.2}",
                m.policy.name(),
                m.avg_turnaround_time,
                m.avg_waiting_time,
                m.avg_response_time,
                m.total_context_switches,
                m.total_cs_penalty,
                m.cpu_utilization,
                m.cs_overhead_percent
            );
        }

        if let Some(best) = registry.best_by_turnaround() {
            println!("Best turnaround:          {}", best.policy);
        }
        if let Some(fewest) = registry.fewest_context_switches() {
            println!("Fewest context switches:  {}", fewest.policy);
        }
        if let Some(worst) = registry.highest_overhead() {
            println!("Highest switch overhead:  {}", worst.policy);
        }
        println!(
            "Mean turnaround across policies: {:.2}",
            avg(registry.entries().iter().map(|m| m.avg_turnaround_time))
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let (mut profile, suite) = match args.profile {
        ProfileArg::Linux => (PlatformProfile::linux(), Policy::linux_suite()),
        ProfileArg::Windows => (PlatformProfile::windows(), Policy::windows_suite()),
    };
    if let Some(quantum) = args.quantum {
        profile.time_quantum = quantum;
    }
    if let Some(penalty) = args.penalty {
        profile.context_switch_penalty = penalty;
    }

    let workload = if args.random {
        Workload::bernoulli(args.ticks, 0.3, 0.3, 2, 6, args.seed)
    } else {
        Workload::canonical()
    };

    match compare(&workload, &suite, &profile) {
        Ok((reports, registry)) => {
            deliver(&mut TextSink, &reports, &registry);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("simulation failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
