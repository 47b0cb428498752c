pub mod driver;
pub mod job;
pub mod metrics;
pub mod profile;
pub mod registry;
pub mod report;

pub use driver::{RunReport, Sim, compare, run_policy};
pub use job::{ProcessSpec, Workload};
pub use metrics::PerformanceMetrics;
pub use profile::PlatformProfile;
pub use registry::ComparisonRegistry;
pub use report::{ReportSink, deliver};
