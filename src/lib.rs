pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{SimError, WorkloadIssue};
pub use scheduler::{Policy, Scheduler};
pub use sim::{ComparisonRegistry, PerformanceMetrics, PlatformProfile, RunReport, Workload};
