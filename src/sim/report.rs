use super::driver::RunReport;
use super::registry::ComparisonRegistry;

/// Where finished runs go. The library never renders anything itself.
pub trait ReportSink {
    fn report_run(&mut self, report: &RunReport);

    fn report_comparison(&mut self, registry: &ComparisonRegistry);
}

/// Feeds every run, then the comparison, to `sink`.
pub fn deliver(sink: &mut dyn ReportSink, reports: &[RunReport], registry: &ComparisonRegistry) {
    for report in reports {
        sink.report_run(report);
    }
    sink.report_comparison(registry);
}
