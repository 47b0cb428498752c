use serde::Serialize;

use super::state::SimTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttEntry {
    pub process: String,
    pub start: SimTime,
    pub end: SimTime,
}

impl GanttEntry {
    pub fn duration(&self) -> SimTime {
        self.end - self.start
    }
}

/// Run-length encoded record of which process held the CPU and when.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GanttChart {
    entries: Vec<GanttEntry>,
}

impl GanttChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the last entry when `process` picks up exactly where it left
    /// off, otherwise starts a new one.
    pub fn record(&mut self, process: &str, start: SimTime, end: SimTime) {
        debug_assert!(end >= start, "Gantt interval for {process} ends before it starts");

        if let Some(last) = self.entries.last_mut() {
            if last.process == process && last.end == start {
                last.end = end;
                return;
            }
        }

        self.entries.push(GanttEntry {
            process: process.to_owned(),
            start,
            end,
        });
    }

    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Every boundary between two compacted entries is a switch
    pub fn context_switches(&self) -> u32 {
        self.entries.len().saturating_sub(1) as u32
    }

    pub fn execution_order(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.process.as_str())
    }

    pub fn intervals_of<'a>(&'a self, process: &'a str) -> impl Iterator<Item = &'a GanttEntry> {
        self.entries.iter().filter(move |entry| entry.process == process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_slices_of_one_process_merge() {
        let mut gantt = GanttChart::new();
        gantt.record("P1", 0.0, 2.0);
        gantt.record("P1", 2.0, 4.0);

        assert_eq!(gantt.len(), 1);
        assert_eq!(gantt.entries()[0].end, 4.0);
        assert_eq!(gantt.context_switches(), 0);
    }

    #[test]
    fn gap_or_different_process_starts_new_entry() {
        let mut gantt = GanttChart::new();
        gantt.record("P1", 0.0, 2.0);
        gantt.record("P2", 2.1, 3.1);
        gantt.record("P2", 4.0, 5.0);

        assert_eq!(gantt.len(), 3);
        assert_eq!(gantt.context_switches(), 2);
        assert_eq!(gantt.execution_order().collect::<Vec<_>>(), ["P1", "P2", "P2"]);
        assert_eq!(gantt.intervals_of("P2").count(), 2);
    }

    #[test]
    fn empty_chart_reports_no_switches() {
        let gantt = GanttChart::new();
        assert!(gantt.is_empty());
        assert_eq!(gantt.context_switches(), 0);
    }
}
