use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, trace};

use super::event::SimEvent;
use super::gantt::GanttChart;

// Index into the run's record Vec
pub type ProcIdx = usize;
pub type Ticks = u64;
pub type SimTime = f64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRecord {
    pub id: String,
    pub label: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
    pub remaining_time: Ticks,
    pub start_time: Option<SimTime>,
    pub response_time: Option<SimTime>,
    pub completion_time: Option<SimTime>,
    pub turnaround_time: Option<SimTime>,
    pub waiting_time: Option<SimTime>,
    pub completed: bool,
    pub context_switches: u32,
}

impl ProcessRecord {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            start_time: None,
            response_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            completed: false,
            context_switches: 0,
        }
    }

    pub fn has_arrived(&self, now: SimTime) -> bool {
        self.arrival_time as SimTime <= now
    }

    /// Simultaneous arrivals are ordered by identifier.
    pub fn arrival_order(a: &Self, b: &Self) -> Ordering {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Everything one policy run mutates: the clock, its private copy of the
/// workload and the trace being built.
#[derive(Debug)]
pub struct SimCtx {
    pub now: SimTime,
    pub records: Vec<ProcessRecord>,
    pub gantt: GanttChart,
    pub events: Vec<SimEvent>,
    pub context_switches: u32,
    pub last_dispatched: Option<ProcIdx>,
    penalty: SimTime,

    // Records sorted by arrival; everything before the cursor has been admitted
    arrival_order: Vec<ProcIdx>,
    arrival_cursor: usize,
}

impl SimCtx {
    pub fn new(mut records: Vec<ProcessRecord>, penalty: SimTime, sort_by_arrival: bool) -> Self {
        if sort_by_arrival {
            records.sort_by(ProcessRecord::arrival_order);
        }

        let mut arrival_order: Vec<ProcIdx> = (0..records.len()).collect();
        arrival_order.sort_by(|&a, &b| ProcessRecord::arrival_order(&records[a], &records[b]));

        Self {
            now: 0.0,
            records,
            gantt: GanttChart::new(),
            events: Vec::new(),
            context_switches: 0,
            last_dispatched: None,
            penalty,
            arrival_order,
            arrival_cursor: 0,
        }
    }

    pub fn record(&self, proc: ProcIdx) -> &ProcessRecord {
        &self.records[proc]
    }

    pub fn advance_time(&mut self, delta: SimTime) {
        self.now += delta;
    }

    /// Arrival time of the earliest process not admitted yet.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.arrival_order
            .get(self.arrival_cursor)
            .map(|&proc| self.records[proc].arrival_time)
    }

    /// Moves the admission cursor past every process that has arrived by
    /// now and returns them in arrival order.
    pub fn take_arrivals(&mut self) -> Vec<ProcIdx> {
        let now = self.now;
        let arrived: Vec<ProcIdx> = self.arrival_order[self.arrival_cursor..]
            .iter()
            .copied()
            .take_while(|&proc| self.records[proc].has_arrived(now))
            .collect();
        self.arrival_cursor += arrived.len();

        for &proc in &arrived {
            self.events.push(SimEvent::Arrived {
                process: proc,
                at: self.records[proc].arrival_time as SimTime,
            });
        }

        arrived
    }

    pub fn idle_until(&mut self, until: SimTime) {
        debug_assert!(until > self.now, "Idle period must move the clock forward");
        trace!(from = self.now, to = until, "cpu idle");
        self.events.push(SimEvent::CpuIdle {
            from: self.now,
            to: until,
        });
        self.now = until;
    }

    /// Hands the CPU to `proc`. Charges the switch penalty when somebody
    /// else held the CPU last; the first dispatch of a run is free.
    pub fn dispatch(&mut self, proc: ProcIdx) {
        if let Some(prev) = self.last_dispatched {
            if prev != proc {
                self.advance_time(self.penalty);
                self.context_switches += 1;
                self.records[proc].context_switches += 1;
                debug!(
                    from = %self.records[prev].id,
                    to = %self.records[proc].id,
                    at = self.now,
                    "context switch"
                );
                self.events.push(SimEvent::ContextSwitch {
                    from: prev,
                    to: proc,
                    at: self.now,
                });
            }
        }
        self.last_dispatched = Some(proc);

        let now = self.now;
        let record = &mut self.records[proc];
        if record.response_time.is_none() {
            record.start_time = Some(now);
            record.response_time = Some(now - record.arrival_time as SimTime);
        }
    }

    /// Runs the dispatched process for `units` of CPU time.
    pub fn execute(&mut self, proc: ProcIdx, units: Ticks) {
        let start = self.now;
        let end = start + units as SimTime;

        let record = &mut self.records[proc];
        debug_assert!(
            units > 0 && units <= record.remaining_time,
            "Process {} cannot run {units} of {} remaining units",
            record.id,
            record.remaining_time
        );
        record.remaining_time -= units;
        self.gantt.record(&record.id, start, end);
        trace!(process = %record.id, start, end, remaining = record.remaining_time, "slice");

        self.events.push(SimEvent::Ran {
            process: proc,
            start,
            end,
        });
        self.now = end;
    }

    pub fn mark_completed(&mut self, proc: ProcIdx) {
        let now = self.now;
        let record = &mut self.records[proc];
        debug_assert_eq!(
            record.remaining_time, 0,
            "Process {} completed with work left",
            record.id
        );

        let turnaround = now - record.arrival_time as SimTime;
        record.completed = true;
        record.completion_time = Some(now);
        record.turnaround_time = Some(turnaround);
        record.waiting_time = Some(turnaround - record.burst_time as SimTime);
        debug!(process = %record.id, at = now, "completed");

        self.events.push(SimEvent::Completed {
            process: proc,
            at: now,
        });
    }

    pub fn all_completed(&self) -> bool {
        self.records.iter().all(|record| record.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|record| record.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SimCtx {
        SimCtx::new(
            vec![
                ProcessRecord::new("P2", "", 1, 4, 1),
                ProcessRecord::new("P1", "", 0, 2, 2),
                ProcessRecord::new("P0", "", 1, 1, 3),
            ],
            0.5,
            false,
        )
    }

    #[test]
    fn arrivals_are_admitted_in_arrival_then_id_order() {
        let mut ctx = ctx();
        assert_eq!(ctx.take_arrivals(), vec![1]);
        assert_eq!(ctx.next_arrival(), Some(1));

        ctx.advance_time(1.0);
        assert_eq!(ctx.take_arrivals(), vec![2, 0]);
        assert_eq!(ctx.next_arrival(), None);
        assert!(ctx.take_arrivals().is_empty());
    }

    #[test]
    fn sorting_reorders_records_for_arrival_ordered_runs() {
        let ctx = SimCtx::new(ctx().records, 0.5, true);
        let ids: Vec<_> = ctx.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["P1", "P0", "P2"]);
    }

    #[test]
    fn first_dispatch_is_free_and_later_switches_are_charged() {
        let mut ctx = ctx();
        ctx.advance_time(1.0);
        ctx.take_arrivals();

        ctx.dispatch(1);
        assert_eq!(ctx.now, 1.0);
        assert_eq!(ctx.context_switches, 0);
        assert_eq!(ctx.record(1).response_time, Some(1.0));

        ctx.execute(1, 1);
        ctx.dispatch(1);
        assert_eq!(ctx.context_switches, 0);

        ctx.dispatch(0);
        assert_eq!(ctx.now, 2.5);
        assert_eq!(ctx.context_switches, 1);
        assert_eq!(ctx.record(0).context_switches, 1);
        assert_eq!(ctx.record(0).response_time, Some(1.5));
    }

    #[test]
    fn response_time_is_only_set_on_first_dispatch() {
        let mut ctx = ctx();
        ctx.dispatch(1);
        ctx.execute(1, 1);
        ctx.advance_time(3.0);
        ctx.dispatch(1);

        assert_eq!(ctx.record(1).start_time, Some(0.0));
        assert_eq!(ctx.record(1).response_time, Some(0.0));
    }

    #[test]
    fn completion_fills_derived_timings() {
        let mut ctx = ctx();
        ctx.dispatch(1);
        ctx.execute(1, 2);
        ctx.mark_completed(1);

        let record = ctx.record(1);
        assert!(record.completed);
        assert_eq!(record.completion_time, Some(2.0));
        assert_eq!(record.turnaround_time, Some(2.0));
        assert_eq!(record.waiting_time, Some(0.0));
        assert_eq!(ctx.completed_count(), 1);
        assert!(!ctx.all_completed());
    }
}
