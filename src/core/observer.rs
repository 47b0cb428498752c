use super::queue::ReadyQueue;
use super::state::SimCtx;

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SimCtx, ready: &ReadyQueue) {
        self.step += 1;

        for (proc, record) in ctx.records.iter().enumerate() {
            let id = &record.id;
            debug_assert!(
                record.remaining_time <= record.burst_time,
                "Process {id} has more work left than its burst"
            );
            debug_assert_eq!(
                record.completed,
                record.remaining_time == 0,
                "Process {id} completed flag disagrees with remaining time"
            );
            debug_assert!(
                !(record.completed && ready.contains(proc)),
                "Completed process {id} still present in the ready queue"
            );
            debug_assert_eq!(
                record.completion_time.is_some(),
                record.completed,
                "Process {id} completion time set before finishing"
            );

            if record.remaining_time < record.burst_time {
                debug_assert!(
                    record.response_time.is_some_and(|response| response >= 0.0),
                    "Process {id} ran without a response time"
                );
            }
        }
    }

    /// End-of-run cross check between the compacted trace and the switch
    /// counter.
    pub fn finish(&self, ctx: &SimCtx) {
        debug_assert!(ctx.all_completed(), "Run finished with incomplete processes");
        debug_assert_eq!(
            ctx.gantt.context_switches(),
            ctx.context_switches,
            "Gantt trace disagrees with the context switch counter after {} steps",
            self.step
        );
    }
}
