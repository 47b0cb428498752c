use super::{
    observer::Observer,
    state::{ProcIdx, ProcessRecord, SimCtx, SimTime},
};
use crate::error::SimError;
use crate::scheduler::{IdleAdvance, Policy, Scheduler};
use crate::sim::PlatformProfile;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(
        policy: Policy,
        records: Vec<ProcessRecord>,
        profile: &PlatformProfile,
    ) -> Result<Self, SimError> {
        let scheduler = S::init(policy, profile)?;
        let ctx = SimCtx::new(
            records,
            profile.context_switch_penalty,
            policy.arrival_ordered(),
        );
        let observer = Observer::new();
        Ok(Self {
            ctx,
            scheduler,
            observer,
        })
    }

    /// One dispatch decision. Returns the process that finished during this
    /// step, if any.
    pub fn step(&mut self) -> Result<Option<ProcIdx>, SimError> {
        self.admit_arrivals()?;

        let proc = match self.scheduler.dispatch(&self.ctx) {
            Some(proc) => proc,
            None => {
                self.idle();
                return Ok(None);
            }
        };

        self.ctx.dispatch(proc);
        let slice = self
            .scheduler
            .slice(&self.ctx, proc)
            .min(self.ctx.record(proc).remaining_time);
        self.ctx.execute(proc, slice);

        // Whoever arrived during the slice queues up ahead of the process
        // that just ran
        self.admit_arrivals()?;

        let completed = if self.ctx.record(proc).remaining_time == 0 {
            self.ctx.mark_completed(proc);
            Some(proc)
        } else {
            self.scheduler.enqueue(&self.ctx, proc)?;
            None
        };

        self.observer.observe(&self.ctx, self.scheduler.ready());
        Ok(completed)
    }

    fn admit_arrivals(&mut self) -> Result<(), SimError> {
        for proc in self.ctx.take_arrivals() {
            self.scheduler.enqueue(&self.ctx, proc)?;
        }
        Ok(())
    }

    fn idle(&mut self) {
        let next = match self.ctx.next_arrival() {
            Some(arrival) => arrival as SimTime,
            None => {
                debug_assert!(self.ctx.all_completed(), "Nothing ready and nothing left to arrive");
                return;
            }
        };

        let until = match self.scheduler.idle_advance() {
            IdleAdvance::Tick => self.ctx.now + 1.0,
            IdleAdvance::NextArrival => next,
        };
        self.ctx.idle_until(until);
    }

    pub fn all_completed(&self) -> bool {
        self.ctx.all_completed()
    }

    pub fn now(&self) -> SimTime {
        self.ctx.now
    }

    pub fn into_ctx(self) -> SimCtx {
        self.observer.finish(&self.ctx);
        self.ctx
    }
}
