pub mod driver;
pub mod event;
pub mod gantt;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::SchedCore;
pub use event::SimEvent;
pub use gantt::{GanttChart, GanttEntry};
pub use queue::{Rank, RankKey, ReadyQueue};
pub use state::{ProcIdx, ProcessRecord, SimCtx, SimTime, Ticks};
