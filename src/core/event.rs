use serde::Serialize;

use crate::core::{ProcIdx, SimTime};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    Arrived {
        process: ProcIdx,
        at: SimTime,
    },
    ContextSwitch {
        from: ProcIdx,
        to: ProcIdx,
        at: SimTime,
    },
    Ran {
        process: ProcIdx,
        start: SimTime,
        end: SimTime,
    },
    Completed {
        process: ProcIdx,
        at: SimTime,
    },
    // Nothing ready; clock moved without charging anybody
    CpuIdle {
        from: SimTime,
        to: SimTime,
    },
}
