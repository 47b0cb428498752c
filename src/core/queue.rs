use keyed_priority_queue::KeyedPriorityQueue;
use std::collections::{BTreeMap, VecDeque};

use super::state::{ProcIdx, ProcessRecord};
use crate::error::SimError;

/// What a ranked queue orders its processes by. Lower values run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    RemainingTime,
    BurstTime,
    Priority,
}

impl RankKey {
    pub fn rank(self, record: &ProcessRecord) -> Rank {
        let key = match self {
            Self::RemainingTime => record.remaining_time as i64,
            Self::BurstTime => record.burst_time as i64,
            Self::Priority => record.priority as i64,
        };
        Rank {
            key,
            id: record.id.clone(),
        }
    }
}

/// Selection rank; equal keys fall back to the lower identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub key: i64,
    pub id: String,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[derive(Debug)]
enum Discipline {
    Fifo {
        procs: VecDeque<ProcIdx>,
    },
    // One FIFO per priority value; BTreeMap iterates lowest value first
    Buckets {
        levels: BTreeMap<i32, VecDeque<ProcIdx>>,
        len: usize,
    },
    Ranked {
        procs: KeyedPriorityQueue<ProcIdx, Rank>,
        by: RankKey,
    },
}

/// Bounded ready queue holding indices into the run's records. Pushing past
/// the bound is an error, never a silent drop.
#[derive(Debug)]
pub struct ReadyQueue {
    discipline: Discipline,
    capacity: usize,
}

impl ReadyQueue {
    pub fn fifo(capacity: usize) -> Self {
        Self {
            discipline: Discipline::Fifo {
                procs: VecDeque::new(),
            },
            capacity,
        }
    }

    pub fn buckets(capacity: usize) -> Self {
        Self {
            discipline: Discipline::Buckets {
                levels: BTreeMap::new(),
                len: 0,
            },
            capacity,
        }
    }

    pub fn ranked(by: RankKey, capacity: usize) -> Self {
        Self {
            discipline: Discipline::Ranked {
                procs: KeyedPriorityQueue::new(),
                by,
            },
            capacity,
        }
    }

    pub fn push(&mut self, proc: ProcIdx, record: &ProcessRecord) -> Result<(), SimError> {
        debug_assert!(!self.contains(proc), "Process {} queued twice", record.id);
        debug_assert!(!record.completed, "Completed process {} queued", record.id);

        if self.len() >= self.capacity {
            return Err(SimError::QueueCapacityExceeded {
                capacity: self.capacity,
            });
        }

        match &mut self.discipline {
            Discipline::Fifo { procs } => procs.push_back(proc),
            Discipline::Buckets { levels, len } => {
                levels.entry(record.priority).or_default().push_back(proc);
                *len += 1;
            }
            Discipline::Ranked { procs, by } => {
                procs.push(proc, by.rank(record));
            }
        }

        Ok(())
    }

    pub fn pop(&mut self) -> Option<ProcIdx> {
        match &mut self.discipline {
            Discipline::Fifo { procs } => procs.pop_front(),
            Discipline::Buckets { levels, len } => {
                let proc = levels.values_mut().find_map(|level| level.pop_front())?;
                *len -= 1;
                Some(proc)
            }
            Discipline::Ranked { procs, .. } => procs.pop().map(|(proc, _)| proc),
        }
    }

    pub fn len(&self) -> usize {
        match &self.discipline {
            Discipline::Fifo { procs } => procs.len(),
            Discipline::Buckets { len, .. } => *len,
            Discipline::Ranked { procs, .. } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, proc: ProcIdx) -> bool {
        match &self.discipline {
            Discipline::Fifo { procs } => procs.contains(&proc),
            Discipline::Buckets { levels, .. } => levels.values().any(|level| level.contains(&proc)),
            Discipline::Ranked { procs, .. } => procs.get_priority(&proc).is_some(),
        }
    }
}
