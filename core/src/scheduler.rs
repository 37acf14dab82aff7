use alloc::collections::BinaryHeap;
use core::cmp::Ordering;

use crate::*;

/// Deferred engine actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    ResolveSelection,
    HideHint([CardId; 2]),
    Tick,
}

/// A task waiting for the clock to reach `due`, bound to the session it was scheduled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due: Millis,
    pub generation: Generation,
    pub task: Task,
    seq: u64,
}

// reversed so the max-heap pops the earliest task, scheduling order breaks ties
impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock with one-shot tasks, nothing fires until the owner advances it.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Millis,
    next_seq: u64,
    queue: BinaryHeap<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, delay: Millis, generation: Generation, task: Task) -> Millis {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        log::trace!("schedule {:?} for {} at {}", task, generation, due);
        self.queue.push(ScheduledTask {
            due,
            generation,
            task,
            seq,
        });
        due
    }

    /// Drops every task matching `predicate`, returns how many were dropped.
    pub fn cancel(&mut self, mut predicate: impl FnMut(&ScheduledTask) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|scheduled| !predicate(scheduled));
        before - self.queue.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Pops the earliest task due no later than `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<ScheduledTask> {
        if self.queue.peek()?.due > until {
            return None;
        }
        let scheduled = self.queue.pop()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }

    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEN: Generation = Generation(1);

    #[test]
    fn pops_in_due_order_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2000, GEN, Task::HideHint([0, 1]));
        scheduler.schedule(1000, GEN, Task::ResolveSelection);
        scheduler.schedule(1000, GEN, Task::Tick);

        assert_eq!(scheduler.pop_due(5000).unwrap().task, Task::ResolveSelection);
        assert_eq!(scheduler.now(), 1000);
        assert_eq!(scheduler.pop_due(5000).unwrap().task, Task::Tick);
        assert_eq!(scheduler.pop_due(5000).unwrap().task, Task::HideHint([0, 1]));
        assert_eq!(scheduler.pop_due(5000), None);
    }

    #[test]
    fn tasks_wait_for_their_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, GEN, Task::Tick);

        assert_eq!(scheduler.pop_due(999), None);
        scheduler.advance_to(999);
        assert_eq!(scheduler.now(), 999);
        assert!(scheduler.pop_due(1000).is_some());
    }

    #[test]
    fn delays_count_from_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(500);

        assert_eq!(scheduler.schedule(1000, GEN, Task::Tick), 1500);
    }

    #[test]
    fn cancel_removes_matching_tasks_only() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, GEN, Task::Tick);
        scheduler.schedule(1000, GEN, Task::ResolveSelection);

        assert_eq!(scheduler.cancel(|t| t.task == Task::Tick), 1);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pop_due(1000).unwrap().task, Task::ResolveSelection);
        scheduler.schedule(0, GEN, Task::Tick);
        assert_eq!(scheduler.cancel_all(), 1);
        assert!(scheduler.is_empty());
    }
}
