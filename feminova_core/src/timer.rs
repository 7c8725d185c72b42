// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic one-shot timer queue.
//!
//! Components never call `setTimeout` themselves. They push tasks into a
//! [`TimerQueue`] with an absolute [`HostTime`] deadline, and the host drains
//! due tasks with [`TimerQueue::pop_due`] whenever its own platform timer
//! fires. [`TimerQueue::next_deadline`] tells the host when to wake up next.
//!
//! Tasks are ordered by `(deadline, insertion sequence)`. Two tasks with the
//! same deadline fire in the order they were scheduled, and a host that wakes
//! up late still drains everything in deadline order.

use alloc::collections::BTreeMap;

use crate::time::HostTime;

/// Handle to a scheduled task, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: HostTime,
    seq: u64,
}

impl TimerId {
    /// Returns the deadline this task was scheduled for.
    #[inline]
    #[must_use]
    pub const fn deadline(self) -> HostTime {
        self.deadline
    }
}

/// A queue of pending tasks keyed by deadline.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    pending: BTreeMap<TimerId, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `task` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: HostTime, task: T) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, task);
        id
    }

    /// Cancels a pending task, returning it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.pending.remove(&id)
    }

    /// Removes every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns the earliest task whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: HostTime) -> Option<(TimerId, T)> {
        let first = *self.pending.keys().next()?;
        if first.deadline > now {
            return None;
        }
        self.pending.remove(&first).map(|task| (first, task))
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.pending.keys().next().map(|id| id.deadline)
    }

    /// Returns `true` if the task is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Keeps only the tasks for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.pending.retain(|_, task| keep(task));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(HostTime(30), 'c');
        q.schedule(HostTime(10), 'a');
        q.schedule(HostTime(20), 'b');

        assert_eq!(q.next_deadline(), Some(HostTime(10)));
        let drained: Vec<char> = core::iter::from_fn(|| q.pop_due(HostTime(100)))
            .map(|(_, t)| t)
            .collect();
        assert_eq!(drained, ['a', 'b', 'c']);
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let mut q = TimerQueue::new();
        for i in 0..5_u8 {
            q.schedule(HostTime(50), i);
        }
        let drained: Vec<u8> = core::iter::from_fn(|| q.pop_due(HostTime(50)))
            .map(|(_, t)| t)
            .collect();
        assert_eq!(drained, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(HostTime(500), ());
        assert!(q.pop_due(HostTime(499)).is_none());
        assert!(q.pop_due(HostTime(500)).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_pending_task() {
        let mut q = TimerQueue::new();
        let a = q.schedule(HostTime(10), "a");
        let b = q.schedule(HostTime(20), "b");
        assert_eq!(q.cancel(a), Some("a"));
        assert_eq!(q.cancel(a), None, "second cancel is a no-op");
        assert!(q.contains(b));
        assert_eq!(q.next_deadline(), Some(HostTime(20)));
        assert_eq!(q.len(), 1);
    }
}
