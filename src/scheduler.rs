//! Deadline queue for scheduled steps.
//!
//! Every entry carries an **absolute** deadline computed once from the
//! trigger instant, so late wake-ups never shift the steps that follow:
//! a worker that oversleeps simply finds several entries due at once and
//! pops them in order.
//!
//! ```text
//!  schedule(T0+300) ─┐
//!  schedule(T0+500) ─┤    ┌────────────────────┐   pop_due(now)
//!  schedule(T0+800) ─┼──▶ │ TimerQueue<T, N>   │ ──▶ earliest due entry
//!  schedule(T0+1000)─┘    │ (deadline, seq, T) │     (ties: insertion order)
//!                         └────────────────────┘
//!          cancel(handle) ──▶ entry removed, never fires
//! ```

use std::time::Instant;

use heapless::Vec;

/// Cancellation handle for one scheduled entry.
///
/// Handles are never reused within a queue, so cancelling a handle whose
/// entry already fired is a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

/// The queue has no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

#[derive(Debug, Clone, Copy)]
struct Entry<T> {
    deadline: Instant,
    handle: TimerHandle,
    payload: T,
}

/// Fixed-capacity queue of `(deadline, payload)` entries.
pub struct TimerQueue<T, const N: usize> {
    entries: Vec<Entry<T>, N>,
    next_id: u32,
}

impl<T: Copy, const N: usize> TimerQueue<T, N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> Result<TimerHandle, QueueFull> {
        let handle = TimerHandle(self.next_id);
        self.entries
            .push(Entry {
                deadline,
                handle,
                payload,
            })
            .map_err(|_| QueueFull)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(handle)
    }

    /// Remove an entry before it fires.  Returns `false` if it already
    /// fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Pop the earliest entry whose deadline is at or before `now`.
    ///
    /// Entries are kept in insertion order, so the first minimum found is
    /// also the earliest scheduled among equal deadlines.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| e.deadline)
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(idx);
        Some((entry.handle, entry.payload))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Copy, const N: usize> Default for TimerQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
