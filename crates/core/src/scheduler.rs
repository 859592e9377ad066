//! Explicit tick-driven timer service.
//!
//! Replaces engine-hosted deferred callbacks with a scheduler owned and
//! polled by the caller. Timers are fire-and-forget: there is no
//! cancellation path, and duplicate pending timers are not deduplicated.

use crate::FrameTick;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A timer that has reached its due tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer<K> {
    /// Identity assigned at schedule time.
    pub id: TimerId,
    /// Caller-supplied payload describing what to do.
    pub kind: K,
    /// Tick the timer was due at (may be earlier than the poll tick).
    pub due: FrameTick,
}

#[derive(Debug, Clone, Copy)]
struct Pending<K> {
    id: TimerId,
    kind: K,
    due: FrameTick,
}

/// Tick-driven one-shot timer queue.
///
/// `K` is the caller's payload type; the scheduler never interprets it.
#[derive(Debug, Default)]
pub struct TickScheduler<K> {
    pending: Vec<Pending<K>>,
    next_id: u64,
}

impl<K: Copy> TickScheduler<K> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `kind` to fire `delay_ticks` after `now`.
    pub fn schedule(&mut self, now: FrameTick, delay_ticks: u64, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            kind,
            due: now.advance(delay_ticks),
        });
        id
    }

    /// Remove and return every timer due at or before `now`.
    ///
    /// Fired timers are returned ordered by due tick, ties broken by
    /// schedule order.
    pub fn fire_due(&mut self, now: FrameTick) -> Vec<FiredTimer<K>> {
        let mut fired: Vec<FiredTimer<K>> = Vec::new();
        self.pending.retain(|timer| {
            if timer.due <= now {
                fired.push(FiredTimer {
                    id: timer.id,
                    kind: timer.kind,
                    due: timer.due,
                });
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|timer| (timer.due, timer.id.0));
        fired
    }

    /// Number of timers still waiting to fire.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
