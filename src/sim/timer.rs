//! Single-shot timer clock
//!
//! Timers are advanced by the fixed timestep and fire at most once.

use super::host::TimerHandle;

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: f64,
}

/// Clock owning every pending timer of a scene
#[derive(Debug, Clone, Default)]
pub struct TimerClock {
    now_ms: f64,
    next_id: u32,
    /// Sorted by due time, then by handle
    pending: Vec<PendingTimer>,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced since creation
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule a timer `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due_ms = self.now_ms + delay_ms as f64;

        let idx = self
            .pending
            .iter()
            .position(|t| t.due_ms > due_ms)
            .unwrap_or(self.pending.len());
        self.pending.insert(idx, PendingTimer { handle, due_ms });
        handle
    }

    /// Remove a pending timer. Returns false if it was not pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock and return the timers that came due, in due order
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TimerHandle> {
        self.now_ms += dt_ms.max(0.0);

        let due = self
            .pending
            .iter()
            .take_while(|t| t.due_ms <= self.now_ms)
            .count();
        self.pending.drain(..due).map(|t| t.handle).collect()
    }
}
