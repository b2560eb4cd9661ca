//! Generation guard for in-flight action pipelines.
//!
//! A caller that starts a new action (or dismisses the old one) bumps the
//! generation; results that arrive for an older ticket are dropped instead of
//! being applied.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionTicket(u64);

#[derive(Debug, Default)]
pub struct ActionTracker {
    generation: AtomicU64,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pipeline, superseding every earlier ticket.
    pub fn begin(&self) -> ActionTicket {
        ActionTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Abandons whatever is in flight without starting anything new.
    pub fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: ActionTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Hands `value` back only if `ticket` is still the latest pipeline.
    pub fn accept<T>(&self, ticket: ActionTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
