//! Scoped event subscriptions.
//!
//! [`EventHost`] stands in for whatever surface delivers events to the engine
//! (the document for pointer events, a size observer for container
//! measurements). Subscribing hands back a [`Subscription`] guard; dropping
//! the guard detaches it. The host counts live subscriptions per channel so
//! owners can be checked for leaks after teardown.
//!
//! Everything here is single-threaded, matching the event loop that drives
//! the editor.

#[cfg(test)]
#[path = "listen_test.rs"]
mod listen_test;

use std::cell::Cell;
use std::rc::Rc;

/// Event stream a subscription attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PointerMove,
    PointerUp,
    ContainerSize,
}

impl Channel {
    fn slot(self) -> usize {
        match self {
            Self::PointerMove => 0,
            Self::PointerUp => 1,
            Self::ContainerSize => 2,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    live: [Cell<usize>; 3],
}

/// Source of subscriptions. Cheap to clone; clones share counters.
#[derive(Debug, Clone, Default)]
pub struct EventHost {
    counters: Rc<Counters>,
}

impl EventHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to a channel. The returned guard detaches on drop.
    #[must_use]
    pub fn subscribe(&self, channel: Channel) -> Subscription {
        let cell = &self.counters.live[channel.slot()];
        cell.set(cell.get() + 1);
        Subscription { channel, counters: Rc::clone(&self.counters) }
    }

    /// Number of live subscriptions on a channel.
    #[must_use]
    pub fn active(&self, channel: Channel) -> usize {
        self.counters.live[channel.slot()].get()
    }
}

/// Live attachment to a channel.
#[derive(Debug)]
pub struct Subscription {
    channel: Channel,
    counters: Rc<Counters>,
}

impl Subscription {
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let cell = &self.counters.live[self.channel.slot()];
        cell.set(cell.get().saturating_sub(1));
    }
}
