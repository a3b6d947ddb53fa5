//! Host event subscriptions
//!
//! Handlers are registered per event kind and receive the event along with
//! the state they may need: the current settings, their compiled outline
//! view and the event time.

use crate::config::Settings;
use crate::outline::OutlineConfig;
use std::collections::HashMap;
use std::time::Instant;

/// Kinds of host events the outline layer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Settings were reloaded or changed
    ConfigurationChanged,
    /// A different document became active
    ActiveDocumentChanged,
    /// The active document's text changed
    DocumentChanged,
}

/// An event as delivered to handlers.
#[derive(Debug, Clone, Copy)]
pub struct HostEvent<'a> {
    pub kind: EventKind,
    pub settings: &'a Settings,
    pub config: &'a OutlineConfig,
    pub now: Instant,
}

pub type Handler = Box<dyn FnMut(&HostEvent<'_>)>;

/// Subscription table keyed by event kind.
#[derive(Default)]
pub struct Subscriptions {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&HostEvent<'_>) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Call every handler registered for the event's kind, in registration
    /// order. Returns how many ran.
    pub fn emit(&mut self, event: &HostEvent<'_>) -> usize {
        match self.handlers.get_mut(&event.kind) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(event);
                }
                handlers.len()
            }
            None => 0,
        }
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(EventKind, usize)> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| *kind as u8);
        f.debug_struct("Subscriptions")
            .field("handlers", &counts)
            .finish()
    }
}
