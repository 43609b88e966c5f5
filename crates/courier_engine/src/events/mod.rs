//! Gameplay event queue
//!
//! Systems raise events during a tick; the scheduler dispatches them once
//! the tick's structural changes are flushed.
//! - Handlers register for one event type and only see that type
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Events raised during a tick are queued, never delivered mid-tick

use std::collections::HashMap;

use crate::ecs::Entity;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A delivery zone was entered for the first time
    DeliveryTriggered,
}

/// Event raised by the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameplayEvent {
    /// `actor` entered the untriggered `zone`
    DeliveryTriggered {
        /// Entity owning the DeliveryZone
        zone: Entity,
        /// Deliverable entity found inside the zone
        actor: Entity,
        /// Tick the trigger happened on
        tick: u64,
    },
}

impl GameplayEvent {
    /// Type used for handler routing
    pub fn event_type(&self) -> EventType {
        match self {
            Self::DeliveryTriggered { .. } => EventType::DeliveryTriggered,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &GameplayEvent) -> bool;
}

impl<F> EventHandler for F
where
    F: FnMut(&GameplayEvent) -> bool,
{
    fn on_event(&mut self, event: &GameplayEvent) -> bool {
        self(event)
    }
}

/// Queue with per-type handler registration
#[derive(Default)]
pub struct EventQueue {
    pending: Vec<GameplayEvent>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
}

impl EventQueue {
    /// Create an empty queue with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event type
    /// Handlers run in registration order
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: GameplayEvent) {
        self.pending.push(event);
    }

    /// Events waiting for dispatch
    pub fn pending(&self) -> &[GameplayEvent] {
        &self.pending
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver every queued event in send order.
    ///
    /// Returns the events, so callers without handlers can still observe
    /// what happened during the tick.
    pub fn dispatch(&mut self) -> Vec<GameplayEvent> {
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            self.dispatch_event(event);
        }
        events
    }

    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &GameplayEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type()) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Drop queued events without delivering them
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.pending)
            .field("handler_types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
