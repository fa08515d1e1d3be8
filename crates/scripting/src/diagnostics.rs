//! Structured diagnostic events.
//!
//! Events carry entity ids only, never entity state.

use orbiter_core::EntityId;
use serde::Serialize;
use std::fmt;

/// Diagnostic emitted by a behaviour or by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    /// A behaviour initialized against `entity`.
    EntityBound {
        /// The bound entity.
        entity: EntityId,
    },
    /// The host stopped driving a behaviour after it failed.
    ScriptFaulted {
        /// Slot the behaviour occupied.
        slot: u32,
        /// Entity it was bound to, if any.
        entity: Option<EntityId>,
        /// Error text.
        reason: String,
    },
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::EntityBound { entity } => write!(f, "EntityBound entity={entity}"),
            DiagnosticEvent::ScriptFaulted { slot, entity: Some(entity), reason } => {
                write!(f, "ScriptFaulted slot={slot} entity={entity} reason={reason}")
            }
            DiagnosticEvent::ScriptFaulted { slot, entity: None, reason } => {
                write!(f, "ScriptFaulted slot={slot} reason={reason}")
            }
        }
    }
}

/// Destination for diagnostic events.
pub trait DiagnosticSink {
    /// Accept one event.
    fn record(&mut self, event: DiagnosticEvent);
}

/// Sink that logs each event through `tracing` and keeps it until drained.
#[derive(Debug, Default)]
pub struct DiagnosticBus {
    events: Vec<DiagnosticEvent>,
}

impl DiagnosticBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    /// Take every pending event.
    pub fn drain(&mut self) -> Vec<DiagnosticEvent> {
        self.events.drain(..).collect()
    }
}

impl DiagnosticSink for DiagnosticBus {
    fn record(&mut self, event: DiagnosticEvent) {
        match &event {
            DiagnosticEvent::EntityBound { entity } => {
                tracing::info!(%entity, "behaviour bound to entity");
            }
            DiagnosticEvent::ScriptFaulted { slot, reason, .. } => {
                tracing::debug!(slot, %reason, "recorded behaviour fault");
            }
        }
        self.events.push(event);
    }
}
