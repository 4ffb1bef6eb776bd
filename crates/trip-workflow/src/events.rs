//! Event types for streaming workflow progress
//!
//! Events are sent from the orchestrator to the rendering layer (or any
//! consumer) whenever the workflow changes stage or drops a stale response.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::stage::{InFlight, Operation};

/// Trait for sending workflow events
///
/// This abstracts over the transport mechanism (log output, mpsc, UI bridge)
/// so the orchestrator can be used in different contexts.
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be sent (e.g., channel closed)
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn channel_closed() -> Self {
        Self {
            message: "Channel closed".to_string(),
        }
    }
}

/// Events emitted as the workflow moves between stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkflowEvent {
    /// A search request was issued
    #[serde(rename_all = "camelCase")]
    SearchStarted { trip_type: String, budget: f64 },

    /// Destination options were stored
    #[serde(rename_all = "camelCase")]
    ResultsReady { option_count: usize },

    /// A daily plan request was issued
    #[serde(rename_all = "camelCase")]
    PlanRequested { destination: String },

    /// A daily plan was stored
    #[serde(rename_all = "camelCase")]
    PlanReady { destination: String, day_count: usize },

    /// An image request was issued
    #[serde(rename_all = "camelCase")]
    ImagesRequested { destination: String },

    /// Images were stored
    #[serde(rename_all = "camelCase")]
    ImagesReady { image_count: usize },

    /// An in-flight request failed and the workflow moved to `Failed`
    #[serde(rename_all = "camelCase")]
    StepFailed { from: InFlight, error: String },

    /// A response arrived after a newer request superseded it
    #[serde(rename_all = "camelCase")]
    ResponseDiscarded { operation: Operation },

    /// The workflow returned to idle
    Reset,
}

/// A no-op event sink that discards all events
///
/// Useful for testing or when events aren't needed.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: WorkflowEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().clone()
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError> {
        self.events.lock().push(event);
        Ok(())
    }
}
