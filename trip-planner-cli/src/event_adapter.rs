//! Event adapter for reporting workflow progress in the terminal
//!
//! Bridges the workflow's generic `EventSink` to log output, so progress shows
//! up alongside the rest of the application logs.

use trip_workflow::{EventError, EventSink, WorkflowEvent};

/// Adapter that turns workflow events into progress log lines
pub struct TerminalEventAdapter;

impl TerminalEventAdapter {
    /// One human-readable line for an event
    pub fn describe(event: &WorkflowEvent) -> String {
        match event {
            WorkflowEvent::SearchStarted { trip_type, budget } => {
                format!("Searching {} destinations within {}", trip_type, budget)
            }
            WorkflowEvent::ResultsReady { option_count } => {
                format!("Found {} destination(s)", option_count)
            }
            WorkflowEvent::PlanRequested { destination } => {
                format!("Planning days in {}", destination)
            }
            WorkflowEvent::PlanReady {
                destination,
                day_count,
            } => format!("Plan for {} ready ({} days)", destination, day_count),
            WorkflowEvent::ImagesRequested { destination } => {
                format!("Generating images for {}", destination)
            }
            WorkflowEvent::ImagesReady { image_count } => {
                format!("Received {} image(s)", image_count)
            }
            WorkflowEvent::StepFailed { from, error } => {
                format!("{} failed: {}", from.operation(), error)
            }
            WorkflowEvent::ResponseDiscarded { operation } => {
                format!("Ignored outdated {} response", operation)
            }
            WorkflowEvent::Reset => "Workflow reset".to_string(),
        }
    }
}

impl EventSink for TerminalEventAdapter {
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError> {
        let line = Self::describe(&event);
        match event {
            WorkflowEvent::StepFailed { .. } => log::error!("{}", line),
            WorkflowEvent::ResponseDiscarded { .. } => log::debug!("{}", line),
            _ => log::info!("{}", line),
        }
        Ok(())
    }
}
