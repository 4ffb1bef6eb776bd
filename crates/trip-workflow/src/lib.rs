//! Trip Workflow - Search, itinerary and image orchestration for the trip planner
//!
//! This crate owns the single authoritative state machine behind the trip
//! planner screen. A user submits search criteria, picks one of the returned
//! destinations to receive a day-by-day plan, and may then ask for images
//! illustrating that plan. Each step is one call to an external collaborator
//! and may fail independently.
//!
//! # Architecture
//!
//! - `WorkflowOrchestrator`: owns the `WorkflowState` record and exposes the
//!   four commands (`submit_search`, `select_destination`, `fetch_images`,
//!   `reset`) plus read-only snapshots
//! - `TripCollaborator`: the seam to the three backend endpoints; transports
//!   live in other crates
//! - `EventSink`: transport-agnostic stream of stage transitions for any
//!   rendering layer
//!
//! Rendering layers never hold workflow logic of their own. They read a
//! snapshot, derive `is_loading()` / `has_error()` from the stage, and issue
//! commands.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trip_workflow::{SearchCriteria, WorkflowOrchestrator};
//!
//! let orchestrator = WorkflowOrchestrator::new(Arc::new(my_collaborator));
//! let criteria = SearchCriteria::parse("2025-06-01", "2025-06-07", "2000", "beach")?;
//!
//! orchestrator.submit_search(criteria).await?;
//! orchestrator.select_destination("Cancun").await?;
//! orchestrator.fetch_images().await?;
//!
//! for (label, activities) in orchestrator.snapshot().day_rows() {
//!     println!("{label}: {activities}");
//! }
//! ```

pub mod collaborator;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod plan;
pub mod stage;
pub mod state;
pub mod types;

// Re-export key types
pub use collaborator::{ImageRequest, PlanRequest, TripCollaborator};
pub use error::{BoxError, CollaboratorError, Result, ValidationError, WorkflowError};
pub use events::{EventError, EventSink, NullEventSink, VecEventSink, WorkflowEvent};
pub use orchestrator::{StepOutcome, WorkflowOrchestrator};
pub use plan::parse_days;
pub use stage::{InFlight, Operation, Stage};
pub use state::WorkflowState;
pub use types::{DailyPlan, DayEntry, DestinationOption, DestinationOptions, ImageSet, SearchCriteria};
