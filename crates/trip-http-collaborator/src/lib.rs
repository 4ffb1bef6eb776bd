//! HTTP transport for the trip planner backend
//!
//! Implements [`trip_workflow::TripCollaborator`] against the three backend
//! endpoints. Every operation is a single `GET` with query parameters:
//!
//! - `/search_options?start_date&end_date&budget&trip_type`
//! - `/chosen_destination_daily_plan?destination&start_date&end_date`
//! - `/dalle_image?destination&daily_plan`
//!
//! The backend wraps every answer in a JSON envelope (`data`, `error` or
//! `detail`), usually with status 200 even when it failed. See [`envelope`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trip_http_collaborator::{HttpCollaborator, HttpCollaboratorConfig};
//! use trip_workflow::WorkflowOrchestrator;
//!
//! let config = HttpCollaboratorConfig::with_base_url("http://127.0.0.1:8000");
//! let collaborator = HttpCollaborator::new(config)?;
//! let orchestrator = WorkflowOrchestrator::new(Arc::new(collaborator));
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod envelope;

// Re-exports for convenience
pub use client::HttpCollaborator;
pub use config::{HttpCollaboratorConfig, HttpConfigError};
