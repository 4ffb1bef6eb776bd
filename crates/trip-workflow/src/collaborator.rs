//! The seam between the orchestrator and the trip planner backend
//!
//! The orchestrator only knows this trait. Transports (HTTP in the reference
//! deployment, scripted fakes in tests) implement it elsewhere. Each method is
//! exactly one request; implementations must not retry on their own.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::types::{DestinationOptions, ImageSet, SearchCriteria};

/// Request for the daily plan of one destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request for images illustrating a daily plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub destination: String,
    pub daily_plan: String,
}

/// Backend operations the workflow depends on
#[async_trait]
pub trait TripCollaborator: Send + Sync {
    /// Find destination options matching the criteria
    async fn search_destinations(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<DestinationOptions, CollaboratorError>;

    /// Produce newline-delimited `Day N: ...` plan text
    async fn daily_plan(&self, request: &PlanRequest) -> Result<String, CollaboratorError>;

    /// Produce image URLs for a plan, usually up to four
    async fn images(&self, request: &ImageRequest) -> Result<ImageSet, CollaboratorError>;
}
