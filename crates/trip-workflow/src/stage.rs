//! Workflow stages and the operations that move between them
//!
//! The stage is the only source of truth for what the UI may show. Loading and
//! error indicators are derived from it rather than tracked as separate flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in the search -> plan -> images workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum Stage {
    /// Nothing submitted yet, or reset
    #[default]
    Idle,
    /// Waiting for destination options
    Searching,
    /// Options available, nothing chosen yet
    ResultsReady,
    /// Waiting for the daily plan of the chosen destination
    FetchingPlan,
    /// Daily plan available
    PlanReady,
    /// Waiting for images of the plan
    FetchingImages,
    /// Images available
    ImagesReady,
    /// The last in-flight request failed
    Failed { from: InFlight },
}

impl Stage {
    /// Whether a request is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Searching | Self::FetchingPlan | Self::FetchingImages)
    }

    /// Whether the last operation failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The in-flight stage a failure came from
    pub fn failed_from(&self) -> Option<InFlight> {
        match self {
            Self::Failed { from } => Some(*from),
            _ => None,
        }
    }

    /// Whether `operation` may be started from this stage
    ///
    /// Searching is allowed from anywhere (newest submission wins). Plans need
    /// a result set; images need a plan. Each step may also be retried from
    /// its own failure.
    pub fn accepts(&self, operation: Operation) -> bool {
        match operation {
            Operation::Search => true,
            Operation::Plan => matches!(
                self,
                Self::ResultsReady
                    | Self::PlanReady
                    | Self::Failed {
                        from: InFlight::FetchingPlan
                    }
            ),
            Operation::Images => matches!(
                self,
                Self::PlanReady
                    | Self::Failed {
                        from: InFlight::FetchingImages
                    }
            ),
        }
    }
}

impl From<InFlight> for Stage {
    fn from(in_flight: InFlight) -> Self {
        match in_flight {
            InFlight::Searching => Self::Searching,
            InFlight::FetchingPlan => Self::FetchingPlan,
            InFlight::FetchingImages => Self::FetchingImages,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Searching => write!(f, "searching"),
            Self::ResultsReady => write!(f, "results ready"),
            Self::FetchingPlan => write!(f, "fetching plan"),
            Self::PlanReady => write!(f, "plan ready"),
            Self::FetchingImages => write!(f, "fetching images"),
            Self::ImagesReady => write!(f, "images ready"),
            Self::Failed { from } => write!(f, "failed ({})", Stage::from(*from)),
        }
    }
}

/// The stages in which a request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InFlight {
    Searching,
    FetchingPlan,
    FetchingImages,
}

impl InFlight {
    /// The operation that is waiting in this stage
    pub fn operation(&self) -> Operation {
        match self {
            Self::Searching => Operation::Search,
            Self::FetchingPlan => Operation::Plan,
            Self::FetchingImages => Operation::Images,
        }
    }
}

/// The three network-backed workflow operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Search,
    Plan,
    Images,
}

impl Operation {
    /// The stage the workflow sits in while this operation is outstanding
    pub fn in_flight(&self) -> InFlight {
        match self {
            Self::Search => InFlight::Searching,
            Self::Plan => InFlight::FetchingPlan,
            Self::Images => InFlight::FetchingImages,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Plan => write!(f, "fetch plan"),
            Self::Images => write!(f, "fetch images"),
        }
    }
}
