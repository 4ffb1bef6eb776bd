//! The single workflow state record
//!
//! Only the orchestrator mutates this record. Everything else receives a
//! cloned snapshot.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;
use crate::types::{DailyPlan, DestinationOptions, ImageSet, SearchCriteria};

/// Snapshot of the whole workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    /// Current position in the workflow
    pub stage: Stage,
    /// Criteria of the latest submitted search
    pub criteria: Option<SearchCriteria>,
    /// Destination options of the latest successful search
    pub options: DestinationOptions,
    /// Destination picked from `options`
    pub chosen_destination: Option<String>,
    /// Daily plan for `chosen_destination`
    pub plan: Option<DailyPlan>,
    /// Images for `plan`
    pub images: ImageSet,
    /// Display text of the last collaborator failure
    pub last_error: Option<String>,
}

impl WorkflowState {
    /// Whether a request is outstanding
    pub fn is_loading(&self) -> bool {
        self.stage.is_loading()
    }

    /// Whether the last operation failed
    pub fn has_error(&self) -> bool {
        self.stage.is_failed()
    }

    /// Whether this is the state of a fresh orchestrator
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Plan rows as `("Day i", activities)` pairs
    pub fn day_rows(&self) -> Vec<(String, String)> {
        self.plan
            .as_ref()
            .map(|plan| {
                plan.days
                    .iter()
                    .map(|entry| (entry.label(), entry.text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop everything derived from a chosen destination
    pub(crate) fn clear_selection(&mut self) {
        self.chosen_destination = None;
        self.clear_plan();
    }

    /// Drop the plan and everything derived from it
    pub(crate) fn clear_plan(&mut self) {
        self.plan = None;
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::InFlight;
    use chrono::NaiveDate;

    #[test]
    fn test_default_is_idle_and_empty() {
        let state = WorkflowState::default();
        assert_eq!(state.stage, Stage::Idle);
        assert!(state.options.is_empty());
        assert!(state.images.is_empty());
        assert!(state.is_pristine());
        assert!(!state.is_loading());
        assert!(!state.has_error());
        assert!(state.day_rows().is_empty());
    }

    #[test]
    fn test_flags_follow_stage() {
        let mut state = WorkflowState {
            stage: Stage::FetchingImages,
            ..Default::default()
        };
        assert!(state.is_loading());
        assert!(!state.is_pristine());

        state.stage = Stage::Failed {
            from: InFlight::FetchingImages,
        };
        assert!(state.has_error());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_day_rows_from_plan() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let criteria = SearchCriteria::new(date, date, 100.0, "beach");
        let state = WorkflowState {
            stage: Stage::PlanReady,
            plan: Some(DailyPlan::new("Cancun", criteria, "Day 1: Snorkeling")),
            ..Default::default()
        };
        assert_eq!(
            state.day_rows(),
            vec![("Day 1".to_string(), "Snorkeling".to_string())]
        );
    }
}
