//! `reqwest` implementation of the trip planner collaborator

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use trip_workflow::{
    CollaboratorError, DestinationOptions, ImageRequest, ImageSet, PlanRequest, SearchCriteria,
    TripCollaborator,
};

use crate::config::{HttpCollaboratorConfig, HttpConfigError};
use crate::constants::{endpoints, MAX_ERROR_BODY_CHARS};
use crate::envelope::{self, SearchPayload};

/// Query string of a search request
///
/// Dates go over the wire as `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    start_date: String,
    end_date: String,
    budget: String,
    trip_type: &'a str,
}

impl<'a> SearchQuery<'a> {
    fn new(criteria: &'a SearchCriteria) -> Self {
        Self {
            start_date: criteria.start_date.to_string(),
            end_date: criteria.end_date.to_string(),
            budget: format_budget(criteria.budget),
            trip_type: &criteria.trip_type,
        }
    }
}

/// Whole budgets are sent as integers; the backend parses `budget` as one
fn format_budget(budget: f64) -> String {
    if budget.fract() == 0.0 && budget.abs() < 1e15 {
        format!("{}", budget as i64)
    } else {
        budget.to_string()
    }
}

/// Collaborator that talks to the trip planner backend over HTTP
///
/// One `GET` per operation. Timeouts come from the client configuration and
/// surface as [`CollaboratorError::Timeout`]; nothing is retried.
pub struct HttpCollaborator {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Connection settings
    config: HttpCollaboratorConfig,
}

impl HttpCollaborator {
    /// Build a collaborator from validated settings
    pub fn new(config: HttpCollaboratorConfig) -> Result<Self, HttpConfigError> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, CollaboratorError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        if !status.is_success() {
            log::warn!("{} answered with status {}", url, status);
            if status.is_client_error() {
                if let Some(rejection) = envelope::rejection(&body) {
                    return Err(rejection);
                }
            }
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        envelope::decode(&body)
    }
}

fn map_request_error(err: reqwest::Error) -> CollaboratorError {
    if err.is_timeout() {
        CollaboratorError::Timeout
    } else {
        CollaboratorError::transport(err)
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[async_trait]
impl TripCollaborator for HttpCollaborator {
    async fn search_destinations(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<DestinationOptions, CollaboratorError> {
        let payload: SearchPayload = self
            .get(endpoints::SEARCH, &SearchQuery::new(criteria))
            .await?;
        let options = payload.into_options();
        log::debug!("Search returned {} destinations", options.len());
        Ok(options)
    }

    async fn daily_plan(&self, request: &PlanRequest) -> Result<String, CollaboratorError> {
        self.get(endpoints::DAILY_PLAN, request).await
    }

    async fn images(&self, request: &ImageRequest) -> Result<ImageSet, CollaboratorError> {
        self.get(endpoints::IMAGES, request).await
    }
}
