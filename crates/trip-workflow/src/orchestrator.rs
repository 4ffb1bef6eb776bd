//! Workflow orchestrator
//!
//! Sequences the three dependent backend calls (search, daily plan, images)
//! and owns the `WorkflowState` they build up.
//!
//! # Ordering
//!
//! Every command is an `async fn(&self)` that suspends on exactly one
//! collaborator call. Commands may overlap (a second search can be submitted
//! while the first is still outstanding), so each request takes a ticket from
//! a per-operation generation counter when it is issued. A response is applied
//! only if its ticket is still current; otherwise it is dropped. Newer searches
//! also invalidate outstanding plan and image requests, newer plans invalidate
//! outstanding image requests, and `reset` invalidates everything.
//!
//! The state lock is never held across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::collaborator::{ImageRequest, PlanRequest, TripCollaborator};
use crate::error::{CollaboratorError, Result, WorkflowError};
use crate::events::{EventSink, NullEventSink, WorkflowEvent};
use crate::stage::{Operation, Stage};
use crate::state::WorkflowState;
use crate::types::{DailyPlan, SearchCriteria};

/// What happened to a command's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The response was applied to the workflow state
    Applied,
    /// A newer request made this one stale; its response was discarded
    Superseded,
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    operation: Operation,
    generation: u64,
}

/// Issue counters, one per operation kind
#[derive(Debug, Default)]
struct Generations {
    search: u64,
    plan: u64,
    images: u64,
}

impl Generations {
    /// Issue a ticket for `operation`, superseding it and everything downstream
    fn issue(&mut self, operation: Operation) -> Ticket {
        match operation {
            Operation::Search => {
                self.search += 1;
                self.plan += 1;
                self.images += 1;
            }
            Operation::Plan => {
                self.plan += 1;
                self.images += 1;
            }
            Operation::Images => {
                self.images += 1;
            }
        }
        Ticket {
            operation,
            generation: self.current(operation),
        }
    }

    fn current(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Search => self.search,
            Operation::Plan => self.plan,
            Operation::Images => self.images,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.current(ticket.operation) == ticket.generation
    }

    fn invalidate_all(&mut self) {
        self.issue(Operation::Search);
    }
}

struct Inner {
    state: WorkflowState,
    generations: Generations,
}

/// Owner of the trip planning workflow
///
/// Share it behind an `Arc` to issue overlapping commands from several tasks.
pub struct WorkflowOrchestrator {
    collaborator: Arc<dyn TripCollaborator>,
    event_sink: Arc<dyn EventSink>,
    inner: Mutex<Inner>,
}

impl WorkflowOrchestrator {
    /// Create an idle orchestrator that discards events
    pub fn new(collaborator: Arc<dyn TripCollaborator>) -> Self {
        Self::with_event_sink(collaborator, Arc::new(NullEventSink))
    }

    /// Create an idle orchestrator that reports transitions to `event_sink`
    pub fn with_event_sink(
        collaborator: Arc<dyn TripCollaborator>,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            collaborator,
            event_sink,
            inner: Mutex::new(Inner {
                state: WorkflowState::default(),
                generations: Generations::default(),
            }),
        }
    }

    /// Clone of the current workflow state
    pub fn snapshot(&self) -> WorkflowState {
        self.inner.lock().state.clone()
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.inner.lock().state.stage
    }

    /// Submit a new search, superseding any outstanding one
    ///
    /// Invalid criteria are rejected before anything is sent. On failure only
    /// the options are cleared; the criteria stay for a retry and any chosen
    /// destination, plan and images from the previous cycle stay visible.
    pub async fn submit_search(&self, criteria: SearchCriteria) -> Result<StepOutcome> {
        criteria.validate()?;

        let ticket = {
            let mut inner = self.inner.lock();
            let ticket = inner.generations.issue(Operation::Search);
            let state = &mut inner.state;
            state.stage = Stage::Searching;
            state.criteria = Some(criteria.clone());
            state.last_error = None;
            ticket
        };
        log::info!(
            "Searching {} trips from {} to {} with budget {}",
            criteria.trip_type,
            criteria.start_date,
            criteria.end_date,
            criteria.budget
        );
        self.emit(WorkflowEvent::SearchStarted {
            trip_type: criteria.trip_type.clone(),
            budget: criteria.budget,
        });

        let response = self.collaborator.search_destinations(&criteria).await;

        self.settle(
            ticket,
            response,
            |state, options| {
                let option_count = options.len();
                state.options = options;
                state.clear_selection();
                state.stage = Stage::ResultsReady;
                WorkflowEvent::ResultsReady { option_count }
            },
            |state| state.options.clear(),
        )
    }

    /// Choose a destination and fetch its daily plan
    ///
    /// When options are present the destination must be one of them. Any plan
    /// or images from an earlier choice are discarded before the request goes
    /// out, so choosing the same destination again always fetches anew.
    pub async fn select_destination(&self, destination: impl Into<String>) -> Result<StepOutcome> {
        let destination = destination.into();

        let (ticket, request, criteria) = {
            let mut inner = self.inner.lock();
            let state = &inner.state;
            if !state.options.is_empty() && !state.options.contains_key(&destination) {
                return Err(WorkflowError::InvalidSelection { destination });
            }
            if !state.stage.accepts(Operation::Plan) {
                return Err(WorkflowError::invalid_state(Operation::Plan, state.stage));
            }
            let Some(criteria) = state.criteria.clone() else {
                return Err(WorkflowError::invalid_state(Operation::Plan, state.stage));
            };

            let ticket = inner.generations.issue(Operation::Plan);
            let state = &mut inner.state;
            state.chosen_destination = Some(destination.clone());
            state.clear_plan();
            state.last_error = None;
            state.stage = Stage::FetchingPlan;

            let request = PlanRequest {
                destination: destination.clone(),
                start_date: criteria.start_date,
                end_date: criteria.end_date,
            };
            (ticket, request, criteria)
        };
        log::info!("Fetching daily plan for {}", destination);
        self.emit(WorkflowEvent::PlanRequested {
            destination: destination.clone(),
        });

        let response = self.collaborator.daily_plan(&request).await;

        self.settle(
            ticket,
            response,
            |state, text| {
                let plan = DailyPlan::new(destination.clone(), criteria, text);
                let day_count = plan.days.len();
                state.plan = Some(plan);
                state.stage = Stage::PlanReady;
                WorkflowEvent::PlanReady {
                    destination,
                    day_count,
                }
            },
            |_| {},
        )
    }

    /// Fetch images for the current plan
    ///
    /// Requires a plan; allowed from `PlanReady` or to retry a failed image
    /// request. Any number of returned images is accepted.
    pub async fn fetch_images(&self) -> Result<StepOutcome> {
        let (ticket, request) = {
            let mut inner = self.inner.lock();
            let stage = inner.state.stage;
            if !stage.accepts(Operation::Images) {
                return Err(WorkflowError::invalid_state(Operation::Images, stage));
            }
            let Some(plan) = inner.state.plan.as_ref() else {
                return Err(WorkflowError::invalid_state(Operation::Images, stage));
            };
            let request = ImageRequest {
                destination: plan.destination.clone(),
                daily_plan: plan.text.clone(),
            };

            let ticket = inner.generations.issue(Operation::Images);
            let state = &mut inner.state;
            state.images.clear();
            state.last_error = None;
            state.stage = Stage::FetchingImages;
            (ticket, request)
        };
        log::info!("Fetching images for {}", request.destination);
        self.emit(WorkflowEvent::ImagesRequested {
            destination: request.destination.clone(),
        });

        let response = self.collaborator.images(&request).await;

        self.settle(
            ticket,
            response,
            |state, images| {
                let image_count = images.len();
                if image_count > 4 {
                    log::debug!("Backend returned {} images, keeping all", image_count);
                }
                state.images = images;
                state.stage = Stage::ImagesReady;
                WorkflowEvent::ImagesReady { image_count }
            },
            |_| {},
        )
    }

    /// Return to idle and forget everything
    ///
    /// Outstanding requests are invalidated; their responses will be dropped.
    /// Calling this on an idle, empty workflow changes nothing.
    pub fn reset(&self) {
        let was_pristine = {
            let mut inner = self.inner.lock();
            inner.generations.invalidate_all();
            let was_pristine = inner.state.is_pristine();
            inner.state = WorkflowState::default();
            was_pristine
        };
        if !was_pristine {
            log::info!("Workflow reset");
            self.emit(WorkflowEvent::Reset);
        }
    }

    /// Apply a collaborator response if its ticket is still current
    fn settle<T>(
        &self,
        ticket: Ticket,
        response: std::result::Result<T, CollaboratorError>,
        apply: impl FnOnce(&mut WorkflowState, T) -> WorkflowEvent,
        on_failure: impl FnOnce(&mut WorkflowState),
    ) -> Result<StepOutcome> {
        let mut inner = self.inner.lock();

        if !inner.generations.is_current(ticket) {
            drop(inner);
            match &response {
                Ok(_) => log::warn!(
                    "Discarding stale {} response (request #{})",
                    ticket.operation,
                    ticket.generation
                ),
                Err(e) => log::warn!(
                    "Discarding stale {} failure (request #{}): {}",
                    ticket.operation,
                    ticket.generation,
                    e
                ),
            }
            self.emit(WorkflowEvent::ResponseDiscarded {
                operation: ticket.operation,
            });
            return Ok(StepOutcome::Superseded);
        }

        match response {
            Ok(payload) => {
                let event = apply(&mut inner.state, payload);
                let stage = inner.state.stage;
                drop(inner);
                log::info!("Workflow is {}", stage);
                self.emit(event);
                Ok(StepOutcome::Applied)
            }
            Err(err) => {
                let from = ticket.operation.in_flight();
                let message = err.to_string();
                on_failure(&mut inner.state);
                inner.state.stage = Stage::Failed { from };
                inner.state.last_error = Some(message.clone());
                drop(inner);
                log::warn!("{} failed: {}", ticket.operation, message);
                self.emit(WorkflowEvent::StepFailed {
                    from,
                    error: message,
                });
                Err(WorkflowError::Collaborator(err))
            }
        }
    }

    fn emit(&self, event: WorkflowEvent) {
        if let Err(e) = self.event_sink.send(event) {
            log::warn!("Failed to deliver workflow event: {}", e);
        }
    }
}
