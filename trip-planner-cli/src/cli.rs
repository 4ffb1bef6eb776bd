use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use trip_http_collaborator::HttpCollaborator;
use trip_workflow::{SearchCriteria, WorkflowOrchestrator};

use crate::config::{self, AppConfig};
use crate::event_adapter::TerminalEventAdapter;
use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "trip-planner",
    about = "Search destinations, plan the days of one, and fetch images for the plan"
)]
pub struct Cli {
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    start_date: String,
    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    end_date: String,
    /// Overall budget
    #[arg(long)]
    budget: String,
    /// Kind of trip, e.g. beach or adventure
    #[arg(long)]
    trip_type: String,
    /// Destination to plan; defaults to the first search result
    #[arg(long)]
    destination: Option<String>,
    /// Also fetch images for the plan
    #[arg(long)]
    images: bool,
    /// Backend base URL (overrides config and environment)
    #[arg(long)]
    base_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Directory holding config.json
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Persist the effective connection settings before running
    #[arg(long)]
    save_config: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app_config = self.resolve_config().await?;

        let criteria = SearchCriteria::parse(
            &self.start_date,
            &self.end_date,
            &self.budget,
            &self.trip_type,
        )
        .context("invalid search criteria")?;

        let collaborator = HttpCollaborator::new(app_config.collaborator)
            .context("failed to set up backend connection")?;
        let orchestrator = WorkflowOrchestrator::with_event_sink(
            Arc::new(collaborator),
            Arc::new(TerminalEventAdapter),
        );

        orchestrator
            .submit_search(criteria)
            .await
            .context("destination search failed")?;
        let snapshot = orchestrator.snapshot();
        print!("{}", render::Options(&snapshot));

        let destination = match self.destination {
            Some(destination) => destination,
            None => snapshot
                .options
                .keys()
                .next()
                .cloned()
                .context("search returned no destinations")?,
        };

        orchestrator
            .select_destination(destination)
            .await
            .context("daily plan failed")?;
        print!("{}", render::Plan(&orchestrator.snapshot()));

        if self.images {
            orchestrator
                .fetch_images()
                .await
                .context("image generation failed")?;
            print!("{}", render::Images(&orchestrator.snapshot()));
        }

        Ok(())
    }

    async fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let config_dir = self.config_dir.clone().or_else(config::default_config_dir);

        let loaded = match &config_dir {
            Some(dir) => match AppConfig::load(dir).await {
                Ok(config) => {
                    log::debug!("Loaded configuration from {:?}", dir);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to load config, using defaults: {}", e);
                    AppConfig::default()
                }
            },
            None => AppConfig::default(),
        };

        let mut app_config = loaded
            .with_env_overrides()
            .with_base_url_override(self.base_url.clone());
        if let Some(timeout_secs) = self.timeout_secs {
            app_config.collaborator.timeout_secs = timeout_secs;
        }

        if self.save_config {
            let dir = config_dir.context("no configuration directory available")?;
            app_config.save(&dir).await?;
        }

        Ok(app_config)
    }
}
