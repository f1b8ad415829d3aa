//! Subcommand implementations

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{
    DestinationCatalogPort, GenerationOutcome, ReconciliationService, RouteBatch,
    RouteGenerationService, RoutePlannerPort, RouteVisualizer, RoutingPort,
};
use domain::{Destination, TransportMode, Waypoint};
use infrastructure::{
    AppConfig, GeoJsonRenderer, JsonlDestinationCatalog, OsrmRoutingAdapter, PlannerAdapter,
};
use tracing::info;

use crate::cli::OriginArgs;
use crate::output;

/// Load and validate configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or a section is invalid.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_from(path).context("failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

/// Services a CLI invocation needs
struct Services {
    routing: Arc<dyn RoutingPort>,
    generation: RouteGenerationService,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("routing", &"<RoutingPort>")
            .field("generation", &self.generation)
            .finish()
    }
}

impl Services {
    fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let routing: Arc<dyn RoutingPort> = Arc::new(
            OsrmRoutingAdapter::with_config(&config.routing)
                .map_err(|e| anyhow::anyhow!("routing client: {e}"))?,
        );
        let planner: Arc<dyn RoutePlannerPort> = Arc::new(
            PlannerAdapter::with_config(&config.planner)
                .map_err(|e| anyhow::anyhow!("planner client: {e}"))?,
        );
        let reconciler = ReconciliationService::new(Arc::clone(&routing))
            .with_config(config.reconciliation.clone());

        Ok(Self {
            routing,
            generation: RouteGenerationService::new(planner, reconciler),
        })
    }
}

fn resolve_origin(config: &AppConfig, origin: &OriginArgs) -> anyhow::Result<Waypoint> {
    if let Some(waypoint) = origin.waypoint()? {
        return Ok(waypoint);
    }
    config
        .default_origin
        .waypoint()
        .map_err(anyhow::Error::msg)
}

async fn generate_batch(services: &Services, origin: Waypoint) -> anyhow::Result<RouteBatch> {
    match services.generation.generate(origin).await? {
        GenerationOutcome::Committed(batch) => Ok(batch),
        GenerationOutcome::Superseded { generation, latest } => {
            bail!("generation {generation} was superseded by {latest}")
        },
    }
}

/// `generate`: print the reconciled batch
///
/// # Errors
///
/// Returns an error if the planner fails or the batch cannot be serialized.
pub async fn generate(config: &AppConfig, origin: &OriginArgs, json: bool) -> anyhow::Result<String> {
    let origin = resolve_origin(config, origin)?;
    let services = Services::from_config(config)?;
    let batch = generate_batch(&services, origin).await?;
    info!(routes = batch.routes.len(), "Batch generated");

    if json {
        Ok(serde_json::to_string_pretty(&batch)?)
    } else {
        Ok(output::render_batch(&batch))
    }
}

/// `show`: draw one route of a fresh batch
///
/// Returns the text for stdout. The GeoJSON goes to `output` when given,
/// otherwise it is appended to the returned text.
///
/// # Errors
///
/// Returns an error if generation fails, the rank does not exist, or the
/// output file cannot be written.
pub async fn show(
    config: &AppConfig,
    origin: &OriginArgs,
    rank: u32,
    mode: TransportMode,
    output_path: Option<&Path>,
) -> anyhow::Result<String> {
    let origin = resolve_origin(config, origin)?;
    let services = Services::from_config(config)?;
    let batch = generate_batch(&services, origin).await?;
    let Some(route) = batch.by_rank(rank) else {
        bail!("no route with rank {rank} (batch has {})", batch.routes.len());
    };

    let mut visualizer = RouteVisualizer::new(Arc::clone(&services.routing), GeoJsonRenderer::new());
    let view = visualizer.show(route, batch.origin, mode).await?;
    let geojson = serde_json::to_string_pretty(&visualizer.renderer().feature_collection())?;

    let mut text = output::render_view(&view);
    text.push('\n');
    match output_path {
        Some(path) => {
            tokio::fs::write(path, geojson)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            let _ = writeln!(text, "GeoJSON written to {}", path.display());
        },
        None => {
            text.push_str(&geojson);
            text.push('\n');
        },
    }
    Ok(text)
}

/// `destinations`: list or look up catalog entries
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or the place id is unknown.
pub async fn destinations(
    config: &AppConfig,
    category: Option<&str>,
    place_id: Option<&str>,
) -> anyhow::Result<String> {
    let catalog = JsonlDestinationCatalog::new(&config.catalog);
    let found: Vec<Destination> = match (place_id, category) {
        (Some(id), _) => match catalog.find_by_place_id(id).await? {
            Some(destination) => vec![destination],
            None => bail!("destination '{id}' not found"),
        },
        (None, Some(category)) => catalog.filter_by_category(category).await?,
        (None, None) => catalog.all().await?,
    };
    Ok(output::render_destinations(&found))
}

/// `config`: print the effective configuration as TOML
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn show_config(config: &AppConfig, validate_only: bool) -> anyhow::Result<String> {
    if validate_only {
        return Ok(String::new());
    }
    Ok(toml::to_string_pretty(config)?)
}
