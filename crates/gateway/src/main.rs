//! CollabNet Gateway
//!
//! The HTTP entry point for the collaboration dashboard data.
//! Handles:
//! - Corpus loading and network construction at startup
//! - Request routing
//! - Rate limiting
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use collabnet_common::{
    config::AppConfig,
    metrics::{register_metrics, LATENCY_BUCKETS},
    model::FacultyDirectory,
    VERSION,
};
use collabnet_ingestion::{load_directory, load_roster};
use collabnet_network::{HireAnalysis, YearSeries};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::middleware::rate_limit::{create_rate_limiter, rate_limit_middleware};
use crate::middleware::track::track_metrics;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<FacultyDirectory>,
    pub years: Arc<YearSeries>,
    pub hires: Arc<Option<HireAnalysis>>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting CollabNet Gateway v{}", VERSION);

    let config = Arc::new(config);

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], config.observability.metrics_port))
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                LATENCY_BUCKETS,
            )?
            .install()?;
        info!(port = config.observability.metrics_port, "Metrics exporter listening");
    }
    register_metrics();

    // Load the corpus
    info!(path = %config.data.roster_path, "Loading faculty roster...");
    let roster = load_roster(Path::new(&config.data.roster_path))?;
    let directory = Arc::new(load_directory(
        roster,
        Path::new(&config.data.records_dir),
        &config.excellence,
    )?);

    // Build the year networks
    info!(
        first_year = config.network.first_year,
        last_year = config.network.last_year,
        "Building year networks..."
    );
    let years = {
        let directory = directory.clone();
        let network = config.network.clone();
        tokio::task::spawn_blocking(move || YearSeries::build(&directory, &network)).await??
    };
    let years = Arc::new(years);

    // Build the hiring analysis when a candidate pool is configured
    let hires = Arc::new(build_hires(&config, &directory));

    // Create app state
    let state = AppState {
        config: config.clone(),
        directory,
        years,
        hires,
        started_at: chrono::Utc::now(),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the hiring analysis, degrading to none on any failure
fn build_hires(config: &AppConfig, directory: &FacultyDirectory) -> Option<HireAnalysis> {
    let (roster_path, records_dir) = match (
        config.data.candidate_roster_path.as_deref(),
        config.data.candidate_records_dir.as_deref(),
    ) {
        (Some(roster_path), Some(records_dir)) => (roster_path, records_dir),
        _ => {
            info!("No candidate pool configured, hiring analysis disabled");
            return None;
        }
    };

    let candidates = match load_roster(Path::new(roster_path)) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(error = %e, "Candidate roster unavailable, hiring analysis disabled");
            return None;
        }
    };

    let pool = match load_directory(candidates, Path::new(records_dir), &config.excellence) {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "Candidate records unavailable, hiring analysis disabled");
            return None;
        }
    };

    let faculty_names: BTreeSet<String> = directory.names().map(str::to_string).collect();
    Some(HireAnalysis::build(&pool, &faculty_names, &config.hire))
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Year network endpoints
        .route("/years", get(handlers::years::list_years))
        .route("/years/{year}", get(handlers::years::get_year))
        .route("/years/{year}/graph", get(handlers::years::get_year_graph))
        // Faculty endpoints
        .route("/faculty", get(handlers::faculty::list_faculty))
        .route("/faculty/{name}", get(handlers::faculty::get_faculty))
        .route("/faculty/{name}/graph", get(handlers::faculty::get_faculty_graph))
        // Subset endpoints
        .route("/subsets/analyze", post(handlers::subsets::analyze_subset))
        // Cohort endpoints
        .route("/cohorts/management", get(handlers::cohorts::management))
        .route("/cohorts/positions/{position}", get(handlers::cohorts::position))
        .route("/cohorts/excellence", get(handlers::cohorts::excellence))
        // Hiring endpoints
        .route("/hires", get(handlers::hires::get_hires));

    // Compose the app
    let mut app = Router::new().nest("/v1", api_routes);

    if state.config.rate_limit.enabled {
        let limiter = create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        app = app.layer(axum::middleware::from_fn(
            move |request: axum::extract::Request, next: axum::middleware::Next| {
                let limiter = limiter.clone();
                async move { rate_limit_middleware(request, next, limiter).await }
            },
        ));
    }

    app.layer(axum::middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
