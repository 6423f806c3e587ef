//! CollabNet Ingest CLI
//!
//! Fetches missing bibliographic record files for the faculty roster and
//! the candidate pool, then parses everything once to validate the corpus:
//! 1. Load configuration and rosters
//! 2. Download missing person pages
//! 3. Assemble directories and report totals

use collabnet_common::{config::AppConfig, VERSION};
use collabnet_ingestion::{fetch_missing_records, load_directory, load_roster, HttpRecordSource};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting CollabNet ingest v{}", VERSION);

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .user_agent(format!("collabnet/{}", VERSION))
        .build()?;
    let source = HttpRecordSource::new(client, &config.fetch);

    // Faculty roster
    let roster = load_roster(Path::new(&config.data.roster_path))?;
    info!(members = roster.len(), "Faculty roster loaded");

    let summary =
        fetch_missing_records(&source, &roster, Path::new(&config.data.records_dir), &config.fetch)
            .await?;
    if !summary.failed.is_empty() {
        error!(failed = ?summary.failed, "Some faculty records could not be fetched");
    }

    let directory = load_directory(roster, Path::new(&config.data.records_dir), &config.excellence)?;
    let publications: usize = directory.iter().map(|m| m.publications.len()).sum();
    let excellence = directory.iter().filter(|m| m.excellence).count();
    info!(
        members = directory.len(),
        publications,
        excellence_nodes = excellence,
        "Faculty corpus validated"
    );

    // Candidate pool, when configured
    if let (Some(roster_path), Some(records_dir)) = (
        config.data.candidate_roster_path.as_deref(),
        config.data.candidate_records_dir.as_deref(),
    ) {
        let candidates = load_roster(Path::new(roster_path))?;
        info!(candidates = candidates.len(), "Candidate roster loaded");

        let summary =
            fetch_missing_records(&source, &candidates, Path::new(records_dir), &config.fetch)
                .await?;
        if !summary.failed.is_empty() {
            error!(failed = ?summary.failed, "Some candidate records could not be fetched");
        }

        let pool = load_directory(candidates, Path::new(records_dir), &config.excellence)?;
        let publications: usize = pool.iter().map(|m| m.publications.len()).sum();
        info!(candidates = pool.len(), publications, "Candidate corpus validated");
    } else {
        info!("No candidate pool configured, skipping");
    }

    info!("Ingest complete");
    Ok(())
}
