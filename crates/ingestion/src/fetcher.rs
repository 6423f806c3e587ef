//! Bibliographic record fetching
//!
//! Downloads person-page XML for roster entries that have a bibliography
//! identifier but no local record file. Downloads are bounded-concurrent,
//! retried with exponential backoff, and rate-limited with a politeness
//! delay; existing files are never re-fetched.

use crate::errors::IngestionError;
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use collabnet_common::config::FetchConfig;
use collabnet_common::metrics::record_fetch;
use collabnet_common::model::FacultyProfile;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// A source of person-page XML keyed by bibliography identifier
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, name: &str, pid: &str) -> Result<String, IngestionError>;
}

/// HTTP record source backed by reqwest
pub struct HttpRecordSource {
    client: reqwest::Client,
    base_url: String,
    max_elapsed: Duration,
}

impl HttpRecordSource {
    pub fn new(client: reqwest::Client, config: &FetchConfig) -> Self {
        // Retry budget: the per-request timeout for the initial attempt plus
        // one for each configured retry.
        let max_elapsed = Duration::from_secs(config.timeout_secs * (config.max_retries as u64 + 1));

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_elapsed,
        }
    }

    fn record_url(&self, pid: &str) -> String {
        format!("{}/{}.xml", self.base_url, pid)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, name: &str, pid: &str) -> Result<String, IngestionError> {
        let url = self.record_url(pid);

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_elapsed_time(Some(self.max_elapsed))
            .build();

        let body = backoff::future::retry(policy, || async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(backoff::Error::transient)?;

            let status = response.status();
            match response.error_for_status() {
                Ok(response) => response.text().await.map_err(backoff::Error::transient),
                Err(e) if status.is_server_error() => Err(backoff::Error::transient(e)),
                // 4xx responses will not improve on retry
                Err(e) => Err(backoff::Error::permanent(e)),
            }
        })
        .await
        .map_err(|e| IngestionError::Fetch {
            name: name.to_string(),
            message: format!("{url}: {e}"),
        })?;

        Ok(body)
    }
}

/// Outcome of a fetch pass
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Record files downloaded
    pub downloaded: usize,
    /// Entries skipped: file already present, or no identifier on the roster
    pub skipped: usize,
    /// Names whose download failed after retries
    pub failed: Vec<String>,
}

/// Path of a member's record file under `records_dir`
pub fn record_path(records_dir: &Path, name: &str) -> PathBuf {
    records_dir.join(format!("{name}.xml"))
}

/// Download missing record files for the given roster entries
#[instrument(skip(source, roster, config), fields(records_dir = %records_dir.display()))]
pub async fn fetch_missing_records(
    source: &dyn RecordSource,
    roster: &[FacultyProfile],
    records_dir: &Path,
    config: &FetchConfig,
) -> Result<FetchSummary, IngestionError> {
    tokio::fs::create_dir_all(records_dir).await?;

    let mut pending = Vec::new();
    let mut summary = FetchSummary::default();

    for profile in roster {
        let path = record_path(records_dir, &profile.name);
        match &profile.pid {
            Some(pid) if !path.exists() => pending.push((profile.name.clone(), pid.clone(), path)),
            Some(_) => summary.skipped += 1,
            None => {
                warn!(name = %profile.name, "No bibliography identifier on roster, skipping fetch");
                summary.skipped += 1;
            }
        }
    }

    info!(pending = pending.len(), "Fetching missing record files");

    let delay = Duration::from_millis(config.delay_ms);
    let results = stream::iter(pending)
        .map(|(name, pid, path)| async move {
            // Politeness delay before each request
            tokio::time::sleep(delay).await;

            match source.fetch(&name, &pid).await {
                Ok(body) => match tokio::fs::write(&path, body).await {
                    Ok(()) => {
                        record_fetch(true);
                        Ok(name)
                    }
                    Err(e) => {
                        record_fetch(false);
                        Err((name, e.to_string()))
                    }
                },
                Err(e) => {
                    record_fetch(false);
                    Err((name, e.to_string()))
                }
            }
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    for result in results {
        match result {
            Ok(name) => {
                summary.downloaded += 1;
                tracing::debug!(name = %name, "Record file downloaded");
            }
            Err((name, message)) => {
                warn!(name = %name, error = %message, "Record download failed");
                summary.failed.push(name);
            }
        }
    }

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "Fetch pass complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticSource {
        pages: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn fetch(&self, name: &str, pid: &str) -> Result<String, IngestionError> {
            self.calls.lock().unwrap().push(pid.to_string());
            self.pages
                .get(pid)
                .cloned()
                .ok_or_else(|| IngestionError::Fetch {
                    name: name.to_string(),
                    message: "not found".to_string(),
                })
        }
    }

    fn profile(name: &str, pid: Option<&str>) -> FacultyProfile {
        FacultyProfile {
            name: name.to_string(),
            gender: None,
            position: "Professor".to_string(),
            management: false,
            area: None,
            pid: pid.map(str::to_string),
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("collabnet-fetch-{}-{tag}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_fetch_missing_records() {
        let dir = temp_dir("missing");
        let source = StaticSource {
            pages: HashMap::from([("12/345".to_string(), "<dblpperson/>".to_string())]),
            calls: Mutex::new(Vec::new()),
        };

        let roster = vec![
            profile("Alice Tan", Some("12/345")),
            profile("No Pid", None),
        ];

        let config = FetchConfig {
            delay_ms: 0,
            ..FetchConfig::default()
        };

        let summary = fetch_missing_records(&source, &roster, &dir, &config)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.failed.is_empty());
        assert!(record_path(&dir, "Alice Tan").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_existing_files_not_refetched() {
        let dir = temp_dir("existing");
        std::fs::write(record_path(&dir, "Alice Tan"), "<dblpperson/>").unwrap();

        let source = StaticSource {
            pages: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        };

        let roster = vec![profile("Alice Tan", Some("12/345"))];
        let config = FetchConfig {
            delay_ms: 0,
            ..FetchConfig::default()
        };

        let summary = fetch_missing_records(&source, &roster, &dir, &config)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, 0);
        assert_eq!(summary.skipped, 1);
        assert!(source.calls.lock().unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_failed_download_reported() {
        let dir = temp_dir("failed");
        let source = StaticSource {
            pages: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        };

        let roster = vec![profile("Alice Tan", Some("12/345"))];
        let config = FetchConfig {
            delay_ms: 0,
            ..FetchConfig::default()
        };

        let summary = fetch_missing_records(&source, &roster, &dir, &config)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, 0);
        assert_eq!(summary.failed, vec!["Alice Tan".to_string()]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
