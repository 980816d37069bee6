use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{AgentError, AgentResponse, ResultContext, WorkerScope};
use crate::{api::payloads::PageMessage, config::AgentConfig};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallReport {
    pub cached: Vec<String>,
    pub failed: Vec<String>,
}

async fn cache_asset<S: WorkerScope>(
    scope: &S,
    cache: &S::Cache,
    asset: &str,
) -> Result<(), AgentError<S::Error>> {
    let request = scope
        .new_request(asset)
        .with_context(|| format!("Request::new:: {asset}"))?;
    let response = scope
        .fetch(&request)
        .await
        .with_context(|| format!("fetch:: {asset}"))?;

    if !response.ok() {
        return Err(AgentError::Status {
            url: asset.to_string(),
            status: response.status(),
        });
    }

    scope
        .cache_put(cache, &request, response)
        .await
        .with_context(|| format!("cache::put:: {asset}"))
}

/// Warms the cache with the asset list and skips the waiting phase
///
/// Assets are fetched concurrently. One failing doesn't fail the install, it
/// just won't be available offline until a fetch caches it
#[instrument(skip_all, fields(cache = config.cache_name))]
pub async fn install<S: WorkerScope>(
    scope: &S,
    config: &AgentConfig,
) -> Result<InstallReport, AgentError<S::Error>> {
    let cache = scope
        .open_cache(config.cache_name)
        .await
        .context("caches::open")?;

    let results = join_all(
        config
            .assets
            .iter()
            .map(|asset| cache_asset(scope, &cache, asset)),
    )
    .await;

    let mut report = InstallReport::default();
    for (asset, result) in config.assets.iter().zip(results) {
        match result {
            Ok(()) => {
                debug!("Cached {asset}");
                report.cached.push(asset.to_string());
            }
            Err(e) => {
                warn!("Failed to cache {asset}: {e}");
                report.failed.push(asset.to_string());
            }
        }
    }

    scope.skip_waiting().await.context("sw::skip_waiting")?;

    info!(
        cached = report.cached.len(),
        failed = report.failed.len(),
        "Install complete"
    );
    Ok(report)
}

/// Deletes every bucket but the current one and takes control of open tabs.
/// Returns the names of the deleted buckets
#[instrument(skip_all, fields(cache = config.cache_name))]
pub async fn activate<S: WorkerScope>(
    scope: &S,
    config: &AgentConfig,
) -> Result<Vec<String>, AgentError<S::Error>> {
    let names = scope.cache_names().await.context("caches::keys")?;
    let stale: Vec<String> = names
        .into_iter()
        .filter(|name| name != config.cache_name)
        .collect();

    let results = join_all(stale.iter().map(|name| scope.delete_cache(name))).await;

    let mut deleted = Vec::with_capacity(stale.len());
    for (name, result) in stale.into_iter().zip(results) {
        match result {
            Ok(true) => {
                info!("Deleted old cache {name}");
                deleted.push(name);
            }
            Ok(false) => debug!("Old cache {name} was already gone"),
            Err(e) => warn!("Failed to delete old cache {name}: {e}"),
        }
    }

    // Claim the clients so requests from already open tabs go through us
    // without a reload
    scope.claim_clients().await.context("sw::clients::claim")?;

    Ok(deleted)
}

/// Handles a message posted by a page
#[instrument(skip_all)]
pub async fn message<S: WorkerScope>(
    scope: &S,
    data: Value,
) -> Result<PageMessage, AgentError<S::Error>> {
    let message = PageMessage::from(data);

    match &message {
        PageMessage::SkipWaiting => {
            debug!("Got SKIP_WAITING");
            scope.skip_waiting().await.context("sw::skip_waiting")?;
        }
        PageMessage::Unknown(value) => {
            debug!("Got unexpected message: {value:?}");
        }
    }

    Ok(message)
}
