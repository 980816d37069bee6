use tracing::{debug, instrument, warn};

use super::{AgentError, AgentRequest, AgentResponse, ResultContext, WorkerScope};
use crate::config::AgentConfig;

/// Whether a request should be answered by [fetch]. Everything else is left to
/// the browser's default handling
pub fn intercepts(config: &AgentConfig, method: &str, url: &str) -> bool {
    if !method.eq_ignore_ascii_case("GET") {
        return false;
    }

    match config.live_path_marker {
        Some(marker) => !url.contains(marker),
        None => true,
    }
}

/// A network response waiting to be written to the cache. Kept apart from the
/// response so the page gets it while the copy is still being stored
pub struct PendingStore<S: WorkerScope> {
    request: S::Request,
    copy: S::Response,
}

impl<S: WorkerScope> PendingStore<S> {
    pub async fn write(self, scope: &S, config: &AgentConfig) -> Result<(), AgentError<S::Error>> {
        let url = self.request.url();
        let cache = scope
            .open_cache(config.cache_name)
            .await
            .context("caches::open")?;
        scope
            .cache_put(&cache, &self.request, self.copy)
            .await
            .with_context(|| format!("cache::put {url}"))
    }
}

pub struct Fetched<S: WorkerScope> {
    pub response: S::Response,
    /// Set for successful network responses
    pub store: Option<PendingStore<S>>,
}

/// Network first, falling back to the cache when the network is unreachable
///
/// Successful responses overwrite whatever was cached for the request once
/// the caller runs [PendingStore::write]
#[instrument(skip_all, fields(url = %request.url()))]
pub async fn fetch<S: WorkerScope>(
    scope: &S,
    config: &AgentConfig,
    request: S::Request,
) -> Result<Fetched<S>, AgentError<S::Error>> {
    let url = request.url();

    match scope.fetch(&request).await {
        Ok(response) => {
            if !response.ok() {
                debug!("Not caching {url} ({})", response.status());
                return Ok(Fetched {
                    response,
                    store: None,
                });
            }

            let store = match scope.clone_response(&response) {
                Ok(copy) => Some(PendingStore { request, copy }),
                Err(e) => {
                    warn!("Failed to copy {url} for the cache: {e}");
                    None
                }
            };
            Ok(Fetched { response, store })
        }
        Err(network_error) => {
            debug!("Network failed for {url}: {network_error}");

            let cache = scope
                .open_cache(config.cache_name)
                .await
                .context("caches::open")?;

            match scope
                .cache_match(&cache, &request)
                .await
                .context("cache::match")?
            {
                Some(cached) => {
                    debug!("HIT: {url}");
                    Ok(Fetched {
                        response: cached,
                        store: None,
                    })
                }
                None => {
                    debug!("MISS: {url}");
                    Err(AgentError::Offline {
                        url,
                        inner: network_error,
                    })
                }
            }
        }
    }
}
