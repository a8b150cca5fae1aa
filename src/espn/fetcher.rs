//! Single-request fetching: the atomic unit of concurrency in the pipeline.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use url::Url;

use crate::espn::errors::FetchError;
use crate::espn::json::decode_json;
use crate::pipeline::log::RunLog;
use crate::utils::warn_if_slow;

/// Requests slower than this are reported at WARN.
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(5);

/// Something that can GET a URL and hand back its body.
///
/// [`HttpFetcher`] is the production implementation; tests substitute an
/// in-memory upstream.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

/// reqwest-backed [`Fetch`] with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let start = Instant::now();
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.text().await.map_err(transport)?;
        warn_if_slow(start, SLOW_REQUEST_THRESHOLD, url.as_str());
        trace!(url = %url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

/// Fetches and decodes one URL, converting every failure into a run-log line.
///
/// Callers only ever see `Some(payload)` or `None`.
#[derive(Clone)]
pub struct ReferenceFetcher {
    inner: Arc<dyn Fetch>,
    log: RunLog,
}

impl ReferenceFetcher {
    pub fn new(inner: Arc<dyn Fetch>, log: RunLog) -> Self {
        Self { inner, log }
    }

    /// Same upstream, log lines attributed to `team`.
    pub fn for_team(&self, team: &str) -> Self {
        Self {
            inner: self.inner.clone(),
            log: self.log.scoped(team),
        }
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub async fn fetch<T>(&self, url: &Url) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.try_fetch(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(url = %url, status = ?e.status(), error = %e, "fetch failed");
                self.log.error(e.to_string());
                None
            }
        }
    }

    async fn try_fetch<T>(&self, url: &Url) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.inner.get(url).await?;
        decode_json(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
