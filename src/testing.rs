//! In-memory upstream for exercising the pipeline without a network.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

use crate::espn::{Fetch, FetchError};

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status(StatusCode),
}

/// Serves canned bodies or statuses by exact URL; anything else is a 404.
#[derive(Debug, Default)]
pub struct StaticUpstream {
    routes: HashMap<String, Canned>,
    delay: Option<Duration>,
    route_delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    requests: AtomicUsize,
}

impl StaticUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_owned(), Canned::Body(body.to_owned()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.routes.insert(url.to_owned(), Canned::Status(status));
        self
    }

    /// Hold every request for `delay` so overlapping requests can be observed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold requests for this one URL for `delay`.
    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.route_delays.insert(url.to_owned(), delay);
        self
    }

    /// Most requests ever observed in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for StaticUpstream {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.route_delays.get(url.as_str()).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.routes.get(url.as_str()) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
