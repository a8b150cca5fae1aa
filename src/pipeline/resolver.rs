//! Concurrent dereferencing of a team's injury pointers.

use futures::StreamExt;
use futures::stream;

use crate::espn::{InjuryDetail, Reference, ReferenceFetcher};

/// Resolves a batch of references, at most `concurrency` in flight.
#[derive(Clone)]
pub struct DetailResolver {
    fetcher: ReferenceFetcher,
    concurrency: usize,
}

impl DetailResolver {
    /// `concurrency == 0` means every reference is in flight at once.
    pub fn new(fetcher: ReferenceFetcher, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency,
        }
    }

    /// One outcome per input reference, in input order. `None` marks a
    /// reference that could not be fetched or decoded (already logged).
    pub async fn resolve(&self, references: &[Reference]) -> Vec<Option<InjuryDetail>> {
        let limit = match self.concurrency {
            0 => references.len().max(1),
            n => n,
        };

        // Yielded in completion order; re-sorted to input order below.
        let mut resolved: Vec<(usize, Option<InjuryDetail>)> =
            stream::iter(references.iter().enumerate())
                .map(|(index, reference)| async move {
                    (index, reference.resolve::<InjuryDetail>(&self.fetcher).await)
                })
                .buffer_unordered(limit)
                .collect()
                .await;

        resolved.sort_unstable_by_key(|(index, _)| *index);
        resolved.into_iter().map(|(_, detail)| detail).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::log::RunLog;
    use crate::testing::StaticUpstream;
    use std::sync::Arc;
    use std::time::Duration;

    fn refs(urls: &[&str]) -> Vec<Reference> {
        urls.iter().map(|u| Reference::parse(u).unwrap()).collect()
    }

    #[tokio::test]
    async fn outcomes_align_with_input() {
        let upstream = StaticUpstream::new()
            .json("http://x.test/injuries/1", r#"{"id": "1"}"#)
            .status("http://x.test/injuries/2", 500)
            .json("http://x.test/injuries/3", r#"{"id": "3"}"#);
        let (log, drain) = RunLog::channel();
        let resolver = DetailResolver::new(ReferenceFetcher::new(Arc::new(upstream), log), 2);

        let out = resolver
            .resolve(&refs(&[
                "http://x.test/injuries/1",
                "http://x.test/injuries/2",
                "http://x.test/injuries/3",
            ]))
            .await;
        drop(resolver);

        let ids: Vec<Option<String>> = out.iter().map(|d| d.as_ref().and_then(|d| d.id())).collect();
        assert_eq!(ids, vec![Some("1".into()), None, Some("3".into())]);
        assert_eq!(drain.collect().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrency_limit_is_respected() {
        let upstream = StaticUpstream::new().with_delay(Duration::from_millis(20));
        let upstream = (0..12).fold(upstream, |u, i| {
            u.json(&format!("http://x.test/injuries/{i}"), r#"{}"#)
        });
        let upstream = Arc::new(upstream);
        let (log, _drain) = RunLog::channel();
        let resolver = DetailResolver::new(ReferenceFetcher::new(upstream.clone(), log), 3);

        let urls: Vec<String> = (0..12).map(|i| format!("http://x.test/injuries/{i}")).collect();
        let references: Vec<Reference> = urls.iter().map(|u| Reference::parse(u).unwrap()).collect();
        let out = resolver.resolve(&references).await;

        assert_eq!(out.len(), 12);
        assert!(out.iter().all(Option::is_some));
        assert!(upstream.peak_in_flight() <= 3, "peak {}", upstream.peak_in_flight());
        assert_eq!(upstream.requests(), 12);
    }

    #[tokio::test]
    async fn unbounded_fans_out_everything() {
        let upstream = StaticUpstream::new().with_delay(Duration::from_millis(20));
        let upstream = Arc::new((0..8).fold(upstream, |u, i| {
            u.json(&format!("http://x.test/injuries/{i}"), r#"{}"#)
        }));
        let (log, _drain) = RunLog::channel();
        let resolver = DetailResolver::new(ReferenceFetcher::new(upstream.clone(), log), 0);

        let references: Vec<Reference> = (0..8)
            .map(|i| Reference::parse(&format!("http://x.test/injuries/{i}")).unwrap())
            .collect();
        resolver.resolve(&references).await;

        assert_eq!(upstream.peak_in_flight(), 8);
    }

    #[tokio::test]
    async fn empty_input_resolves_to_nothing() {
        let (log, _drain) = RunLog::channel();
        let resolver =
            DetailResolver::new(ReferenceFetcher::new(Arc::new(StaticUpstream::new()), log), 0);
        assert!(resolver.resolve(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn slow_reference_does_not_stall_the_rest() {
        let upstream = StaticUpstream::new()
            .with_delay(Duration::from_millis(5))
            .slow("http://x.test/injuries/0", Duration::from_secs(5));
        let upstream = Arc::new((0..7).fold(upstream, |u, i| {
            u.json(&format!("http://x.test/injuries/{i}"), r#"{}"#)
        }));
        let (log, _drain) = RunLog::channel();
        let resolver = DetailResolver::new(ReferenceFetcher::new(upstream.clone(), log), 2);

        let references: Vec<Reference> = (0..7)
            .map(|i| Reference::parse(&format!("http://x.test/injuries/{i}")).unwrap())
            .collect();
        let pending = tokio::time::timeout(Duration::from_millis(500), resolver.resolve(&references)).await;

        assert!(pending.is_err());
        assert_eq!(upstream.requests(), 7);
    }

    #[tokio::test]
    async fn out_of_order_completion_keeps_input_order() {
        let upstream = StaticUpstream::new()
            .json("http://x.test/injuries/1", r#"{"id": "1"}"#)
            .json("http://x.test/injuries/2", r#"{"id": "2"}"#)
            .slow("http://x.test/injuries/1", Duration::from_millis(50));
        let (log, _drain) = RunLog::channel();
        let resolver = DetailResolver::new(ReferenceFetcher::new(Arc::new(upstream), log), 2);

        let out = resolver
            .resolve(&refs(&["http://x.test/injuries/1", "http://x.test/injuries/2"]))
            .await;

        let ids: Vec<Option<String>> = out.iter().map(|d| d.as_ref().and_then(|d| d.id())).collect();
        assert_eq!(ids, vec![Some("1".into()), Some("2".into())]);
    }
}
