//! The "check every source, keep only working ones" loop.

use crate::api::{Match, MatchFeed, Source};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

pub struct StreamValidator<'a, F: MatchFeed + ?Sized> {
    feed: &'a F,
    concurrency: usize,
}

impl<'a, F: MatchFeed + ?Sized> StreamValidator<'a, F> {
    pub fn new(feed: &'a F) -> Self {
        Self {
            feed,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// A source is available when its stream endpoint answers with at least
    /// one stream. Any failure counts as unavailable.
    pub async fn check_stream_availability(&self, source: &str, id: &str) -> bool {
        match self.feed.fetch_streams(source, id).await {
            Ok(streams) if streams.is_empty() => {
                debug!(source, id, "empty stream list");
                false
            }
            Ok(streams) => {
                debug!(source, id, count = streams.len(), "stream data found");
                true
            }
            Err(e) => {
                warn!(source, id, error = %e, "stream check failed");
                false
            }
        }
    }

    async fn working_sources(&self, sources: &[Source]) -> Vec<Source> {
        if self.concurrency <= 1 {
            let mut working = Vec::new();
            for source in sources {
                if self.check_stream_availability(&source.source, &source.id).await {
                    working.push(source.clone());
                }
            }
            return working;
        }

        // `buffered` yields in input order, so source order survives.
        stream::iter(sources)
            .map(|source| async move {
                let ok = self.check_stream_availability(&source.source, &source.id).await;
                (source, ok)
            })
            .buffered(self.concurrency)
            .filter_map(|(source, ok)| async move { ok.then(|| source.clone()) })
            .collect::<Vec<Source>>()
            .await
    }

    /// Keep matches with at least one working source, trimmed to those
    /// sources. Matches without sources are dropped. Input order is kept.
    pub async fn validate_matches(&self, matches: Vec<Match>) -> Vec<Match> {
        let total = matches.len();
        let mut validated = Vec::with_capacity(total);

        for mut m in matches {
            if !m.has_sources() {
                debug!(title = %m.title, "skipping match without sources");
                continue;
            }

            let working = self.working_sources(&m.sources).await;
            if working.is_empty() {
                debug!(title = %m.title, "no working sources");
                continue;
            }

            m.sources = working;
            validated.push(m);
        }

        debug!(kept = validated.len(), total, "validated matches");
        validated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Sport, Stream};
    use crate::errors::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Streams resolve only for ids starting with "ok"; ids starting with
    /// "err" fail outright. Every probe is recorded.
    #[derive(Default)]
    struct ProbeFeed {
        probes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MatchFeed for ProbeFeed {
        async fn fetch_matches(&self, _endpoint: &str) -> Result<Vec<Match>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_streams(&self, source: &str, id: &str) -> Result<Vec<Stream>, ApiError> {
            self.probes.lock().unwrap().push(format!("{}/{}", source, id));
            if id.starts_with("err") {
                return Err(ApiError::Status(500, id.to_string()));
            }
            if id.starts_with("ok") {
                return Ok(vec![Stream {
                    id: id.to_string(),
                    source: source.to_string(),
                    ..Default::default()
                }]);
            }
            Ok(Vec::new())
        }

        async fn fetch_sports(&self) -> Result<Vec<Sport>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn with_sources(title: &str, ids: &[&str]) -> Match {
        Match {
            title: title.to_string(),
            sources: ids.iter().map(|id| Source::new("src", id)).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_availability() {
        let feed = ProbeFeed::default();
        let v = StreamValidator::new(&feed);
        assert!(v.check_stream_availability("src", "ok-1").await);
        assert!(!v.check_stream_availability("src", "empty").await);
        assert!(!v.check_stream_availability("src", "err-1").await);
    }

    #[tokio::test]
    async fn test_validate_keeps_only_working_sources() {
        let feed = ProbeFeed::default();
        let v = StreamValidator::new(&feed);
        let input = vec![
            with_sources("no sources", &[]),
            with_sources("mixed", &["empty", "ok-a", "err-b", "ok-c"]),
            with_sources("all dead", &["empty", "err"]),
            with_sources("single", &["ok-z"]),
        ];

        let out = v.validate_matches(input).await;
        let titles: Vec<_> = out.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["mixed", "single"]);

        let ids: Vec<_> = out[0].sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ok-a", "ok-c"]);

        // Every source of every match with sources is probed, in order.
        let probes = feed.probes.lock().unwrap().clone();
        assert_eq!(
            probes,
            vec!["src/empty", "src/ok-a", "src/err-b", "src/ok-c", "src/empty", "src/err", "src/ok-z"]
        );
    }

    #[tokio::test]
    async fn test_concurrent_probing_preserves_order() {
        let feed = ProbeFeed::default();
        let v = StreamValidator::new(&feed).with_concurrency(4);
        let out = v
            .validate_matches(vec![with_sources("m", &["ok-1", "bad", "ok-2", "ok-3", "err"])])
            .await;
        let ids: Vec<_> = out[0].sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ok-1", "ok-2", "ok-3"]);
    }
}
