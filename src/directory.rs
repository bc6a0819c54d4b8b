//! Listing operations over a [`MatchFeed`].
//!
//! Every listing returns a plain `Vec<Match>`. Failures never reach the
//! caller: each step falls back to the next one, ending in built-in sample
//! data or an empty list. "Not ok" (the server answered with an error status)
//! and "failed" (no usable answer at all) lead to different fallbacks.

use crate::api::{Match, MatchFeed, Sport, Stream};
use crate::classify::{self, SportKind};
use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::samples;
use crate::validate::StreamValidator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

pub const LIVE: &str = "live";
pub const UPCOMING: &str = "upcoming";
pub const ALL_TODAY: &str = "all-today";
pub const ALL: &str = "all";
pub const F1_CATEGORY: &str = "f1";

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryOptions {
    pub validation_concurrency: usize,
    pub recent_limit: usize,
    pub fallback_to_samples: bool,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            validation_concurrency: 1,
            recent_limit: 6,
            fallback_to_samples: true,
        }
    }
}

impl From<&AppConfig> for DirectoryOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            validation_concurrency: config.validation_concurrency.max(1),
            recent_limit: config.recent_limit,
            fallback_to_samples: config.fallback_to_samples,
        }
    }
}

/// Which slice of a sport's schedule to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Live,
    Upcoming,
    All,
    Today,
    Recent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeOverview {
    pub live_f1: Vec<Match>,
    pub live_cricket: Vec<Match>,
    pub live_asia_cup: Vec<Match>,
    pub upcoming_f1: Vec<Match>,
}

impl HomeOverview {
    pub fn live_count(&self) -> usize {
        self.live_f1.len() + self.live_cricket.len()
    }
}

/// Outcome of one listing fetch.
enum Fetched {
    Ok(Vec<Match>),
    NotOk,
    Failed(ApiError),
}

fn only(matches: Vec<Match>, pred: impl Fn(&Match) -> bool) -> Vec<Match> {
    matches.into_iter().filter(|m| pred(m)).collect()
}

pub struct SportsDirectory<F: MatchFeed> {
    feed: F,
    options: DirectoryOptions,
}

impl<F: MatchFeed> SportsDirectory<F> {
    pub fn new(feed: F, options: DirectoryOptions) -> Self {
        Self { feed, options }
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn validator(&self) -> StreamValidator<'_, F> {
        StreamValidator::new(&self.feed).with_concurrency(self.options.validation_concurrency)
    }

    async fn validate(&self, matches: Vec<Match>) -> Vec<Match> {
        self.validator().validate_matches(matches).await
    }

    /// Sample listing, or nothing when sample fallback is switched off.
    fn samples(&self, build: impl FnOnce() -> Vec<Match>) -> Vec<Match> {
        if self.options.fallback_to_samples {
            build()
        } else {
            Vec::new()
        }
    }

    async fn fetch(&self, endpoint: &str) -> Fetched {
        match self.feed.fetch_matches(endpoint).await {
            Ok(matches) => {
                debug!(endpoint, count = matches.len(), "fetched matches");
                Fetched::Ok(matches)
            }
            Err(e) if e.is_status() => {
                warn!(endpoint, status = e.status_code(), "matches endpoint not ok");
                Fetched::NotOk
            }
            Err(e) => {
                error!(endpoint, error = %e, "fetching matches failed");
                Fetched::Failed(e)
            }
        }
    }

    pub async fn listing(&self, sport: SportKind, listing: Listing) -> Option<Vec<Match>> {
        let matches = match (sport, listing) {
            (SportKind::F1, Listing::Live) => self.live_f1_matches().await,
            (SportKind::F1, Listing::Upcoming) => self.upcoming_f1_matches().await,
            (SportKind::F1, Listing::All) => self.f1_matches().await,
            (SportKind::F1, Listing::Today) => self.today_f1_matches().await,
            (SportKind::F1, Listing::Recent) => self.recent_f1_matches().await,
            (SportKind::Cricket, Listing::Live) => self.live_cricket_matches().await,
            (SportKind::Cricket, Listing::Upcoming) => self.upcoming_cricket_matches().await,
            (SportKind::Cricket, Listing::All) => self.cricket_matches().await,
            (SportKind::Basketball, Listing::Live) => self.live_basketball_matches().await,
            (SportKind::Basketball, Listing::Upcoming) => self.upcoming_basketball_matches().await,
            (SportKind::Basketball, Listing::All) => self.basketball_matches().await,
            _ => return None,
        };
        Some(matches)
    }

    // F1

    /// Validated live F1 races, or upcoming F1 races when none are live.
    pub async fn f1_matches(&self) -> Vec<Match> {
        match self.fetch(LIVE).await {
            Fetched::Ok(live) => {
                let f1_live = only(live, classify::is_f1_match);
                if !f1_live.is_empty() {
                    return self.validate(f1_live).await;
                }
            }
            Fetched::NotOk => {}
            Fetched::Failed(_) => return Vec::new(),
        }

        match self.fetch(UPCOMING).await {
            Fetched::Ok(upcoming) => only(upcoming, classify::is_f1_match),
            _ => Vec::new(),
        }
    }

    pub async fn live_f1_matches(&self) -> Vec<Match> {
        match self.fetch(LIVE).await {
            Fetched::Ok(live) => self.validate(only(live, classify::is_f1_match)).await,
            _ => Vec::new(),
        }
    }

    /// Today's F1 sessions; live races when the day has none.
    pub async fn today_f1_matches(&self) -> Vec<Match> {
        if let Fetched::Ok(today) = self.fetch(ALL_TODAY).await {
            let f1_today = only(today, classify::is_f1_match);
            if !f1_today.is_empty() {
                return f1_today;
            }
        }
        info!("no F1 sessions today, falling back to live races");
        self.live_f1_matches().await
    }

    /// Most recent F1 listings from the category endpoint, or from the full
    /// listing when that endpoint is missing.
    pub async fn recent_f1_matches(&self) -> Vec<Match> {
        let limit = self.options.recent_limit;
        match self.fetch(F1_CATEGORY).await {
            Fetched::Ok(mut matches) => {
                matches.truncate(limit);
                matches
            }
            Fetched::NotOk => match self.fetch(ALL).await {
                Fetched::Ok(all) => {
                    let mut f1 = only(all, classify::is_f1_match);
                    f1.truncate(limit);
                    f1
                }
                _ => Vec::new(),
            },
            Fetched::Failed(_) => Vec::new(),
        }
    }

    pub async fn upcoming_f1_matches(&self) -> Vec<Match> {
        match self.fetch(UPCOMING).await {
            Fetched::Ok(upcoming) => only(upcoming, classify::is_f1_match),
            _ => Vec::new(),
        }
    }

    // Live listings with sample fallback (basketball, cricket)

    /// Validated live matches passing `pred`; validated samples when the
    /// feed yields nothing usable; raw samples when the feed fails.
    async fn live_with_samples(
        &self,
        label: &str,
        pred: fn(&Match) -> bool,
        fallback: impl Fn() -> Vec<Match>,
    ) -> Vec<Match> {
        match self.fetch(LIVE).await {
            Fetched::Ok(live) => {
                let filtered = only(live, pred);
                if !filtered.is_empty() {
                    let validated = self.validate(filtered).await;
                    if !validated.is_empty() {
                        return validated;
                    }
                }
            }
            Fetched::NotOk => {}
            Fetched::Failed(_) => {
                info!(label, "returning unvalidated sample data");
                return self.samples(&fallback);
            }
        }
        info!(label, "no live matches from the API, validating sample data");
        self.validate(self.samples(&fallback)).await
    }

    /// Upcoming matches passing `pred`, else the upcoming samples.
    async fn upcoming_with_samples(
        &self,
        label: &str,
        pred: fn(&Match) -> bool,
        fallback: impl Fn() -> Vec<Match>,
    ) -> Vec<Match> {
        if let Fetched::Ok(upcoming) = self.fetch(UPCOMING).await {
            let filtered = only(upcoming, pred);
            if !filtered.is_empty() {
                return filtered;
            }
        }
        info!(label, "no upcoming matches from the API, using sample data");
        self.samples(&fallback)
    }

    // Basketball

    pub async fn basketball_matches(&self) -> Vec<Match> {
        self.live_with_samples("basketball", classify::is_basketball_match, samples::live_basketball)
            .await
    }

    pub async fn live_basketball_matches(&self) -> Vec<Match> {
        self.live_with_samples("basketball", classify::is_basketball_match, samples::live_basketball)
            .await
    }

    pub async fn upcoming_basketball_matches(&self) -> Vec<Match> {
        self.samples(samples::upcoming_basketball)
    }

    // Cricket

    /// Combined cricket listing. Uses the broad title filter.
    pub async fn cricket_matches(&self) -> Vec<Match> {
        let now = self.now();
        self.live_with_samples("cricket", classify::is_cricket_match_loose, || {
            samples::live_cricket(now)
        })
        .await
    }

    pub async fn live_cricket_matches(&self) -> Vec<Match> {
        let now = self.now();
        self.live_with_samples("cricket", classify::is_cricket_match, || samples::live_cricket(now))
            .await
    }

    pub async fn upcoming_cricket_matches(&self) -> Vec<Match> {
        let now = self.now();
        self.upcoming_with_samples("cricket", classify::is_cricket_match, || {
            samples::upcoming_cricket(now)
        })
        .await
    }

    /// Live Asia Cup games. Unlike the other live listings, a non-empty API
    /// result is returned even when validation leaves nothing.
    pub async fn live_asia_cup_matches(&self) -> Vec<Match> {
        let now = self.now();
        match self.fetch(LIVE).await {
            Fetched::Ok(live) => {
                let asia_cup = only(live, classify::is_asia_cup_match);
                if !asia_cup.is_empty() {
                    return self.validate(asia_cup).await;
                }
            }
            Fetched::NotOk => {}
            Fetched::Failed(_) => {
                return self.samples(|| samples::live_asia_cup(now));
            }
        }
        info!("no live Asia Cup matches from the API, validating sample data");
        self.validate(self.samples(|| samples::live_asia_cup(now))).await
    }

    pub async fn upcoming_asia_cup_matches(&self) -> Vec<Match> {
        let now = self.now();
        self.upcoming_with_samples("asia cup", classify::is_asia_cup_match, || {
            samples::upcoming_asia_cup(now)
        })
        .await
    }

    /// Live then upcoming Asia Cup matches, fetched concurrently.
    pub async fn all_asia_cup_matches(&self) -> Vec<Match> {
        let (mut live, upcoming) =
            futures::join!(self.live_asia_cup_matches(), self.upcoming_asia_cup_matches());
        live.extend(upcoming);
        live
    }

    pub async fn cricket_matches_by_tournament(&self, tournament: &str) -> Vec<Match> {
        match self.fetch(ALL).await {
            Fetched::Ok(all) => only(all, |m| {
                classify::is_cricket_match(m) && classify::matches_tournament(m, tournament)
            }),
            Fetched::NotOk => {
                let now = self.now();
                only(self.samples(|| samples::cricket(now)), |m| {
                    classify::matches_series(m, tournament)
                })
            }
            Fetched::Failed(e) => {
                error!(tournament, error = %e, "tournament listing failed");
                Vec::new()
            }
        }
    }

    // Shared

    pub async fn streams(&self, source: &str, id: &str) -> Vec<Stream> {
        match self.feed.fetch_streams(source, id).await {
            Ok(streams) => streams,
            Err(e) => {
                error!(source, id, error = %e, "fetching streams failed");
                Vec::new()
            }
        }
    }

    pub async fn sports(&self) -> Vec<Sport> {
        match self.feed.fetch_sports().await {
            Ok(sports) => sports,
            Err(e) => {
                error!(error = %e, "fetching sports failed");
                Vec::new()
            }
        }
    }

    pub async fn home_overview(&self) -> HomeOverview {
        let (live_f1, live_cricket, live_asia_cup, upcoming_f1) = futures::join!(
            self.live_f1_matches(),
            self.live_cricket_matches(),
            self.live_asia_cup_matches(),
            self.upcoming_f1_matches()
        );
        HomeOverview {
            live_f1,
            live_cricket,
            live_asia_cup,
            upcoming_f1,
        }
    }

    /// Find the listing a stream source belongs to, searching live, today's
    /// and then the general F1 listings.
    pub async fn find_match(&self, source: &str, id: &str) -> Option<Match> {
        let (all, live, today) = futures::join!(
            self.f1_matches(),
            self.live_f1_matches(),
            self.today_f1_matches()
        );
        live.into_iter()
            .chain(today)
            .chain(all)
            .find(|m| m.has_source(source, id))
    }
}
