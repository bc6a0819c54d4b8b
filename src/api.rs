use crate::errors::ApiError;
use crate::flex_time::{
    deserialize_flex_option_string, deserialize_flex_string, deserialize_null_default, MatchTime,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.naveenraj30.me/api";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Live,
    Upcoming,
    #[serde(other)]
    Other,
}

/// A team is either a bare name or a `{ name, badge }` object depending on
/// the endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TeamRef {
    Named(String),
    Detailed {
        name: String,
        #[serde(default)]
        badge: Option<String>,
    },
}

impl TeamRef {
    pub fn name(&self) -> &str {
        match self {
            TeamRef::Named(name) => name,
            TeamRef::Detailed { name, .. } => name,
        }
    }

    pub fn badge(&self) -> Option<&str> {
        match self {
            TeamRef::Named(_) => None,
            TeamRef::Detailed { badge, .. } => badge.as_deref(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Teams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<TeamRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<TeamRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1: Option<TeamRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2: Option<TeamRef>,
}

impl Teams {
    /// Home side, falling back to `team1` (cricket payloads).
    pub fn first(&self) -> Option<&TeamRef> {
        self.home.as_ref().or(self.team1.as_ref())
    }

    pub fn second(&self) -> Option<&TeamRef> {
        self.away.as_ref().or(self.team2.as_ref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Score {
    pub home: Option<String>,
    pub away: Option<String>,
}

/// One candidate stream endpoint of a match.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Source {
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentators: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Source {
    pub fn new(source: &str, id: &str) -> Self {
        Self {
            source: source.to_string(),
            id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(default, deserialize_with = "deserialize_flex_option_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "time")]
    pub date: MatchTime,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub popular: bool,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub teams: Option<Teams>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub sources: Vec<Source>,

    // Descriptive extras; which ones are present depends on the sport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<serde_json::Value>,
}

impl Match {
    pub fn is_status(&self, status: MatchStatus) -> bool {
        self.status == Some(status)
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    /// Lower-cased category, empty when absent.
    pub fn category_lower(&self) -> String {
        self.category.as_deref().unwrap_or_default().to_lowercase()
    }

    pub fn has_source(&self, source: &str, id: &str) -> bool {
        self.sources.iter().any(|s| s.source == source && s.id == id)
    }
}

/// A resolved, playable stream of one source.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub stream_no: i32,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub language: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub hd: bool,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub embed_url: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub source: String,
}

impl Stream {
    pub fn is_hls(&self) -> bool {
        let url = self.embed_url.to_lowercase();
        let path = url.split(['?', '#']).next().unwrap_or_default();
        path.ends_with(".m3u8")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Sport {
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
}

/// Where match listings come from. [`StreamedClient`] talks to the REST API;
/// tests plug in canned feeds.
#[async_trait]
pub trait MatchFeed: Send + Sync {
    /// `GET /matches/{endpoint}` (`live`, `upcoming`, `all-today`, `all`, or a
    /// category such as `f1`).
    async fn fetch_matches(&self, endpoint: &str) -> Result<Vec<Match>, ApiError>;

    /// `GET /stream/{source}/{id}`
    async fn fetch_streams(&self, source: &str, id: &str) -> Result<Vec<Stream>, ApiError>;

    /// `GET /sports`
    async fn fetch_sports(&self) -> Result<Vec<Sport>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct StreamedClient {
    pub base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}

impl StreamedClient {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    /// Create a client that resolves hosts through the hickory resolver
    /// instead of the system stub resolver.
    pub fn new_with_doh(
        base_url: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, anyhow::Error> {
        use reqwest_hickory_resolver::HickoryResolver;
        use std::sync::Arc;

        let base_url = normalize_base_url(base_url)?;
        let resolver = HickoryResolver::default();

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .dns_resolver(Arc::new(resolver))
            .build()?;

        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    pub fn matches_url(&self, endpoint: &str) -> String {
        format!("{}/matches/{}", self.base_url, endpoint)
    }

    pub fn stream_url(&self, source: &str, id: &str) -> String {
        format!("{}/stream/{}/{}", self.base_url, source, id)
    }

    pub fn sports_url(&self) -> String {
        format!("{}/sports", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e, self.timeout_secs))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), url.to_string()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e, self.timeout_secs))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(url.to_string(), e.to_string()))
    }
}

#[async_trait]
impl MatchFeed for StreamedClient {
    async fn fetch_matches(&self, endpoint: &str) -> Result<Vec<Match>, ApiError> {
        self.get_json(&self.matches_url(endpoint)).await
    }

    async fn fetch_streams(&self, source: &str, id: &str) -> Result<Vec<Stream>, ApiError> {
        self.get_json(&self.stream_url(source, id)).await
    }

    async fn fetch_sports(&self) -> Result<Vec<Sport>, ApiError> {
        self.get_json(&self.sports_url()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = StreamedClient::new("https://example.org/api//", "test", 5).unwrap();
        assert_eq!(client.base_url, "https://example.org/api");
        assert_eq!(client.matches_url("live"), "https://example.org/api/matches/live");
        assert_eq!(
            client.stream_url("charlie", "abc-1"),
            "https://example.org/api/stream/charlie/abc-1"
        );
        assert_eq!(client.sports_url(), "https://example.org/api/sports");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = StreamedClient::new("ftp://nope", "test", 5).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_match_deserialize_api_shape() {
        let m: Match = serde_json::from_value(json!({
            "id": "italian-gp",
            "title": "Formula 1 Italian Grand Prix",
            "category": "motor-sports",
            "date": 1726412400000i64,
            "popular": true,
            "teams": {
                "home": { "name": "Ferrari", "badge": "ferrari.png" },
                "away": { "name": "McLaren" }
            },
            "sources": [{ "source": "charlie", "id": "italian-gp-race" }],
            "unknownField": 3
        }))
        .unwrap();

        assert_eq!(m.id.as_deref(), Some("italian-gp"));
        assert_eq!(m.date.as_millis(), Some(1726412400000));
        let teams = m.teams.unwrap();
        assert_eq!(teams.first().unwrap().name(), "Ferrari");
        assert_eq!(teams.first().unwrap().badge(), Some("ferrari.png"));
        assert_eq!(teams.second().unwrap().badge(), None);
        assert_eq!(m.sources, vec![Source::new("charlie", "italian-gp-race")]);
    }

    #[test]
    fn test_match_deserialize_cricket_shape() {
        let m: Match = serde_json::from_value(json!({
            "title": "India vs Australia - 1st Test",
            "series": "Border-Gavaskar Trophy",
            "teams": { "team1": "India", "team2": "Australia" },
            "time": "2024-11-22T02:20:00Z",
            "status": "live",
            "sources": [{ "source": "cricket1", "id": 77 }]
        }))
        .unwrap();

        assert!(m.id.is_none());
        assert!(m.is_status(MatchStatus::Live));
        assert!(m.date.is_known());
        let teams = m.teams.unwrap();
        assert_eq!(teams.first().unwrap().name(), "India");
        assert_eq!(teams.second().unwrap().name(), "Australia");
        assert_eq!(m.sources[0].id, "77");
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let matches: Vec<Match> = serde_json::from_value(json!([
            { "title": "Italian Grand Prix", "sources": [{ "source": "charlie", "id": "monza" }] },
            { "title": null, "popular": null, "sources": null, "date": null }
        ]))
        .unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].title, "");
        assert!(!matches[1].popular);
        assert!(!matches[1].has_sources());

        let stream: Stream = serde_json::from_value(json!({
            "id": 1, "streamNo": null, "language": null, "hd": null, "embedUrl": null, "source": null
        }))
        .unwrap();
        assert_eq!(stream.stream_no, 0);
        assert!(stream.embed_url.is_empty());
    }

    #[test]
    fn test_unknown_status_is_other() {
        let m: Match = serde_json::from_value(json!({ "title": "x", "status": "finished" })).unwrap();
        assert_eq!(m.status, Some(MatchStatus::Other));
    }

    #[test]
    fn test_stream_is_hls() {
        let s = Stream {
            embed_url: "https://cdn.example/master.m3u8?token=1".to_string(),
            ..Default::default()
        };
        assert!(s.is_hls());
        let s = Stream {
            embed_url: "https://embed.example/charlie/abc/1".to_string(),
            ..Default::default()
        };
        assert!(!s.is_hls());
    }
}
