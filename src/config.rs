use crate::api::DEFAULT_BASE_URL;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_USER_AGENT: &str = concat!("streamed-sports/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// REST API root, e.g. `https://host/api`
    pub base_url: String,
    /// Root for team badges and posters; defaults to `base_url`
    pub image_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Resolve API hosts through the hickory resolver
    pub use_doh: bool,
    /// Sources of one match probed at once. 1 keeps the loop strictly serial.
    pub validation_concurrency: usize,
    /// Cap for the "recent" F1 listing
    pub recent_limit: usize,
    /// Fall back to built-in sample listings when the API has nothing
    pub fallback_to_samples: bool,
    pub timezone: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: None,
            request_timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_doh: false,
            validation_concurrency: 1,
            recent_limit: 6,
            fallback_to_samples: true,
            timezone: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "streamed", "streamed-sports")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load `config.json` from the platform config dir, or defaults when it
    /// does not exist yet.
    pub fn load() -> Result<Self, anyhow::Error> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(AppConfig::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), anyhow::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn image_base(&self) -> &str {
        self.image_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }

    pub fn get_user_timezone(&self) -> String {
        if let Some(tz) = &self.timezone {
            return tz.clone();
        }

        if let Ok(tz) = iana_time_zone::get_timezone() {
            return tz;
        }

        "UTC".to_string()
    }

    /// Set the display timezone; rejects names chrono-tz does not know.
    pub fn set_timezone(&mut self, tz: &str) -> Result<(), anyhow::Error> {
        let tz = tz.trim();
        if tz.parse::<chrono_tz::Tz>().is_err() {
            anyhow::bail!("Unknown timezone: {}", tz);
        }
        self.timezone = Some(tz.to_string());
        Ok(())
    }
}
