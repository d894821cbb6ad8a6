use crate::model::loader::LoadPlan;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Email relay account identifier (public key)
    pub relay_user_id: String,
    pub relay_service_id: String,
    pub relay_template_id: String,
    /// Candidate relay endpoints, tried in order; the last one is usually a
    /// locally hosted relay for when the public ones are blocked
    #[serde(default = "default_relay_sources")]
    pub relay_sources: Vec<String>,
    /// Retries per endpoint beyond the initial attempt
    #[serde(default = "default_relay_max_retries")]
    pub relay_max_retries: u32,
    /// Base backoff in milliseconds, scaled linearly per retry
    #[serde(default = "default_relay_backoff_ms")]
    pub relay_backoff_ms: u64,
    /// Fixed delay in milliseconds before falling back to the next endpoint
    #[serde(default = "default_relay_fallback_delay_ms")]
    pub relay_fallback_delay_ms: u64,

    /// GitHub username for the repositories panel; empty disables the fetch
    #[serde(default)]
    pub github_username: String,
    #[serde(default = "default_github_per_page")]
    pub github_per_page: u8,
    /// Optional token to raise the API rate limit
    #[serde(default)]
    pub github_token: String,

    /// Inquiry submission endpoint; empty means simulate locally
    #[serde(default)]
    pub inquiry_endpoint: String,
}

fn default_relay_sources() -> Vec<String> {
    vec![
        "https://api.emailjs.com".to_string(),
        "https://api-bridge.emailjs.com".to_string(),
        // local fallback - run a relay on this port if the public ones are blocked
        "http://127.0.0.1:8025".to_string(),
    ]
}

fn default_relay_max_retries() -> u32 {
    2
}

fn default_relay_backoff_ms() -> u64 {
    700
}

fn default_relay_fallback_delay_ms() -> u64 {
    200
}

fn default_github_per_page() -> u8 {
    6
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay_user_id: "YOUR_USER_ID".to_string(),
            relay_service_id: "YOUR_SERVICE_ID".to_string(),
            relay_template_id: "YOUR_TEMPLATE_ID".to_string(),
            relay_sources: default_relay_sources(),
            relay_max_retries: default_relay_max_retries(),
            relay_backoff_ms: default_relay_backoff_ms(),
            relay_fallback_delay_ms: default_relay_fallback_delay_ms(),
            github_username: String::new(),
            github_per_page: default_github_per_page(),
            github_token: String::new(),
            inquiry_endpoint: String::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".folio-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Whether the relay identifiers have been filled in.
    ///
    /// Empty strings and the shipped `YOUR_` placeholders both count as
    /// unconfigured.
    pub fn relay_configured(&self) -> bool {
        let ids = [
            &self.relay_user_id,
            &self.relay_service_id,
            &self.relay_template_id,
        ];
        ids.iter().all(|id| !id.is_empty() && !id.starts_with("YOUR_"))
    }

    /// The retry-then-fallback plan for bringing the relay online
    pub fn load_plan(&self) -> LoadPlan {
        LoadPlan {
            sources: self.relay_sources.clone(),
            max_retries: self.relay_max_retries,
            backoff_base: Duration::from_millis(self.relay_backoff_ms),
            fallback_delay: Duration::from_millis(self.relay_fallback_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = Config::default();
        assert!(!config.relay_configured());
        assert!(config.inquiry_endpoint.is_empty());
        assert_eq!(config.relay_sources.len(), 3);
    }

    #[test]
    fn test_placeholder_ids_count_as_unconfigured() {
        let mut config = Config::default();
        config.relay_user_id = "user_abc123".to_string();
        config.relay_service_id = "YOUR_SERVICE_ID".to_string();
        config.relay_template_id = "template_xyz".to_string();
        assert!(!config.relay_configured());

        config.relay_service_id = "service_3pz".to_string();
        assert!(config.relay_configured());
    }

    #[test]
    fn test_load_plan_mirrors_config() {
        let config = Config::default();
        let plan = config.load_plan();
        assert_eq!(plan.sources, config.relay_sources);
        assert_eq!(plan.max_retries, 2);
        assert_eq!(plan.backoff_base, Duration::from_millis(700));
        assert_eq!(plan.fallback_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{
            "relay_user_id": "u",
            "relay_service_id": "s",
            "relay_template_id": "t"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.relay_max_retries, 2);
        assert_eq!(config.github_per_page, 6);
        assert!(config.github_username.is_empty());
    }
}
