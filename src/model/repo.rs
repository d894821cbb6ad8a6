//! GitHub repository data

use serde::Deserialize;

/// One repository as returned by the GitHub REST API
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub html_url: String,
}

impl Repo {
    pub fn language_badge(&self) -> &str {
        self.language.as_deref().unwrap_or("—")
    }
}

/// Lifecycle of the repositories panel
#[derive(Debug, Clone)]
pub enum ReposState {
    /// Username not set; nothing to fetch
    Unconfigured,
    Loading,
    Ready(Vec<Repo>),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_deserializes_with_missing_optionals() {
        let json = r#"{
            "name": "ledgerline",
            "html_url": "https://github.com/jordan/ledgerline",
            "stargazers_count": 12
        }"#;
        let repo: Repo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "ledgerline");
        assert_eq!(repo.stargazers_count, 12);
        assert_eq!(repo.language_badge(), "—");
        assert!(repo.description.is_none());
    }

    #[test]
    fn test_repo_list_deserializes() {
        let json = r#"[
            {"name":"a","html_url":"u1","language":"Rust","description":"d"},
            {"name":"b","html_url":"u2"}
        ]"#;
        let repos: Vec<Repo> = serde_json::from_str(json).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].language_badge(), "Rust");
    }
}
