//! Portfolio content
//!
//! The profile rendered by the home screen. Content is read from
//! `~/.folio-tui/portfolio.json` when present, otherwise the embedded sample
//! profile is used so the app always has something to show.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// One showcased project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    /// ASCII screenshot lines; empty means "no image available"
    #[serde(default)]
    pub screenshot: Vec<String>,
    /// Suppress the mockup disclaimer in the preview dialog
    #[serde(default)]
    pub hide_disclaimer: bool,
}

impl Project {
    pub fn has_screenshot(&self) -> bool {
        !self.screenshot.is_empty()
    }
}

/// The whole portfolio document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub about: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

impl Profile {
    fn content_path() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".folio-tui").join("portfolio.json"))
    }

    /// Read the user's portfolio, falling back to the sample content
    pub fn load() -> Profile {
        let Some(path) = Self::content_path() else {
            return Self::sample();
        };
        if !path.exists() {
            return Self::sample();
        }
        match fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
        {
            Some(profile) => profile,
            None => Self::sample(),
        }
    }

    /// Placeholder content shipped with the binary
    pub fn sample() -> Profile {
        Profile {
            name: "Jordan Reyes".to_string(),
            tagline: "Backend engineer building small sharp tools".to_string(),
            about: vec![
                "I build data-heavy backend services and the occasional".to_string(),
                "terminal tool. Previously shipped billing infrastructure".to_string(),
                "and internal developer platforms for two startups.".to_string(),
                String::new(),
                "Open to freelance and contract work.".to_string(),
            ],
            skills: vec![
                "Rust".to_string(),
                "PostgreSQL".to_string(),
                "Kafka".to_string(),
                "Kubernetes".to_string(),
                "gRPC".to_string(),
            ],
            projects: vec![
                Project {
                    title: "ledgerline".to_string(),
                    description: "Double-entry bookkeeping engine with an append-only event log."
                        .to_string(),
                    tech: vec!["Rust".to_string(), "PostgreSQL".to_string()],
                    screenshot: vec![
                        "┌─ ledgerline ───────────────────────┐".to_string(),
                        "│ 2024-03-01  invoice:1042   +420.00 │".to_string(),
                        "│ 2024-03-02  payout:88      -310.50 │".to_string(),
                        "│ 2024-03-04  refund:1042     -42.00 │".to_string(),
                        "│ balance                      67.50 │".to_string(),
                        "└────────────────────────────────────┘".to_string(),
                    ],
                    hide_disclaimer: false,
                },
                Project {
                    title: "queuefeed".to_string(),
                    description: "Kafka consumer-lag dashboard with alerting hooks.".to_string(),
                    tech: vec!["Rust".to_string(), "Kafka".to_string()],
                    screenshot: Vec::new(),
                    hide_disclaimer: true,
                },
            ],
        }
    }
}

/// Sections of the portfolio, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Skills,
    Projects,
    Repositories,
    Contact,
}

impl Section {
    pub fn all() -> [Section; 5] {
        [
            Section::About,
            Section::Skills,
            Section::Projects,
            Section::Repositories,
            Section::Contact,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Repositories => "Repositories",
            Section::Contact => "Contact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_profile_is_complete() {
        let profile = Profile::sample();
        assert!(!profile.name.is_empty());
        assert!(!profile.projects.is_empty());
        assert!(profile.projects.iter().any(|p| p.has_screenshot()));
        assert!(profile.projects.iter().any(|p| !p.has_screenshot()));
    }

    #[test]
    fn test_project_round_trips_through_json() {
        let json = r#"{"title":"x","description":"y"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.tech.is_empty());
        assert!(!project.has_screenshot());
        assert!(!project.hide_disclaimer);
    }

    #[test]
    fn test_sections_are_ordered() {
        let sections = Section::all();
        assert_eq!(sections[0], Section::About);
        assert_eq!(sections[4], Section::Contact);
        assert_eq!(sections[3].title(), "Repositories");
    }
}
