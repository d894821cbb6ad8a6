//! GitHub repositories fetch
//!
//! One fetch per request, no retry. The request runs on a spawned thread and
//! the outcome arrives through an mpsc channel, drained on Tick.

use crate::model::repo::Repo;
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Outcome of a repositories fetch
#[derive(Debug, Clone)]
pub enum RepoEvent {
    Loaded(Vec<Repo>),
    Failed(String),
}

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Repository fetch service
pub struct RepoFetcher {
    job: Option<Receiver<RepoEvent>>,
}

impl Default for RepoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFetcher {
    pub fn new() -> Self {
        Self { job: None }
    }

    pub fn in_flight(&self) -> bool {
        self.job.is_some()
    }

    /// Start a fetch; a second call while one is in flight is ignored
    pub fn fetch(&mut self, username: String, per_page: u8, token: String) {
        if self.job.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let event = match fetch_repos(&username, per_page, &token) {
                Ok(repos) => RepoEvent::Loaded(repos),
                Err(message) => RepoEvent::Failed(message),
            };
            let _ = tx.send(event);
        });

        self.job = Some(rx);
    }

    /// Take the outcome if the fetch has finished
    pub fn poll(&mut self) -> Option<RepoEvent> {
        let rx = self.job.as_ref()?;
        match rx.try_recv() {
            Ok(event) => {
                self.job = None;
                Some(event)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.job = None;
                Some(RepoEvent::Failed("Failed to load repositories.".to_string()))
            }
        }
    }
}

fn fetch_repos(username: &str, per_page: u8, token: &str) -> Result<Vec<Repo>, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent("folio-tui")
        .build()
        .map_err(|e| format!("Failed to load repositories: {}", e))?;

    let url = format!("https://api.github.com/users/{}/repos", username);
    let mut request = client
        .get(&url)
        .query(&[("sort", "pushed"), ("per_page", &per_page.to_string())])
        .header("Accept", "application/vnd.github.v3+json");
    if !token.is_empty() {
        request = request.header("Authorization", format!("token {}", token));
    }

    let response = request
        .send()
        .map_err(|e| format!("Failed to load repositories: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        let api_message = response.json::<ApiError>().ok().map(|e| e.message);
        return Err(error_message(status.as_u16(), api_message.as_deref(), username));
    }

    response
        .json::<Vec<Repo>>()
        .map_err(|e| format!("Failed to load repositories: {}", e))
}

/// User-facing message for a non-success API response
fn error_message(status: u16, api_message: Option<&str>, username: &str) -> String {
    if status == 404 {
        format!(
            "GitHub user \"{}\" not found (404). Check the username.",
            username
        )
    } else {
        let detail = api_message
            .map(str::to_string)
            .unwrap_or_else(|| format!("GitHub API error {}", status));
        format!("Failed to load repositories: {}", detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_user() {
        let msg = error_message(404, Some("Not Found"), "jordan");
        assert_eq!(msg, "GitHub user \"jordan\" not found (404). Check the username.");
    }

    #[test]
    fn test_api_message_is_surfaced() {
        let msg = error_message(403, Some("API rate limit exceeded"), "jordan");
        assert_eq!(msg, "Failed to load repositories: API rate limit exceeded");
    }

    #[test]
    fn test_missing_api_message_falls_back_to_status() {
        let msg = error_message(500, None, "jordan");
        assert_eq!(msg, "Failed to load repositories: GitHub API error 500");
    }

    #[test]
    fn test_poll_without_job_is_none() {
        let mut fetcher = RepoFetcher::new();
        assert!(fetcher.poll().is_none());
        assert!(!fetcher.in_flight());
    }

    #[test]
    fn test_dead_job_reports_generic_failure() {
        let mut fetcher = RepoFetcher::new();
        let (tx, rx) = mpsc::channel::<RepoEvent>();
        fetcher.job = Some(rx);
        drop(tx);

        match fetcher.poll() {
            Some(RepoEvent::Failed(msg)) => assert_eq!(msg, "Failed to load repositories."),
            other => panic!("unexpected poll result: {:?}", other),
        }
        assert!(!fetcher.in_flight());
    }
}
