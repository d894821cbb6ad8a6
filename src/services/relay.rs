//! Email relay service
//!
//! Brings the relay online and sends contact messages through it. Reaching
//! the relay is a retry-then-fallback loop over the configured endpoint list
//! (`LoadPlan`); the send itself is a single POST against whichever endpoint
//! answered. Everything runs on a spawned thread that reports back through an
//! mpsc channel, drained on Tick.

use crate::model::loader::{LoadAttempt, LoadError, LoadPlan, LoadStep};
use std::collections::BTreeMap;
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Address used for the cheap connectivity check
const CONNECTIVITY_PROBE: &str = "1.1.1.1:53";

const PROBE_TIMEOUT: Duration = Duration::from_secs(4);
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Progress and outcome messages from a relay job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// A probe is about to hit a candidate endpoint
    Attempt(LoadAttempt),
    /// An endpoint answered; the send is about to go out
    Ready { endpoint: String },
    /// No endpoint could be reached
    Unavailable(LoadError),
    /// The message was accepted by the relay
    Sent,
    /// The relay rejected the message or the request failed
    SendFailed(String),
}

/// One outgoing message plus the relay identifiers
#[derive(Debug, Clone)]
pub struct RelaySend {
    pub user_id: String,
    pub service_id: String,
    pub template_id: String,
    pub params: BTreeMap<String, String>,
}

/// Relay service: owns the cached endpoint and the in-flight job
pub struct RelayMailer {
    /// Endpoint that answered a previous probe; skips the load loop
    endpoint: Option<String>,
    /// Every probe made this session, newest last
    pub attempts: Vec<LoadAttempt>,
    job: Option<Receiver<RelayEvent>>,
}

impl Default for RelayMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayMailer {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            attempts: Vec::new(),
            job: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn in_flight(&self) -> bool {
        self.job.is_some()
    }

    /// Ensure the relay is reachable, then send.
    ///
    /// If an endpoint is already known the load loop is skipped and the job
    /// goes straight to the send. At most one job runs at a time; a second
    /// call while one is in flight is ignored.
    pub fn send(&mut self, plan: LoadPlan, send: RelaySend) {
        if self.job.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        let known = self.endpoint.clone();

        thread::spawn(move || {
            run_send(known, &plan, &send, &tx);
        });

        self.job = Some(rx);
    }

    /// Drain pending events, caching the endpoint and clearing the job on a
    /// terminal event
    pub fn poll(&mut self) -> Vec<RelayEvent> {
        let Some(ref rx) = self.job else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let mut done = false;

        loop {
            match rx.try_recv() {
                Ok(event) => {
                    match &event {
                        RelayEvent::Attempt(attempt) => self.attempts.push(*attempt),
                        RelayEvent::Ready { endpoint } => self.endpoint = Some(endpoint.clone()),
                        RelayEvent::Unavailable(_)
                        | RelayEvent::Sent
                        | RelayEvent::SendFailed(_) => done = true,
                    }
                    events.push(event);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Thread died without a terminal event
                    if !done {
                        events.push(RelayEvent::SendFailed("relay job ended early".to_string()));
                        done = true;
                    }
                    break;
                }
            }
        }

        if done {
            self.job = None;
        }
        events
    }
}

fn run_send(known: Option<String>, plan: &LoadPlan, send: &RelaySend, tx: &Sender<RelayEvent>) {
    if !network_reachable() {
        let _ = tx.send(RelayEvent::Unavailable(LoadError::Offline));
        return;
    }

    let endpoint = match known {
        Some(endpoint) => endpoint,
        None => {
            let result = probe_sources(
                plan,
                |url| http_probe(url),
                |delay| thread::sleep(delay),
                |attempt| {
                    let _ = tx.send(RelayEvent::Attempt(*attempt));
                },
            );
            match result {
                Ok(endpoint) => endpoint,
                Err(err) => {
                    let _ = tx.send(RelayEvent::Unavailable(err));
                    return;
                }
            }
        }
    };

    let _ = tx.send(RelayEvent::Ready {
        endpoint: endpoint.clone(),
    });

    match post_send(&endpoint, send) {
        Ok(()) => {
            let _ = tx.send(RelayEvent::Sent);
        }
        Err(e) => {
            let _ = tx.send(RelayEvent::SendFailed(e.to_string()));
        }
    }
}

/// Drive the retry-then-fallback loop until an endpoint answers or the plan
/// is exhausted.
///
/// One probe is in flight at a time; retries are strictly sequential. The
/// single return is the only completion, so a caller cannot observe both a
/// success and a later failure for the same request.
pub fn probe_sources<P, S, A>(
    plan: &LoadPlan,
    mut probe: P,
    mut sleep: S,
    mut on_attempt: A,
) -> Result<String, LoadError>
where
    P: FnMut(&str) -> bool,
    S: FnMut(Duration),
    A: FnMut(&LoadAttempt),
{
    let mut attempt = plan.first_attempt();

    loop {
        let Some(source) = plan.current_source(&attempt) else {
            return Err(LoadError::Exhausted);
        };
        let source = source.to_string();

        on_attempt(&attempt);
        if probe(&source) {
            return Ok(source);
        }

        match plan.after_failure(&mut attempt) {
            LoadStep::Retry { delay } | LoadStep::Fallback { delay } => sleep(delay),
            LoadStep::GiveUp => return Err(LoadError::Exhausted),
        }
    }
}

/// Quick connectivity hint, the `navigator.onLine` equivalent
fn network_reachable() -> bool {
    match CONNECTIVITY_PROBE.parse() {
        Ok(addr) => TcpStream::connect_timeout(&addr, Duration::from_millis(800)).is_ok(),
        Err(_) => true,
    }
}

/// An endpoint counts as reachable when it answers at all; any HTTP status
/// means a server is there, only transport errors fail the probe
fn http_probe(url: &str) -> bool {
    let client = match reqwest::blocking::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
    {
        Ok(c) => c,
        Err(_) => return false,
    };
    client.get(url).send().is_ok()
}

fn post_send(endpoint: &str, send: &RelaySend) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(SEND_TIMEOUT)
        .build()?;

    let body = serde_json::json!({
        "user_id": send.user_id,
        "service_id": send.service_id,
        "template_id": send.template_id,
        "template_params": send.params,
    });

    let response = client
        .post(format!("{}/api/v1.0/email/send", endpoint.trim_end_matches('/')))
        .json(&body)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("relay returned {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(sources: &[&str], max_retries: u32) -> LoadPlan {
        LoadPlan {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            max_retries,
            backoff_base: Duration::from_millis(700),
            fallback_delay: Duration::from_millis(200),
        }
    }

    #[test]
    fn test_all_sources_failing_probes_exactly_k_times_r_plus_one() {
        let plan = plan(&["a", "b"], 2);
        let mut probes = 0;

        let result = probe_sources(&plan, |_| {
            probes += 1;
            false
        }, |_| {}, |_| {});

        assert_eq!(result, Err(LoadError::Exhausted));
        assert_eq!(probes, plan.max_attempts());
        assert_eq!(probes, 6);
    }

    #[test]
    fn test_backoff_then_fallback_delay_sequence() {
        let plan = plan(&["a", "b"], 2);
        let mut delays = Vec::new();

        let _ = probe_sources(&plan, |_| false, |d| delays.push(d.as_millis()), |_| {});

        // Two linear backoffs per source, one fixed delay between sources,
        // no sleep after the terminal failure.
        assert_eq!(delays, vec![700, 1400, 200, 700, 1400]);
    }

    #[test]
    fn test_success_stops_probing_immediately() {
        let plan = plan(&["a", "b", "c"], 2);
        let mut probes = Vec::new();

        let result = probe_sources(
            &plan,
            |url| {
                probes.push(url.to_string());
                url == "b"
            },
            |_| {},
            |_| {},
        );

        assert_eq!(result, Ok("b".to_string()));
        // Source a burns its full budget, b answers on the first try
        assert_eq!(probes, vec!["a", "a", "a", "b"]);
    }

    #[test]
    fn test_attempt_log_tracks_source_and_retry() {
        let plan = plan(&["a", "b"], 1);
        let mut log = Vec::new();

        let _ = probe_sources(&plan, |_| false, |_| {}, |a| log.push(*a));

        let pairs: Vec<(usize, u32)> = log.iter().map(|a| (a.source_index, a.retry_count)).collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_empty_source_list_is_exhausted_without_probing() {
        let plan = plan(&[], 2);
        let mut probes = 0;

        let result = probe_sources(&plan, |_| {
            probes += 1;
            true
        }, |_| {}, |_| {});

        assert_eq!(result, Err(LoadError::Exhausted));
        assert_eq!(probes, 0);
    }

    #[test]
    fn test_poll_caches_endpoint_and_clears_job_on_terminal_event() {
        let mut mailer = RelayMailer::new();
        let (tx, rx) = mpsc::channel();
        mailer.job = Some(rx);

        tx.send(RelayEvent::Attempt(LoadAttempt {
            source_index: 0,
            retry_count: 0,
        }))
        .unwrap();
        tx.send(RelayEvent::Ready {
            endpoint: "https://relay.example".to_string(),
        })
        .unwrap();
        tx.send(RelayEvent::Sent).unwrap();

        let events = mailer.poll();
        assert_eq!(events.len(), 3);
        assert!(mailer.is_ready());
        assert!(!mailer.in_flight());
        assert_eq!(mailer.attempts.len(), 1);

        // A later poll yields nothing; the completion was delivered once
        assert!(mailer.poll().is_empty());
    }

    #[test]
    fn test_poll_reports_dead_job_as_send_failure() {
        let mut mailer = RelayMailer::new();
        let (tx, rx) = mpsc::channel::<RelayEvent>();
        mailer.job = Some(rx);
        drop(tx);

        let events = mailer.poll();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RelayEvent::SendFailed(_)));
        assert!(!mailer.in_flight());
    }

    #[test]
    fn test_second_send_while_in_flight_is_ignored() {
        let mut mailer = RelayMailer::new();
        let (_tx, rx) = mpsc::channel();
        mailer.job = Some(rx);

        mailer.send(
            plan(&["a"], 0),
            RelaySend {
                user_id: "u".to_string(),
                service_id: "s".to_string(),
                template_id: "t".to_string(),
                params: BTreeMap::new(),
            },
        );

        // Still the original receiver; no new thread took its place
        assert!(mailer.in_flight());
    }
}
