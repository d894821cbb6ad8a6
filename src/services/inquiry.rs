//! Inquiry submission
//!
//! Submits the collected wizard payload. With an endpoint configured this is
//! a single POST; without one the submission is simulated locally with a
//! randomized delay and a fixed success rate, and the outcome carries a
//! `simulated` flag so the two paths are never confused.

use rand::Rng;
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Simulated submissions succeed with this probability
pub const SIMULATED_SUCCESS_RATE: f64 = 0.92;

pub const MSG_SENT: &str = "Inquiry submitted. Thank you!";
pub const MSG_SENT_SERVER: &str = "Inquiry submitted to server. Thank you!";
pub const MSG_FAILED: &str = "Failed to submit inquiry. Please try again.";
pub const MSG_FAILED_SERVER: &str = "Server submission failed. Your inquiry is saved locally.";

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryOutcome {
    pub ok: bool,
    /// Demo-mode fabricated result rather than a server response
    pub simulated: bool,
    pub message: String,
}

/// Inquiry submission service
pub struct InquirySubmitter {
    job: Option<Receiver<InquiryOutcome>>,
}

impl Default for InquirySubmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl InquirySubmitter {
    pub fn new() -> Self {
        Self { job: None }
    }

    pub fn in_flight(&self) -> bool {
        self.job.is_some()
    }

    /// Submit the payload; a second call while one is in flight is ignored
    pub fn submit(&mut self, endpoint: String, payload: BTreeMap<String, String>) {
        if self.job.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = if endpoint.starts_with("http") {
                submit_to_endpoint(&endpoint, &payload)
            } else {
                simulate_submission()
            };
            let _ = tx.send(outcome);
        });

        self.job = Some(rx);
    }

    /// Take the outcome if the submission has finished
    pub fn poll(&mut self) -> Option<InquiryOutcome> {
        let rx = self.job.as_ref()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.job = None;
                Some(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.job = None;
                Some(InquiryOutcome {
                    ok: false,
                    simulated: false,
                    message: MSG_FAILED.to_string(),
                })
            }
        }
    }
}

fn submit_to_endpoint(endpoint: &str, payload: &BTreeMap<String, String>) -> InquiryOutcome {
    let ok = post_inquiry(endpoint, payload).is_ok();
    InquiryOutcome {
        ok,
        simulated: false,
        message: if ok { MSG_SENT_SERVER } else { MSG_FAILED_SERVER }.to_string(),
    }
}

fn post_inquiry(endpoint: &str, payload: &BTreeMap<String, String>) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(SUBMIT_TIMEOUT)
        .build()?;

    let response = client.post(endpoint).json(payload).send()?;
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("endpoint returned {}", status);
    }
    Ok(())
}

/// Demo-mode submission: sleep for a bounded random interval, then draw the
/// outcome
fn simulate_submission() -> InquiryOutcome {
    let mut rng = rand::rng();
    let delay = rng.random_range(900..=1800);
    thread::sleep(Duration::from_millis(delay));

    let ok = draw_simulated_outcome(&mut rng);
    InquiryOutcome {
        ok,
        simulated: true,
        message: if ok { MSG_SENT } else { MSG_FAILED }.to_string(),
    }
}

/// A single simulated success/failure draw
pub fn draw_simulated_outcome(rng: &mut impl Rng) -> bool {
    rng.random::<f64>() < SIMULATED_SUCCESS_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_simulated_success_rate_converges() {
        let mut rng = StdRng::seed_from_u64(20240311);
        let trials = 1000;
        let successes = (0..trials)
            .filter(|_| draw_simulated_outcome(&mut rng))
            .count();

        let rate = successes as f64 / trials as f64;
        assert!((rate - SIMULATED_SUCCESS_RATE).abs() < 0.03, "rate was {}", rate);
    }

    #[test]
    fn test_server_outcomes_are_not_flagged_simulated() {
        let rejected = submit_to_endpoint("http://127.0.0.1:1", &BTreeMap::new());
        assert!(!rejected.ok);
        assert!(!rejected.simulated);
        assert_eq!(rejected.message, MSG_FAILED_SERVER);
    }

    #[test]
    fn test_dead_job_reports_failure_once() {
        let mut submitter = InquirySubmitter::new();
        let (tx, rx) = mpsc::channel::<InquiryOutcome>();
        submitter.job = Some(rx);
        drop(tx);

        let outcome = submitter.poll().expect("outcome");
        assert!(!outcome.ok);
        assert!(submitter.poll().is_none());
    }
}
