//! Relay load planning
//!
//! The email relay is reached through an ordered list of candidate endpoints.
//! Bringing it online is a retry-then-fallback loop: retry the active source
//! with linear backoff until its retry budget is spent, then move to the next
//! source. This module holds the plan and the pure transition logic; the
//! probing itself lives in `services::relay`.

use std::fmt;
use std::time::Duration;

/// Ordered candidate endpoints plus the retry policy.
///
/// Fixed at configuration time; never mutated while a load is in flight.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    /// Candidate endpoints, tried in order
    pub sources: Vec<String>,
    /// Retries allowed per source beyond the initial attempt
    pub max_retries: u32,
    /// Base delay for same-source retries, scaled linearly per attempt
    pub backoff_base: Duration,
    /// Fixed delay before moving to the next source
    pub fallback_delay: Duration,
}

/// Tracks the active source and how many retries were made against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadAttempt {
    pub source_index: usize,
    pub retry_count: u32,
}

/// What to do after a failed probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    /// Probe the same source again after a backoff delay
    Retry { delay: Duration },
    /// Move to the next source after a short fixed delay
    Fallback { delay: Duration },
    /// Every source and retry is spent
    GiveUp,
}

/// Terminal load failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// No network connectivity; no source was attempted
    Offline,
    /// All sources and retries failed
    Exhausted,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Offline => write!(f, "network unavailable"),
            LoadError::Exhausted => write!(f, "all relay endpoints failed"),
        }
    }
}

impl LoadPlan {
    pub fn first_attempt(&self) -> LoadAttempt {
        LoadAttempt {
            source_index: 0,
            retry_count: 0,
        }
    }

    /// The endpoint the attempt currently points at
    pub fn current_source<'a>(&'a self, attempt: &LoadAttempt) -> Option<&'a str> {
        self.sources.get(attempt.source_index).map(|s| s.as_str())
    }

    /// Advance the attempt past a failure and say what comes next.
    ///
    /// Same-source retries are delayed by `backoff_base * (attempt + 1)`;
    /// moving to the next source resets the retry count and uses the fixed
    /// fallback delay.
    pub fn after_failure(&self, attempt: &mut LoadAttempt) -> LoadStep {
        if attempt.retry_count < self.max_retries {
            attempt.retry_count += 1;
            LoadStep::Retry {
                delay: self.backoff_base * attempt.retry_count,
            }
        } else if attempt.source_index + 1 < self.sources.len() {
            attempt.source_index += 1;
            attempt.retry_count = 0;
            LoadStep::Fallback {
                delay: self.fallback_delay,
            }
        } else {
            LoadStep::GiveUp
        }
    }

    /// Worst-case number of probes before giving up
    pub fn max_attempts(&self) -> usize {
        self.sources.len() * (self.max_retries as usize + 1)
    }
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
    fn test_retry_backoff_is_linear() {
        let plan = plan(&["a"], 2);
        let mut attempt = plan.first_attempt();

        assert_eq!(
            plan.after_failure(&mut attempt),
            LoadStep::Retry {
                delay: Duration::from_millis(700)
            }
        );
        assert_eq!(
            plan.after_failure(&mut attempt),
            LoadStep::Retry {
                delay: Duration::from_millis(1400)
            }
        );
        assert_eq!(plan.after_failure(&mut attempt), LoadStep::GiveUp);
    }

    #[test]
    fn test_fallback_resets_retry_count() {
        // Source A fails 3 times (1 initial + 2 retries), then B takes over
        // with a fresh retry budget.
        let plan = plan(&["a", "b"], 2);
        let mut attempt = plan.first_attempt();

        assert!(matches!(
            plan.after_failure(&mut attempt),
            LoadStep::Retry { .. }
        ));
        assert!(matches!(
            plan.after_failure(&mut attempt),
            LoadStep::Retry { .. }
        ));
        assert_eq!(
            plan.after_failure(&mut attempt),
            LoadStep::Fallback {
                delay: Duration::from_millis(200)
            }
        );
        assert_eq!(attempt.source_index, 1);
        assert_eq!(attempt.retry_count, 0);
        assert_eq!(plan.current_source(&attempt), Some("b"));
    }

    #[test]
    fn test_give_up_after_every_source_is_spent() {
        let plan = plan(&["a", "b"], 1);
        let mut attempt = plan.first_attempt();
        let mut failures = 0;

        loop {
            failures += 1;
            match plan.after_failure(&mut attempt) {
                LoadStep::GiveUp => break,
                _ => continue,
            }
        }

        // k sources * (r + 1) attempts in total
        assert_eq!(failures, plan.max_attempts());
        assert_eq!(plan.max_attempts(), 4);
    }

    #[test]
    fn test_empty_source_list_has_nothing_to_probe() {
        let plan = plan(&[], 2);
        let attempt = plan.first_attempt();
        assert_eq!(plan.current_source(&attempt), None);
        assert_eq!(plan.max_attempts(), 0);
    }
}
