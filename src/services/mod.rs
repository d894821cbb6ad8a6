//! External service interactions
//!
//! This module contains services for the two remote APIs and the inquiry
//! submission path. Each service spawns its request on a background thread
//! and reports back through an mpsc channel polled on Tick:
//! - Email relay probing and sending
//! - GitHub repositories fetch
//! - Inquiry submission (real endpoint or local simulation)

pub mod github;
pub mod inquiry;
pub mod relay;

pub use github::{RepoEvent, RepoFetcher};
pub use inquiry::{InquiryOutcome, InquirySubmitter};
pub use relay::{RelayEvent, RelayMailer, RelaySend};
