//! Domain state - business/data state separate from UI concerns
//!
//! Everything the portfolio shows lives here: the profile content, the
//! contact form, the inquiry wizard, the fetched repositories, and any
//! inquiries kept on disk after a failed server submission.

use crate::model::contact::ContactForm;
use crate::model::inquiry::Wizard;
use crate::model::profile::Profile;
use crate::model::record::{InquiryLog, InquiryRecord};
use crate::model::repo::ReposState;

/// Domain state containing all business data
pub struct DomainState {
    /// Portfolio content (about, skills, projects)
    pub profile: Profile,

    /// GitHub repositories panel lifecycle
    pub repos: ReposState,

    /// Contact form values and send pipeline state
    pub contact: ContactForm,

    /// Multi-step project inquiry form
    pub wizard: Wizard,

    /// Inquiries saved locally after the server rejected them
    pub inquiries: Vec<InquiryRecord>,
}

impl Default for DomainState {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainState {
    /// Create a new domain state, reading profile and saved inquiries from disk
    pub fn new() -> Self {
        Self {
            profile: Profile::load(),
            repos: ReposState::Unconfigured,
            contact: ContactForm::new(),
            wizard: Wizard::new(),
            inquiries: InquiryLog::load(),
        }
    }
}
