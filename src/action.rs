//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling & Section Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll content up one line
    ScrollUp,
    /// Scroll content down one line
    ScrollDown,
    /// Scroll content up one page
    PageUp,
    /// Scroll content down one page
    PageDown,
    /// Jump to the top of the page
    JumpTop,
    /// Jump to the bottom of the page
    JumpBottom,
    /// Jump to the next section
    NextSection,
    /// Jump to the previous section
    PrevSection,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the project inquiry wizard
    OpenInquiry,
    /// Open the screenshot preview for a project
    OpenScreenshot(usize),
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Repositories
    // ─────────────────────────────────────────────────────────────────────────
    /// Fetch (or refetch) the GitHub repositories
    RefreshRepos,

    // ─────────────────────────────────────────────────────────────────────────
    // Contact Form
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter contact editing mode
    EnterContactMode,
    /// Leave contact editing mode
    ExitContactMode,
    /// Add character to the focused contact field
    ContactInput(char),
    /// Remove last character from the focused contact field
    ContactBackspace,
    /// Focus the next contact field
    ContactNextField,
    /// Focus the previous contact field
    ContactPrevField,
    /// Validate and send the contact message
    ContactSubmit,

    // ─────────────────────────────────────────────────────────────────────────
    // Inquiry Wizard
    // ─────────────────────────────────────────────────────────────────────────
    /// Add character to the focused wizard field
    WizardInput(char),
    /// Remove last character from the focused wizard field
    WizardBackspace,
    /// Toggle the focused checkbox
    WizardToggle,
    /// Focus the next field in the current step
    WizardFocusNext,
    /// Focus the previous field in the current step
    WizardFocusPrev,
    /// Advance to the next step (validates first)
    WizardNext,
    /// Go back one step (never validates)
    WizardPrev,
    /// Submit from the last step
    WizardSubmit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::JumpTop => write!(f, "JumpTop"),
            Action::JumpBottom => write!(f, "JumpBottom"),
            Action::NextSection => write!(f, "NextSection"),
            Action::PrevSection => write!(f, "PrevSection"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenInquiry => write!(f, "OpenInquiry"),
            Action::OpenScreenshot(idx) => write!(f, "OpenScreenshot({})", idx),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::RefreshRepos => write!(f, "RefreshRepos"),
            Action::EnterContactMode => write!(f, "EnterContactMode"),
            Action::ExitContactMode => write!(f, "ExitContactMode"),
            Action::ContactInput(c) => write!(f, "ContactInput('{}')", c),
            Action::ContactBackspace => write!(f, "ContactBackspace"),
            Action::ContactNextField => write!(f, "ContactNextField"),
            Action::ContactPrevField => write!(f, "ContactPrevField"),
            Action::ContactSubmit => write!(f, "ContactSubmit"),
            Action::WizardInput(c) => write!(f, "WizardInput('{}')", c),
            Action::WizardBackspace => write!(f, "WizardBackspace"),
            Action::WizardToggle => write!(f, "WizardToggle"),
            Action::WizardFocusNext => write!(f, "WizardFocusNext"),
            Action::WizardFocusPrev => write!(f, "WizardFocusPrev"),
            Action::WizardNext => write!(f, "WizardNext"),
            Action::WizardPrev => write!(f, "WizardPrev"),
            Action::WizardSubmit => write!(f, "WizardSubmit"),
        }
    }
}
