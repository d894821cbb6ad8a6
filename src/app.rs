//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App is intentionally lean - it coordinates between components but
//! does not contain business logic itself.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, HelpDialog, HomeComponent, HomeRenderContext, InquiryDialog, QuitDialog,
    ScreenshotDialog, SplashComponent,
};
use crate::components::inquiry_dialog::MSG_SUBMITTING;
use crate::config::Config;
use crate::model::contact::{ContactPhase, MSG_INCOMPLETE};
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::record::{InquiryLog, InquiryRecord};
use crate::model::repo::ReposState;
use crate::model::ui::{AppMode, StatusLine};
use crate::services::{
    InquirySubmitter, RelayEvent, RelayMailer, RelaySend, RepoEvent, RepoFetcher,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::{Duration, Instant};

/// How long the success message stays up before the wizard resets and the
/// modal closes
const WIZARD_RESET_DELAY: Duration = Duration::from_millis(1400);

pub const MSG_RELAY_UNCONFIGURED: &str =
    "Email relay not configured. Set the relay IDs in ~/.folio-tui/config.json.";
pub const MSG_RELAY_UNAVAILABLE: &str = "Email service unavailable. Try again later.";
pub const MSG_PREPARING: &str = "Preparing to send...";
pub const MSG_SENDING: &str = "Sending...";
pub const MSG_SENT: &str = "Message sent — thank you!";
pub const MSG_SEND_FAILED: &str = "Failed to send. Please try again later.";

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Process-wide configuration
    pub config: Config,

    /// Email relay service
    pub relay: RelayMailer,

    /// GitHub repositories fetch service
    pub repo_fetcher: RepoFetcher,

    /// Inquiry submission service
    pub inquiry_submitter: InquirySubmitter,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub home: HomeComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub screenshot_dialog: ScreenshotDialog,
    pub inquiry_dialog: InquiryDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> App {
        let config = Config::load().unwrap_or_default();

        App {
            mode: AppMode::Splash,
            domain: DomainState::new(),
            modals: ModalStack::new(),
            config,
            relay: RelayMailer::new(),
            repo_fetcher: RepoFetcher::new(),
            inquiry_submitter: InquirySubmitter::new(),
            should_quit: false,
            splash: SplashComponent::new(),
            home: HomeComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            screenshot_dialog: ScreenshotDialog,
            inquiry_dialog: InquiryDialog::default(),
        }
    }

    /// Start (or restart) the repositories fetch
    fn refresh_repos(&mut self) {
        if self.config.github_username.is_empty() {
            self.domain.repos = ReposState::Unconfigured;
            return;
        }
        if self.repo_fetcher.in_flight() {
            return;
        }
        self.domain.repos = ReposState::Loading;
        self.repo_fetcher.fetch(
            self.config.github_username.clone(),
            self.config.github_per_page,
            self.config.github_token.clone(),
        );
    }

    /// Validate the contact form and start the send pipeline
    fn submit_contact(&mut self) {
        let contact = &mut self.domain.contact;
        if contact.phase != ContactPhase::Idle {
            return;
        }

        if !contact.validate() {
            contact.status = Some(StatusLine::error(MSG_INCOMPLETE));
            return;
        }

        contact.status = Some(StatusLine::info(MSG_PREPARING));

        if !self.config.relay_configured() {
            contact.status = Some(StatusLine::error(MSG_RELAY_UNCONFIGURED));
            return;
        }

        contact.phase = ContactPhase::Preparing;
        let send = RelaySend {
            user_id: self.config.relay_user_id.clone(),
            service_id: self.config.relay_service_id.clone(),
            template_id: self.config.relay_template_id.clone(),
            params: contact.template_params(),
        };
        self.relay.send(self.config.load_plan(), send);
    }

    /// Apply relay progress to the contact form
    fn process_relay_events(&mut self) {
        for event in self.relay.poll() {
            let contact = &mut self.domain.contact;
            match event {
                RelayEvent::Attempt(_) => {}
                RelayEvent::Ready { .. } => {
                    contact.phase = ContactPhase::Sending;
                    contact.status = Some(StatusLine::info(MSG_SENDING));
                }
                RelayEvent::Unavailable(_) => {
                    contact.phase = ContactPhase::Idle;
                    contact.status = Some(StatusLine::error(MSG_RELAY_UNAVAILABLE));
                }
                RelayEvent::Sent => {
                    contact.phase = ContactPhase::Idle;
                    contact.status = Some(StatusLine::success(MSG_SENT));
                    contact.reset_fields();
                }
                RelayEvent::SendFailed(_) => {
                    contact.phase = ContactPhase::Idle;
                    contact.status = Some(StatusLine::error(MSG_SEND_FAILED));
                }
            }
        }
    }

    /// Apply the inquiry submission outcome when it arrives
    fn process_inquiry_outcome(&mut self) {
        let Some(outcome) = self.inquiry_submitter.poll() else {
            return;
        };

        if outcome.ok {
            // Controls stay locked until the reset deadline fires
            self.inquiry_dialog.status = Some(StatusLine::success(outcome.message.clone()));
            self.inquiry_dialog.reset_deadline = Some(Instant::now() + WIZARD_RESET_DELAY);
        } else {
            self.domain.wizard.submit_failed();
            self.inquiry_dialog.status = Some(StatusLine::error(outcome.message.clone()));
            if !outcome.simulated {
                // The server turned it down; keep what the visitor typed
                let record = InquiryRecord::new(self.domain.wizard.payload());
                self.domain.inquiries.push(record);
                let _ = InquiryLog::save(&self.domain.inquiries);
            }
        }
    }

    /// Reset the wizard and close the modal once the success display elapses
    fn process_wizard_reset(&mut self) {
        let Some(deadline) = self.inquiry_dialog.reset_deadline else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.domain.wizard.reset();
        self.inquiry_dialog.reset();
        if self.modals.top() == Some(&Modal::Inquiry) {
            self.modals.pop();
        }
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        self.refresh_repos();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else if self.home.contact_mode {
                    self.handle_contact_key_event(key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash && self.splash.is_complete() {
                    return Ok(Some(Action::SplashComplete));
                }
                self.process_relay_events();
                if let Some(event) = self.repo_fetcher.poll() {
                    self.domain.repos = match event {
                        RepoEvent::Loaded(repos) => ReposState::Ready(repos),
                        RepoEvent::Failed(message) => ReposState::Failed(message),
                    };
                }
                self.process_inquiry_outcome();
                self.process_wizard_reset();
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Scrolling & Section Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollDown => self.home.scroll_down(1),
            Action::ScrollUp => self.home.scroll_up(1),
            Action::PageDown => self.home.page_down(),
            Action::PageUp => self.home.page_up(),
            Action::JumpTop => self.home.jump_top(),
            Action::JumpBottom => self.home.jump_bottom(),
            Action::NextSection => self.home.next_section(),
            Action::PrevSection => self.home.prev_section(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenInquiry => {
                self.domain.wizard.reset();
                self.inquiry_dialog.reset();
                self.modals.push(Modal::Inquiry);
            }
            Action::OpenScreenshot(index) => {
                if index < self.domain.profile.projects.len() {
                    self.modals.push(Modal::Screenshot {
                        project_index: index,
                    });
                }
            }
            Action::CloseModal => {
                if self.modals.top() == Some(&Modal::Inquiry) {
                    // No teardown mid-submission; the outcome handler unlocks
                    if self.domain.wizard.is_submitting() {
                        return Ok(None);
                    }
                    self.domain.wizard.reset();
                    self.inquiry_dialog.reset();
                }
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Repositories
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshRepos => {
                self.refresh_repos();
            }

            // ─────────────────────────────────────────────────────────────────
            // Contact Form
            // ─────────────────────────────────────────────────────────────────
            Action::EnterContactMode => self.home.enter_contact_mode(),
            Action::ExitContactMode => self.home.exit_contact_mode(),
            Action::ContactInput(c) => self.domain.contact.input(c),
            Action::ContactBackspace => self.domain.contact.backspace(),
            Action::ContactNextField => self.domain.contact.focus_next(),
            Action::ContactPrevField => self.domain.contact.focus_prev(),
            Action::ContactSubmit => self.submit_contact(),

            // ─────────────────────────────────────────────────────────────────
            // Inquiry Wizard
            // ─────────────────────────────────────────────────────────────────
            Action::WizardInput(c) => {
                if let Some(field) = self.domain.wizard.focused_field_mut() {
                    field.input(c);
                    self.inquiry_dialog.status = None;
                }
            }
            Action::WizardBackspace => {
                if let Some(field) = self.domain.wizard.focused_field_mut() {
                    field.backspace();
                    self.inquiry_dialog.status = None;
                }
            }
            Action::WizardToggle => {
                if let Some(field) = self.domain.wizard.focused_field_mut() {
                    field.toggle();
                    self.inquiry_dialog.status = None;
                }
            }
            Action::WizardFocusNext => self.domain.wizard.focus_next(),
            Action::WizardFocusPrev => self.domain.wizard.focus_prev(),
            Action::WizardNext => {
                self.domain.wizard.next();
            }
            Action::WizardPrev => {
                self.domain.wizard.prev();
            }
            Action::WizardSubmit => {
                if self.domain.wizard.begin_submit() {
                    self.inquiry_dialog.status = Some(StatusLine::info(MSG_SUBMITTING));
                    self.inquiry_submitter.submit(
                        self.config.inquiry_endpoint.clone(),
                        self.domain.wizard.payload(),
                    );
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let ctx = HomeRenderContext {
                    profile: &self.domain.profile,
                    repos: &self.domain.repos,
                    contact: &self.domain.contact,
                };
                draw_home_screen(frame, area, &mut self.home, &ctx)?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Screenshot { .. } => self.screenshot_dialog.handle_key_event(key),
            Modal::Inquiry => self.inquiry_dialog.handle_key(key, &self.domain.wizard),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_contact_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::ExitContactMode),
            KeyCode::Tab => Some(Action::ContactNextField),
            KeyCode::BackTab => Some(Action::ContactPrevField),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ContactSubmit)
            }
            KeyCode::Enter => {
                if self.domain.contact.focus.is_multiline() {
                    Some(Action::ContactInput('\n'))
                } else {
                    Some(Action::ContactNextField)
                }
            }
            KeyCode::Backspace => Some(Action::ContactBackspace),
            KeyCode::Char(c) => Some(Action::ContactInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Screenshot { project_index } => {
                if let Some(project) = self.domain.profile.projects.get(*project_index) {
                    self.screenshot_dialog.draw_with_project(frame, area, project)?;
                }
            }
            Modal::Inquiry => {
                self.inquiry_dialog
                    .draw_with_wizard(frame, area, &self.domain.wizard)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ui::StatusKind;

    fn running_app() -> App {
        let mut app = App::new();
        app.mode = AppMode::Running;
        // Tests must not depend on whatever config the machine has
        app.config = Config::default();
        app.domain.profile = crate::model::profile::Profile::sample();
        app
    }

    #[test]
    fn test_contact_submit_blocks_on_validation() {
        let mut app = running_app();
        app.update(Action::ContactSubmit).unwrap();

        let status = app.domain.contact.status.as_ref().expect("status");
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, MSG_INCOMPLETE);
        assert!(!app.relay.in_flight());
    }

    #[test]
    fn test_contact_submit_requires_relay_ids() {
        let mut app = running_app();
        app.domain.contact.name = "Jo".into();
        app.domain.contact.email = "jo@example.com".into();
        app.domain.contact.message = "hello".into();

        app.update(Action::ContactSubmit).unwrap();

        let status = app.domain.contact.status.as_ref().expect("status");
        assert_eq!(status.text, MSG_RELAY_UNCONFIGURED);
        assert_eq!(app.domain.contact.phase, ContactPhase::Idle);
        assert!(!app.relay.in_flight());
    }

    #[test]
    fn test_inquiry_modal_stays_open_while_submitting() {
        let mut app = running_app();
        app.update(Action::OpenInquiry).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Inquiry));

        // Drive the wizard to a submittable state without spawning the job
        app.domain.wizard.current_step_mut().fields[0].value = "Jo".into();
        app.domain.wizard.next();
        app.domain.wizard.current_step_mut().fields[0].value = "jo@example.com".into();
        app.domain.wizard.next();
        app.domain.wizard.current_step_mut().fields[5].value = "details".into();
        assert!(app.domain.wizard.begin_submit());

        app.update(Action::CloseModal).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Inquiry));

        app.domain.wizard.submit_failed();
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(app.domain.wizard.current_index(), 0);
    }

    #[test]
    fn test_screenshot_requires_existing_project() {
        let mut app = running_app();
        let count = app.domain.profile.projects.len();

        app.update(Action::OpenScreenshot(count)).unwrap();
        assert!(app.modals.is_empty());

        app.update(Action::OpenScreenshot(0)).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Screenshot { project_index: 0 }));
    }

    #[test]
    fn test_wizard_reset_fires_after_deadline() {
        let mut app = running_app();
        app.update(Action::OpenInquiry).unwrap();
        app.inquiry_dialog.status = Some(StatusLine::success("Inquiry submitted. Thank you!"));
        app.inquiry_dialog.reset_deadline = Some(Instant::now() - Duration::from_millis(1));

        app.update(Action::Tick).unwrap();
        assert!(app.modals.is_empty());
        assert!(app.inquiry_dialog.status.is_none());
        assert_eq!(app.domain.wizard.current_index(), 0);
    }
}
