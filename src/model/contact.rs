//! Contact form state
//!
//! A plain three-field form (name, email, message) with field-specific
//! validation messages and a status line that tracks the send pipeline:
//! validate, bring the relay online, send.

use crate::model::inquiry::is_valid_email;
use crate::model::ui::StatusLine;
use std::collections::BTreeMap;

pub const MSG_NAME: &str = "Please enter your full name.";
pub const MSG_EMAIL_MISSING: &str = "Please enter your email address.";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const MSG_MESSAGE: &str = "Please enter a short message.";
pub const MSG_INCOMPLETE: &str = "Please complete the required fields.";

/// Which contact field is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn all() -> [ContactField; 3] {
        [ContactField::Name, ContactField::Email, ContactField::Message]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, ContactField::Message)
    }
}

/// Where the send pipeline currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Idle,
    /// Bringing the relay online before sending
    Preparing,
    /// Relay ready, send request in flight
    Sending,
}

/// The contact form: values, per-field errors, focus and send phase
#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub errors: BTreeMap<&'static str, String>,
    pub focus: ContactField,
    pub status: Option<StatusLine>,
    pub phase: ContactPhase,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            errors: BTreeMap::new(),
            focus: ContactField::Name,
            status: None,
            phase: ContactPhase::Idle,
        }
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(field.label()).map(String::as_str)
    }

    fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    /// Append a character to the focused field; any edit clears that field's
    /// error, and the status line when no send is in flight
    pub fn input(&mut self, c: char) {
        let focus = self.focus;
        if c == '\n' && !focus.is_multiline() {
            return;
        }
        self.value_mut(focus).push(c);
        self.clear_feedback(focus);
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
        self.clear_feedback(focus);
    }

    fn clear_feedback(&mut self, field: ContactField) {
        self.errors.remove(field.label());
        if self.phase == ContactPhase::Idle {
            self.status = None;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            ContactField::Name => ContactField::Message,
            ContactField::Email => ContactField::Name,
            ContactField::Message => ContactField::Email,
        };
    }

    /// Validate all three fields, attaching field-specific messages.
    ///
    /// Moves focus to the first invalid field. Returns whether the form may
    /// be sent.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        let mut first_invalid = None;

        if self.name.trim().is_empty() {
            self.errors.insert(ContactField::Name.label(), MSG_NAME.to_string());
            first_invalid = first_invalid.or(Some(ContactField::Name));
        }
        let email = self.email.trim();
        if email.is_empty() {
            self.errors
                .insert(ContactField::Email.label(), MSG_EMAIL_MISSING.to_string());
            first_invalid = first_invalid.or(Some(ContactField::Email));
        } else if !is_valid_email(email) {
            self.errors
                .insert(ContactField::Email.label(), MSG_EMAIL_INVALID.to_string());
            first_invalid = first_invalid.or(Some(ContactField::Email));
        }
        if self.message.trim().is_empty() {
            self.errors
                .insert(ContactField::Message.label(), MSG_MESSAGE.to_string());
            first_invalid = first_invalid.or(Some(ContactField::Message));
        }

        match first_invalid {
            Some(field) => {
                self.focus = field;
                false
            }
            None => true,
        }
    }

    /// Parameters handed to the relay template
    pub fn template_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("from_name".to_string(), self.name.trim().to_string());
        params.insert("reply_to".to_string(), self.email.trim().to_string());
        params.insert("message".to_string(), self.message.trim().to_string());
        params
    }

    /// Clear the values after a successful send; status stays
    pub fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.errors.clear();
        self.focus = ContactField::Name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ui::StatusKind;

    #[test]
    fn test_validate_attaches_field_specific_messages() {
        let mut form = ContactForm::new();
        assert!(!form.validate());
        assert_eq!(form.error(ContactField::Name), Some(MSG_NAME));
        assert_eq!(form.error(ContactField::Email), Some(MSG_EMAIL_MISSING));
        assert_eq!(form.error(ContactField::Message), Some(MSG_MESSAGE));
        assert_eq!(form.focus, ContactField::Name);
    }

    #[test]
    fn test_malformed_email_gets_its_own_message() {
        let mut form = ContactForm::new();
        form.name = "Jo".into();
        form.email = "not-an-email".into();
        form.message = "hi".into();

        assert!(!form.validate());
        assert_eq!(form.error(ContactField::Email), Some(MSG_EMAIL_INVALID));
        assert_eq!(form.focus, ContactField::Email);
    }

    #[test]
    fn test_input_clears_error_and_idle_status() {
        let mut form = ContactForm::new();
        form.validate();
        form.status = Some(StatusLine::error(MSG_INCOMPLETE));

        form.input('J');
        assert!(form.error(ContactField::Name).is_none());
        assert!(form.status.is_none());
        // Other field errors are untouched
        assert!(form.error(ContactField::Email).is_some());
    }

    #[test]
    fn test_input_keeps_status_while_sending() {
        let mut form = ContactForm::new();
        form.phase = ContactPhase::Sending;
        form.status = Some(StatusLine::info("Sending..."));

        form.input('x');
        assert!(form.status.is_some());
        assert_eq!(form.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn test_newline_only_lands_in_message() {
        let mut form = ContactForm::new();
        form.input('\n');
        assert!(form.name.is_empty());

        form.focus = ContactField::Message;
        form.input('a');
        form.input('\n');
        form.input('b');
        assert_eq!(form.message, "a\nb");
    }

    #[test]
    fn test_template_params_trim_values() {
        let mut form = ContactForm::new();
        form.name = " Jo ".into();
        form.email = "jo@example.com".into();
        form.message = "hello\nthere ".into();

        let params = form.template_params();
        assert_eq!(params.get("from_name").map(String::as_str), Some("Jo"));
        assert_eq!(params.get("reply_to").map(String::as_str), Some("jo@example.com"));
        assert_eq!(params.get("message").map(String::as_str), Some("hello\nthere"));
    }

    #[test]
    fn test_reset_clears_values_but_not_status() {
        let mut form = ContactForm::new();
        form.name = "Jo".into();
        form.status = Some(StatusLine::success("Message sent — thank you!"));
        form.reset_fields();
        assert!(form.name.is_empty());
        assert!(form.status.is_some());
        assert_eq!(form.focus, ContactField::Name);
    }
}
