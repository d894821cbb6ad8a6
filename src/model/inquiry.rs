//! Multi-step inquiry form state
//!
//! A linear wizard over named steps of form fields. Advancing validates the
//! current step; going back never does. Submission is only reachable from the
//! last step and locks every control until the outcome arrives.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Rough email shape check, the native-validity equivalent
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Whether a value passes the email-format rule
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub const MSG_REQUIRED: &str = "Please fill out this field.";
pub const MSG_BAD_EMAIL: &str = "Please enter a valid email address.";

/// How a field is edited and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Multiline,
    Checkbox,
}

/// One form field plus its current value and validation state
#[derive(Debug, Clone)]
pub struct Field {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Checkbox group key; checked boxes of a group are joined on submit
    pub group: Option<&'static str>,
    pub value: String,
    pub checked: bool,
    pub error: Option<String>,
}

impl Field {
    pub fn text(id: &'static str, label: &'static str, required: bool) -> Self {
        Self::new(id, label, FieldKind::Text, required)
    }

    pub fn email(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Email, true)
    }

    pub fn multiline(id: &'static str, label: &'static str, required: bool) -> Self {
        Self::new(id, label, FieldKind::Multiline, required)
    }

    pub fn checkbox(group: &'static str, id: &'static str, label: &'static str) -> Self {
        let mut field = Self::new(id, label, FieldKind::Checkbox, false);
        field.group = Some(group);
        field
    }

    fn new(id: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            id,
            label,
            kind,
            required,
            group: None,
            value: String::new(),
            checked: false,
            error: None,
        }
    }

    /// Validation message for the current value, or None when valid
    pub fn check(&self) -> Option<String> {
        match self.kind {
            FieldKind::Checkbox => None,
            FieldKind::Email => {
                let value = self.value.trim();
                if value.is_empty() {
                    self.required.then(|| MSG_REQUIRED.to_string())
                } else if !is_valid_email(value) {
                    Some(MSG_BAD_EMAIL.to_string())
                } else {
                    None
                }
            }
            FieldKind::Text | FieldKind::Multiline => {
                if self.required && self.value.trim().is_empty() {
                    Some(MSG_REQUIRED.to_string())
                } else {
                    None
                }
            }
        }
    }

    /// Append a character; any change clears the inline error
    pub fn input(&mut self, c: char) {
        match self.kind {
            FieldKind::Checkbox => {}
            FieldKind::Multiline => self.value.push(c),
            _ => {
                if c != '\n' {
                    self.value.push(c);
                }
            }
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.value.pop();
        self.error = None;
    }

    pub fn toggle(&mut self) {
        if self.kind == FieldKind::Checkbox {
            self.checked = !self.checked;
            self.error = None;
        }
    }
}

/// A named group of fields forming one wizard page
#[derive(Debug, Clone)]
pub struct StepDef {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

impl StepDef {
    pub fn new(title: &'static str, fields: Vec<Field>) -> Self {
        Self { title, fields }
    }
}

/// Indicator state of a step dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

/// The wizard: current step, its pages, and the submission lock
#[derive(Debug)]
pub struct Wizard {
    steps: Vec<StepDef>,
    current: usize,
    submitting: bool,
    /// Focused field index within the current step
    pub focus: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// The project inquiry form: who, how to reach them, what they need
    pub fn new() -> Self {
        Self::with_steps(vec![
            StepDef::new(
                "About you",
                vec![
                    Field::text("full_name", "Full name", true),
                    Field::text("company", "Company", false),
                ],
            ),
            StepDef::new(
                "Contact details",
                vec![
                    Field::email("email", "Email"),
                    Field::text("phone", "Phone", false),
                ],
            ),
            StepDef::new(
                "Your project",
                vec![
                    Field::checkbox("services", "svc_web", "Web application"),
                    Field::checkbox("services", "svc_api", "API backend"),
                    Field::checkbox("services", "svc_data", "Data pipeline"),
                    Field::checkbox("services", "svc_auto", "Automation"),
                    Field::text("budget", "Budget", false),
                    Field::multiline("details", "Project details", true),
                ],
            ),
        ])
    }

    pub fn with_steps(steps: Vec<StepDef>) -> Self {
        Self {
            steps,
            current: 0,
            submitting: false,
            focus: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    pub fn current_step(&self) -> &StepDef {
        &self.steps[self.current]
    }

    pub fn current_step_mut(&mut self) -> &mut StepDef {
        &mut self.steps[self.current]
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Controls are locked exactly while a submission is in flight
    pub fn controls_enabled(&self) -> bool {
        !self.submitting
    }

    pub fn prev_visible(&self) -> bool {
        self.current > 0
    }

    pub fn next_visible(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    pub fn submit_visible(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn indicator_state(&self, index: usize) -> StepState {
        if index < self.current {
            StepState::Completed
        } else if index == self.current {
            StepState::Active
        } else {
            StepState::Upcoming
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut Field> {
        if self.submitting {
            return None;
        }
        let focus = self.focus;
        self.steps[self.current].fields.get_mut(focus)
    }

    pub fn focus_next(&mut self) {
        let count = self.current_step().fields.len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.current_step().fields.len();
        if count > 0 {
            self.focus = self.focus.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Validate every field of the current step.
    ///
    /// Attaches an inline error to each invalid field and moves focus to the
    /// first one. Err carries the index of that field.
    pub fn validate_current(&mut self) -> Result<(), usize> {
        let mut first_invalid = None;
        for (idx, field) in self.steps[self.current].fields.iter_mut().enumerate() {
            match field.check() {
                Some(message) => {
                    field.error = Some(message);
                    if first_invalid.is_none() {
                        first_invalid = Some(idx);
                    }
                }
                None => field.error = None,
            }
        }
        match first_invalid {
            Some(idx) => {
                self.focus = idx;
                Err(idx)
            }
            None => Ok(()),
        }
    }

    /// Advance to the next step if the current one validates.
    ///
    /// Returns whether the step changed. Never moves past the last step.
    pub fn next(&mut self) -> bool {
        if self.submitting || self.current + 1 >= self.steps.len() {
            return false;
        }
        if self.validate_current().is_err() {
            return false;
        }
        self.current += 1;
        self.focus = 0;
        true
    }

    /// Go back one step, unconditionally. Never moves before step zero.
    pub fn prev(&mut self) -> bool {
        if self.submitting || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.focus = 0;
        true
    }

    /// Enter the submitting state from the last step.
    ///
    /// Validates first; returns whether submission may proceed.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || !self.submit_visible() {
            return false;
        }
        if self.validate_current().is_err() {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Unlock controls after a failed submission; state stays on the last step
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    /// Clear all values and errors and return to step zero
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            for field in &mut step.fields {
                field.value.clear();
                field.checked = false;
                field.error = None;
            }
        }
        self.current = 0;
        self.focus = 0;
        self.submitting = false;
    }

    /// Collected field values keyed by field id.
    ///
    /// Checkbox groups collapse into one comma-joined entry per group; a group
    /// with nothing checked still yields an empty entry.
    pub fn payload(&self) -> BTreeMap<String, String> {
        let mut payload = BTreeMap::new();
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for step in &self.steps {
            for field in &step.fields {
                match field.kind {
                    FieldKind::Checkbox => {
                        let entry = groups.entry(field.group.unwrap_or(field.id)).or_default();
                        if field.checked {
                            entry.push(field.label);
                        }
                    }
                    _ => {
                        payload.insert(field.id.to_string(), field.value.trim().to_string());
                    }
                }
            }
        }

        for (group, labels) in groups {
            payload.insert(group.to_string(), labels.join(", "));
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_step_wizard() -> Wizard {
        Wizard::with_steps(vec![
            StepDef::new("one", vec![Field::text("name", "Name", true)]),
            StepDef::new("two", vec![Field::email("email", "Email")]),
            StepDef::new(
                "three",
                vec![
                    Field::checkbox("services", "a", "Alpha"),
                    Field::checkbox("services", "b", "Beta"),
                    Field::multiline("details", "Details", true),
                ],
            ),
        ])
    }

    #[test]
    fn test_next_is_gated_on_validation() {
        let mut wizard = three_step_wizard();
        assert!(!wizard.next());
        assert_eq!(wizard.current_index(), 0);
        assert_eq!(
            wizard.current_step().fields[0].error.as_deref(),
            Some(MSG_REQUIRED)
        );

        wizard.focused_field_mut().unwrap().input('J');
        assert!(wizard.current_step().fields[0].error.is_none());
        assert!(wizard.next());
        assert_eq!(wizard.current_index(), 1);
    }

    #[test]
    fn test_malformed_email_blocks_with_specific_message() {
        let mut wizard = three_step_wizard();
        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();

        for c in "not-an-email".chars() {
            wizard.focused_field_mut().unwrap().input(c);
        }
        assert!(!wizard.next());
        assert_eq!(wizard.current_index(), 1);
        assert_eq!(
            wizard.current_step().fields[0].error.as_deref(),
            Some(MSG_BAD_EMAIL)
        );
    }

    #[test]
    fn test_one_error_per_invalid_field_and_focus_on_first() {
        let mut wizard = Wizard::with_steps(vec![StepDef::new(
            "only",
            vec![
                Field::text("a", "A", true),
                Field::text("b", "B", false),
                Field::text("c", "C", true),
            ],
        )]);
        wizard.focus = 1;

        assert_eq!(wizard.validate_current(), Err(0));
        let errors: Vec<bool> = wizard
            .current_step()
            .fields
            .iter()
            .map(|f| f.error.is_some())
            .collect();
        assert_eq!(errors, vec![true, false, true]);
        assert_eq!(wizard.focus, 0);
    }

    #[test]
    fn test_index_stays_within_bounds() {
        let mut wizard = three_step_wizard();
        assert!(!wizard.prev());
        assert_eq!(wizard.current_index(), 0);

        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();
        wizard.current_step_mut().fields[0].value = "j@example.com".into();
        wizard.next();
        assert_eq!(wizard.current_index(), 2);

        // Next on the last step never advances
        wizard.current_step_mut().fields[2].value = "details".into();
        assert!(!wizard.next());
        assert_eq!(wizard.current_index(), 2);
    }

    #[test]
    fn test_prev_skips_validation() {
        let mut wizard = three_step_wizard();
        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();
        assert!(wizard.prev());
        assert_eq!(wizard.current_index(), 0);
    }

    #[test]
    fn test_submit_only_from_last_step() {
        let mut wizard = three_step_wizard();
        wizard.current_step_mut().fields[0].value = "j".into();
        assert!(!wizard.begin_submit());
        assert!(!wizard.is_submitting());

        wizard.next();
        wizard.current_step_mut().fields[0].value = "j@example.com".into();
        wizard.next();

        // Last step, but details is empty
        assert!(!wizard.begin_submit());
        assert!(!wizard.is_submitting());

        wizard.current_step_mut().fields[2].value = "a rewrite".into();
        assert!(wizard.begin_submit());
        assert!(wizard.is_submitting());
        assert!(!wizard.controls_enabled());

        // Locked while in flight
        assert!(!wizard.next());
        assert!(!wizard.prev());
        assert!(wizard.focused_field_mut().is_none());

        wizard.submit_failed();
        assert!(wizard.controls_enabled());
        assert_eq!(wizard.current_index(), 2);
    }

    #[test]
    fn test_button_visibility_per_step() {
        let mut wizard = three_step_wizard();
        assert!(!wizard.prev_visible());
        assert!(wizard.next_visible());
        assert!(!wizard.submit_visible());

        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();
        assert!(wizard.prev_visible());
        assert!(wizard.next_visible());

        wizard.current_step_mut().fields[0].value = "j@example.com".into();
        wizard.next();
        assert!(wizard.prev_visible());
        assert!(!wizard.next_visible());
        assert!(wizard.submit_visible());
    }

    #[test]
    fn test_indicator_states() {
        let mut wizard = three_step_wizard();
        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();

        assert_eq!(wizard.indicator_state(0), StepState::Completed);
        assert_eq!(wizard.indicator_state(1), StepState::Active);
        assert_eq!(wizard.indicator_state(2), StepState::Upcoming);
    }

    #[test]
    fn test_payload_joins_checked_group_values() {
        let mut wizard = three_step_wizard();
        wizard.steps[0].fields[0].value = "Jo".into();
        wizard.steps[1].fields[0].value = "jo@example.com".into();
        wizard.steps[2].fields[0].checked = true;
        wizard.steps[2].fields[1].checked = true;
        wizard.steps[2].fields[2].value = "  details  ".into();

        let payload = wizard.payload();
        assert_eq!(payload.get("services").map(String::as_str), Some("Alpha, Beta"));
        assert_eq!(payload.get("details").map(String::as_str), Some("details"));
        assert_eq!(payload.get("name").map(String::as_str), Some("Jo"));
    }

    #[test]
    fn test_payload_keeps_empty_group_entry() {
        let wizard = three_step_wizard();
        let payload = wizard.payload();
        assert_eq!(payload.get("services").map(String::as_str), Some(""));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wizard = three_step_wizard();
        wizard.current_step_mut().fields[0].value = "j".into();
        wizard.next();
        wizard.current_step_mut().fields[0].value = "bad".into();
        let _ = wizard.next();

        wizard.reset();
        assert_eq!(wizard.current_index(), 0);
        assert!(!wizard.is_submitting());
        for step in wizard.steps() {
            for field in &step.fields {
                assert!(field.value.is_empty());
                assert!(field.error.is_none());
                assert!(!field.checked);
            }
        }
    }
}
