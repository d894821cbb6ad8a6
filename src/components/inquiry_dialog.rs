//! Project inquiry wizard dialog
//!
//! Renders the multi-step inquiry form: step indicator, the current step's
//! fields, the navigation buttons and the status line. Key handling needs
//! the wizard state (the focused field's kind decides what Enter and Space
//! do), so the App passes it in.

use crate::action::Action;
use crate::components::centered_popup;
use crate::model::inquiry::{FieldKind, StepState, Wizard};
use crate::model::ui::{StatusKind, StatusLine};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

pub const MSG_SUBMITTING: &str = "Submitting inquiry...";

/// Inquiry wizard dialog
#[derive(Default)]
pub struct InquiryDialog {
    /// Status line under the form
    pub status: Option<StatusLine>,
    /// When set, the wizard resets and the modal closes at this instant
    pub reset_deadline: Option<Instant>,
}

impl InquiryDialog {
    /// Clear transient state when the modal opens
    pub fn reset(&mut self) {
        self.status = None;
        self.reset_deadline = None;
    }

    /// Convert a key press into a wizard action.
    ///
    /// While a submission is in flight every control is locked; only the
    /// deadline set on success (or a failure event) unlocks the dialog.
    pub fn handle_key(&self, key: KeyEvent, wizard: &Wizard) -> Result<Option<Action>> {
        if wizard.is_submitting() {
            return Ok(None);
        }

        let focused_kind = wizard
            .current_step()
            .fields
            .get(wizard.focus)
            .map(|f| f.kind);

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab => Some(Action::WizardFocusNext),
            KeyCode::BackTab => Some(Action::WizardFocusPrev),
            KeyCode::PageDown => Some(Action::WizardNext),
            KeyCode::PageUp => Some(Action::WizardPrev),
            KeyCode::Backspace => Some(Action::WizardBackspace),
            KeyCode::Enter => match focused_kind {
                // Enter types a newline into the details box; elsewhere it
                // advances (or submits on the last step)
                Some(FieldKind::Multiline) => Some(Action::WizardInput('\n')),
                _ if wizard.submit_visible() => Some(Action::WizardSubmit),
                _ => Some(Action::WizardNext),
            },
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::WizardSubmit)
            }
            KeyCode::Char(' ') if focused_kind == Some(FieldKind::Checkbox) => {
                Some(Action::WizardToggle)
            }
            KeyCode::Char(c) => Some(Action::WizardInput(c)),
            _ => None,
        };
        Ok(action)
    }

    pub fn draw_with_wizard(&self, frame: &mut Frame, area: Rect, wizard: &Wizard) -> Result<()> {
        let mut content: Vec<Line> = Vec::new();
        content.push(Line::from(""));
        content.push(step_indicator(wizard));
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            wizard.current_step().title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(""));

        let locked = wizard.is_submitting();
        for (idx, field) in wizard.current_step().fields.iter().enumerate() {
            let focused = !locked && idx == wizard.focus;
            content.extend(field_lines(field, focused, locked));
        }

        content.push(Line::from(""));
        content.push(button_row(wizard));

        if let Some(ref status) = self.status {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(Color::White),
                StatusKind::Success => Style::default().fg(Color::Green),
                StatusKind::Error => Style::default().fg(Color::Red),
            };
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(status.text.clone(), style)));
        }

        let height = (content.len() as u16 + 2).min(area.height);
        let popup_area = centered_popup(area, 62, height);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Project Inquiry ")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

/// Numbered step nodes: completed, active, upcoming
fn step_indicator(wizard: &Wizard) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for idx in 0..wizard.step_count() {
        let (text, style) = match wizard.indicator_state(idx) {
            StepState::Completed => (
                format!("✓ {}", idx + 1),
                Style::default().fg(Color::Green),
            ),
            StepState::Active => (
                format!("● {}", idx + 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            StepState::Upcoming => (
                format!("○ {}", idx + 1),
                Style::default().fg(Color::DarkGray),
            ),
        };
        spans.push(Span::styled(text, style));
        if idx + 1 < wizard.step_count() {
            spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}

fn field_lines(
    field: &crate::model::inquiry::Field,
    focused: bool,
    locked: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let base = if locked {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    match field.kind {
        FieldKind::Checkbox => {
            let mark = if field.checked { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", mark), base),
                Span::styled(field.label.to_string(), base),
            ]));
        }
        _ => {
            let required = if field.required { "" } else { " (optional)" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", field.label), base),
                Span::styled(required.to_string(), Style::default().fg(Color::DarkGray)),
            ]));
            let cursor = if focused { "_" } else { "" };
            if field.kind == FieldKind::Multiline {
                let rows: Vec<&str> = field.value.split('\n').collect();
                let last = rows.len().saturating_sub(1);
                for (i, row) in rows.iter().enumerate() {
                    let suffix = if i == last { cursor } else { "" };
                    lines.push(Line::from(format!("    > {}{}", row, suffix)));
                }
            } else {
                lines.push(Line::from(format!("    > {}{}", field.value, cursor)));
            }
        }
    }

    if let Some(ref error) = field.error {
        lines.push(Line::from(Span::styled(
            format!("    {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

/// Prev hidden on the first step, Next hidden on the last, Submit only on
/// the last
fn button_row(wizard: &Wizard) -> Line<'static> {
    let enabled = wizard.controls_enabled();
    let button = |label: &str, color: Color| {
        let style = if enabled {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("[ {} ]  ", label), style)
    };

    let mut spans = vec![Span::raw("  ")];
    if wizard.prev_visible() {
        spans.push(button("PgUp Back", Color::Gray));
    }
    if wizard.next_visible() {
        spans.push(button("Enter Next", Color::Yellow));
    }
    if wizard.submit_visible() {
        spans.push(button("Enter Submit", Color::Green));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_advances_on_text_fields() {
        let dialog = InquiryDialog::default();
        let wizard = Wizard::new();

        let action = dialog.handle_key(key(KeyCode::Enter), &wizard).unwrap();
        assert_eq!(action, Some(Action::WizardNext));
    }

    #[test]
    fn test_enter_submits_on_last_step() {
        let dialog = InquiryDialog::default();
        let mut wizard = Wizard::new();
        wizard.current_step_mut().fields[0].value = "Jo".into();
        wizard.next();
        wizard.current_step_mut().fields[0].value = "jo@example.com".into();
        wizard.next();
        assert!(wizard.submit_visible());

        // Focused field on the last step is a checkbox
        let action = dialog.handle_key(key(KeyCode::Enter), &wizard).unwrap();
        assert_eq!(action, Some(Action::WizardSubmit));
    }

    #[test]
    fn test_space_toggles_only_checkboxes() {
        let dialog = InquiryDialog::default();
        let wizard = Wizard::new();

        // First step's focused field is text: space is input
        let action = dialog.handle_key(key(KeyCode::Char(' ')), &wizard).unwrap();
        assert_eq!(action, Some(Action::WizardInput(' ')));
    }

    #[test]
    fn test_all_keys_locked_while_submitting() {
        let dialog = InquiryDialog::default();
        let mut wizard = Wizard::new();
        wizard.current_step_mut().fields[0].value = "Jo".into();
        wizard.next();
        wizard.current_step_mut().fields[0].value = "jo@example.com".into();
        wizard.next();
        wizard.current_step_mut().fields[5].value = "details".into();
        assert!(wizard.begin_submit());

        for code in [
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Char('x'),
            KeyCode::Backspace,
        ] {
            assert_eq!(dialog.handle_key(key(code), &wizard).unwrap(), None);
        }
    }
}
