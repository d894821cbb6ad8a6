//! Project screenshot preview dialog
//!
//! Shows a project's ASCII screenshot, or a textual placeholder when the
//! project has none. A disclaimer line is appended unless the project opts
//! out of it.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::profile::Project;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const PLACEHOLDER_TEXT: &str = "No image available";
const DISCLAIMER: &str = "Preview mockup — final product may differ.";

/// Screenshot preview dialog
#[derive(Default)]
pub struct ScreenshotDialog;

impl Component for ScreenshotDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs the project; the App calls draw_with_project
        Ok(())
    }
}

impl ScreenshotDialog {
    pub fn draw_with_project(&self, frame: &mut Frame, area: Rect, project: &Project) -> Result<()> {
        let mut content: Vec<Line> = Vec::new();
        content.push(Line::from(""));

        if project.has_screenshot() {
            for row in &project.screenshot {
                content.push(Line::from(Span::styled(
                    row.clone(),
                    Style::default().fg(Color::White),
                )));
            }
        } else {
            content.push(Line::from(Span::styled(
                PLACEHOLDER_TEXT,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        if !project.hide_disclaimer {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                DISCLAIMER,
                Style::default().fg(Color::DarkGray),
            )));
        }

        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close"),
        ]));

        let inner_width = content
            .iter()
            .map(|l| l.width())
            .max()
            .unwrap_or(0) as u16;
        let width = (inner_width + 6).max(30).min(area.width);
        let height = (content.len() as u16 + 2).min(area.height);

        let popup_area = centered_popup(area, width, height);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", project.title))
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
