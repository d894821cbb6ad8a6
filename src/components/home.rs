//! Home component - the portfolio page
//!
//! Renders the section nav on the left and the scrolled page content on the
//! right. Owns the scroll position, the active-section highlight, the
//! section reveal timers and the contact editing mode.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{calculate_home_layout, truncate_to_width};
use crate::model::contact::{ContactField, ContactForm, ContactPhase};
use crate::model::profile::{Profile, Section};
use crate::model::repo::ReposState;
use crate::model::ui::StatusKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Sections whose start is within this many lines below the top of the
/// viewport still count as active (the scroll handler's lookahead)
const ACTIVE_LOOKAHEAD: usize = 3;

/// How long a section stays dimmed after first scrolling into view
const REVEAL_DELAY: Duration = Duration::from_millis(350);

/// Everything the home screen needs from the App to render
pub struct HomeRenderContext<'a> {
    pub profile: &'a Profile,
    pub repos: &'a ReposState,
    pub contact: &'a ContactForm,
}

/// Home component for the main application view
pub struct HomeComponent {
    /// Current scroll offset into the page content
    pub scroll: usize,

    /// Whether keys edit the contact form
    pub contact_mode: bool,

    /// Line offset where each section starts, recomputed on draw
    section_offsets: [usize; 5],

    /// Total content lines as of the last draw
    total_lines: usize,

    /// Visible content rows as of the last draw
    viewport_height: usize,

    /// When each section first scrolled into view
    first_seen: [Option<Instant>; 5],
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            contact_mode: false,
            section_offsets: [0; 5],
            total_lines: 0,
            viewport_height: 0,
            first_seen: [None; 5],
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling & Sections
    // ─────────────────────────────────────────────────────────────────────────

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn page_down(&mut self) {
        self.scroll_down((self.viewport_height / 2).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up((self.viewport_height / 2).max(1));
    }

    pub fn jump_top(&mut self) {
        self.scroll = 0;
    }

    pub fn jump_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// The last section whose start is at or above the scroll position plus
    /// the lookahead
    pub fn active_section(&self) -> usize {
        let mut active = 0;
        for (idx, offset) in self.section_offsets.iter().enumerate() {
            if *offset <= self.scroll + ACTIVE_LOOKAHEAD {
                active = idx;
            }
        }
        active
    }

    pub fn jump_to_section(&mut self, index: usize) {
        if let Some(offset) = self.section_offsets.get(index) {
            self.scroll = (*offset).min(self.max_scroll());
        }
    }

    pub fn next_section(&mut self) {
        let next = (self.active_section() + 1).min(Section::all().len() - 1);
        self.jump_to_section(next);
    }

    pub fn prev_section(&mut self) {
        let prev = self.active_section().saturating_sub(1);
        self.jump_to_section(prev);
    }

    /// Jump straight to the contact section when entering contact mode
    pub fn enter_contact_mode(&mut self) {
        self.contact_mode = true;
        self.jump_to_section(Section::all().len() - 1);
    }

    pub fn exit_contact_mode(&mut self) {
        self.contact_mode = false;
    }

    /// Whether a section has been on screen long enough to render in full
    /// style; marks newly visible sections as seen
    fn reveal_state(&mut self, index: usize, visible: bool) -> bool {
        if visible && self.first_seen[index].is_none() {
            self.first_seen[index] = Some(Instant::now());
        }
        match self.first_seen[index] {
            Some(seen) => seen.elapsed() >= REVEAL_DELAY,
            None => false,
        }
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') => Some(Action::JumpTop),
            KeyCode::Char('G') => Some(Action::JumpBottom),
            KeyCode::Tab => Some(Action::NextSection),
            KeyCode::BackTab => Some(Action::PrevSection),
            KeyCode::Char('m') => Some(Action::EnterContactMode),
            KeyCode::Char('i') => Some(Action::OpenInquiry),
            KeyCode::Char('r') => Some(Action::RefreshRepos),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                Some(Action::OpenScreenshot(c as usize - '1' as usize))
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs domain state; the App calls draw_home_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Draw the full home screen: nav, content, help bar
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_home_layout(area);
    let content_width = layout.content.width.saturating_sub(4) as usize;

    // Build each section's lines and record where it starts
    let mut sections: Vec<Vec<Line>> = Vec::with_capacity(5);
    let mut offsets = [0usize; 5];
    let mut running = 0;
    for (idx, section) in Section::all().iter().enumerate() {
        let lines = match section {
            Section::About => build_about(ctx.profile, content_width),
            Section::Skills => build_skills(ctx.profile),
            Section::Projects => build_projects(ctx.profile, content_width),
            Section::Repositories => build_repos(ctx.repos, content_width),
            Section::Contact => build_contact(ctx.contact, home.contact_mode),
        };
        offsets[idx] = running;
        running += lines.len();
        sections.push(lines);
    }
    home.section_offsets = offsets;
    home.total_lines = running;
    home.viewport_height = layout.content.height.saturating_sub(2) as usize;
    home.scroll = home.scroll.min(home.total_lines.saturating_sub(home.viewport_height));

    // Reveal: sections render dimmed until they have been visible briefly
    let view_start = home.scroll;
    let view_end = home.scroll + home.viewport_height;
    let mut content: Vec<Line> = Vec::with_capacity(running);
    for (idx, lines) in sections.into_iter().enumerate() {
        let start = offsets[idx];
        let end = start + lines.len();
        let visible = start < view_end && end > view_start;
        let revealed = home.reveal_state(idx, visible);
        if revealed {
            content.extend(lines);
        } else {
            content.extend(lines.into_iter().map(dim_line));
        }
    }

    draw_nav(frame, layout.nav, home, ctx.profile);

    let content_block = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).padding(
            ratatui::widgets::Padding::horizontal(1),
        ))
        .scroll((home.scroll as u16, 0));
    frame.render_widget(content_block, layout.content);

    draw_help_bar(frame, layout.help, home);

    Ok(())
}

fn dim_line(line: Line<'static>) -> Line<'static> {
    let spans: Vec<Span> = line
        .spans
        .into_iter()
        .map(|span| Span::styled(span.content, Style::default().fg(Color::DarkGray)))
        .collect();
    Line::from(spans)
}

fn draw_nav(frame: &mut Frame, area: Rect, home: &HomeComponent, profile: &Profile) {
    let active = home.active_section();

    let mut lines = vec![Line::from("")];
    for (idx, section) in Section::all().iter().enumerate() {
        let (marker, style) = if idx == active {
            (
                "▸ ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(Color::Gray))
        };
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(marker, style),
            Span::styled(section.title(), style),
        ]));
    }

    let nav = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", profile.name))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(nav, area);
}

fn draw_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let hints: Vec<(&str, &str)> = if home.contact_mode {
        vec![
            ("Tab", "Next field"),
            ("Enter", "Next / newline"),
            ("Ctrl+s", "Send"),
            ("Esc", "Done"),
        ]
    } else {
        vec![
            ("j/k", "Scroll"),
            ("Tab", "Section"),
            ("1-9", "Preview"),
            ("m", "Compose"),
            ("i", "Inquiry"),
            ("r", "Repos"),
            ("?", "Help"),
            ("q", "Quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!("{}  ", label)));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Section builders
// ─────────────────────────────────────────────────────────────────────────────

fn section_header(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("── {} ", title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ]
}

fn build_about(profile: &Profile, width: usize) -> Vec<Line<'static>> {
    let mut lines = section_header("About");
    lines.push(Line::from(Span::styled(
        profile.tagline.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));
    for text in &profile.about {
        lines.push(Line::from(truncate_to_width(text, width)));
    }
    lines.push(Line::from(""));
    lines
}

fn build_skills(profile: &Profile) -> Vec<Line<'static>> {
    let mut lines = section_header("Skills");
    for skill in &profile.skills {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Yellow)),
            Span::raw(skill.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines
}

fn build_projects(profile: &Profile, width: usize) -> Vec<Line<'static>> {
    let mut lines = section_header("Projects");
    for (idx, project) in profile.projects.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", idx + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                project.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(truncate_to_width(&project.description, width)));
        if !project.tech.is_empty() {
            lines.push(Line::from(Span::styled(
                project.tech.join(" · "),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }
    if profile.projects.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing showcased yet.",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn build_repos(repos: &ReposState, width: usize) -> Vec<Line<'static>> {
    let mut lines = section_header("Repositories");
    match repos {
        ReposState::Unconfigured => {
            lines.push(Line::from(Span::styled(
                "Set your GitHub username in ~/.folio-tui/config.json to load repositories.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        ReposState::Loading => {
            lines.push(Line::from(Span::styled(
                "Loading repositories…",
                Style::default().fg(Color::DarkGray),
            )));
        }
        ReposState::Failed(message) => {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        ReposState::Ready(repos) if repos.is_empty() => {
            lines.push(Line::from("No repositories found."));
        }
        ReposState::Ready(repos) => {
            for repo in repos {
                lines.push(Line::from(Span::styled(
                    repo.name.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                if let Some(ref description) = repo.description {
                    lines.push(Line::from(truncate_to_width(description, width)));
                }
                lines.push(Line::from(Span::styled(
                    format!("{}  ★ {}", repo.language_badge(), repo.stargazers_count),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(""));
            }
        }
    }
    lines.push(Line::from(""));
    lines
}

fn build_contact(contact: &ContactForm, editing: bool) -> Vec<Line<'static>> {
    let mut lines = section_header("Contact");

    if !editing {
        lines.push(Line::from(Span::styled(
            "Press m to compose a message.",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    for field in ContactField::all() {
        let focused = editing && contact.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let cursor = if focused { "_" } else { "" };
        let value = contact.value(field);
        if field.is_multiline() {
            let mut rows: Vec<&str> = value.split('\n').collect();
            if rows.is_empty() {
                rows.push("");
            }
            let last = rows.len() - 1;
            for (i, row) in rows.iter().enumerate() {
                let suffix = if i == last { cursor } else { "" };
                lines.push(Line::from(format!("  > {}{}", row, suffix)));
            }
        } else {
            lines.push(Line::from(format!("  > {}{}", value, cursor)));
        }

        if let Some(error) = contact.error(field) {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(ref status) = contact.status {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::White),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        lines.push(Line::from(Span::styled(status.text.clone(), style)));
    } else if contact.phase != ContactPhase::Idle {
        lines.push(Line::from(Span::styled(
            "Working…",
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_home(offsets: [usize; 5], total: usize, viewport: usize) -> HomeComponent {
        let mut home = HomeComponent::new();
        home.section_offsets = offsets;
        home.total_lines = total;
        home.viewport_height = viewport;
        home
    }

    #[test]
    fn test_active_section_is_last_one_above_scroll() {
        let mut home = sized_home([0, 10, 20, 30, 40], 60, 15);
        assert_eq!(home.active_section(), 0);

        home.scroll = 9;
        assert_eq!(home.active_section(), 1, "lookahead pulls in the next section");

        home.scroll = 25;
        assert_eq!(home.active_section(), 2);

        home.scroll = 45;
        assert_eq!(home.active_section(), 4);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut home = sized_home([0, 10, 20, 30, 40], 60, 15);
        home.scroll_down(1000);
        assert_eq!(home.scroll, 45);

        home.scroll_up(1000);
        assert_eq!(home.scroll, 0);
    }

    #[test]
    fn test_section_jumps_move_between_offsets() {
        let mut home = sized_home([0, 10, 20, 30, 40], 60, 15);
        home.next_section();
        assert_eq!(home.scroll, 10);
        home.next_section();
        assert_eq!(home.scroll, 20);
        home.prev_section();
        assert_eq!(home.scroll, 10);
    }

    #[test]
    fn test_enter_contact_mode_jumps_to_contact() {
        let mut home = sized_home([0, 10, 20, 30, 40], 60, 15);
        home.enter_contact_mode();
        assert!(home.contact_mode);
        assert_eq!(home.scroll, 40);
    }

    #[test]
    fn test_reveal_waits_for_visibility() {
        let mut home = sized_home([0, 10, 20, 30, 40], 60, 15);
        // Never seen: stays dimmed and unmarked
        assert!(!home.reveal_state(3, false));
        assert!(home.first_seen[3].is_none());

        // First visibility starts the timer but does not reveal yet
        assert!(!home.reveal_state(3, true));
        assert!(home.first_seen[3].is_some());
    }
}
