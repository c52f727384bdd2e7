use crate::theme::ThemePalette;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const CLOSE_HINT: &str = "[Ctrl+O] close";

/// Title row of the assistant panel
pub struct PanelHeader<'a> {
    title: &'a str,
    theme: ThemePalette,
}

impl<'a> PanelHeader<'a> {
    pub fn new(title: &'a str, theme: ThemePalette) -> Self {
        Self { title, theme }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let hint_width = (CLOSE_HINT.len() as u16).min(area.width / 2);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(hint_width)])
            .split(area);

        let title = Line::from(vec![
            Span::styled("◆ ", Style::default().fg(self.theme.cyan)),
            Span::styled(self.title.to_string(), Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)),
            Span::styled(" (Beta)", Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let hint = Line::from(vec![
            Span::styled("[Ctrl+O]", Style::default().fg(self.theme.blue)),
            Span::styled(" close", Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Right), chunks[1]);
    }
}
