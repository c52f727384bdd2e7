use crate::{state::ShellSettings, theme::ThemePalette};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Stand-in for the host dashboard the assistant is attached to
pub struct DashboardView<'a> {
    settings: &'a ShellSettings,
    theme: ThemePalette,
}

impl<'a> DashboardView<'a> {
    pub fn new(settings: &'a ShellSettings, theme: ThemePalette) -> Self {
        Self { settings, theme }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(" Dashboard ", Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)))
            .style(Style::default().bg(self.theme.bg));

        let dashboard = if self.settings.dashboard.is_unset() {
            "none".to_string()
        } else {
            self.settings.dashboard.to_string()
        };

        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.fg);
        let mut lines = vec![
            Line::from(vec![Span::styled("dashboard  ", label), Span::styled(dashboard, value)]),
        ];
        if !self.settings.service_label.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("service    ", label),
                Span::styled(self.settings.service_label.clone(), value),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Press ", label),
            Span::styled("Ctrl+O", Style::default().fg(self.theme.blue)),
            Span::styled(" to ask the assistant about this dashboard.", label),
        ]));

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
    }
}
