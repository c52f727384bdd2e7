use crate::theme::ThemePalette;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// One-line key hints along the bottom of the shell
pub struct Footer {
    panel_open: bool,
    theme: ThemePalette,
}

impl Footer {
    pub fn new(panel_open: bool, theme: ThemePalette) -> Self {
        Self { panel_open, theme }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.panel_open {
            &[
                ("Enter", "send"),
                ("Ctrl+O", "close"),
                ("Ctrl+←/→", "resize"),
                ("PgUp/PgDn", "scroll"),
                ("Ctrl+C", "quit"),
            ]
        } else {
            &[("Ctrl+O", "assistant"), ("q", "quit")]
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for (idx, (key, action)) in self.hints().iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(format!("[{key}]"), Style::default().fg(self.theme.blue)));
            spans.push(Span::styled(format!(" {action}"), Style::default().fg(self.theme.muted)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.bg)),
            area,
        );
    }
}
