use super::{Composer, PanelHeader, TranscriptView};
use crate::{layout::PanelLayout, state::AppState, theme::ThemePalette};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// The open assistant panel: header, transcript and composer
pub struct AssistantPanel<'a> {
    state: &'a AppState,
    theme: ThemePalette,
}

impl<'a> AssistantPanel<'a> {
    pub fn new(state: &'a AppState, theme: ThemePalette) -> Self {
        Self { state, theme }
    }

    /// Returns the transcript scroll limit, or `None` when no session is open.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) -> Option<usize> {
        let session = self.state.session()?;

        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = PanelLayout::calculate(inner);
        PanelHeader::new(&self.state.settings.title, self.theme).render(frame, layout.header);

        let max_back = TranscriptView::new(session, self.theme)
            .animation_frame(self.state.animation_frame)
            .scroll_back(self.state.scroll.back())
            .render(frame, layout.transcript);

        Composer::new(&session.draft, session.is_pending(), self.theme).render(frame, layout.input);
        Some(max_back)
    }
}

/// Collapsed sidebar shown while the panel is closed
pub struct Rail {
    theme: ThemePalette,
}

impl Rail {
    pub fn new(theme: ThemePalette) -> Self {
        Self { theme }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.panel_bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(
            "◆",
            Style::default().fg(self.theme.cyan).add_modifier(Modifier::BOLD),
        ))];
        lines.extend("AI".chars().map(|c| Line::from(Span::styled(c.to_string(), Style::default().fg(self.theme.muted)))));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
