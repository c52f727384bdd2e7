use crate::{state::InputState, theme::ThemePalette};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PLACEHOLDER: &str = "Ask about this dashboard...";
const WAITING: &str = "Waiting for the assistant...";
const SEND_LABEL: &str = " Send ";

/// Input row: draft with cursor and a Send label
///
/// While a query is in flight the whole row is dimmed and the cursor hidden.
pub struct Composer<'a> {
    input: &'a InputState,
    pending: bool,
    theme: ThemePalette,
}

impl<'a> Composer<'a> {
    pub fn new(input: &'a InputState, pending: bool, theme: ThemePalette) -> Self {
        Self { input, pending, theme }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.panel_bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SEND_LABEL.len() as u16 + 1)])
            .split(inner);

        frame.render_widget(Paragraph::new(self.draft_line(chunks[0].width as usize)), chunks[0]);

        let send_style = if self.pending {
            Style::default().fg(self.theme.muted).bg(self.theme.active)
        } else if self.input.text().trim().is_empty() {
            Style::default().fg(self.theme.muted).bg(self.theme.panel_bg)
        } else {
            Style::default().fg(self.theme.bg).bg(self.theme.blue).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), Span::styled(SEND_LABEL, send_style)])),
            chunks[1],
        );
    }

    fn draft_line(&self, width: usize) -> Line<'static> {
        let prompt = Span::styled("› ", Style::default().fg(self.theme.blue));

        if self.pending {
            let dim = Style::default().fg(self.theme.muted).add_modifier(Modifier::DIM);
            let text = if self.input.is_empty() { WAITING.to_string() } else { self.input.text().to_string() };
            return Line::from(vec![prompt, Span::styled(text, dim)]);
        }

        let cursor = Span::styled(" ", Style::default().bg(self.theme.fg));
        if self.input.is_empty() {
            return Line::from(vec![
                prompt,
                cursor,
                Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted)),
            ]);
        }

        let text_style = Style::default().fg(self.theme.fg);
        let chars: Vec<char> = self.input.text().chars().collect();
        let cursor_at = self.input.cursor().min(chars.len());
        let before: String = chars[..cursor_at].iter().collect();
        let under = chars.get(cursor_at).map(|c| c.to_string());
        let after: String = chars.get(cursor_at + 1..).map(|rest| rest.iter().collect()).unwrap_or_default();

        // Keep the cursor visible by dropping text from the left.
        let budget = width.saturating_sub(3);
        let before = if before.width() > budget {
            let mut kept: Vec<char> = Vec::new();
            let mut used = 0;
            for c in before.chars().rev() {
                let w = c.width().unwrap_or(0);
                if used + w > budget {
                    break;
                }
                used += w;
                kept.push(c);
            }
            kept.into_iter().rev().collect()
        } else {
            before
        };

        let mut spans = vec![prompt, Span::styled(before, text_style)];
        match under {
            Some(c) => spans.push(Span::styled(c, Style::default().fg(self.theme.bg).bg(self.theme.fg))),
            None => spans.push(cursor),
        }
        spans.push(Span::styled(after, text_style));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(input: &InputState, pending: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        terminal
            .draw(|frame| Composer::new(input, pending, Theme::palette()).render(frame, frame.area()))
            .unwrap();
        format!("{:?}", terminal.backend().buffer())
    }

    #[test]
    fn test_placeholder_and_send_label() {
        let buffer = draw(&InputState::new(), false);
        assert!(buffer.contains(PLACEHOLDER));
        assert!(buffer.contains("Send"));
    }

    #[test]
    fn test_draft_is_shown() {
        let mut input = InputState::new();
        input.insert_str("What is churn?");
        assert!(draw(&input, false).contains("What is churn?"));
    }

    #[test]
    fn test_pending_shows_waiting() {
        let buffer = draw(&InputState::new(), true);
        assert!(buffer.contains(WAITING));
        assert!(!buffer.contains(PLACEHOLDER));
    }

    #[test]
    fn test_long_draft_keeps_cursor_end_visible() {
        let mut input = InputState::new();
        input.insert_str(&"x".repeat(80));
        input.insert_str("tail");
        assert!(draw(&input, false).contains("tail"));
    }
}
