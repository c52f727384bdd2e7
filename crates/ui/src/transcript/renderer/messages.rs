use crate::content::{Content, render_message};
use crate::transcript::{Message, Role};

use super::wrap::wrap_text_styled;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

impl<'a> super::TranscriptRenderer<'a> {
    pub(super) fn render_message(&self, message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
        match message.role() {
            Role::User => self.render_user_message(message, width, lines),
            Role::Assistant if message.is_failure() => {
                self.render_error_message(message.text(), width, lines)
            }
            Role::Assistant => self.render_assistant_message(message, width, lines),
        }
    }

    fn header(&self, marker: &str, message: &Message, color: Color) -> Line<'static> {
        let mut spans = vec![
            Span::styled(format!("{marker} "), Style::default().fg(color)),
            Span::styled(message.role().label(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ];
        if self.options.show_timestamps {
            spans.push(Span::styled(
                format!(" {}", message.sent_at().format("%H:%M")),
                Style::default().fg(self.theme.muted),
            ));
        }
        Line::from(spans)
    }

    /// User text is shown exactly as typed, behind an accent bar.
    fn render_user_message(&self, message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
        lines.push(self.header("●", message, self.theme.blue));

        let accent_bar = Span::styled("┃ ", Style::default().fg(self.theme.blue).bg(self.theme.bg));
        let content_style = Style::default().fg(self.theme.fg).bg(self.theme.bg);
        let Content::Plain(text) = render_message(message) else {
            return;
        };

        for wrapped in wrap_text_styled(&text, content_style, width.saturating_sub(2)) {
            let mut spans = vec![accent_bar.clone()];
            spans.extend(wrapped.spans);
            lines.push(Line::from(spans));
        }
    }

    fn render_assistant_message(&self, message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
        lines.push(self.header("◆", message, self.theme.cyan));

        match render_message(message) {
            Content::Structured(document) => self.render_document(&document, width, lines),
            Content::Plain(text) => {
                lines.extend(wrap_text_styled(&text, Style::default().fg(self.theme.fg), width));
            }
        }
    }

    fn render_error_message(&self, text: &str, width: usize, lines: &mut Vec<Line<'static>>) {
        let red = Style::default().fg(self.theme.red);
        lines.push(Line::from(vec![
            Span::styled("✗ ", red),
            Span::styled(Role::Assistant.label(), red.add_modifier(Modifier::BOLD)),
        ]));
        lines.extend(wrap_text_styled(text, red, width));
    }

    pub(super) fn render_pending_row(&self, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", self.spinner_frame()), Style::default().fg(self.theme.cyan)),
            Span::styled("Thinking…", Style::default().fg(self.theme.muted).add_modifier(Modifier::ITALIC)),
        ]));
    }
}
