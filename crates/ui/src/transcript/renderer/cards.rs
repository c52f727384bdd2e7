use crate::syntax::SyntaxHighlighter;

use super::wrap::{clip_line, split_line};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

fn card_width(width: usize) -> usize {
    width.max(8)
}

impl<'a> super::TranscriptRenderer<'a> {
    /// Frame `content` in a titled box drawn with panel background.
    pub(super) fn render_card(
        &self, title: &str, border_color: Color, width: usize, content: Vec<Line<'static>>,
        lines: &mut Vec<Line<'static>>,
    ) {
        let card_width = card_width(width);
        let border_style = Style::default().fg(border_color).bg(self.theme.panel_bg);
        let content_bg = Style::default().bg(self.theme.panel_bg);
        let padding = 1usize;
        let prefix = "┌─ ";
        let title_width = title.width();
        let base_len = prefix.width() + title_width + 1;
        let fill_len = card_width.saturating_sub(base_len + 1);

        lines.push(Line::from(vec![
            Span::styled(prefix, border_style),
            Span::styled(title.to_string(), border_style),
            Span::styled(" ", border_style),
            Span::styled("─".repeat(fill_len), border_style),
            Span::styled("┐", border_style),
        ]));

        let content_width = card_width.saturating_sub(2 + padding * 2);

        for line in content {
            let line = clip_line(line, content_width);
            let padding_needed = content_width.saturating_sub(line.width());
            let mut spans = Vec::with_capacity(line.spans.len() + 3);
            spans.push(Span::styled("│ ", border_style));
            spans.extend(line.spans.into_iter().map(|span| {
                let style = span.style.bg(self.theme.panel_bg);
                Span::styled(span.content, style)
            }));
            spans.push(Span::styled(" ".repeat(padding_needed), content_bg));
            spans.push(Span::styled(" │", border_style));
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(vec![
            Span::styled("└", border_style),
            Span::styled("─".repeat(card_width.saturating_sub(2)), border_style),
            Span::styled("┘", border_style),
        ]));
    }

    /// Render a code block with syntax highlighting inside a card.
    ///
    /// Lines wider than the card continue on the next row.
    pub(super) fn render_code_block(
        &self, code: &str, language: Option<&str>, width: usize, lines: &mut Vec<Line<'static>>,
    ) {
        let lang = language.unwrap_or("");
        let content_width = card_width(width).saturating_sub(4);
        let mut code_lines: Vec<Line<'static>> = SyntaxHighlighter::shared()
            .highlight_lines(code, lang)
            .into_iter()
            .flat_map(|line| split_line(line, content_width))
            .collect();
        if code_lines.is_empty() {
            code_lines.push(Line::default());
        }

        let title = if lang.is_empty() { "Code".to_string() } else { lang.to_uppercase() };
        self.render_card(&title, self.theme.muted, width, code_lines, lines);
    }
}
