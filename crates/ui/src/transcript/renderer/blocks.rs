use crate::content::{Block, Document, Inline, ListItem};

use super::wrap::wrap_runs;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

impl<'a> super::TranscriptRenderer<'a> {
    pub(super) fn render_document(&self, document: &Document, width: usize, lines: &mut Vec<Line<'static>>) {
        self.render_blocks(&document.blocks, width, lines);
    }

    fn render_blocks(&self, blocks: &[Block], width: usize, lines: &mut Vec<Line<'static>>) {
        for (idx, block) in blocks.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            self.render_block(block, width, lines);
        }
    }

    fn render_block(&self, block: &Block, width: usize, lines: &mut Vec<Line<'static>>) {
        let base = Style::default().fg(self.theme.fg);
        match block {
            Block::Paragraph(inlines) => lines.extend(wrap_runs(&self.inline_runs(inlines, base), width, base)),
            Block::Heading { level, content } => {
                let style = match level {
                    1 => base.fg(self.theme.cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    2 => base.fg(self.theme.cyan).add_modifier(Modifier::BOLD),
                    _ => base.add_modifier(Modifier::BOLD),
                };
                lines.extend(wrap_runs(&self.inline_runs(content, style), width, style));
            }
            Block::List { ordered, start, items } => self.render_list(*ordered, *start, items, width, lines),
            Block::Quote(inner) => {
                let bar = Span::styled("│ ", Style::default().fg(self.theme.muted));
                let mut quoted = Vec::new();
                self.render_blocks(inner, width.saturating_sub(2), &mut quoted);
                for line in quoted {
                    let mut spans = vec![bar.clone()];
                    spans.extend(line.spans.into_iter().map(|span| {
                        let style = span.style.add_modifier(Modifier::ITALIC);
                        Span::styled(span.content, style)
                    }));
                    lines.push(Line::from(spans));
                }
            }
            Block::CodeBlock { language, code } => self.render_code_block(code, language.as_deref(), width, lines),
            Block::Table { alignments, header, rows } => self.render_table(alignments, header, rows, width, lines),
            Block::Rule => {
                lines.push(Line::from(Span::styled("─".repeat(width), Style::default().fg(self.theme.border))));
            }
        }
    }

    fn render_list(
        &self, ordered: bool, start: u64, items: &[ListItem], width: usize, lines: &mut Vec<Line<'static>>,
    ) {
        let marker_style = Style::default().fg(self.theme.blue);
        let number_width = if ordered { format!("{}. ", start + items.len() as u64).width() } else { 2 };

        for (idx, item) in items.iter().enumerate() {
            let mut marker = if ordered {
                format!("{:<number_width$}", format!("{}.", start + idx as u64))
            } else {
                "• ".to_string()
            };
            match item.checked {
                Some(true) => marker.push_str("[x] "),
                Some(false) => marker.push_str("[ ] "),
                None => {}
            }
            let indent = marker.width();

            let mut body = Vec::new();
            self.render_blocks(&item.blocks, width.saturating_sub(indent), &mut body);
            if body.is_empty() {
                body.push(Line::default());
            }

            for (line_idx, line) in body.into_iter().enumerate() {
                let lead = if line_idx == 0 {
                    Span::styled(marker.clone(), marker_style)
                } else {
                    Span::raw(" ".repeat(indent))
                };
                let mut spans = vec![lead];
                spans.extend(line.spans);
                lines.push(Line::from(spans));
            }
        }
    }

    /// Map inline runs onto terminal styles layered over `base`.
    fn inline_runs(&self, inlines: &[Inline], base: Style) -> Vec<(String, Style)> {
        let mut runs = Vec::with_capacity(inlines.len());
        for (idx, inline) in inlines.iter().enumerate() {
            let mut style = base;
            if inline.style.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            if inline.style.italic {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if inline.style.strikethrough {
                style = style.add_modifier(Modifier::CROSSED_OUT);
            }
            if inline.style.code {
                style = style.fg(self.theme.yellow).bg(self.theme.panel_bg);
            }
            if inline.is_link() {
                style = style.fg(self.theme.blue).add_modifier(Modifier::UNDERLINED);
            }
            runs.push((inline.text.clone(), style));

            // Target follows the last run of a link, unless the text already is the target.
            if let Some(url) = &inline.link {
                let link_ends = inlines.get(idx + 1).is_none_or(|next| next.link.as_ref() != Some(url));
                if link_ends && inline.text != *url {
                    runs.push((format!(" ({url})"), Style::default().fg(self.theme.muted)));
                }
            }
        }
        runs
    }
}
