use crate::content::{ColumnAlign, Inline, inline_text};

use super::wrap::truncate_to_width;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

const MIN_COLUMN_WIDTH: usize = 3;

/// Fit natural column widths into `available` columns of cell text.
///
/// The widest column gives up one column at a time until the table fits or
/// every column is at the minimum.
pub(super) fn fit_columns(natural: &[usize], available: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = natural.iter().map(|w| (*w).max(1)).collect();

    while widths.iter().sum::<usize>() > available {
        let Some((idx, widest)) = widths.iter().copied().enumerate().max_by_key(|(_, w)| *w) else {
            break;
        };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[idx] -= 1;
    }
    widths
}

fn align_cell(text: &str, width: usize, align: ColumnAlign) -> String {
    let text = truncate_to_width(text, width);
    let gap = width.saturating_sub(text.width());
    match align {
        ColumnAlign::Right => format!("{}{}", " ".repeat(gap), text),
        ColumnAlign::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
        ColumnAlign::Left | ColumnAlign::None => format!("{}{}", text, " ".repeat(gap)),
    }
}

impl<'a> super::TranscriptRenderer<'a> {
    /// Draw a table with box characters and a bold header row.
    pub(super) fn render_table(
        &self, alignments: &[ColumnAlign], header: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>], width: usize,
        lines: &mut Vec<Line<'static>>,
    ) {
        let header: Vec<String> = header.iter().map(|cell| inline_text(cell)).collect();
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| inline_text(cell)).collect())
            .collect();

        let columns = rows.iter().map(Vec::len).chain(std::iter::once(header.len())).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let mut natural = vec![0usize; columns];
        for row in std::iter::once(&header).chain(rows.iter()) {
            for (idx, cell) in row.iter().enumerate() {
                natural[idx] = natural[idx].max(cell.width());
            }
        }

        // Each column costs its text plus one space of padding per side and a border.
        let chrome = columns * 3 + 1;
        let widths = fit_columns(&natural, width.saturating_sub(chrome));

        let border = Style::default().fg(self.theme.border).bg(self.theme.panel_bg);
        let cell_style = Style::default().fg(self.theme.fg).bg(self.theme.panel_bg);
        let header_style = cell_style.fg(self.theme.cyan).add_modifier(Modifier::BOLD);

        let rule = |left: &str, mid: &str, right: &str| -> Line<'static> {
            let mut text = String::from(left);
            for (idx, w) in widths.iter().enumerate() {
                if idx > 0 {
                    text.push_str(mid);
                }
                text.push_str(&"─".repeat(w + 2));
            }
            text.push_str(right);
            Line::from(Span::styled(text, border))
        };

        let row_line = |cells: &[String], style: Style| -> Line<'static> {
            let mut spans = vec![Span::styled("│", border)];
            for (idx, w) in widths.iter().enumerate() {
                let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                let align = alignments.get(idx).copied().unwrap_or_default();
                spans.push(Span::styled(format!(" {} ", align_cell(cell, *w, align)), style));
                spans.push(Span::styled("│", border));
            }
            Line::from(spans)
        };

        lines.push(rule("┌", "┬", "┐"));
        lines.push(row_line(&header, header_style));
        lines.push(rule("├", "┼", "┤"));
        for row in &rows {
            lines.push(row_line(row, cell_style));
        }
        lines.push(rule("└", "┴", "┘"));
    }
}
