use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

enum Token {
    Word(Vec<(char, Style)>),
    Break,
}

/// Split styled runs into words, keeping per-character style so a word that
/// mixes emphasis (`**up**,`) stays together.
fn tokenize(runs: &[(String, Style)]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<(char, Style)> = Vec::new();

    for (text, style) in runs {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    if !word.is_empty() {
                        tokens.push(Token::Word(std::mem::take(&mut word)));
                    }
                    tokens.push(Token::Break);
                }
                c if c.is_whitespace() => {
                    if !word.is_empty() {
                        tokens.push(Token::Word(std::mem::take(&mut word)));
                    }
                }
                c => word.push((c, *style)),
            }
        }
    }

    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Merge consecutive characters of the same style into spans.
fn to_line(chars: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut current: Option<Style> = None;

    for (ch, style) in chars {
        if current.is_some_and(|s| s != *style) {
            spans.push(Span::styled(std::mem::take(&mut text), current.unwrap_or_default()));
        }
        current = Some(*style);
        text.push(*ch);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, current.unwrap_or_default()));
    }
    Line::from(spans)
}

/// Greedy word wrap of styled runs to `max_width` columns.
///
/// Whitespace collapses to single spaces styled with `space_style`; `\n`
/// forces a break. Words longer than the width are split by character.
pub(super) fn wrap_runs(runs: &[(String, Style)], max_width: usize, space_style: Style) -> Vec<Line<'static>> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut width = 0usize;

    for token in tokenize(runs) {
        let word = match token {
            Token::Break => {
                lines.push(to_line(&current));
                current.clear();
                width = 0;
                continue;
            }
            Token::Word(word) => word,
        };

        let word_width: usize = word.iter().map(|(ch, _)| char_width(*ch)).sum();
        let separator = usize::from(!current.is_empty());

        if !current.is_empty() && width + separator + word_width > max_width {
            lines.push(to_line(&current));
            current.clear();
            width = 0;
        }

        if word_width > max_width {
            for (ch, style) in word {
                let cw = char_width(ch);
                if width + cw > max_width && !current.is_empty() {
                    lines.push(to_line(&current));
                    current.clear();
                    width = 0;
                }
                current.push((ch, style));
                width += cw;
            }
            continue;
        }

        if !current.is_empty() {
            current.push((' ', space_style));
            width += 1;
        }
        current.extend(word);
        width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(to_line(&current));
    }
    lines
}

/// Wrap a single-style text block, preserving its line structure and the
/// spacing inside each line.
pub(super) fn wrap_text_styled(text: &str, style: Style, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        if source_line.trim().is_empty() {
            lines.push(Line::default());
        } else {
            lines.extend(
                textwrap::wrap(source_line, max_width.max(1))
                    .into_iter()
                    .map(|piece| Line::from(Span::styled(piece.into_owned(), style))),
            );
        }
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

/// Cut `text` to `max_width` columns, marking the cut with `…`.
pub(super) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let cw = char_width(ch);
        if width + cw > max_width - 1 {
            break;
        }
        out.push(ch);
        width += cw;
    }
    out.push('…');
    out
}

/// Clip a styled line to `max_width` columns.
pub(super) fn clip_line(line: Line<'static>, max_width: usize) -> Line<'static> {
    if line.width() <= max_width {
        return line;
    }

    let mut spans = Vec::new();
    let mut remaining = max_width;
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let span_width = span.content.width();
        if span_width <= remaining {
            remaining -= span_width;
            spans.push(span);
        } else {
            spans.push(Span::styled(truncate_to_width(&span.content, remaining), span.style));
            remaining = 0;
        }
    }
    Line::from(spans)
}

/// Break a styled line into rows of at most `max_width` columns, keeping
/// every character and its style.
pub(super) fn split_line(line: Line<'static>, max_width: usize) -> Vec<Line<'static>> {
    let max_width = max_width.max(1);
    if line.width() <= max_width {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;
    for span in line.spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let cw = char_width(ch);
            if row_width + cw > max_width && row_width > 0 {
                if !piece.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                row_width = 0;
            }
            piece.push(ch);
            row_width += cw;
        }
        if !piece.is_empty() {
            row.push(Span::styled(piece, span.style));
        }
    }
    if !row.is_empty() {
        rows.push(Line::from(row));
    }
    rows
}

pub(super) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
