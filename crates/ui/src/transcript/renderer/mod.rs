mod blocks;
mod cards;
mod messages;
mod table;
mod wrap;

use crate::{theme::ThemePalette, transcript::Transcript};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Append the loading row after the last message
    pub pending: bool,
    pub animation_frame: u8,
    pub show_timestamps: bool,
}

/// Renders transcript messages to a frame
pub struct TranscriptRenderer<'a> {
    transcript: &'a Transcript,
    theme: ThemePalette,
    options: RenderOptions,
}

impl<'a> TranscriptRenderer<'a> {
    pub fn new(transcript: &'a Transcript, theme: ThemePalette) -> Self {
        Self { transcript, theme, options: RenderOptions { show_timestamps: true, ..RenderOptions::default() } }
    }

    pub fn with_options(transcript: &'a Transcript, theme: ThemePalette, options: RenderOptions) -> Self {
        Self { transcript, theme, options }
    }

    fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.options.animation_frame as usize % SPINNER_FRAMES.len()]
    }

    /// Lay out every message at `width` content columns.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (idx, message) in self.transcript.snapshot().iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            self.render_message(message, width, &mut lines);
        }

        if self.options.pending {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            self.render_pending_row(&mut lines);
        }
        lines
    }

    /// Render the transcript into `area`, `scroll_back` lines above the bottom.
    ///
    /// Returns the largest useful `scroll_back` for this area so callers can
    /// clamp their scroll state.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, scroll_back: usize) -> usize {
        let padding_x = 1usize;
        let scrollbar_width = 1usize;
        let content_width = (area.width as usize).saturating_sub(padding_x * 2 + scrollbar_width);

        let text_lines = self.lines(content_width);
        let total = text_lines.len();
        let visible = area.height as usize;
        let max_back = total.saturating_sub(visible);
        let back = scroll_back.min(max_back);
        let top = max_back - back;

        let left_pad = Span::styled(" ", Style::default().bg(self.theme.bg));
        let padded: Vec<Line<'static>> = text_lines
            .into_iter()
            .skip(top)
            .take(visible)
            .map(|line| {
                let mut spans = Vec::with_capacity(line.spans.len() + 1);
                spans.push(left_pad.clone());
                spans.extend(line.spans);
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg)), area);
        frame.render_widget(Paragraph::new(Text::from(padded)), area);
        self.render_scrollbar(frame, area, total, top);

        max_back
    }

    /// Scrollbar on the right edge; hidden when everything fits.
    fn render_scrollbar(&self, frame: &mut Frame<'_>, area: Rect, content_height: usize, top: usize) {
        let visible_height = area.height as usize;
        if area.height <= 1 || content_height <= visible_height {
            return;
        }

        let scroll_ratio = top as f64 / (content_height - visible_height) as f64;
        let thumb_size = ((visible_height as f64 / content_height as f64) * visible_height as f64).ceil() as usize;
        let thumb_size = thumb_size.clamp(1, visible_height);
        let thumb_position = (scroll_ratio * (visible_height - thumb_size) as f64).round() as usize;

        let x = area.x + area.width.saturating_sub(1);
        let thumb = Style::default().fg(self.theme.blue).bg(self.theme.bg);
        let track = Style::default().fg(self.theme.border).bg(self.theme.bg);

        for y in 0..visible_height {
            let is_thumb = y >= thumb_position && y < thumb_position + thumb_size;
            let (symbol, style) = if is_thumb { ("┃", thumb) } else { ("│", track) };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(symbol, style))),
                Rect::new(x, area.y + y as u16, 1, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::wrap::line_text;
    use super::*;
    use crate::theme::Theme;
    use crate::transcript::Message;
    use ratatui::{Terminal, backend::TestBackend};

    fn all_text(lines: &[Line<'_>]) -> String {
        lines.iter().map(line_text).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_lines_separate_messages() {
        let mut transcript = Transcript::with_greeting("Hello! Ask me about this dashboard.");
        transcript.append(Message::user("What changed?"));
        let renderer = TranscriptRenderer::new(&transcript, Theme::palette());
        let text = all_text(&renderer.lines(60));

        assert!(text.contains("◆ Assistant"));
        assert!(text.contains("Hello! Ask me about this dashboard."));
        assert!(text.contains("● You"));
        assert!(text.contains("What changed?"));
    }

    #[test]
    fn test_pending_row_only_when_pending() {
        let transcript = Transcript::with_greeting("Hi");
        let idle = TranscriptRenderer::new(&transcript, Theme::palette());
        assert!(!all_text(&idle.lines(40)).contains("Thinking"));

        let options = RenderOptions { pending: true, animation_frame: 3, show_timestamps: false };
        let pending = TranscriptRenderer::with_options(&transcript, Theme::palette(), options);
        let text = all_text(&pending.lines(40));
        assert!(text.contains("Thinking…"));
        assert!(text.contains(SPINNER_FRAMES[3]));
    }

    #[test]
    fn test_render_clamps_scroll_and_shows_bottom() {
        let mut transcript = Transcript::new();
        for idx in 0..20 {
            transcript.append(Message::assistant(format!("answer {idx}")));
        }
        let renderer = TranscriptRenderer::new(&transcript, Theme::palette());

        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut max_back = 0;
        terminal
            .draw(|frame| {
                max_back = renderer.render(frame, frame.area(), usize::MAX);
            })
            .unwrap();
        assert!(max_back > 0);

        terminal
            .draw(|frame| {
                renderer.render(frame, frame.area(), 0);
            })
            .unwrap();
        let buffer = format!("{:?}", terminal.backend().buffer());
        assert!(buffer.contains("answer 19"));
    }
}
