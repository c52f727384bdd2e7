use crate::{
    state::ChatSession,
    theme::ThemePalette,
    transcript::{RenderOptions, TranscriptRenderer},
};
use ratatui::{Frame, layout::Rect};

/// Scrollable view of a session's transcript, with the loading row while a
/// query is in flight.
pub struct TranscriptView<'a> {
    session: &'a ChatSession,
    theme: ThemePalette,
    animation_frame: u8,
    scroll_back: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(session: &'a ChatSession, theme: ThemePalette) -> Self {
        Self { session, theme, animation_frame: 0, scroll_back: 0 }
    }

    pub fn animation_frame(mut self, frame: u8) -> Self {
        self.animation_frame = frame;
        self
    }

    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Render and return the scroll limit for this area.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) -> usize {
        let options = RenderOptions {
            pending: self.session.is_pending(),
            animation_frame: self.animation_frame,
            show_timestamps: true,
        };
        TranscriptRenderer::with_options(self.session.transcript(), self.theme, options).render(
            frame,
            area,
            self.scroll_back,
        )
    }
}
