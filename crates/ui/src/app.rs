mod event_loop;
mod query;

pub use query::QueryEvent;

use crate::components::{AssistantPanel, DashboardView, Footer, Rail};
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::ShellLayout;
use crate::state::AppState;
use crate::theme::{Theme, ThemePalette};

use crossterm::event::Event;
use dashchat_client::QueryService;
use ratatui::{Frame, style::Style, widgets::Block};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Terminal shell hosting the dashboard and the assistant panel
///
/// Owns the state, the query service and the channel that background query
/// tasks report on. All state changes happen on the task that drives
/// [`App::run`].
pub struct App {
    state: AppState,
    service: Arc<dyn QueryService>,
    theme: ThemePalette,
    query_tx: mpsc::UnboundedSender<QueryEvent>,
    query_rx: mpsc::UnboundedReceiver<QueryEvent>,
    /// Cancelled when the current session closes
    session_token: CancellationToken,
}

impl App {
    pub fn new(state: AppState, service: Arc<dyn QueryService>) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        Self { state, service, theme: Theme::palette(), query_tx, query_rx, session_token: CancellationToken::new() }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn open_panel(&mut self) {
        self.state.open();
    }

    /// Close the panel, abandoning any query still in flight.
    pub fn close_panel(&mut self) {
        if !self.state.is_open() {
            return;
        }
        self.state.close();
        self.session_token.cancel();
        self.session_token = CancellationToken::new();
    }

    pub fn toggle_panel(&mut self) {
        if self.state.is_open() {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    /// Submit the draft; at most one query is started.
    ///
    /// Returns whether a query was dispatched.
    pub fn submit(&mut self) -> bool {
        let epoch = self.state.epoch();
        let Some(dispatch) = self.state.session_mut().and_then(|session| session.submit_draft()) else {
            return false;
        };
        self.spawn_query(epoch, dispatch);
        true
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(action) = EventHandler::handle_event(event, &mut self.state) {
            self.handle_key_action(action);
        }
    }

    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => {
                self.submit();
            }
            KeyAction::TogglePanel => self.toggle_panel(),
            KeyAction::Resized { width } => tracing::debug!(width, "sidebar resized"),
            KeyAction::Scrolled => {}
            KeyAction::Quit => self.state.should_quit = true,
        }
    }

    /// Draw the whole shell into `frame`.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg)), area);

        if let Some(session) = self.state.session() {
            let revision = session.transcript().revision();
            let pending = session.is_pending();
            self.state.scroll.observe(revision, pending);
        }

        let layout = ShellLayout::calculate(area, self.state.is_open(), self.state.sidebar.width());
        DashboardView::new(&self.state.settings, self.theme).render(frame, layout.dashboard);

        if let Some(sidebar) = layout.sidebar
            && let Some(max_back) = AssistantPanel::new(&self.state, self.theme).render(frame, sidebar)
        {
            self.state.scroll.set_max_back(max_back);
        }
        if let Some(rail) = layout.rail {
            Rail::new(self.theme).render(frame, rail);
        }

        Footer::new(self.state.is_open(), self.theme).render(frame, layout.footer);
    }
}
