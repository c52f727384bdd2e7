mod input;
mod scroll;
mod session;
mod sidebar;

pub use input::InputState;
pub use scroll::{PAGE_LINES, ScrollState};
pub use session::ChatSession;
pub use sidebar::{RESIZE_STEP, SidebarWidth};

use dashchat_core::{AssistantConfig, DashboardContext, PrivacyConfig};

/// Fixed inputs of the shell, resolved from configuration
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub title: String,
    pub greeting: String,
    pub dashboard: DashboardContext,
    /// Label of the profile and service shown in the dashboard area
    pub service_label: String,
    pub privacy: PrivacyConfig,
}

impl ShellSettings {
    pub fn new(assistant: &AssistantConfig, dashboard: DashboardContext) -> Self {
        Self {
            title: assistant.title.clone(),
            greeting: assistant.greeting.clone(),
            dashboard,
            service_label: String::new(),
            privacy: PrivacyConfig::default(),
        }
    }

    pub fn with_service_label(mut self, label: impl Into<String>) -> Self {
        self.service_label = label.into();
        self
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }
}

/// Everything the shell draws, independent of the terminal and the runtime
#[derive(Debug)]
pub struct AppState {
    pub settings: ShellSettings,
    session: Option<ChatSession>,
    /// Bumped on every open; completions from older sessions are dropped
    epoch: u64,
    pub sidebar: SidebarWidth,
    pub scroll: ScrollState,
    pub animation_frame: u8,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: ShellSettings, sidebar: SidebarWidth) -> Self {
        Self {
            settings,
            session: None,
            epoch: 0,
            sidebar,
            scroll: ScrollState::new(),
            animation_frame: 0,
            should_quit: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ChatSession> {
        self.session.as_mut()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.session.as_ref().is_some_and(ChatSession::is_pending)
    }

    /// Mount a fresh session holding only the greeting. No-op when open.
    pub fn open(&mut self) -> u64 {
        if self.session.is_none() {
            self.epoch += 1;
            let session = ChatSession::new(self.settings.greeting.clone(), self.settings.dashboard.clone())
                .with_privacy(self.settings.privacy);
            self.session = Some(session);
            self.scroll = ScrollState::new();
            tracing::debug!(epoch = self.epoch, dashboard_id = %self.settings.dashboard, "assistant panel opened");
        }
        self.epoch
    }

    /// Drop the session. Returns whether a query was still in flight.
    pub fn close(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let pending = session.is_pending();
        tracing::debug!(epoch = self.epoch, pending, turns = session.transcript().len(), "assistant panel closed");
        pending
    }

    /// Open when closed, close when open; returns whether the panel is now open.
    pub fn toggle_panel(&mut self) -> bool {
        if self.is_open() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashchat_core::{MemoryWidthStore, PanelConfig};
    use std::sync::Arc;

    fn state() -> AppState {
        let settings = ShellSettings::new(&AssistantConfig::default(), DashboardContext::Id(5));
        let sidebar = SidebarWidth::load(PanelConfig::default(), Arc::new(MemoryWidthStore::new()));
        AppState::new(settings, sidebar)
    }

    #[test]
    fn test_starts_closed() {
        let state = state();
        assert!(!state.is_open());
        assert!(!state.is_pending());
        assert_eq!(state.epoch(), 0);
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut state = state();
        state.open();
        let session = state.session_mut().unwrap();
        session.submit("hello").unwrap();
        assert_eq!(session.transcript().len(), 2);

        assert!(state.close());
        assert_eq!(state.open(), 2);
        assert_eq!(state.session().unwrap().transcript().len(), 1);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_open_twice_keeps_session() {
        let mut state = state();
        let first = state.open();
        state.session_mut().unwrap().submit("hello");
        assert_eq!(state.open(), first);
        assert_eq!(state.session().unwrap().transcript().len(), 2);
    }

    #[test]
    fn test_toggle() {
        let mut state = state();
        assert!(state.toggle_panel());
        assert!(!state.toggle_panel());
        assert!(!state.is_open());
    }

    #[test]
    fn test_session_uses_dashboard() {
        let mut state = state();
        state.open();
        assert_eq!(state.session().unwrap().dashboard(), &DashboardContext::Id(5));
    }
}
