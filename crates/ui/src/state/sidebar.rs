use dashchat_core::{PanelConfig, WidthStore};
use std::sync::Arc;

/// Columns added or removed by one resize step
pub const RESIZE_STEP: u16 = 4;

/// Width of the assistant sidebar, remembered per panel id.
pub struct SidebarWidth {
    panel: PanelConfig,
    width: u16,
    store: Arc<dyn WidthStore>,
}

impl std::fmt::Debug for SidebarWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidebarWidth").field("panel", &self.panel.id).field("width", &self.width).finish()
    }
}

impl SidebarWidth {
    /// Restore the remembered width, falling back to the configured initial one.
    pub fn load(panel: PanelConfig, store: Arc<dyn WidthStore>) -> Self {
        let stored = match store.load(&panel.id) {
            Ok(width) => width,
            Err(e) => {
                tracing::warn!(panel = %panel.id, error = %e, "could not read sidebar width");
                None
            }
        };
        let width = panel.clamp_width(stored.unwrap_or(panel.initial_width));
        Self { panel, width, store }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn widen(&mut self) -> u16 {
        self.resize(self.width.saturating_add(RESIZE_STEP))
    }

    pub fn narrow(&mut self) -> u16 {
        self.resize(self.width.saturating_sub(RESIZE_STEP))
    }

    /// Clamp and persist `width`; a failed write keeps the new width in memory.
    pub fn resize(&mut self, width: u16) -> u16 {
        let width = self.panel.clamp_width(width);
        if width == self.width {
            return width;
        }
        self.width = width;

        if let Err(e) = self.store.save(&self.panel.id, width) {
            tracing::warn!(panel = %self.panel.id, width, error = %e, "could not save sidebar width");
        }
        width
    }
}
