use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the collapsed sidebar rail
pub const RAIL_WIDTH: u16 = 3;

/// Columns kept for the dashboard before the sidebar gives way
pub const MIN_DASHBOARD_WIDTH: u16 = 20;

/// Top-level areas of the shell
///
/// The dashboard fills the left; the assistant sidebar (or its collapsed rail
/// when the panel is closed) sits on the right above a one-line footer.
#[derive(Debug, Clone)]
pub struct ShellLayout {
    pub dashboard: Rect,
    /// Open panel area
    pub sidebar: Option<Rect>,
    /// Collapsed rail, shown while the panel is closed
    pub rail: Option<Rect>,
    pub footer: Rect,
}

impl ShellLayout {
    pub fn calculate(area: Rect, panel_open: bool, sidebar_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let main = rows[0];
        let footer = rows[1];

        let right_width = if panel_open {
            match main.width.saturating_sub(MIN_DASHBOARD_WIDTH) {
                0 => main.width,
                room => sidebar_width.min(room),
            }
        } else {
            RAIL_WIDTH.min(main.width)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(right_width)])
            .split(main);

        let (sidebar, rail) = if panel_open { (Some(columns[1]), None) } else { (None, Some(columns[1])) };

        Self { dashboard: columns[0], sidebar, rail, footer }
    }
}

/// Areas inside the open assistant panel
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub input: Rect,
}

impl PanelLayout {
    /// Split the inner area of the panel border: one header row, a
    /// separator, the transcript and a three-row input box.
    pub fn calculate(inner: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(inner);

        Self { header: chunks[0], transcript: chunks[2], input: chunks[3] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_panel_takes_sidebar_width() {
        let layout = ShellLayout::calculate(Rect::new(0, 0, 140, 40), true, 56);
        let sidebar = layout.sidebar.unwrap();
        assert_eq!(sidebar.width, 56);
        assert_eq!(layout.dashboard.width, 84);
        assert_eq!(sidebar.height, 39);
        assert!(layout.rail.is_none());
        assert_eq!(layout.footer.y, 39);
    }

    #[test]
    fn test_closed_panel_shows_rail() {
        let layout = ShellLayout::calculate(Rect::new(0, 0, 100, 30), false, 56);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.rail.unwrap().width, RAIL_WIDTH);
        assert_eq!(layout.dashboard.width, 97);
    }

    #[test]
    fn test_narrow_terminal_keeps_dashboard() {
        let layout = ShellLayout::calculate(Rect::new(0, 0, 60, 20), true, 56);
        assert_eq!(layout.sidebar.unwrap().width, 40);
        assert_eq!(layout.dashboard.width, 20);
    }

    #[test]
    fn test_panel_layout() {
        let panel = PanelLayout::calculate(Rect::new(0, 0, 50, 30));
        assert_eq!(panel.header.height, 1);
        assert_eq!(panel.input.height, 3);
        assert_eq!(panel.transcript.height, 25);
        assert_eq!(panel.transcript.y, 2);
    }
}
