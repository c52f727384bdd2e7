pub mod composer;
pub mod dashboard;
pub mod footer;
pub mod header;
pub mod sidebar;
pub mod transcript;

pub use composer::Composer;
pub use dashboard::DashboardView;
pub use footer::Footer;
pub use header::PanelHeader;
pub use sidebar::{AssistantPanel, Rail};
pub use transcript::TranscriptView;
