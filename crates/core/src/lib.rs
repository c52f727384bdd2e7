pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod sidebar;

pub use config::{
    AssistantConfig, Config, ConfigError, DEFAULT_GREETING, DEFAULT_QUERY_ENDPOINT, DEFAULT_TITLE, PanelConfig, Profile,
    ServiceConfig,
};
pub use dashboard::DashboardContext;
pub use error::{Error, Result, StoreError};
pub use logging::{LogTarget, PrivacyConfig, PromptLogging, redact_prompt};
pub use sidebar::{FileWidthStore, MemoryWidthStore, WidthStore};
