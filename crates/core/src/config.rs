use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::DashboardContext;
use crate::error::Result;

/// Endpoint of the chat query route on a dashboard server
pub const DEFAULT_QUERY_ENDPOINT: &str = "/api/v1/ai_chat/query";

/// Greeting placed at the top of every new conversation
pub const DEFAULT_GREETING: &str = "Welcome! How can I help you analyze this dashboard today?";

/// Title shown in the panel header
pub const DEFAULT_TITLE: &str = "AI Assistant";

/// Query service backing a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServiceConfig {
    /// Dashboard server reached over HTTP
    Http {
        /// Scheme, host and optional port, e.g. "http://localhost:8088"
        base_url: String,
        /// Path of the query route
        #[serde(default = "default_endpoint")]
        endpoint: String,
        /// Transport timeout for a single query
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// Scripted offline responses
    Mock {
        /// TOML file with `[[responses]]` entries
        #[serde(default)]
        responses_file: Option<PathBuf>,
        /// Artificial latency before each reply
        #[serde(default)]
        delay_ms: u64,
    },
}

fn default_endpoint() -> String {
    DEFAULT_QUERY_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl ServiceConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceConfig::Http { .. } => "http",
            ServiceConfig::Mock { .. } => "mock",
        }
    }

    /// Full URL of the query route (HTTP services only)
    pub fn query_url(&self) -> Option<String> {
        match self {
            ServiceConfig::Http { base_url, endpoint, .. } => {
                let base = base_url.trim_end_matches('/');
                if endpoint.starts_with('/') {
                    Some(format!("{}{}", base, endpoint))
                } else {
                    Some(format!("{}/{}", base, endpoint))
                }
            }
            ServiceConfig::Mock { .. } => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            ServiceConfig::Http { timeout_secs, .. } => Duration::from_secs(*timeout_secs),
            ServiceConfig::Mock { .. } => Duration::from_secs(default_timeout_secs()),
        }
    }
}

/// A named dashboard server target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Profile name
    pub name: String,

    /// Dashboard the panel is opened against (defaults to 0)
    #[serde(default)]
    pub dashboard_id: Option<DashboardContext>,

    /// Query service selection
    pub service: ServiceConfig,
}

impl Profile {
    pub fn dashboard(&self) -> DashboardContext {
        self.dashboard_id.clone().unwrap_or_default()
    }
}

/// Assistant feature switches and copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistantConfig {
    /// Whether the assistant may be opened at all
    pub enabled: bool,
    pub title: String,
    pub greeting: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { enabled: true, title: DEFAULT_TITLE.to_string(), greeting: DEFAULT_GREETING.to_string() }
    }
}

/// Resizable sidebar hosting the assistant panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Key under which the user-resized width is remembered
    pub id: String,
    pub initial_width: u16,
    pub min_width: u16,
    pub max_width: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { id: "ai-chat".to_string(), initial_width: 56, min_width: 32, max_width: 120 }
    }
}

impl PanelConfig {
    pub fn clamp_width(&self, width: u16) -> u16 {
        width.clamp(self.min_width, self.max_width)
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: FileLoggingConfig,
    pub privacy: PrivacyLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            file: FileLoggingConfig::default(),
            privacy: PrivacyLoggingConfig::default(),
        }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: "debug".to_string() }
    }
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrivacyLoggingConfig {
    /// `none`, `truncate` or `full`
    pub log_prompts: String,
    pub truncate_length: usize,
}

impl Default for PrivacyLoggingConfig {
    fn default() -> Self {
        Self { log_prompts: "truncate".to_string(), truncate_length: 200 }
    }
}

/// Root configuration structure for dashchat.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default profile name
    #[serde(default = "default_profile")]
    pub default_profile: String,

    /// Named profiles
    pub profiles: HashMap<String, Profile>,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_profile() -> String {
    "default".to_string()
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Get the default profile
    pub fn default_profile(&self) -> Result<&Profile> {
        self.profile(&self.default_profile)
    }

    /// Get a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        use crate::Error;

        self.profiles
            .get(name)
            .ok_or_else(|| Error::Config(ConfigError::ProfileNotFound(name.to_string()).to_string()))
    }

    /// Get all profile names, sorted
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if !self.profiles.contains_key(&self.default_profile) {
            return Err(Error::Config(
                ConfigError::ProfileNotFound(self.default_profile.clone()).to_string(),
            ));
        }

        for (name, profile) in &self.profiles {
            if let ServiceConfig::Http { base_url, timeout_secs, .. } = &profile.service {
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(Error::Config(
                        ConfigError::InvalidBaseUrl(format!("{} (profile '{}')", base_url, name)).to_string(),
                    ));
                }
                if *timeout_secs == 0 {
                    return Err(Error::Config(ConfigError::ZeroTimeout(name.clone()).to_string()));
                }
            }
        }

        let panel = &self.panel;
        if panel.min_width > panel.max_width
            || panel.initial_width < panel.min_width
            || panel.initial_width > panel.max_width
        {
            return Err(Error::Config(
                ConfigError::InvalidPanelWidth {
                    min: panel.min_width,
                    initial: panel.initial_width,
                    max: panel.max_width,
                }
                .to_string(),
            ));
        }

        if panel.id.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyPanelId.to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# dashchat configuration
# Copy this file to dashchat.toml and customize as needed

# Default profile to use when no profile is specified
default_profile = "default"

[profiles.default]
name = "default"
# Dashboard the assistant answers questions about (number or slug)
dashboard_id = 1

[profiles.default.service]
# "http" talks to a dashboard server, "mock" replays scripted answers
kind = "http"
base_url = "http://localhost:8088"
# endpoint = "/api/v1/ai_chat/query"
timeout_secs = 60

[profiles.offline]
name = "offline"

[profiles.offline.service]
kind = "mock"
# responses_file = "mock_responses.toml"
delay_ms = 400

[assistant]
enabled = true
title = "AI Assistant"
greeting = "Welcome! How can I help you analyze this dashboard today?"

[panel]
id = "ai-chat"
initial_width = 56
min_width = 32
max_width = 120

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"

[logging.privacy]
# "none", "truncate" or "full"
log_prompts = "truncate"
truncate_length = 200
"#
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_profile: default_profile(),
            profiles: HashMap::new(),
            assistant: AssistantConfig::default(),
            panel: PanelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    PathBuf::from("dashchat.toml")
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Profile not found
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// Base URL is not an absolute http(s) URL
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Timeout of zero seconds
    #[error("timeout must be positive for profile '{0}'")]
    ZeroTimeout(String),

    /// Panel width bounds are inconsistent
    #[error("invalid panel width: min {min}, initial {initial}, max {max}")]
    InvalidPanelWidth { min: u16, initial: u16, max: u16 },

    /// Panel id is blank
    #[error("panel id must not be empty")]
    EmptyPanelId,
}
