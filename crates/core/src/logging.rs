//! Tracing setup for dashchat binaries.
//!
//! Events go to stderr in one of three formats, optionally mirrored as JSON
//! to a daily rolling file. While the terminal UI owns the screen, stderr
//! output is suppressed and only the file sink is installed.
//!
//! # Environment Variables
//!
//! - `DASHCHAT_LOG`: filter directive (like `RUST_LOG`), e.g. `dashchat_client=debug`
//! - `DASHCHAT_LOG_FORMAT`: stderr format, one of `pretty`, `json`, `compact`
//! - `DASHCHAT_LOG_DIR`: directory for the rolling log file (default `~/.dashchat/logs`)
//!
//! Prompts typed into the assistant are user data. Anything that logs one
//! goes through [`redact_prompt`] with the configured [`PrivacyConfig`].

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig as ConfigLoggingConfig};
use std::env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// How prompt text appears in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLogging {
    /// Only the length is recorded.
    None,
    /// First `truncate_length` characters.
    #[default]
    Truncate,
    /// Verbatim.
    Full,
}

impl PromptLogging {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(PromptLogging::None),
            "truncate" => Some(PromptLogging::Truncate),
            "full" => Some(PromptLogging::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptLogging::None => "none",
            PromptLogging::Truncate => "truncate",
            PromptLogging::Full => "full",
        }
    }
}

impl FromStr for PromptLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptLogging::parse_str(s).ok_or_else(|| format!("invalid prompt logging mode: {}", s))
    }
}

/// Where the subscriber writes while the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Stderr, plus the file sink when enabled.
    #[default]
    Stderr,
    /// File sink only; stderr belongs to the terminal UI.
    FileOnly,
}

/// Resolved logging settings, built from the `[logging]` config section.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<FileLoggingConfig>,
    pub privacy: PrivacyConfig,
    pub target: LogTarget,
}

/// Privacy controls for prompt text in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyConfig {
    pub log_prompts: PromptLogging,
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_prompts: PromptLogging::default(), truncate_length: 200 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            file: None,
            privacy: PrivacyConfig::default(),
            target: LogTarget::default(),
        }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();
        let log_prompts = PromptLogging::parse_str(&config.privacy.log_prompts).unwrap_or_default();

        Self {
            level: config.level,
            format,
            file: if config.file.enabled { Some(config.file) } else { None },
            privacy: PrivacyConfig { log_prompts, truncate_length: config.privacy.truncate_length },
            target: LogTarget::default(),
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    fn build_env_filter(&self) -> EnvFilter {
        let directive = env::var("DASHCHAT_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone());

        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    }

    fn build_file_filter(file: &FileLoggingConfig) -> EnvFilter {
        EnvFilter::try_new(&file.level).unwrap_or_else(|_| EnvFilter::new("debug"))
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("DASHCHAT_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if !Self::is_tty() && self.format == LogFormat::Pretty { LogFormat::Compact } else { self.format }
    }

    /// Directory holding `dashchat.log.<date>` files.
    pub fn log_dir() -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("DASHCHAT_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().ok_or_else(|| Error::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".dashchat").join("logs"))
    }
}

/// Install the global tracing subscriber.
///
/// Each sink carries its own filter: stderr follows `DASHCHAT_LOG`, then
/// `RUST_LOG`, then `level`; the file sink follows `[logging.file] level`.
/// The returned guard flushes the file sink on drop and must be held for
/// the life of the process. It is `None` when file logging is disabled.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.target == LogTarget::Stderr {
        let filter = config.build_env_filter();
        let stderr_layer = match config.detect_format() {
            LogFormat::Pretty => fmt::layer().pretty().with_writer(io::stderr).with_ansi(true).with_filter(filter).boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(io::stderr).with_filter(filter).boxed(),
            LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).with_filter(filter).boxed(),
        };
        layers.push(stderr_layer);
    }

    let mut guard = None;
    if let Some(file_config) = &config.file {
        let log_dir = LoggingConfig::log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| Error::Config(format!("failed to create log directory: {}", e)))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "dashchat.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        let filter = LoggingConfig::build_file_filter(file_config);
        layers.push(fmt::layer().json().with_writer(non_blocking).with_filter(filter).boxed());
        guard = Some(file_guard);
    }

    if layers.is_empty() {
        return Ok(None);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install logger: {}", e)))?;

    Ok(guard)
}

/// Render prompt text for a log event according to privacy settings.
pub fn redact_prompt(content: &str, privacy: &PrivacyConfig) -> String {
    let total = content.chars().count();

    match privacy.log_prompts {
        PromptLogging::None => format!("[REDACTED {} chars]", total),
        PromptLogging::Truncate if total > privacy.truncate_length => {
            let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
            truncated.push_str(&format!("... ({} total chars)", total));
            truncated
        }
        PromptLogging::Truncate | PromptLogging::Full => content.to_string(),
    }
}

/// Shorten a path under the home directory to `~/...` for log output.
pub fn sanitize_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }

    path.display().to_string()
}
