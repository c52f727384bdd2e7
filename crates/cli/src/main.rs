use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dashchat_client::{QueryService, QueryServiceFactory};
use dashchat_core::logging::{LoggingConfig, init_logging};
use dashchat_core::{
    Config, DashboardContext, FileWidthStore, LogTarget, MemoryWidthStore, Profile, WidthStore,
    config::default_config_path,
};
use dashchat_ui::{App, AppState, ChatSession, ShellSettings, SidebarWidth, render_message};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// dashchat - ask questions about a dashboard from the terminal
#[derive(Parser, Debug)]
#[command(name = "dashchat")]
#[command(about = "Conversational assistant panel for dashboards", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to dashchat.toml (default: ./dashchat.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Profile name to use (default: config's default_profile)
    #[arg(short, long, value_name = "PROFILE", global = true)]
    profile: Option<String>,

    /// Dashboard id or slug, overriding the profile's dashboard
    #[arg(short, long, value_name = "ID", global = true)]
    dashboard: Option<DashboardContext>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive dashboard shell with the assistant panel
    Start {
        /// Open the assistant panel immediately
        #[arg(long)]
        open: bool,
    },
    /// Ask a single question and print the answer
    Ask {
        #[arg(required = true, value_name = "PROMPT")]
        prompt: String,
    },
    /// Show configuration and service status
    Status,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when the command ran but its outcome was a failure.
async fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "dashchat", &mut std::io::stdout());
        return Ok(true);
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_or_create_config(&config_path, cli.verbose)?;

    let target = if matches!(cli.command, Commands::Start { .. }) { LogTarget::FileOnly } else { LogTarget::Stderr };
    let _log_guard = init_cli_logging(&config, target, cli.verbose)?;

    if cli.verbose {
        eprintln!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        eprintln!("{} Available profiles: {:?}", "Info:".blue().bold(), config.profile_names());
    }

    let profile = select_profile(&config, cli.profile.as_deref())?;
    let dashboard = cli.dashboard.clone().unwrap_or_else(|| profile.dashboard());

    match cli.command {
        Commands::Start { open } => cmd_start(&config, profile, dashboard, open).await.map(|_| true),
        Commands::Ask { prompt } => cmd_ask(&config, profile, dashboard, &prompt).await,
        Commands::Status => cmd_status(&config, profile, &dashboard, cli.verbose).map(|_| true),
        Commands::Completions { .. } => Ok(true),
    }
}

/// Load config from file, or write the example and stop so it can be edited
fn load_or_create_config(path: &Path, verbose: bool) -> Result<Config> {
    if path.exists() {
        if verbose {
            eprintln!("{} Loading config from {}", "Info:".green().bold(), path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        eprintln!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
        eprintln!("{} Creating config from example...", "Info:".blue().bold());

        std::fs::write(path, Config::example()).context("Failed to create config")?;

        eprintln!(
            "{} Created config at {}. Please edit it with your settings.",
            "Success:".green().bold(),
            path.display()
        );

        anyhow::bail!("Please edit {} with your settings and run again", path.display())
    }
}

fn init_cli_logging(
    config: &Config, target: LogTarget, verbose: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let mut logging = LoggingConfig::from(config.logging.clone()).with_target(target);
    if verbose {
        logging = logging.with_level("debug");
    }
    init_logging(Some(logging)).context("Failed to initialize logging")
}

fn select_profile<'a>(config: &'a Config, name: Option<&str>) -> Result<&'a Profile> {
    let name = name.unwrap_or(&config.default_profile);
    config.profile(name).with_context(|| format!("Failed to load profile '{}'", name))
}

fn ensure_enabled(config: &Config) -> Result<()> {
    if !config.assistant.enabled {
        anyhow::bail!("The AI assistant is disabled ([assistant] enabled = false)");
    }
    Ok(())
}

fn create_service(profile: &Profile) -> Result<Arc<dyn QueryService>> {
    QueryServiceFactory::create_from_config(&profile.service)
        .with_context(|| format!("Failed to create query service for profile '{}'", profile.name))
}

fn width_store() -> Arc<dyn WidthStore> {
    match FileWidthStore::in_state_dir() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "sidebar width will not be remembered");
            Arc::new(MemoryWidthStore::new())
        }
    }
}

fn privacy(config: &Config) -> dashchat_core::PrivacyConfig {
    LoggingConfig::from(config.logging.clone()).privacy
}

/// Run the interactive shell
async fn cmd_start(config: &Config, profile: &Profile, dashboard: DashboardContext, open: bool) -> Result<()> {
    ensure_enabled(config)?;
    let service = create_service(profile)?;

    let settings = ShellSettings::new(&config.assistant, dashboard)
        .with_service_label(format!("{} · {}", profile.name, service.describe()))
        .with_privacy(privacy(config));
    let sidebar = SidebarWidth::load(config.panel.clone(), width_store());

    tracing::info!(profile = %profile.name, service = %service.describe(), "starting shell");

    let mut app = App::new(AppState::new(settings, sidebar), service);
    if open {
        app.open_panel();
    }
    app.run().await.context("Terminal error")
}

/// One turn against the configured service, printed as plain text
async fn cmd_ask(config: &Config, profile: &Profile, dashboard: DashboardContext, prompt: &str) -> Result<bool> {
    ensure_enabled(config)?;
    let service = create_service(profile)?;

    let mut session = ChatSession::new(config.assistant.greeting.clone(), dashboard).with_privacy(privacy(config));
    let Some(dispatch) = session.submit(prompt) else {
        anyhow::bail!("Prompt is empty");
    };

    let outcome = service.query(dispatch.request).await;
    session.settle(dispatch.turn, outcome);

    let Some(answer) = session.transcript().last() else {
        anyhow::bail!("No answer recorded");
    };

    if answer.is_failure() {
        eprintln!("{}", answer.text().red());
        return Ok(false);
    }

    println!("{}", render_message(answer).to_plain_text());
    Ok(true)
}

/// Show current status
fn cmd_status(config: &Config, profile: &Profile, dashboard: &DashboardContext, verbose: bool) -> Result<()> {
    println!("{}", "dashchat Status".green().bold().underline());
    println!();

    println!("{} Configuration", "Info:".blue().bold());
    println!("  Default profile: {}", config.default_profile.cyan());
    println!("  Active profile: {}", profile.name.cyan());
    println!("  Dashboard: {}", dashboard.to_string().cyan());
    let enabled = if config.assistant.enabled { "enabled".green().to_string() } else { "disabled".red().to_string() };
    println!("  Assistant: {}", enabled);
    println!("  Available profiles:");
    for profile_name in config.profile_names() {
        let profile = config.profile(&profile_name)?;
        let target = profile.service.query_url().unwrap_or_else(|| "scripted responses".to_string());
        println!("    - {} ({}, {})", profile_name.cyan(), profile.service.kind(), target);
    }

    if verbose {
        println!();
        println!("{} Panel", "Info:".blue().bold());
        println!("  Id: {}", config.panel.id.cyan());
        println!(
            "  Width: {} (min {}, max {})",
            config.panel.initial_width, config.panel.min_width, config.panel.max_width
        );

        match FileWidthStore::in_state_dir() {
            Ok(store) => {
                println!("  Width store: {}", store.path().display().cyan());
                match store.load(&config.panel.id) {
                    Ok(Some(width)) => println!("  Remembered width: {}", width.to_string().cyan()),
                    Ok(None) => println!("  Remembered width: none"),
                    Err(e) => println!("  Remembered width: {} ({})", "unreadable".yellow(), e),
                }
            }
            Err(e) => println!("  Width store: {} ({})", "unavailable".yellow(), e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["dashchat", "status"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.profile.is_none());
        assert!(cli.dashboard.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::try_parse_from(["dashchat", "--config", "/path/to/dashchat.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/dashchat.toml")));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dashchat", "ask", "hi", "--profile", "offline", "-d", "sales"]).unwrap();
        assert_eq!(cli.profile, Some("offline".to_string()));
        assert_eq!(cli.dashboard, Some(DashboardContext::Slug("sales".to_string())));
    }

    #[test]
    fn test_cli_dashboard_number() {
        let cli = Cli::try_parse_from(["dashchat", "--dashboard", "12", "status"]).unwrap();
        assert_eq!(cli.dashboard, Some(DashboardContext::Id(12)));
    }

    #[test]
    fn test_cli_start_command() {
        let cli = Cli::try_parse_from(["dashchat", "start"]).unwrap();
        assert!(matches!(cli.command, Commands::Start { open: false }));

        let cli = Cli::try_parse_from(["dashchat", "start", "--open"]).unwrap();
        assert!(matches!(cli.command, Commands::Start { open: true }));
    }

    #[test]
    fn test_cli_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["dashchat", "ask"]).is_err());

        let cli = Cli::try_parse_from(["dashchat", "ask", "What is churn?"]).unwrap();
        match cli.command {
            Commands::Ask { prompt } => assert_eq!(prompt, "What is churn?"),
            other => panic!("Expected Ask command, got {:?}", other),
        }
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dashchat.toml");
        std::fs::write(&config_path, Config::example()).unwrap();

        let config = load_or_create_config(&config_path, false).unwrap();
        assert_eq!(config.default_profile, "default");
    }

    #[test]
    fn test_load_or_create_config_not_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dashchat.toml");

        assert!(load_or_create_config(&config_path, false).is_err());
        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("default_profile"));
        assert!(content.contains("[profiles.default]"));
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dashchat.toml");
        std::fs::write(&config_path, "invalid toml").unwrap();

        assert!(load_or_create_config(&config_path, false).is_err());
    }

    fn create_test_config(enabled: bool, responses_file: Option<&Path>) -> Config {
        let file = responses_file.map(|p| format!("responses_file = {:?}\n", p.display().to_string())).unwrap_or_default();
        let toml = format!(
            r#"
default_profile = "offline"

[profiles.offline]
name = "offline"
dashboard_id = 9

[profiles.offline.service]
kind = "mock"
{file}
[assistant]
enabled = {enabled}
"#
        );
        Config::from_toml_str(&toml).unwrap()
    }

    #[test]
    fn test_select_profile() {
        let config = create_test_config(true, None);
        assert_eq!(select_profile(&config, None).unwrap().name, "offline");
        let err = select_profile(&config, Some("nonexistent")).unwrap_err();
        assert!(err.to_string().contains("profile"));
    }

    #[test]
    fn test_cmd_status() {
        let config = create_test_config(true, None);
        let profile = select_profile(&config, None).unwrap();
        assert!(cmd_status(&config, profile, &profile.dashboard(), false).is_ok());
    }

    #[tokio::test]
    async fn test_cmd_ask_success() {
        let temp = TempDir::new().unwrap();
        let responses = temp.path().join("responses.toml");
        std::fs::write(&responses, "[[responses]]\ntype = \"text\"\ncontent = \"Revenue is up 5%\"\n").unwrap();

        let config = create_test_config(true, Some(&responses));
        let profile = select_profile(&config, None).unwrap();
        assert!(cmd_ask(&config, profile, profile.dashboard(), "How is revenue?").await.unwrap());
    }

    #[tokio::test]
    async fn test_cmd_ask_failure_entry() {
        let temp = TempDir::new().unwrap();
        let responses = temp.path().join("responses.toml");
        std::fs::write(&responses, "[[responses]]\ntype = \"error\"\nmessage = \"connection refused\"\n").unwrap();

        let config = create_test_config(true, Some(&responses));
        let profile = select_profile(&config, None).unwrap();
        assert!(!cmd_ask(&config, profile, profile.dashboard(), "How is revenue?").await.unwrap());
    }

    #[tokio::test]
    async fn test_cmd_ask_answer_quoting_error_text_succeeds() {
        let temp = TempDir::new().unwrap();
        let responses = temp.path().join("responses.toml");
        std::fs::write(
            &responses,
            "[[responses]]\ntype = \"text\"\ncontent = \"Error connecting to AI Assistant. is the log line you saw\"\n",
        )
        .unwrap();

        let config = create_test_config(true, Some(&responses));
        let profile = select_profile(&config, None).unwrap();
        assert!(cmd_ask(&config, profile, profile.dashboard(), "What did the log say?").await.unwrap());
    }

    #[tokio::test]
    async fn test_cmd_ask_blank_prompt() {
        let config = create_test_config(true, None);
        let profile = select_profile(&config, None).unwrap();
        assert!(cmd_ask(&config, profile, profile.dashboard(), "   ").await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_assistant_refuses() {
        let config = create_test_config(false, None);
        let profile = select_profile(&config, None).unwrap();
        let err = cmd_ask(&config, profile, profile.dashboard(), "hi").await.unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }
}
