use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gitfolio_core::Config;
use gitfolio_server::{create_router, serve, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitfolio",
    about = "Cached HTTP API that turns a GitHub account into a portfolio",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "GITFOLIO_BIND")]
    bind: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub user whose repositories form the portfolio
    #[arg(short, long, env = "GITHUB_USERNAME")]
    username: Option<String>,

    /// Directory with frontend files to serve at /
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,
}

impl Cli {
    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    /// File config with command line and environment overrides applied
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load_or_default()?,
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(token) = &self.token {
            config.github.token = Some(token.clone());
        }
        if let Some(username) = &self.username {
            config.github.username = username.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    match &cli.command {
        None | Some(Commands::Serve) => run_server(&cli).await,
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { force } => init_config(&cli, *force),
            ConfigCommands::Show => show_config(&cli),
        },
    }
}

async fn run_server(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    if config.github.username.trim().is_empty() {
        info!("No GitHub username configured, /api/portfolio will be empty");
    }
    if config.github.token.is_none() {
        info!("No GitHub token configured, using unauthenticated rate limits");
    }

    let state = AppState::from_config(&config)?;
    let router = create_router(state, config.server.static_dir.clone());
    serve(&config.server.bind, router).await
}

fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = cli.config_path()?;
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn show_config(cli: &Cli) -> Result<()> {
    let mut config = cli.load_config()?;
    if config.github.token.is_some() {
        config.github.token = Some("<redacted>".to_string());
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["gitfolio"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[github]\nusername = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "gitfolio",
            "--config",
            path.to_str().unwrap(),
            "--username",
            "from-flag",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.github.username, "from-flag");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_config_init_subcommand() {
        let cli = Cli::try_parse_from(["gitfolio", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Init { force: true }
            })
        ));
    }
}
