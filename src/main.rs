//! dashgen CLI
//!
//! Renders a Grafana dashboard from an account watchlist: one panel per
//! account, tiled two across, merged into a dashboard skeleton. Running
//! without arguments generates with the legacy file layout (everything in
//! the working directory).
//!
//! # Configuration
//!
//! Environment variables:
//! - `DASHGEN_ACCOUNTS`: Account list location (default: accounts.json)
//! - `DASHGEN_DASHBOARD_TEMPLATE`: Dashboard skeleton (default: dash.json.template)
//! - `DASHGEN_PANEL_TEMPLATE`: Panel template (default: panel.json.template)
//! - `DASHGEN_OUTPUT`: Output file (default: out.json)
//! - `DASHGEN_LOG_LEVEL`: Log level (default: info)
//! - `DASHGEN_LOG_FORMAT`: Log format, pretty or json (default: pretty)
//! - `RUST_LOG`: Tracing filter, takes precedence over the configured level

use anyhow::Context;
use clap::{Parser, Subcommand};
use dashgen::config::{self, Config};
use dashgen::DashboardGenerator;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dashgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grafana dashboard generator for account watchlists")]
#[command(
    long_about = "dashgen renders one dashboard panel per watched account and merges\nthe panels into a dashboard skeleton, ready for import into Grafana."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the dashboard (the default when no command is given)
    Generate {
        /// Account list (JSON array of objects with a "name" field)
        #[arg(long)]
        accounts: Option<PathBuf>,

        /// Dashboard skeleton the panels are merged into
        #[arg(long)]
        dashboard_template: Option<PathBuf>,

        /// Panel template with $$NAME$$, $$X_POS$$ and $$Y_POS$$ tokens
        #[arg(long)]
        panel_template: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Assemble the dashboard without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };

    init_logging(&config);
    tracing::debug!("Effective configuration: {:?}", config);

    let command = cli.command.unwrap_or(Commands::Generate {
        accounts: None,
        dashboard_template: None,
        panel_template: None,
        output: None,
        dry_run: false,
    });

    match command {
        Commands::Generate {
            accounts,
            dashboard_template,
            panel_template,
            output,
            dry_run,
        } => {
            let mut generator = DashboardGenerator::from_config(&config);

            if let Some(path) = accounts {
                generator = generator.with_accounts_path(path);
            }
            if let Some(path) = dashboard_template {
                generator = generator.with_dashboard_template_path(path);
            }
            if let Some(path) = panel_template {
                generator = generator.with_panel_template_path(path);
            }
            if let Some(path) = output {
                generator = generator.with_output_path(path);
            }

            if dry_run {
                let dashboard = generator.assemble()?;
                println!("Assembled {} panels", dashboard.panel_count());
                println!("(Dry run - nothing was written)");
            } else {
                let report = generator.generate()?;
                println!("Wrote {} panels to {:?}", report.panels, report.output_path);
            }
        }

        Commands::Config { output } => {
            let config = config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing from the logging section of the config.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("dashgen={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
