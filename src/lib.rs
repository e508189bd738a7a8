//! # dashgen
//!
//! Grafana dashboard generator for account monitoring: reads a list of
//! monitored accounts, fills a per-panel JSON template for each one, and
//! merges the generated panels into a dashboard skeleton.
//!
//! ## Features
//!
//! - **Deterministic layout**: panels tile a two-column grid in input order,
//!   with dense identifiers starting at 2
//! - **Template driven**: panel and dashboard shapes live in JSON template
//!   files, not in code
//! - **Safe substitution**: account names are JSON-escaped before they are
//!   spliced into the panel template
//! - **No partial output**: the document is fully assembled in memory before
//!   the output file is created
//!
//! ## Modules
//!
//! - [`accounts`]: account list loading
//! - [`layout`]: grid placement and identifier assignment
//! - [`panel`]: panel template loading and rendering
//! - [`dashboard`]: skeleton loading, panel injection, output serialization
//! - [`generator`]: the pipeline, end to end
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashgen::DashboardGenerator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = DashboardGenerator::new()
//!         .with_accounts_path("accounts.json")
//!         .with_output_path("dashboards/vaults.json")
//!         .generate()?;
//!
//!     println!("Wrote {} panels to {:?}", report.panels, report.output_path);
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod config;
pub mod dashboard;
pub mod generator;
pub mod layout;
pub mod panel;

// Re-export top-level types for convenience
pub use accounts::{load_accounts, Account, AccountsError};
pub use config::{Config, ConfigError, LoggingConfig, PathsConfig};
pub use dashboard::{Dashboard, DashboardError};
pub use generator::{DashboardGenerator, GenerateError, GenerateReport};
pub use layout::{GridPosition, FIRST_PANEL_ID, GRID_COLUMNS, PANEL_HEIGHT, PANEL_WIDTH};
pub use panel::{Panel, PanelError, PanelTemplate};
