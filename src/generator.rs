//! Pipeline orchestration
//!
//! Ties the three stages together: load accounts, render one panel per
//! account, merge the panels into the dashboard skeleton and write the
//! result. The pipeline is single-shot and fully synchronous; any stage
//! failure aborts the whole run, nothing is retried, and the output file is
//! only written once every panel exists.

use crate::accounts::{load_accounts, AccountsError};
use crate::config::{Config, PathsConfig};
use crate::dashboard::{Dashboard, DashboardError};
use crate::panel::{PanelError, PanelTemplate};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from any stage of the pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Account list could not be loaded
    #[error("Account error: {0}")]
    Accounts(#[from] AccountsError),

    /// Panel template could not be loaded or rendered
    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),

    /// Dashboard skeleton could not be loaded, or the output not written
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
}

/// Summary of a completed generation run
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of panels written into the dashboard
    pub panels: usize,
    /// Where the assembled document went
    pub output_path: PathBuf,
}

/// The dashboard generation pipeline, with configurable file locations.
///
/// Locations default to the legacy layout (everything relative to the
/// working directory) and can be overridden individually:
///
/// ```rust,no_run
/// use dashgen::DashboardGenerator;
///
/// # fn main() -> Result<(), dashgen::GenerateError> {
/// let report = DashboardGenerator::new()
///     .with_accounts_path("staging/accounts.json")
///     .with_output_path("staging/out.json")
///     .generate()?;
///
/// println!("{} panels written", report.panels);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DashboardGenerator {
    accounts_path: PathBuf,
    dashboard_template_path: PathBuf,
    panel_template_path: PathBuf,
    output_path: PathBuf,
}

impl Default for DashboardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardGenerator {
    /// Create a generator wired to the legacy file locations.
    pub fn new() -> Self {
        let paths = PathsConfig::default();
        Self {
            accounts_path: paths.accounts,
            dashboard_template_path: paths.dashboard_template,
            panel_template_path: paths.panel_template,
            output_path: paths.output,
        }
    }

    /// Create a generator from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            accounts_path: config.paths.accounts.clone(),
            dashboard_template_path: config.paths.dashboard_template.clone(),
            panel_template_path: config.paths.panel_template.clone(),
            output_path: config.paths.output.clone(),
        }
    }

    /// Builder: override the accounts file location
    pub fn with_accounts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.accounts_path = path.into();
        self
    }

    /// Builder: override the dashboard skeleton location
    pub fn with_dashboard_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dashboard_template_path = path.into();
        self
    }

    /// Builder: override the panel template location
    pub fn with_panel_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.panel_template_path = path.into();
        self
    }

    /// Builder: override the output file location
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Assemble the dashboard in memory without touching the output file.
    ///
    /// This is the whole pipeline minus the final write; dry runs and tests
    /// go through it.
    pub fn assemble(&self) -> Result<Dashboard, GenerateError> {
        let accounts = load_accounts(&self.accounts_path)?;
        tracing::info!(
            "Loaded {} accounts from {:?}",
            accounts.len(),
            self.accounts_path
        );

        let template = PanelTemplate::load(&self.panel_template_path)?;
        let panels = accounts
            .iter()
            .enumerate()
            .map(|(index, account)| {
                tracing::debug!("Generating panel {} for {:?}", index, account.name);
                template.render(&account.name, index)
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!("Generated {} panels", panels.len());

        let mut dashboard = Dashboard::from_template(&self.dashboard_template_path)?;
        dashboard.set_panels(panels);
        Ok(dashboard)
    }

    /// Run the full pipeline and write the output file.
    pub fn generate(&self) -> Result<GenerateReport, GenerateError> {
        let dashboard = self.assemble()?;
        let panels = dashboard.panel_count();

        dashboard.write_to(&self.output_path)?;
        tracing::info!("Wrote {} panels to {:?}", panels, self.output_path);

        Ok(GenerateReport {
            panels,
            output_path: self.output_path.clone(),
        })
    }
}
