//! Panel generation
//!
//! A panel starts life as template text containing three placeholder
//! tokens. Rendering replaces the tokens with the account name and its grid
//! offsets, parses the result into a JSON object, and stamps the panel
//! identifier. The template stays opaque text until substitution, so the
//! panel's shape (queries, thresholds, visualization type) is entirely the
//! template file's business.

use crate::layout::{self, GridPosition};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder token replaced by the account name.
pub const NAME_TOKEN: &str = "$$NAME$$";

/// Placeholder token replaced by the horizontal grid offset.
pub const X_POS_TOKEN: &str = "$$X_POS$$";

/// Placeholder token replaced by the vertical grid offset.
pub const Y_POS_TOKEN: &str = "$$Y_POS$$";

/// A generated panel document. Always a JSON object.
pub type Panel = Map<String, Value>;

/// Errors that can occur while loading or rendering the panel template
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Failed to read panel template {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Substituted panel for {name:?} is not valid JSON: {error}")]
    Parse { name: String, error: String },

    #[error("Rendered panel for {name:?} is not a JSON object")]
    NotAnObject { name: String },
}

/// Panel template text, loaded once per run and rendered once per account.
#[derive(Debug, Clone)]
pub struct PanelTemplate {
    text: String,
}

impl PanelTemplate {
    /// Load the template text from a file.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        let text = std::fs::read_to_string(path).map_err(|e| PanelError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(Self { text })
    }

    /// Build a template from in-memory text (useful for testing).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Render the panel for `name` at `index` (zero-based input order).
    ///
    /// All occurrences of each token are replaced; the name token normally
    /// appears both in the panel title and inside its query. The tokens are
    /// disjoint, so replacement order does not matter. The name is
    /// JSON-escaped before substitution, which keeps names containing
    /// quotes, backslashes or control characters from corrupting the
    /// document. After parsing, the `id` field is set to `index + 2`,
    /// overwriting whatever the template carried.
    pub fn render(&self, name: &str, index: usize) -> Result<Panel, PanelError> {
        let position = GridPosition::for_index(index);

        let rendered = self
            .text
            .replace(NAME_TOKEN, &escape_json_fragment(name))
            .replace(X_POS_TOKEN, &position.x.to_string())
            .replace(Y_POS_TOKEN, &position.y.to_string());

        let value: Value = serde_json::from_str(&rendered).map_err(|e| PanelError::Parse {
            name: name.to_string(),
            error: e.to_string(),
        })?;

        let mut panel = match value {
            Value::Object(map) => map,
            _ => {
                return Err(PanelError::NotAnObject {
                    name: name.to_string(),
                })
            }
        };

        panel.insert("id".to_string(), Value::from(layout::panel_id(index)));
        Ok(panel)
    }
}

/// Encode `name` as it must appear inside a JSON string literal, without
/// the surrounding quotes.
fn escape_json_fragment(name: &str) -> String {
    let quoted = serde_json::to_string(name).expect("encoding a str cannot fail");
    quoted[1..quoted.len() - 1].to_string()
}
