//! Dashboard assembly
//!
//! The dashboard starts from a hand-maintained skeleton: a JSON object
//! holding everything except the generated panels (title, uid, time range,
//! refresh interval, ...). The assembler binds the panel list to the
//! skeleton's `panels` key and serializes the combined document with
//! 4-space indentation, the format the skeleton files are kept in.

use crate::panel::Panel;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while assembling or writing the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to read dashboard template {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Dashboard template {path:?} is not a JSON object: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to serialize dashboard: {0}")]
    Serialize(String),

    #[error("Failed to write output file {path:?}: {error}")]
    Write { path: PathBuf, error: String },
}

/// A dashboard document under assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    doc: Map<String, Value>,
}

impl Dashboard {
    /// Load the dashboard skeleton from a template file.
    pub fn from_template(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path).map_err(|e| DashboardError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let doc: Map<String, Value> =
            serde_json::from_str(&text).map_err(|e| DashboardError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        Ok(Self { doc })
    }

    /// Build a dashboard directly from a JSON object (useful for testing).
    pub fn from_object(doc: Map<String, Value>) -> Self {
        Self { doc }
    }

    /// Bind the ordered panel list to the `panels` key, overwriting any
    /// value the skeleton carried. Every other key passes through
    /// untouched.
    pub fn set_panels(&mut self, panels: Vec<Panel>) {
        let panels = panels.into_iter().map(Value::Object).collect();
        self.doc.insert("panels".to_string(), Value::Array(panels));
    }

    /// Number of panels currently bound to the document.
    pub fn panel_count(&self) -> usize {
        self.doc
            .get("panels")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Look up a top-level key of the document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// Serialize the document with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, DashboardError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);

        self.doc
            .serialize(&mut serializer)
            .map_err(|e| DashboardError::Serialize(e.to_string()))?;

        Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
    }

    /// Serialize the document and write it to `path`.
    ///
    /// The document is rendered in memory first; the output file is not
    /// created until the full document exists, so a failed run never leaves
    /// a partial file behind.
    pub fn write_to(&self, path: &Path) -> Result<(), DashboardError> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| DashboardError::Write {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SKELETON: &str = r#"{
    "title": "Vault Watcher",
    "uid": "vault-watcher",
    "tags": ["vault-watcher"],
    "time": { "from": "now-6h", "to": "now" },
    "refresh": "30s",
    "schemaVersion": 36,
    "panels": ["placeholder that must disappear"]
}"#;

    fn skeleton_dashboard() -> Dashboard {
        let doc = serde_json::from_str(SKELETON).unwrap();
        Dashboard::from_object(doc)
    }

    fn panel(title: &str) -> Panel {
        let mut p = Panel::new();
        p.insert("title".to_string(), Value::from(title));
        p
    }

    #[test]
    fn test_set_panels_overwrites_existing_value() {
        let mut dashboard = skeleton_dashboard();
        assert_eq!(dashboard.panel_count(), 1);

        dashboard.set_panels(vec![panel("a"), panel("b")]);

        assert_eq!(dashboard.panel_count(), 2);
        let panels = dashboard.get("panels").unwrap().as_array().unwrap();
        assert_eq!(panels[0]["title"], "a");
        assert_eq!(panels[1]["title"], "b");
    }

    #[test]
    fn test_other_keys_pass_through_unchanged() {
        let mut dashboard = skeleton_dashboard();
        dashboard.set_panels(vec![panel("a")]);

        assert_eq!(dashboard.get("title").unwrap(), "Vault Watcher");
        assert_eq!(dashboard.get("refresh").unwrap(), "30s");
        assert_eq!(dashboard.get("schemaVersion").unwrap(), 36);
        assert_eq!(dashboard.get("time").unwrap()["from"], "now-6h");
    }

    #[test]
    fn test_empty_panel_list() {
        let mut dashboard = skeleton_dashboard();
        dashboard.set_panels(Vec::new());

        assert_eq!(dashboard.panel_count(), 0);
        assert_eq!(dashboard.get("panels").unwrap(), &Value::Array(Vec::new()));
    }

    #[test]
    fn test_output_uses_four_space_indentation() {
        let mut dashboard = skeleton_dashboard();
        dashboard.set_panels(vec![panel("a")]);

        let json = dashboard.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n    \"title\""));
        // Nested values sit two levels deep
        assert!(json.contains("\n        \"from\": \"now-6h\""));
    }

    #[test]
    fn test_skeleton_key_order_is_preserved() {
        let json = skeleton_dashboard().to_json_pretty().unwrap();

        let title = json.find("\"title\"").unwrap();
        let uid = json.find("\"uid\"").unwrap();
        let tags = json.find("\"tags\"").unwrap();
        assert!(title < uid && uid < tags);
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut dashboard = skeleton_dashboard();
        dashboard.set_panels(vec![panel("a")]);
        dashboard.write_to(&path).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["title"], "Vault Watcher");
        assert_eq!(written["panels"][0]["title"], "a");
    }

    #[test]
    fn test_template_errors() {
        let dir = tempdir().unwrap();

        let missing = Dashboard::from_template(&dir.path().join("nope.template"));
        assert!(matches!(missing, Err(DashboardError::Io { .. })));

        // A top-level array is not a dashboard skeleton
        let array = dir.path().join("array.template");
        std::fs::write(&array, "[1, 2, 3]").unwrap();
        assert!(matches!(
            Dashboard::from_template(&array),
            Err(DashboardError::Parse { .. })
        ));
    }

    #[test]
    fn test_write_to_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.json");

        let err = skeleton_dashboard().write_to(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Write { .. }));
    }
}
