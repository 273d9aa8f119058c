//! Configuration Management
//!
//! Loads the dashboard configuration shared by every widget set in a run.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resource file used when the configuration does not name one
const DEFAULT_RESOURCE_FILE: &str = "resources.json";

/// Configuration for one composition pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalConfig {
    /// Namespaces alarm names and the dashboard name
    pub base_name: String,
    /// Discovered resource inventory (JSON array)
    #[serde(default)]
    pub resource_file: Option<PathBuf>,
    /// Overrides `<BaseName>-Dashboard`
    #[serde(default)]
    pub dashboard_name: Option<String>,
}

impl GlobalConfig {
    pub fn new(base_name: &str) -> Self {
        Self {
            base_name: base_name.to_string(),
            resource_file: None,
            dashboard_name: None,
        }
    }

    /// Load configuration from disk (YAML for `.yaml`/`.yml`, JSON otherwise)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_name.trim().is_empty() {
            bail!("BaseName must not be empty");
        }
        Ok(())
    }

    /// Get effective dashboard name (config override > `<BaseName>-Dashboard`)
    pub fn effective_dashboard_name(&self) -> String {
        self.dashboard_name
            .clone()
            .unwrap_or_else(|| format!("{}-Dashboard", self.base_name))
    }

    /// Get effective resource file. Relative paths resolve against `base_dir`
    /// (normally the directory holding the config file).
    pub fn effective_resource_file(&self, base_dir: &Path) -> PathBuf {
        let file = self
            .resource_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_FILE));

        if file.is_absolute() {
            file
        } else {
            base_dir.join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(
            ".json",
            r#"{"BaseName": "prod", "ResourceFile": "data/resources.json"}"#,
        );
        let config = GlobalConfig::load(file.path()).unwrap();
        assert_eq!(config.base_name, "prod");
        assert_eq!(
            config.resource_file,
            Some(PathBuf::from("data/resources.json"))
        );
        assert_eq!(config.effective_dashboard_name(), "prod-Dashboard");
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(".yaml", "BaseName: staging\nDashboardName: Custom\n");
        let config = GlobalConfig::load(file.path()).unwrap();
        assert_eq!(config.base_name, "staging");
        assert_eq!(config.effective_dashboard_name(), "Custom");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let file = write_temp(
            ".json",
            r#"{"BaseName": "prod", "TagKey": "iem", "Regions": ["eu-west-1"]}"#,
        );
        assert!(GlobalConfig::load(file.path()).is_ok());
    }

    #[test]
    fn test_empty_base_name_rejected() {
        let file = write_temp(".json", r#"{"BaseName": "  "}"#);
        assert!(GlobalConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = GlobalConfig::load(Path::new("/nonexistent/cwdash.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_effective_resource_file() {
        let config = GlobalConfig::new("prod");
        assert_eq!(
            config.effective_resource_file(Path::new("/etc/cwdash")),
            PathBuf::from("/etc/cwdash/resources.json")
        );

        let mut config = GlobalConfig::new("prod");
        config.resource_file = Some(PathBuf::from("/data/inventory.json"));
        assert_eq!(
            config.effective_resource_file(Path::new("/etc/cwdash")),
            PathBuf::from("/data/inventory.json")
        );
    }
}
