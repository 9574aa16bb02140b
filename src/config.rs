use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::generator::{WorkflowConfig, DEFAULT_RUNNER, DEFAULT_RUNTIME_VERSIONS};

/// Configuration file names searched in the current directory, in order.
const CANDIDATES: [&str; 4] = [
    "jenkins2gha.toml",
    "jenkins2gha.json",
    "jenkins2gha.yaml",
    "jenkins2gha.yml",
];

/// Configuration file structure for jenkins2gha.
///
/// Lets users keep their preferred Java versions and runner label next to the
/// repositories they convert instead of repeating them on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Workflow generation settings
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Report output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConversionConfig {
    /// Java versions for the build matrix; the last one publishes artifacts
    #[serde(default = "default_java_versions")]
    pub java_versions: Vec<String>,

    /// GitHub Actions runner label
    #[serde(default = "default_runner")]
    pub runner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Pretty-print the JSON report
    #[serde(default)]
    pub pretty: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            java_versions: default_java_versions(),
            runner: default_runner(),
        }
    }
}

fn default_java_versions() -> Vec<String> {
    DEFAULT_RUNTIME_VERSIONS.iter().map(ToString::to_string).collect()
}

fn default_runner() -> String {
    DEFAULT_RUNNER.to_string()
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./jenkins2gha.toml
    /// 3. ./jenkins2gha.json
    /// 4. ./jenkins2gha.yaml
    /// 5. ./jenkins2gha.yml
    ///
    /// Returns default configuration if no file is found. A specified path
    /// that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        Self::load_from_dir(Path::new("."))
    }

    /// Load the first candidate configuration file found in `dir`.
    fn load_from_dir(dir: &Path) -> Result<Self> {
        for candidate in &CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }

    /// Builds the generator settings, letting command-line values win over the file.
    pub fn workflow_config(
        &self,
        java_versions: Option<Vec<String>>,
        runner: Option<String>,
    ) -> Result<WorkflowConfig> {
        let java_versions = java_versions.unwrap_or_else(|| self.conversion.java_versions.clone());
        let runner = runner.unwrap_or_else(|| self.conversion.runner.clone());

        WorkflowConfig::new(java_versions, runner).context("Invalid workflow settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.java_versions, vec!["17", "21"]);
        assert_eq!(config.conversion.runner, "ubuntu-latest");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
[conversion]
java-versions = ["11", "17", "21"]
runner = "self-hosted"

[output]
pretty = true
"#;
        write!(temp_file, "{toml_content}").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.conversion.java_versions, vec!["11", "17", "21"]);
        assert_eq!(config.conversion.runner, "self-hosted");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config_keeps_missing_defaults() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp_file, r#"{{ "conversion": {{ "runner": "macos-latest" }} }}"#).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.conversion.runner, "macos-latest");
        assert_eq!(config.conversion.java_versions, vec!["17", "21"]);
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yml").unwrap();
        write!(temp_file, "conversion:\n  java-versions: ['21']\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.conversion.java_versions, vec!["21"]);
    }

    #[test]
    fn test_load_unknown_extension_tries_all_formats() {
        let mut temp_file = NamedTempFile::with_suffix(".conf").unwrap();
        write!(temp_file, "conversion:\n  runner: windows-latest\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.conversion.runner, "windows-latest");
    }

    #[test]
    fn test_load_nonexistent_config_fails() {
        let err = Config::load(Some(Path::new("nonexistent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_from_directory_candidates() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("jenkins2gha.yaml"),
            "conversion:\n  runner: ubuntu-22.04\n",
        )
        .unwrap();

        let config = Config::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.conversion.runner, "ubuntu-22.04");
    }

    #[test]
    fn test_load_from_empty_directory_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.conversion.runner, "ubuntu-latest");
    }

    #[test]
    fn test_cli_values_override_file() {
        let config = Config {
            conversion: ConversionConfig {
                java_versions: vec!["11".to_string()],
                runner: "self-hosted".to_string(),
            },
            output: OutputConfig::default(),
        };

        let merged = config
            .workflow_config(Some(vec!["17".to_string(), "21".to_string()]), None)
            .unwrap();
        assert_eq!(merged.runtime_versions(), ["17", "21"]);
        assert_eq!(merged.runner(), "self-hosted");
    }

    #[test]
    fn test_empty_versions_rejected() {
        let config = Config {
            conversion: ConversionConfig {
                java_versions: vec![],
                runner: "ubuntu-latest".to_string(),
            },
            output: OutputConfig::default(),
        };

        assert!(config.workflow_config(None, None).is_err());
    }
}
