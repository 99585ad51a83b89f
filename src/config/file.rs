//! Configuration file loading and discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file names searched in each directory, in order.
const CONFIG_FILE_NAMES: &[&str] = &[".sbom-delta.yaml", ".sbom-delta.yml", "sbom-delta.yaml"];

/// File name written by `config init`.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".sbom-delta.yaml";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (`~/.config/sbom-delta/`)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("sbom-delta")))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Load the discovered config file.
///
/// Without any file the defaults are returned together with `None`. An
/// explicitly named file that cannot be loaded is an error; a discovered
/// one is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    let Some(path) = discover_config_file(explicit_path) else {
        return Ok((AppConfig::default(), None));
    };

    match load_config_file(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        Err(e) if explicit_path.is_some() => Err(e),
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            Ok((AppConfig::default(), None))
        }
    }
}

/// Render the default configuration as a commented YAML file.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# sbom-delta configuration\n\
         # Place this file at {DEFAULT_CONFIG_FILE_NAME} in your project root\n\
         # or in ~/.config/sbom-delta/\n\
         # Command-line flags override these values.\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentityStrategy;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".sbom-delta.yaml");
        std::fs::write(&config_path, "options:\n  ignore_version: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
options:
  license_focus: true
  identity: purl
output:
  format: json
  timestamp: false
behavior:
  fail_on_change: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.options.license_focus);
        assert_eq!(config.options.identity, IdentityStrategy::Purl);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(!config.output.timestamp);
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_broken_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "options: [not, a, map]").unwrap();

        let result = load_or_default(Some(&config_path));
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_example_config_round_trips() {
        let example = generate_example_config();
        assert!(example.contains("options:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
