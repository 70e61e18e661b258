//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Loads and validates a `braid.toml` configuration from a project directory.
///
/// Reads `<project_dir>/braid.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("braid.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `braid.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Returns the configuration file's modification time in Unix seconds.
///
/// This is the "configuration changed" signal consumed by freshness checks:
/// any artifact at least as old as the config is rebuilt. When the mtime
/// cannot be read the current time is returned, which conservatively marks
/// every artifact stale rather than silently trusting stale output.
pub fn config_modified_time(project_dir: &Path) -> u64 {
    braid_common::mtime_secs(&project_dir.join("braid.toml")).unwrap_or_else(braid_common::unix_now)
}

/// Validates that required fields are present and bundle definitions are usable.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    for (name, bundle) in &config.bundles {
        if bundle.files.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "bundle '{name}' lists no files"
            )));
        }
        if file_extension(name).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "bundle '{name}' has no extension (expected a name like 'libs.js')"
            )));
        }
    }
    Ok(())
}

/// Extracts the extension from a bundle name, e.g. `"libs.js"` → `"js"`.
///
/// Returns `None` when the name has no dot or ends with one.
pub fn file_extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "site");
        assert_eq!(config.project.version, "0.1.0");
        assert!(config.bundles.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"
description = "Front-end assets"
authors = ["Alice", "Bob"]

[output]
js = "public/js"
css = "public/css"

[cache]
versioning = ["js", "css"]
fast_backend = "memory"
remote_timeout_secs = 5
max_redirects = 3

[bundles."libs.js"]
files = ["vendor/jquery.js", "app/*.js"]

[bundles."site.css"]
files = ["styles/site.css"]
theme = "Red"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.authors.len(), 2);
        assert_eq!(config.output.len(), 2);
        assert_eq!(config.cache.versioning, vec!["js", "css"]);
        assert_eq!(config.cache.remote_timeout_secs, 5);
        assert_eq!(config.cache.max_redirects, 3);
        assert_eq!(config.bundles.len(), 2);
        assert_eq!(config.bundles["site.css"].theme.as_deref(), Some("Red"));
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
version = "0.1.0"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_bundle_errors() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"

[bundles."libs.js"]
files = []
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("lists no files"));
    }

    #[test]
    fn extensionless_bundle_errors() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"

[bundles.libs]
files = ["a.js"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("has no extension"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn file_extension_extraction() {
        assert_eq!(file_extension("libs.js"), Some("js"));
        assert_eq!(file_extension("admin.panel.css"), Some("css"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn config_modified_time_tracks_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("braid.toml"),
            "[project]\nname=\"t\"\nversion=\"0.1.0\"",
        )
        .unwrap();

        let mtime = config_modified_time(dir.path());
        assert!(mtime > 0);
        assert!(braid_common::unix_now() >= mtime);
    }

    #[test]
    fn config_modified_time_missing_is_now() {
        let dir = tempfile::tempdir().unwrap();
        let before = braid_common::unix_now();
        let mtime = config_modified_time(dir.path());
        assert!(mtime >= before);
    }
}
