//! Bundle resolution: joining bundle definitions with output and cache settings.

use crate::error::ConfigError;
use crate::loader::file_extension;
use crate::types::ProjectConfig;
use std::path::PathBuf;

/// A fully resolved bundle with its output location and versioning policy attached.
///
/// The extension is taken from the bundle name, the output directory comes from
/// the `[output]` map keyed by that extension, and versioning is enabled when
/// the extension appears in `cache.versioning`.
#[derive(Debug, Clone)]
pub struct ResolvedBundle {
    /// The bundle name as written in configuration, e.g. `libs.js`.
    pub name: String,
    /// The extension extracted from the name, e.g. `js`.
    pub extension: String,
    /// Optional theme applied when locating source files.
    pub theme: Option<String>,
    /// Source file patterns, in declaration order.
    pub files: Vec<String>,
    /// Directory the built artifact is written to.
    pub output_dir: PathBuf,
    /// Whether artifacts of this bundle carry a version stamp in their filename.
    pub versioned: bool,
}

/// Resolves a named bundle against the output and cache sections.
pub fn resolve_bundle(
    config: &ProjectConfig,
    bundle_name: &str,
) -> Result<ResolvedBundle, ConfigError> {
    let bundle = config
        .bundles
        .get(bundle_name)
        .ok_or_else(|| ConfigError::UnknownBundle(bundle_name.to_string()))?;

    let extension = file_extension(bundle_name)
        .ok_or_else(|| {
            ConfigError::ValidationError(format!("bundle '{bundle_name}' has no extension"))
        })?
        .to_string();

    let output_dir = config
        .output
        .get(&extension)
        .ok_or_else(|| ConfigError::MissingOutput(extension.clone()))?;

    Ok(ResolvedBundle {
        name: bundle_name.to_string(),
        versioned: config.cache.versioning.iter().any(|e| e == &extension),
        extension,
        theme: bundle.theme.clone(),
        files: bundle.files.clone(),
        output_dir: PathBuf::from(output_dir),
    })
}

/// Resolves every bundle in the configuration, in name order.
pub fn resolve_all(config: &ProjectConfig) -> Result<Vec<ResolvedBundle>, ConfigError> {
    config
        .bundles
        .keys()
        .map(|name| resolve_bundle(config, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    const BASE: &str = r#"
[project]
name = "site"
version = "0.1.0"

[output]
js = "public/js"
css = "public/css"

[cache]
versioning = ["js"]

[bundles."libs.js"]
files = ["vendor/jquery.js", "app/*.js"]

[bundles."site.css"]
files = ["styles/site.css"]
theme = "Red"
"#;

    #[test]
    fn resolve_basic_bundle() {
        let config = load_config_from_str(BASE).unwrap();
        let resolved = resolve_bundle(&config, "libs.js").unwrap();
        assert_eq!(resolved.name, "libs.js");
        assert_eq!(resolved.extension, "js");
        assert_eq!(resolved.output_dir, PathBuf::from("public/js"));
        assert_eq!(resolved.files.len(), 2);
        assert!(resolved.versioned);
        assert!(resolved.theme.is_none());
    }

    #[test]
    fn versioning_follows_extension_list() {
        let config = load_config_from_str(BASE).unwrap();
        // css is not in cache.versioning
        let resolved = resolve_bundle(&config, "site.css").unwrap();
        assert!(!resolved.versioned);
        assert_eq!(resolved.theme.as_deref(), Some("Red"));
    }

    #[test]
    fn unknown_bundle_errors() {
        let config = load_config_from_str(BASE).unwrap();
        let err = resolve_bundle(&config, "nonexistent.js").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBundle(_)));
    }

    #[test]
    fn missing_output_dir_errors() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"

[bundles."app.wasm"]
files = ["app.wat"]
"#;
        let config = load_config_from_str(toml).unwrap();
        let err = resolve_bundle(&config, "app.wasm").unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutput(_)));
        assert!(err.to_string().contains("wasm"));
    }

    #[test]
    fn resolve_all_covers_every_bundle() {
        let config = load_config_from_str(BASE).unwrap();
        let all = resolve_all(&config).unwrap();
        assert_eq!(all.len(), 2);
        // BTreeMap keys come out sorted
        assert_eq!(all[0].name, "libs.js");
        assert_eq!(all[1].name, "site.css");
    }

    #[test]
    fn multi_dot_name_uses_last_extension() {
        let toml = r#"
[project]
name = "site"
version = "0.1.0"

[output]
css = "public/css"

[bundles."admin.panel.css"]
files = ["admin.css"]
"#;
        let config = load_config_from_str(toml).unwrap();
        let resolved = resolve_bundle(&config, "admin.panel.css").unwrap();
        assert_eq!(resolved.extension, "css");
    }
}
