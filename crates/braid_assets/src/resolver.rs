//! Resolution of logical source identifiers to build inputs.
//!
//! The resolver turns each identifier from a bundle definition into concrete
//! inputs: remote URLs pass through, local patterns expand under the source
//! root, and themed builds check a per-theme directory first so a theme can
//! shadow individual files.

use std::collections::HashSet;
use std::path::PathBuf;

use braid_cache::{BuildTarget, ResolvedSource, SourceResolver};
use braid_common::theme_slug;

use crate::discovery::{expand_pattern, is_remote, normalize_remote};
use crate::error::AssetError;

/// Resolves bundle source identifiers against a project's directories.
pub struct AssetResolver {
    source_root: PathBuf,
    theme_root: Option<PathBuf>,
}

impl AssetResolver {
    /// Creates a resolver over a single source root, with no theme lookup.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            theme_root: None,
        }
    }

    /// Creates a resolver that checks `theme_root/<theme-slug>/` before the
    /// source root for themed targets.
    pub fn with_theme_root(source_root: impl Into<PathBuf>, theme_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            theme_root: Some(theme_root.into()),
        }
    }

    /// Resolves one identifier. Theme matches shadow the source root
    /// entirely for that identifier.
    fn lookup(&self, source: &str, theme: Option<&str>) -> Vec<ResolvedSource> {
        if is_remote(source) {
            return vec![ResolvedSource::Remote(normalize_remote(source))];
        }
        if let (Some(theme_root), Some(theme)) = (&self.theme_root, theme) {
            let themed = theme_root.join(theme_slug(theme));
            let matches = expand_pattern(&themed, source);
            if !matches.is_empty() {
                return matches.into_iter().map(ResolvedSource::Local).collect();
            }
        }
        expand_pattern(&self.source_root, source)
            .into_iter()
            .map(ResolvedSource::Local)
            .collect()
    }

    /// Resolves every source of a target into build inputs, in declaration
    /// order with duplicates dropped.
    ///
    /// An identifier that yields nothing is an error here, unlike in
    /// freshness checks: a build must not silently skip an input.
    pub fn resolve_sources(
        &self,
        target: &BuildTarget,
    ) -> Result<Vec<ResolvedSource>, AssetError> {
        let mut seen = HashSet::new();
        let mut inputs = Vec::new();
        for source in &target.sources {
            let resolved = self.lookup(source, target.theme.as_deref());
            if resolved.is_empty() {
                return Err(AssetError::MissingSource {
                    pattern: source.clone(),
                });
            }
            for input in resolved {
                if seen.insert(input.clone()) {
                    inputs.push(input);
                }
            }
        }
        Ok(inputs)
    }
}

impl SourceResolver for AssetResolver {
    fn resolve(&self, target: &BuildTarget, source: &str) -> Vec<ResolvedSource> {
        self.lookup(source, target.theme.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "x").unwrap();
    }

    fn target(sources: &[&str], theme: Option<&str>) -> BuildTarget {
        BuildTarget {
            name: "libs.js".to_string(),
            theme: theme.map(str::to_string),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("out"),
            versioned: true,
        }
    }

    #[test]
    fn local_sources_resolve_under_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "vendor/jquery.js");
        let resolver = AssetResolver::new(dir.path());
        let t = target(&["vendor/jquery.js"], None);

        let inputs = resolver.resolve_sources(&t).unwrap();
        assert_eq!(
            inputs,
            vec![ResolvedSource::Local(dir.path().join("vendor/jquery.js"))]
        );
    }

    #[test]
    fn remote_sources_pass_through() {
        let resolver = AssetResolver::new("src");
        let t = target(&["//cdn.example/lib.js"], None);
        let inputs = resolver.resolve_sources(&t).unwrap();
        assert_eq!(
            inputs,
            vec![ResolvedSource::Remote(
                "https://cdn.example/lib.js".to_string()
            )]
        );
    }

    #[test]
    fn theme_shadows_source_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/site.css");
        touch(dir.path(), "themes/dark_blue/site.css");
        let resolver =
            AssetResolver::with_theme_root(dir.path().join("src"), dir.path().join("themes"));

        let themed = target(&["site.css"], Some("Dark Blue"));
        let inputs = resolver.resolve_sources(&themed).unwrap();
        assert_eq!(
            inputs,
            vec![ResolvedSource::Local(
                dir.path().join("themes/dark_blue/site.css")
            )]
        );
    }

    #[test]
    fn themed_target_falls_back_to_source_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/reset.css");
        let resolver =
            AssetResolver::with_theme_root(dir.path().join("src"), dir.path().join("themes"));

        let themed = target(&["reset.css"], Some("Red"));
        let inputs = resolver.resolve_sources(&themed).unwrap();
        assert_eq!(
            inputs,
            vec![ResolvedSource::Local(dir.path().join("src/reset.css"))]
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path());
        let t = target(&["nope.js"], None);
        let err = resolver.resolve_sources(&t).unwrap_err();
        assert!(matches!(err, AssetError::MissingSource { .. }));
        assert!(err.to_string().contains("nope.js"));
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app/a.js");
        touch(dir.path(), "app/b.js");
        let resolver = AssetResolver::new(dir.path());
        // a.js is named explicitly and also matched by the wildcard
        let t = target(&["app/a.js", "app/*.js"], None);

        let inputs = resolver.resolve_sources(&t).unwrap();
        assert_eq!(
            inputs,
            vec![
                ResolvedSource::Local(dir.path().join("app/a.js")),
                ResolvedSource::Local(dir.path().join("app/b.js"))
            ]
        );
    }

    #[test]
    fn freshness_resolution_is_empty_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path());
        let t = target(&["nope.js"], None);
        assert!(resolver.resolve(&t, "nope.js").is_empty());
    }
}
