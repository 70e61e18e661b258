//! Shared pipeline helpers for CLI commands.
//!
//! Contains common utilities used by the `build`, `status`, and `clean`
//! commands: project root resolution, cache wiring from the project
//! configuration, bundle selection, and the source-to-artifact compile step.

use std::path::{Path, PathBuf};
use std::time::Duration;

use braid_assets::AssetResolver;
use braid_cache::{
    BuildCache, BuildTarget, FileStore, MemoryCache, RemoteProbe, ResolvedSource, TieredStore,
};
use braid_config::{
    config_modified_time, resolve_all, resolve_bundle, FastBackend, ProjectConfig, ResolvedBundle,
};
use braid_filters::{join_pieces, FilterChain, SourcePiece};

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `braid.toml`.
///
/// Returns the directory containing `braid.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("braid.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find braid.toml in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `braid.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Assembles the build cache described by the project configuration.
///
/// Wires a file store at the configured path (relative paths resolve under
/// the project root), fronts it with the configured fast backend, and hooks
/// up the remote probe with the configured timeout and redirect budget.
pub fn open_cache(root: &Path, config: &ProjectConfig) -> BuildCache {
    let path = match &config.cache.version_file {
        // join replaces wholesale when the configured path is absolute
        Some(p) => root.join(p),
        None => FileStore::default_path(),
    };
    let file = FileStore::new(path);
    let store = match config.cache.fast_backend {
        FastBackend::Memory => TieredStore::with_fast(file, Box::new(MemoryCache::new())),
        FastBackend::None => TieredStore::new(file),
    };
    let probe = RemoteProbe::new(
        Duration::from_secs(config.cache.remote_timeout_secs),
        config.cache.max_redirects,
    );
    BuildCache::new(
        Box::new(store),
        Box::new(probe),
        config_modified_time(root),
    )
}

/// Selects the bundles a command operates on: the named one, or all of them.
pub fn select_bundles(
    config: &ProjectConfig,
    bundle: Option<&str>,
) -> Result<Vec<ResolvedBundle>, Box<dyn std::error::Error>> {
    let selected = match bundle {
        Some(name) => vec![resolve_bundle(config, name)?],
        None => resolve_all(config)?,
    };
    if selected.is_empty() {
        return Err("no bundles defined in braid.toml".into());
    }
    Ok(selected)
}

/// Converts a resolved bundle into a build target rooted at `root`.
pub fn make_target(root: &Path, bundle: &ResolvedBundle) -> BuildTarget {
    BuildTarget {
        name: bundle.name.clone(),
        theme: bundle.theme.clone(),
        sources: bundle.files.clone(),
        output_dir: root.join(&bundle.output_dir),
        versioned: bundle.versioned,
    }
}

/// The source resolver for a project: sources live under the project root,
/// themed overrides under `themes/`.
pub fn make_resolver(root: &Path) -> AssetResolver {
    AssetResolver::with_theme_root(root, root.join("themes"))
}

/// Compiles a bundle into its final text.
///
/// Resolves the target's sources, loads each one (local read or remote
/// fetch), runs the extension's filter chain over each piece, and joins the
/// pieces with origin banners. With `verbose`, prints each input as it is
/// consumed.
pub fn compile_bundle(
    root: &Path,
    target: &BuildTarget,
    resolver: &AssetResolver,
    extension: &str,
    verbose: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let inputs = resolver.resolve_sources(target)?;
    let chain = FilterChain::for_extension(extension);
    let mut pieces = Vec::with_capacity(inputs.len());
    for input in inputs {
        let (origin, raw) = match input {
            ResolvedSource::Local(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("could not read {}: {e}", path.display()))?;
                let origin = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .display()
                    .to_string();
                (origin, content)
            }
            ResolvedSource::Remote(url) => {
                let content = fetch_remote(&url)?;
                (url, content)
            }
        };
        if verbose {
            eprintln!("      + {origin}");
        }
        pieces.push(SourcePiece {
            origin,
            content: chain.apply(&raw),
        });
    }
    Ok(join_pieces(&pieces))
}

/// Fetches the body of a remote source over HTTP.
fn fetch_remote(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| format!("could not fetch {url}: {e}"))?;
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| format!("could not read body of {url}: {e}"))?;
    Ok(body)
}
