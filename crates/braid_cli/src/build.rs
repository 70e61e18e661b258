//! `braid build` — bundle compilation through the version cache.
//!
//! For each selected bundle the pipeline is:
//!
//! 1. Find project root (walk up looking for `braid.toml`)
//! 2. Load config via `braid_config`
//! 3. Skip the bundle when its artifact is still fresh (unless `--force`)
//! 4. Invalidate the bundle's version entry
//! 5. Resolve sources, filter each piece, and join into the compiled text
//! 6. Write the versioned artifact, finalizing the entry

use std::path::{Path, PathBuf};

use braid_assets::AssetResolver;
use braid_cache::{BuildCache, BuildTarget};

use crate::pipeline::{
    compile_bundle, make_resolver, make_target, open_cache, resolve_project_root, select_bundles,
};
use crate::{BuildArgs, GlobalArgs};

/// Runs the `braid build` command.
///
/// Builds every selected bundle that is stale (or all of them with
/// `--force`), continuing past per-bundle failures. Returns exit code 0
/// when every bundle succeeded, 1 when any failed.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Find project root
    let project_dir = resolve_project_root(global)?;

    // Step 2: Load config
    let config = braid_config::load_config(&project_dir)?;

    if !global.quiet {
        eprintln!(
            "   Building {} v{}",
            config.project.name, config.project.version
        );
    }

    // Step 3: Select bundles and wire up the cache
    let bundles = select_bundles(&config, args.bundle.as_deref())?;
    let cache = open_cache(&project_dir, &config);
    let resolver = make_resolver(&project_dir);

    let mut built = 0usize;
    let mut skipped = 0usize;
    let mut failures = 0usize;

    for bundle in &bundles {
        let target = make_target(&project_dir, bundle);

        // Step 4: Skip fresh artifacts
        if !args.force && cache.is_fresh(&target, &resolver) {
            if !global.quiet {
                eprintln!("      Fresh {}", cache.build_file_name(&target, true));
            }
            skipped += 1;
            continue;
        }

        // Steps 5-6: Rebuild under the invalidate/finalize lifecycle
        match rebuild(&project_dir, &target, &bundle.extension, &cache, &resolver, global) {
            Ok(path) => {
                if !global.quiet {
                    eprintln!("      Built {}", path.display());
                }
                built += 1;
            }
            Err(e) => {
                eprintln!("error: bundle '{}': {e}", bundle.name);
                failures += 1;
            }
        }
    }

    if !global.quiet {
        eprintln!("   Result: {built} built, {skipped} fresh, {failures} failed");
    }

    if failures > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Rebuilds a single bundle.
///
/// The entry is invalidated before compilation so an interrupted build
/// leaves the bundle marked stale. The write commits the pending stamp.
fn rebuild(
    root: &Path,
    target: &BuildTarget,
    extension: &str,
    cache: &BuildCache,
    resolver: &AssetResolver,
    global: &GlobalArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    cache.invalidate(target)?;
    let compiled = compile_bundle(root, target, resolver, extension, global.verbose)?;
    std::fs::create_dir_all(&target.output_dir)
        .map_err(|e| format!("could not create {}: {e}", target.output_dir.display()))?;
    let path = cache.write(target, compiled.as_bytes())?;
    Ok(path)
}
