//! `braid clean` — artifact removal.
//!
//! Removes each selected bundle's built artifact along with every stale
//! versioned variant of it, then drops the bundle's version entry so the
//! next build starts from a clean stamp.

use braid_cache::{is_versioned_variant, BuildCache, BuildTarget};

use crate::pipeline::{make_target, open_cache, resolve_project_root, select_bundles};
use crate::{CleanArgs, GlobalArgs};

/// Runs the `braid clean` command.
///
/// Returns exit code 0 on success; a file that cannot be removed is an
/// error.
pub fn run(args: &CleanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Find project root
    let project_dir = resolve_project_root(global)?;

    // Step 2: Load config
    let config = braid_config::load_config(&project_dir)?;

    if !global.quiet {
        eprintln!(
            "   Cleaning {} v{}",
            config.project.name, config.project.version
        );
    }

    // Step 3: Sweep artifacts and drop version entries
    let bundles = select_bundles(&config, args.bundle.as_deref())?;
    let cache = open_cache(&project_dir, &config);

    let mut removed = 0usize;
    for bundle in &bundles {
        let target = make_target(&project_dir, bundle);
        removed += remove_artifacts(&target, &cache, global)?;
        cache.forget(&target)?;
    }

    if !global.quiet {
        eprintln!("   Result: {removed} file(s) removed");
    }

    Ok(0)
}

/// Removes the bundle's plain artifact and every versioned variant of it.
///
/// Other files in the output directory are left alone. A missing output
/// directory counts as already clean.
fn remove_artifacts(
    target: &BuildTarget,
    cache: &BuildCache,
    global: &GlobalArgs,
) -> Result<usize, Box<dyn std::error::Error>> {
    let base = cache.build_file_name(target, false);
    let dir = &target.output_dir;
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name == base || is_versioned_variant(name, &base) {
            std::fs::remove_file(entry.path())
                .map_err(|e| format!("could not remove {}: {e}", entry.path().display()))?;
            if global.verbose {
                eprintln!("      - {name}");
            }
            removed += 1;
        }
    }
    Ok(removed)
}
