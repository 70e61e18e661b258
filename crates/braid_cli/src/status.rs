//! `braid status` — freshness reporting without building.
//!
//! Evaluates every selected bundle against the version cache and prints one
//! line per bundle with its freshness and its current build filename.

use crate::pipeline::{
    make_resolver, make_target, open_cache, resolve_project_root, select_bundles,
};
use crate::{GlobalArgs, StatusArgs};

/// Runs the `braid status` command.
///
/// Prints a `fresh`/`stale` line per bundle to stdout. Returns exit code 0
/// when every bundle is fresh, 1 when any is stale, so scripts can gate a
/// build step on it.
pub fn run(args: &StatusArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Find project root
    let project_dir = resolve_project_root(global)?;

    // Step 2: Load config
    let config = braid_config::load_config(&project_dir)?;

    if !global.quiet {
        eprintln!(
            "   Status of {} v{}",
            config.project.name, config.project.version
        );
    }

    // Step 3: Evaluate each bundle
    let bundles = select_bundles(&config, args.bundle.as_deref())?;
    let cache = open_cache(&project_dir, &config);
    let resolver = make_resolver(&project_dir);

    let mut stale = 0usize;
    for bundle in &bundles {
        let target = make_target(&project_dir, bundle);
        let fresh = cache.is_fresh(&target, &resolver);
        if !fresh {
            stale += 1;
        }
        let marker = if fresh { "fresh" } else { "stale" };
        println!("{marker}  {}", cache.build_file_name(&target, true));
    }

    if !global.quiet {
        eprintln!("   Result: {} bundle(s), {stale} stale", bundles.len());
    }

    if stale > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
