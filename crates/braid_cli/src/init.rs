//! `braid init` — project scaffolding command.
//!
//! Creates a new braid project directory with standard layout: `scripts/`,
//! `styles/`, `themes/`, the `public/` output tree, a `braid.toml` config
//! file, and starter script and stylesheet sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Runs the `braid init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory.
/// Returns exit code 0 on success.
pub fn run(name: Option<String>) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{}' already exists", n).into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    let project_name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my_site");

    eprintln!("  Creating new braid project `{project_name}`");

    create_directories(&project_dir)?;
    write_braid_toml(&project_dir, project_name)?;
    write_script_file(&project_dir)?;
    write_style_file(&project_dir)?;

    eprintln!("     Created {}", project_dir.join("braid.toml").display());
    eprintln!(
        "     Created {}",
        project_dir.join("scripts").join("app.js").display()
    );
    eprintln!(
        "     Created {}",
        project_dir.join("styles").join("site.css").display()
    );

    Ok(0)
}

/// Creates the standard project directories.
fn create_directories(root: &Path) -> io::Result<()> {
    for dir in &["scripts", "styles", "themes", "public/js", "public/css"] {
        fs::create_dir_all(root.join(dir))?;
    }
    Ok(())
}

/// Writes the `braid.toml` configuration file.
fn write_braid_toml(root: &Path, name: &str) -> io::Result<()> {
    let content = format!(
        r#"[project]
name = "{name}"
version = "0.1.0"

[output]
js = "public/js"
css = "public/css"

[cache]
versioning = ["js", "css"]

[bundles."app.js"]
files = ["scripts/*.js"]

[bundles."site.css"]
files = ["styles/site.css"]
"#
    );
    fs::write(root.join("braid.toml"), content)
}

/// Writes a starter script source.
fn write_script_file(root: &Path) -> io::Result<()> {
    let content = r#"(function () {
    "use strict";

    // TODO: Add your scripts here
})();
"#;
    fs::write(root.join("scripts").join("app.js"), content)
}

/// Writes a starter stylesheet source.
fn write_style_file(root: &Path) -> io::Result<()> {
    let content = r#"/* Site-wide styles. */

body {
    margin: 0;
    font-family: sans-serif;
}
"#;
    fs::write(root.join("styles").join("site.css"), content)
}
