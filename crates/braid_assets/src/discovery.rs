//! Source file discovery and pattern expansion.
//!
//! Source identifiers are either remote URLs or paths relative to a root
//! directory. Paths may contain `*` wildcards within individual segments;
//! a wildcard never crosses a `/`. Matches within one pattern come back
//! sorted so build output is reproducible.

use std::path::{Path, PathBuf};

/// Returns `true` when a source identifier names a remote resource.
///
/// Recognizes explicit `http`/`https` URLs and protocol-relative `//host`
/// references.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://") || source.starts_with("//")
}

/// Normalizes a remote identifier to a fetchable URL.
///
/// Protocol-relative references get an `https` scheme.
pub fn normalize_remote(source: &str) -> String {
    if source.starts_with("//") {
        format!("https:{source}")
    } else {
        source.to_string()
    }
}

/// Expands one pattern under a root directory into matching files, sorted.
///
/// A pattern without wildcards names a single file; it yields that file
/// when present and nothing otherwise. Directories never match. Dot files
/// are skipped unless the segment asks for them explicitly.
pub fn expand_pattern(root: &Path, pattern: &str) -> Vec<PathBuf> {
    if !pattern.contains('*') {
        let path = root.join(pattern);
        return if path.is_file() { vec![path] } else { Vec::new() };
    }
    let segments: Vec<&str> = pattern.split('/').collect();
    let mut matches = Vec::new();
    descend(root, &segments, &mut matches);
    matches.sort();
    matches
}

/// Recursively matches pattern segments against directory entries.
fn descend(dir: &Path, segments: &[&str], out: &mut Vec<PathBuf>) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') && !segment.starts_with('.') {
            continue;
        }
        if !segment_matches(name, segment) {
            continue;
        }
        if rest.is_empty() {
            if path.is_file() {
                out.push(path);
            }
        } else if path.is_dir() {
            descend(&path, rest, out);
        }
    }
}

/// Matches one path component against one pattern segment.
fn segment_matches(name: &str, segment: &str) -> bool {
    match segment.split_once('*') {
        None => name == segment,
        Some((prefix, rest)) => match name.strip_prefix(prefix) {
            Some(after) => match_after_star(after, rest),
            None => false,
        },
    }
}

/// Matches the remainder of a name against a pattern that followed a `*`.
fn match_after_star(name: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        None => name.ends_with(pattern),
        Some((literal, rest)) => {
            let mut search = name;
            while let Some(pos) = search.find(literal) {
                if match_after_star(&search[pos + literal.len()..], rest) {
                    return true;
                }
                if literal.is_empty() {
                    break;
                }
                search = &search[pos + 1..];
            }
            false
        }
    }
}
