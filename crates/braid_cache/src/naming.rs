//! Build filename and cache key resolution.
//!
//! Pure string functions: given a build name, an optional theme, and a
//! version stamp, compute the on-disk filename and the version-free key
//! used in the version record.

use braid_common::theme_slug;

/// Computes the on-disk filename for a build.
///
/// A themed build is prefixed with the lower-snake-case theme name and a
/// hyphen. A non-zero version is spliced in before the extension as
/// `.v{version}`; a name without an extension has the segment appended.
/// Version 0 means "no stamp" and yields the plain name.
///
/// `build_file_name("libs.js", Some("Red"), 12345)` is `"red-libs.v12345.js"`.
pub fn build_file_name(name: &str, theme: Option<&str>, version: u64) -> String {
    let base = match theme {
        Some(theme) => format!("{}-{}", theme_slug(theme), name),
        None => name.to_string(),
    };
    if version == 0 {
        return base;
    }
    match base.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}.v{version}.{ext}"),
        None => format!("{base}.v{version}"),
    }
}

/// Computes the stable, version-free key a build uses in the version record.
pub fn cache_name(name: &str, theme: Option<&str>) -> String {
    build_file_name(name, theme, 0)
}

/// Reports whether `candidate` is a version-stamped variant of `base`.
///
/// Matches names of the form `{stem}.v{digits}.{ext}` for a `base` of
/// `{stem}.{ext}`, or `{base}.v{digits}` when `base` has no extension.
/// The plain `base` itself is not a variant.
pub fn is_versioned_variant(candidate: &str, base: &str) -> bool {
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (base, None),
    };
    let Some(rest) = candidate.strip_prefix(stem) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(".v") else {
        return false;
    };
    let digits = match ext {
        Some(ext) => match rest.strip_suffix(ext).and_then(|r| r.strip_suffix('.')) {
            Some(digits) => digits,
            None => return false,
        },
        None => rest,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themed_versioned_name() {
        assert_eq!(
            build_file_name("libs.js", Some("Red"), 12345),
            "red-libs.v12345.js"
        );
    }

    #[test]
    fn plain_name_without_version() {
        assert_eq!(build_file_name("libs.js", None, 0), "libs.js");
    }

    #[test]
    fn version_splices_before_last_dot() {
        assert_eq!(build_file_name("admin.panel.css", None, 7), "admin.panel.v7.css");
    }

    #[test]
    fn extensionless_name_appends_version() {
        assert_eq!(build_file_name("bundle", None, 42), "bundle.v42");
    }

    #[test]
    fn multi_word_theme_is_slugged() {
        assert_eq!(
            build_file_name("site.css", Some("Dark Blue"), 0),
            "dark_blue-site.css"
        );
    }

    #[test]
    fn cache_name_is_version_free() {
        assert_eq!(cache_name("libs.js", Some("Red")), "red-libs.js");
        assert_eq!(cache_name("libs.js", None), "libs.js");
    }

    #[test]
    fn versioned_variant_detection() {
        assert!(is_versioned_variant("red-libs.v12345.js", "red-libs.js"));
        assert!(is_versioned_variant("bundle.v42", "bundle"));
        assert!(!is_versioned_variant("red-libs.js", "red-libs.js"));
        assert!(!is_versioned_variant("red-libs.v.js", "red-libs.js"));
        assert!(!is_versioned_variant("red-libs.v12x.js", "red-libs.js"));
        assert!(!is_versioned_variant("other.v12345.js", "red-libs.js"));
    }

    #[test]
    fn variant_of_wrong_extension_rejected() {
        assert!(!is_versioned_variant("libs.v123.css", "libs.js"));
    }

    #[test]
    fn similar_stem_rejected() {
        assert!(!is_versioned_variant("libs2.v123.js", "libs.js"));
    }
}
