//! Theme name normalization.

/// Normalizes a theme name to its lower-snake-case slug.
///
/// Alphanumeric characters are lowercased; every run of other characters
/// collapses to a single underscore. Leading and trailing underscores are
/// trimmed, so `"Red"` becomes `"red"` and `" Dark Blue "` becomes
/// `"dark_blue"`. The slug is what appears as the filename prefix of a
/// themed bundle and as the theme's override directory name.
pub fn theme_slug(theme: &str) -> String {
    let mut slug = String::with_capacity(theme.len());
    let mut pending_separator = false;

    for c in theme.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}
