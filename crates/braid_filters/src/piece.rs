//! Assembly of filtered source pieces into one artifact body.

/// One resolved input's content, labeled with where it came from.
#[derive(Debug, Clone)]
pub struct SourcePiece {
    /// Path or URL the content was read from.
    pub origin: String,
    /// The content, already filtered.
    pub content: String,
}

/// Concatenates pieces into one artifact body.
///
/// Each piece is preceded by a banner comment naming its origin, pieces are
/// separated by a blank line, and the result ends with a newline. Banners
/// are added after filtering so a comment-stripping filter cannot eat them.
pub fn join_pieces(pieces: &[SourcePiece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("/* ");
        out.push_str(&piece.origin);
        out.push_str(" */\n");
        out.push_str(piece.content.trim_end());
        out.push('\n');
    }
    out
}
