use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Reduce a client-supplied filename to a name safe to join under the
/// upload directory: the final path component only, unsafe characters
/// collapsed to underscores, surrounding dots and underscores trimmed.
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw);
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let trimmed = cleaned.trim_matches(['.', '_']);
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
