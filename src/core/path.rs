//! Lexical path normalization for asset lookups
//!
//! Every lookup, embedded or on disk, goes through [`normalize`] first so
//! that spellings like `/assets/css/../css/style.min.css` and
//! `assets//css/style.min.css` land on the same key.

/// Normalize a logical asset path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `/a/b`)
/// - Drops `.` segments
/// - Resolves `..` against the previous segment; at the root it is dropped,
///   so the result never climbs above `/`
/// - Always returns a rooted path without a trailing slash (`""` → `/`)
pub fn normalize(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in replaced.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Last segment of a normalized path, `/` for the root.
pub fn basename(normalized: &str) -> &str {
    match normalized.rfind('/') {
        Some(pos) if pos + 1 < normalized.len() => &normalized[pos + 1..],
        _ => "/",
    }
}

/// Mount `name` under `prefix`.
///
/// Plain concatenation with a separator in between. The result is left for
/// the base lookup to normalize, so `..` in `name` resolves exactly as it
/// would in `prefix` followed by `name`, climbing out of the prefix included.
pub fn join(prefix: &str, name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), name)
}
