use unicode_normalization::{char::is_combining_mark, UnicodeNormalization as _};

use crate::entities::ClientId;

/// Slug used when the input has no usable characters at all.
const EMPTY_SLUG: &str = "processo";
const EMPTY_FILE_STEM: &str = "arquivo";

/// Lowercase and strip accents (NFKD, combining marks dropped). Used both for
/// slugs and for accent-insensitive matching.
pub(crate) fn fold_text(s: &str) -> String {
    s.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn slugify_or(name: &str, empty: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in fold_text(name).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        empty.to_string()
    } else {
        slug
    }
}

/// Folder-safe identifier for a process (request type) name: `[a-z0-9_]+`,
/// no leading, trailing or repeated underscores.
pub fn slugify_process(name: &str) -> String {
    slugify_or(name, EMPTY_SLUG)
}

/// Base name of a local file made safe for an object key: slugified stem
/// plus the lowercased extension.
fn storage_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename)
        .trim();
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.trim().is_empty() => (stem, ext),
        _ => (base, ""),
    };
    let ext: String = fold_text(ext)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let stem = slugify_or(stem, EMPTY_FILE_STEM);
    if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    }
}

/// Storage key for a file attached to a demand:
/// `<org>/<client>/GERAL/anvisa/<slug>/<filename>`.
pub fn demand_storage_key(
    org_id: &str,
    client_id: ClientId,
    request_type: &str,
    filename: &str,
) -> String {
    format!(
        "{}/{}/GERAL/anvisa/{}/{}",
        org_id.trim_matches('/'),
        client_id,
        slugify_process(request_type),
        storage_filename(filename)
    )
}
