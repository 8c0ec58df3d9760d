//! Upload filename handling.

use std::path::{Component, Path};

use unicode_normalization::UnicodeNormalization;

use mediashare_core::types::category::UPLOAD_EXTENSIONS;

/// Reduce an untrusted client file name to a flat, portable name.
///
/// The name is NFKD-normalized so accented letters keep their ASCII base,
/// remaining non-ASCII characters are dropped, `/` becomes a space,
/// whitespace runs collapse into `_`, anything outside `[A-Za-z0-9_.-]`
/// (including `\`) is removed and leading/trailing `.` or `_` are trimmed.
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns `true` if the name's extension (after the last `.`, compared
/// lower-cased) is in the upload allow-set.
pub fn is_allowed(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            UPLOAD_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Returns `true` if `name` is exactly one normal path component, i.e. it
/// cannot resolve outside the directory it is joined onto.
pub fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}
