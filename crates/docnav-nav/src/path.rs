//! Content path normalization and route mapping.
//!
//! A normalized path always starts with `/`, has no empty or `.` segments and
//! never contains a `..` segment. A trailing slash is kept because it names a
//! directory's landing document (`README.md`).

use docnav_config::ConfigError;

/// Normalize an authored content path.
///
/// Adds the leading slash, collapses repeated slashes and drops `.` segments.
/// Normalizing an already-normalized path returns it unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] for blank paths and paths containing a
/// `..` segment.
pub fn normalize_path(path: &str) -> Result<String, ConfigError> {
    let invalid = |reason| ConfigError::InvalidPath {
        path: path.to_owned(),
        reason,
    };

    if path.trim().is_empty() {
        return Err(invalid("path is empty"));
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(invalid("parent directory segments are not allowed")),
            segment => {
                normalized.push('/');
                normalized.push_str(segment);
            }
        }
    }

    if normalized.is_empty() || path.ends_with('/') {
        normalized.push('/');
    }

    Ok(normalized)
}

/// Map a normalized content path to its rendered route.
///
/// `README.md` and `index.md` map to their directory, other `.md` files to
/// `.html`. Directory paths and non-markdown paths are returned as is.
pub(crate) fn route_for(path: &str) -> String {
    if path.ends_with('/') {
        return path.to_owned();
    }

    let (dir, file) = path.rsplit_once('/').unwrap_or(("", path));
    let Some(stem) = strip_md_extension(file) else {
        return path.to_owned();
    };

    if stem.eq_ignore_ascii_case("readme") || stem.eq_ignore_ascii_case("index") {
        format!("{dir}/")
    } else {
        format!("{dir}/{stem}.html")
    }
}

fn strip_md_extension(file: &str) -> Option<&str> {
    let split = file.len().checked_sub(3)?;
    let (stem, ext) = file.split_at_checked(split)?;
    (ext.eq_ignore_ascii_case(".md") && !stem.is_empty()).then_some(stem)
}
