//! Unix-style path normalization.

/// Converts `path` to forward slashes and guarantees exactly one trailing `/`.
///
/// Runs of trailing slashes collapse to one, so the result is stable under
/// repeated application. Interior `//` is left alone.
pub fn to_unix_path(path: &str) -> String {
    let mut out = path.replace('\\', "/");
    let kept = out.trim_end_matches('/').len();
    out.truncate(kept);
    out.push('/');
    out
}
