//! `~` expansion for paths given by users.

use std::path::{Path, MAIN_SEPARATOR};

/// Expands a leading `~` followed by the platform separator to the user's
/// home directory.
///
/// `~user/...` and a `~` anywhere but the start are not expanded. If the home
/// directory cannot be determined the path is returned unchanged.
pub fn expand_user_home(path: &str) -> String {
    match home::home_dir() {
        Some(home) => expand_user_home_with(path, &home),
        None => {
            tracing::debug!("no home directory; leaving {} unexpanded", path);
            path.to_string()
        }
    }
}

/// Same as [`expand_user_home`] with an explicit home directory.
pub fn expand_user_home_with(path: &str, home: &Path) -> String {
    match path.strip_prefix('~') {
        Some(rest) if rest.starts_with(MAIN_SEPARATOR) => {
            format!("{}{}", home.display(), rest)
        }
        _ => path.to_string(),
    }
}
