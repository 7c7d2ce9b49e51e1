//! Path helpers used around a transfer.
//!
//! Splits destination file names for temp-file naming, normalizes
//! separator conventions, and expands a leading `~`.

mod filename;
mod home;
mod unix;

pub use filename::{file_extension, file_prefix, FileName};
pub use home::{expand_user_home, expand_user_home_with};
pub use unix::to_unix_path;
