//! CLI command handlers.

mod copy;
mod fetch;
mod paths;
mod ping;

pub use copy::run_copy;
pub use fetch::{run_fetch, FetchArgs};
pub use paths::{run_expand_home, run_unix_path};
pub use ping::run_ping;
