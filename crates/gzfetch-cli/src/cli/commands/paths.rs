//! Path helper commands.

use gzfetch_core::paths::{expand_user_home, to_unix_path};

pub fn run_unix_path(path: &str) {
    println!("{}", to_unix_path(path));
}

pub fn run_expand_home(path: &str) {
    println!("{}", expand_user_home(path));
}
