pub mod config;
pub mod logging;

pub mod copy;
pub mod fetch;
pub mod paths;
pub mod ping;

pub use copy::copy;
pub use fetch::{
    download_file_if_available, download_gzip_compressed_file, transfer, FailurePolicy,
    ReencodeMode, TransferError, TransferOptions, TransferOutcome,
};
pub use paths::{expand_user_home, file_extension, file_prefix, to_unix_path};
pub use ping::ping;
