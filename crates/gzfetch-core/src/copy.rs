//! Byte-level file copy with a bounded buffer.
//!
//! Creates or truncates the destination in place. Callers that need the
//! destination replaced atomically copy into a sibling first (see
//! `fetch::stage`).

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read/write buffer size; the file is never held in memory as a whole.
pub const BUF_SIZE: usize = 64 * 1024;

/// Copy the content of `src` to `dst`, returning the number of bytes copied.
///
/// Both handles are closed when this returns, on success or failure.
pub fn copy(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&buf[..n])?;
        total += n as u64;
    }
    output.flush()?;
    Ok(total)
}
