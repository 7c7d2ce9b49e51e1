//! Re-encoding of the decoded stream before it is compressed again.
//!
//! In line mode the decoded bytes are reassembled line by line: `\n`,
//! `\r\n` and a lone `\r` all end a line, and every line is written back
//! terminated by a single `\n`. A final unterminated line is terminated too.
//! Binary payloads do not survive this; [`ReencodeMode::Bytes`] passes bytes
//! through untouched instead.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// How decoded content is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReencodeMode {
    /// Text-oriented: reassemble lines, normalize terminators to `\n`.
    #[default]
    Lines,
    /// Verbatim: decoded bytes are written as-is.
    Bytes,
}

/// Writer adapter applying a [`ReencodeMode`] in front of `W`.
///
/// Incomplete lines are buffered across `write` calls, so callers must call
/// [`Reencoder::finish`] to flush the last one.
pub struct Reencoder<W: Write> {
    inner: W,
    mode: ReencodeMode,
    line: Vec<u8>,
    after_cr: bool,
}

impl<W: Write> Reencoder<W> {
    pub fn new(inner: W, mode: ReencodeMode) -> Self {
        Self {
            inner,
            mode,
            line: Vec::new(),
            after_cr: false,
        }
    }

    /// Emits any pending partial line and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.line.is_empty() {
            self.emit_line()?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn emit_line(&mut self) -> io::Result<()> {
        self.line.push(b'\n');
        self.inner.write_all(&self.line)?;
        self.line.clear();
        Ok(())
    }

    fn push_lines(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut rest = buf;
        while let Some(&first) = rest.first() {
            // `\n` directly after a `\r` completes a `\r\n` pair already emitted.
            if self.after_cr {
                self.after_cr = false;
                if first == b'\n' {
                    rest = &rest[1..];
                    continue;
                }
            }
            match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    self.line.extend_from_slice(&rest[..i]);
                    self.after_cr = rest[i] == b'\r';
                    self.emit_line()?;
                    rest = &rest[i + 1..];
                }
                None => {
                    self.line.extend_from_slice(rest);
                    break;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Write for Reencoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.mode {
            ReencodeMode::Bytes => self.inner.write_all(buf)?,
            ReencodeMode::Lines => self.push_lines(buf)?,
        }
        Ok(buf.len())
    }

    /// Flushes the inner writer; a pending partial line stays buffered.
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
