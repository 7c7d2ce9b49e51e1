//! Prefix/extension split of a file's base name around its first `.`.

use std::path::Path;

/// A base name split around its first `.`.
///
/// `report.tar.gz` splits into prefix `report` and extension `tar.gz`;
/// `README` has no extension; `.bashrc` has an empty prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileName<'a> {
    pub prefix: &'a str,
    pub extension: Option<&'a str>,
}

impl<'a> FileName<'a> {
    /// Split the base name of `path`. Returns `None` if the path has no base
    /// name (`/`, `..`) or the name is not valid UTF-8.
    pub fn of(path: &'a Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Some(Self::split(name))
    }

    /// Split a bare file name.
    pub fn split(name: &'a str) -> Self {
        match name.split_once('.') {
            Some((prefix, extension)) => FileName {
                prefix,
                extension: Some(extension),
            },
            None => FileName {
                prefix: name,
                extension: None,
            },
        }
    }

    /// Suffix for a temp file carrying the same extension (`.tar.gz`), or
    /// an empty string when there is none.
    pub fn dotted_extension(&self) -> String {
        match self.extension {
            Some(ext) => format!(".{}", ext),
            None => String::new(),
        }
    }
}

/// Everything after the first `.` of the base name, if there is one.
pub fn file_extension(path: &Path) -> Option<String> {
    FileName::of(path)?.extension.map(str::to_string)
}

/// Everything before the first `.` of the base name (the whole name when
/// there is no `.`).
pub fn file_prefix(path: &Path) -> Option<String> {
    FileName::of(path).map(|n| n.prefix.to_string())
}
