//! Temp-file staging and commit onto the destination.
//!
//! The temp file lives in the (injectable) temp directory and is named after
//! the destination's prefix and extension. Commit copies it to a `.part`
//! sibling of the destination and renames that into place, so the
//! destination only ever changes from its old content to the complete new
//! artifact.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::{CleanupFailure, TransferErrorKind};
use crate::copy;
use crate::paths::FileName;

/// Suffix of the sibling file used while committing.
pub const PART_SUFFIX: &str = ".part";

/// Path of the commit sibling: `dest.gz` → `dest.gz.part`.
pub fn part_path(destination: &Path) -> PathBuf {
    let mut o = destination.as_os_str().to_owned();
    o.push(PART_SUFFIX);
    PathBuf::from(o)
}

/// A freshly created temp file for one transfer attempt.
pub struct StagedFile {
    temp: NamedTempFile,
}

impl StagedFile {
    /// Create `<temp_dir>/<prefix><random><.ext>` for `name`.
    pub fn create(temp_dir: &Path, name: &FileName<'_>) -> Result<Self, TransferErrorKind> {
        let suffix = name.dotted_extension();
        let temp = tempfile::Builder::new()
            .prefix(name.prefix)
            .suffix(&suffix)
            .tempfile_in(temp_dir)
            .map_err(TransferErrorKind::Stage)?;
        tracing::debug!("staging into {}", temp.path().display());
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// An owned write handle to the temp file.
    pub fn writer(&self) -> Result<File, TransferErrorKind> {
        self.temp.as_file().try_clone().map_err(TransferErrorKind::Stage)
    }

    /// Copy the staged content onto `destination` via its `.part` sibling.
    ///
    /// A failed commit leaves the destination as it was. A `.part` file that
    /// cannot be removed afterwards is reported in `cleanup`.
    pub fn commit(
        &self,
        destination: &Path,
        cleanup: &mut Vec<CleanupFailure>,
    ) -> Result<(), TransferErrorKind> {
        let part = part_path(destination);
        // The synced `.part` is what lands at the destination.
        let result = copy::copy(self.path(), &part)
            .and_then(|_| File::open(&part)?.sync_all())
            .and_then(|()| std::fs::rename(&part, destination));
        if let Err(source) = result {
            if let Err(e) = std::fs::remove_file(&part) {
                if e.kind() != io::ErrorKind::NotFound {
                    cleanup.push(CleanupFailure {
                        path: part,
                        action: "remove partial commit",
                        source: e,
                    });
                }
            }
            return Err(TransferErrorKind::Commit {
                destination: destination.to_path_buf(),
                source,
            });
        }
        Ok(())
    }

    /// Delete the temp file, reporting (not raising) a failed removal.
    pub fn discard(self) -> Option<CleanupFailure> {
        let path = self.temp.path().to_path_buf();
        match self.temp.close() {
            Ok(()) => None,
            Err(source) => Some(CleanupFailure {
                path,
                action: "remove temp file",
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("/data/1abc.ent.gz")),
            PathBuf::from("/data/1abc.ent.gz.part")
        );
    }

    #[test]
    fn temp_file_named_after_destination() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::create(dir.path(), &FileName::split("report.tar.gz")).unwrap();
        let name = staged.path().file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("report"), "{}", name);
        assert!(name.ends_with(".tar.gz"), "{}", name);
        assert_eq!(staged.path().parent(), Some(dir.path()));
    }

    #[test]
    fn commit_replaces_destination_and_discard_removes_temp() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let dest = out_dir.path().join("out.gz");
        std::fs::write(&dest, b"old").unwrap();

        let staged = StagedFile::create(temp_dir.path(), &FileName::split("out.gz")).unwrap();
        let mut w = staged.writer().unwrap();
        w.write_all(b"new content").unwrap();
        drop(w);

        let mut cleanup = Vec::new();
        staged.commit(&dest, &mut cleanup).unwrap();
        assert!(cleanup.is_empty());
        assert_eq!(std::fs::read(&dest).unwrap(), b"new content");
        assert!(!part_path(&dest).exists());

        let temp_path = staged.path().to_path_buf();
        assert!(staged.discard().is_none());
        assert!(!temp_path.exists());
    }

    #[test]
    fn failed_commit_leaves_no_part_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::create(temp_dir.path(), &FileName::split("x.gz")).unwrap();
        let dest = temp_dir.path().join("missing-dir").join("x.gz");
        let mut cleanup = Vec::new();
        let err = staged.commit(&dest, &mut cleanup).unwrap_err();
        assert!(matches!(err, TransferErrorKind::Commit { .. }));
        assert!(cleanup.is_empty());
        assert!(!dest.exists());
    }

    #[test]
    fn commit_leaves_complete_destination_and_no_part() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("big.gz");
        let staged = StagedFile::create(temp_dir.path(), &FileName::split("big.gz")).unwrap();
        let body: Vec<u8> = (0u8..=200).cycle().take(crate::copy::BUF_SIZE * 2 + 5).collect();
        staged.writer().unwrap().write_all(&body).unwrap();

        let mut cleanup = Vec::new();
        staged.commit(&dest, &mut cleanup).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert!(!part_path(&dest).exists());
        assert!(cleanup.is_empty());
    }

    #[test]
    fn discard_reports_temp_file_already_gone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::create(temp_dir.path(), &FileName::split("gone.gz")).unwrap();
        let temp_path = staged.path().to_path_buf();
        std::fs::remove_file(&temp_path).unwrap();

        let failure = staged.discard().expect("removal failure reported");
        assert_eq!(failure.action, "remove temp file");
        assert_eq!(failure.path, temp_path);
        assert_eq!(failure.source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn unremovable_part_is_collected_as_cleanup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let dest = out_dir.path().join("x.gz");
        // A non-empty directory squatting on the `.part` path defeats both
        // the copy and the removal of the partial commit.
        let part = part_path(&dest);
        std::fs::create_dir(&part).unwrap();
        std::fs::write(part.join("keep"), b"k").unwrap();

        let staged = StagedFile::create(temp_dir.path(), &FileName::split("x.gz")).unwrap();
        let mut cleanup = Vec::new();
        let err = staged.commit(&dest, &mut cleanup).unwrap_err();

        assert!(matches!(err, TransferErrorKind::Commit { .. }));
        assert_eq!(cleanup.len(), 1);
        assert_eq!(cleanup[0].action, "remove partial commit");
        assert_eq!(cleanup[0].path, part);
        assert!(!dest.exists());
    }
}
