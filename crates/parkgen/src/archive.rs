//! Archive packaging for export bundles.
//!
//! Two sinks: an in-memory zip for downloads and a plain directory for the
//! CLI. Both either produce the complete set of entries or nothing.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::Result;

/// Destination for named archive entries.
pub trait ArchiveWriter {
    type Output;

    /// Add one entry. Names are flat file names.
    fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Seal the archive. Nothing is observable before this succeeds.
    fn finish(self) -> Result<Self::Output>;
}

/// Deflate-compressed zip held in memory.
pub struct ZipArchive {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipArchive {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            // fixed timestamp keeps archives byte-identical across runs
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default()),
        }
    }
}

impl Default for ZipArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter for ZipArchive {
    type Output = Vec<u8>;

    fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(bytes)?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

/// Writes entries as files of a directory.
///
/// Entries go to a hidden staging sibling first; `finish` swaps it into
/// place. Dropping an unfinished writer removes the staging directory.
pub struct DirectoryArchive {
    target: PathBuf,
    staging: PathBuf,
    finished: bool,
}

impl DirectoryArchive {
    pub fn create(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let staging = sibling(&target, "partial");
        std::fs::create_dir_all(&staging)?;
        Ok(Self {
            target,
            staging,
            finished: false,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// `<parent>/.<name>.<tag>-<uuid>`
fn sibling(target: &Path, tag: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    target.with_file_name(format!(".{name}.{tag}-{}", uuid::Uuid::new_v4()))
}

impl ArchiveWriter for DirectoryArchive {
    type Output = PathBuf;

    fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        std::fs::write(self.staging.join(name), bytes)?;
        Ok(())
    }

    fn finish(mut self) -> Result<PathBuf> {
        let backup = if self.target.exists() {
            let backup = sibling(&self.target, "old");
            std::fs::rename(&self.target, &backup)?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = std::fs::rename(&self.staging, &self.target) {
            if let Some(backup) = &backup {
                let _ = std::fs::rename(backup, &self.target);
            }
            return Err(e.into());
        }
        self.finished = true;

        if let Some(backup) = backup {
            if let Err(e) = std::fs::remove_dir_all(&backup) {
                tracing::warn!("could not remove {}: {e}", backup.display());
            }
        }
        Ok(self.target.clone())
    }
}

impl Drop for DirectoryArchive {
    fn drop(&mut self) {
        if !self.finished {
            let _ = std::fs::remove_dir_all(&self.staging);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn temp_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("parkgen-archive-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_zip_round_trip() {
        let mut zip = ZipArchive::new();
        zip.add("a.txt", b"hello").unwrap();
        zip.add("b.bin", &[1, 2, 3]).unwrap();
        let bytes = zip.finish().unwrap();

        let mut reader = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 2);
        let mut text = String::new();
        reader.by_name("a.txt").unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_zip_is_reproducible() {
        let build = || {
            let mut zip = ZipArchive::new();
            zip.add("x.txt", b"same").unwrap();
            zip.finish().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_directory_appears_only_after_finish() {
        let root = temp_root();
        let target = root.join("park");
        let mut dir = DirectoryArchive::create(&target).unwrap();
        dir.add("a.txt", b"hello").unwrap();
        assert!(!target.exists());

        let out = dir.finish().unwrap();
        assert_eq!(out, target);
        assert_eq!(std::fs::read_to_string(target.join("a.txt")).unwrap(), "hello");
        // only the finished folder remains
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_directory_replaces_previous_export() {
        let root = temp_root();
        let target = root.join("park");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("stale.txt"), "old").unwrap();

        let mut dir = DirectoryArchive::create(&target).unwrap();
        dir.add("fresh.txt", b"new").unwrap();
        dir.finish().unwrap();

        assert!(!target.join("stale.txt").exists());
        assert!(target.join("fresh.txt").exists());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_abandoned_directory_leaves_nothing() {
        let root = temp_root();
        {
            let mut dir = DirectoryArchive::create(root.join("park")).unwrap();
            dir.add("a.txt", b"partial").unwrap();
        }
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
        std::fs::remove_dir_all(&root).unwrap();
    }
}
