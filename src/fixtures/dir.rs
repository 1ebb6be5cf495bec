//! Directory listing fixtures - three ways to classify a directory's entries
//!
//! Absolute numbers depend on the directory, the filesystem and the disk;
//! only the strategies relative to each other mean anything. After the first
//! pass the filesystem caches are hot for all of them.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStrategy {
    /// Collect names first, then stat each joined path
    NamesThenStat,
    /// `read_dir` entries with their cached file types
    ReadDirEntries,
    /// `walkdir` restricted to depth one
    WalkDir,
}

impl ListingStrategy {
    pub const ALL: [ListingStrategy; 3] =
        [Self::NamesThenStat, Self::ReadDirEntries, Self::WalkDir];

    pub fn name(self) -> &'static str {
        match self {
            Self::NamesThenStat => "names_then_stat",
            Self::ReadDirEntries => "read_dir_entries",
            Self::WalkDir => "walkdir",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirSummary {
    pub entries: usize,
    pub dirs: usize,
    pub files: usize,
}

impl DirSummary {
    fn record(&mut self, is_dir: bool, is_file: bool) {
        self.entries += 1;
        self.dirs += is_dir as usize;
        self.files += is_file as usize;
    }
}

/// List the immediate children of `root` and count folders and files
pub fn scan(root: &Path, strategy: ListingStrategy) -> io::Result<DirSummary> {
    let mut summary = DirSummary::default();

    match strategy {
        ListingStrategy::NamesThenStat => {
            let names = fs::read_dir(root)?
                .map(|entry| entry.map(|e| e.file_name()))
                .collect::<io::Result<Vec<OsString>>>()?;

            for name in names {
                let meta = fs::symlink_metadata(root.join(&name))?;
                summary.record(meta.is_dir(), meta.is_file());
            }
        }
        ListingStrategy::ReadDirEntries => {
            for entry in fs::read_dir(root)? {
                let file_type = entry?.file_type()?;
                summary.record(file_type.is_dir(), file_type.is_file());
            }
        }
        ListingStrategy::WalkDir => {
            for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
                let file_type = entry?.file_type();
                summary.record(file_type.is_dir(), file_type.is_file());
            }
        }
    }

    Ok(summary)
}
