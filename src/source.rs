//! Command sources
//!
//! A source is any iterator of raw commands. [`DirectorySource`] pulls one
//! command file at a time from a sequence directory.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::codec::Encoding;
use crate::error::{RecordError, Result};

/// One undecoded command buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    /// Label used in reports, usually the file name
    pub name: String,
    pub encoding: Encoding,
    pub bytes: Vec<u8>,
}

impl RawCommand {
    pub fn new(name: impl Into<String>, encoding: Encoding, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            encoding,
            bytes,
        }
    }

    /// Read a command file, picking the encoding from its extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let encoding = Encoding::from_path(path)
            .ok_or_else(|| RecordError::UnsupportedFormat(path.to_path_buf()))?;
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, encoding, bytes))
    }
}

/// Order in which a directory's command files are replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrder {
    /// Sorted by file name
    #[default]
    Name,
    /// Whatever order the file system lists entries in
    Filesystem,
}

/// Command files under a sequence directory
pub struct DirectorySource {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

impl DirectorySource {
    /// Open a sequence directory; fails if it cannot be read
    pub fn open(dir: impl AsRef<Path>, order: SourceOrder, recursive: bool) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        fs::read_dir(&root)?;

        let mut walker = WalkDir::new(&root).min_depth(1);
        if !recursive {
            walker = walker.max_depth(1);
        }
        if order == SourceOrder::Name {
            walker = walker.sort_by_file_name();
        }

        debug!(dir = %root.display(), ?order, recursive, "opened sequence directory");
        Ok(Self {
            root,
            entries: walker.into_iter(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for DirectorySource {
    type Item = Result<RawCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if entry.file_type().is_file() {
                return Some(RawCommand::from_file(entry.path()));
            }
        }
    }
}

/// In-memory commands, replayed in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    commands: VecDeque<RawCommand>,
}

impl MemorySource {
    pub fn new(commands: impl IntoIterator<Item = RawCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn push(&mut self, command: RawCommand) {
        self.commands.push_back(command);
    }
}

impl Iterator for MemorySource {
    type Item = Result<RawCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        self.commands.pop_front().map(Ok)
    }
}
