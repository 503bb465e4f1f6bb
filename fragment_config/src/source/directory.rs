//! Fragments stored as files in one directory.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::FragmentSource;
use crate::{FragmentError, FragmentResult};

/// A fragment directory opened through a capability handle.
///
/// Lookups are confined to the directory: file names are resolved relative
/// to the handle, never against the process working directory.
#[derive(Debug)]
pub struct DirectorySource {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirectorySource {
    /// Open `root` as a fragment directory.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::StorageUnavailable`] when the directory does
    /// not exist or cannot be opened.
    pub fn open(root: impl Into<Utf8PathBuf>) -> FragmentResult<Self> {
        let path = root.into();
        let dir = Dir::open_ambient_dir(&path, ambient_authority())
            .map_err(|err| FragmentError::storage_unavailable(path.as_str(), err))?;
        Ok(Self { root: path, dir })
    }

    /// Directory the source was opened from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn unavailable(&self, err: io::Error) -> std::sync::Arc<FragmentError> {
        FragmentError::storage_unavailable(self.root.as_str(), err)
    }
}

impl FragmentSource for DirectorySource {
    fn location(&self) -> String {
        self.root.to_string()
    }

    fn read(&self, file_name: &str) -> FragmentResult<Option<Vec<u8>>> {
        match self.dir.read(file_name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FragmentError::unreadable(self.locate(file_name), err)),
        }
    }

    fn list(&self) -> FragmentResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.dir.entries().map_err(|err| self.unavailable(err))? {
            let file = entry.map_err(|err| self.unavailable(err))?;
            if !file.file_type().map_err(|err| self.unavailable(err))?.is_file() {
                continue;
            }
            names.push(file.file_name().map_err(|err| self.unavailable(err))?);
        }
        names.sort();
        Ok(names)
    }

    fn locate(&self, file_name: &str) -> String {
        self.root.join(file_name).to_string()
    }
}
