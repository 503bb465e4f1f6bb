//! Storage capabilities fragments are read from.
//!
//! The assembler never touches the filesystem directly; it is handed a
//! [`FragmentSource`] and asks it for files by exact name.

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

use crate::FragmentResult;

/// Read-only access to a set of fragment files.
pub trait FragmentSource {
    /// Human-readable description of the storage, used in reports.
    fn location(&self) -> String;

    /// Read the raw contents of `file_name`.
    ///
    /// Returns `Ok(None)` when the storage is reachable but holds no such
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FragmentError::Unreadable`] when the file exists but
    /// cannot be read, and [`crate::FragmentError::StorageUnavailable`] when
    /// the storage itself cannot be reached.
    fn read(&self, file_name: &str) -> FragmentResult<Option<Vec<u8>>>;

    /// File names held by the storage, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FragmentError::StorageUnavailable`] when the storage
    /// cannot be enumerated.
    fn list(&self) -> FragmentResult<Vec<String>>;

    /// Location of a single file, used in reports and error messages.
    ///
    /// The default joins [`FragmentSource::location`] and `file_name` with a
    /// single `/`.
    fn locate(&self, file_name: &str) -> String {
        let location = self.location();
        format!("{}/{file_name}", location.trim_end_matches('/'))
    }
}

impl<S: FragmentSource + ?Sized> FragmentSource for &S {
    fn location(&self) -> String {
        (**self).location()
    }

    fn read(&self, file_name: &str) -> FragmentResult<Option<Vec<u8>>> {
        (**self).read(file_name)
    }

    fn list(&self) -> FragmentResult<Vec<String>> {
        (**self).list()
    }

    fn locate(&self, file_name: &str) -> String {
        (**self).locate(file_name)
    }
}

#[cfg(test)]
mod tests;
