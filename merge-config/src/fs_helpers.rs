//! Filesystem helpers shared across `merge-config` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::MergeConfigError;

fn io_error(path: &Utf8Path) -> impl FnOnce(std::io::Error) -> MergeConfigError + '_ {
    move |source| MergeConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Opens `path`, creating it and any missing parents first.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, MergeConfigError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error(path))?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error(path))
        }
        Err(open_err) => Err(io_error(path)(open_err)),
    }
}

/// Reads a UTF-8 file given by an ambient path.
pub fn read_to_string(path: &Utf8Path) -> Result<String, MergeConfigError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| MergeConfigError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error(path))?;
    dir.read_to_string(file_name).map_err(io_error(path))
}
