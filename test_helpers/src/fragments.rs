//! Temporary fragment directories.
//!
//! ```
//! use fragment_config_test_helpers::fragments::FragmentDir;
//!
//! let dir = FragmentDir::new()?.with_file("auth.json", "{}")?;
//! assert!(dir.path().join("auth.json").is_file());
//! # Ok::<_, anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// A representative fragment set covering every catalog entry.
///
/// `auth` and `logging` carry Development overrides; `security` carries a
/// Production override.
pub const SAMPLE_FRAGMENTS: &[(&str, &str)] = &[
    (
        "logging.json",
        r#"{"Logging": {"LogLevel": {"Default": "Information", "Microsoft.AspNetCore": "Warning"}}, "AllowedHosts": "*"}"#,
    ),
    (
        "logging.Development.json",
        r#"{"Logging": {"LogLevel": {"Default": "Debug"}}}"#,
    ),
    (
        "auth.json",
        r#"{"Auth": {"Authority": "https://login.example.com", "Audience": "api", "RequireHttpsMetadata": true}}"#,
    ),
    (
        "auth.Development.json",
        r#"{"Auth": {"Authority": "https://localhost:5001", "RequireHttpsMetadata": false}}"#,
    ),
    (
        "http.json",
        r#"{"Http": {"TimeoutSeconds": 30, "Retry": {"Count": 3}}}"#,
    ),
    (
        "features.json",
        r#"{"FeatureManagement": {"NewDashboard": false}}"#,
    ),
    (
        "observability.json",
        r#"{"Observability": {"ServiceName": "sample", "Exporters": ["otlp"]}}"#,
    ),
    (
        "security.json",
        r#"{"Security": {"Hsts": {"Enabled": false}, "AllowedOrigins": ["https://app.example.com"]}}"#,
    ),
    (
        "security.Production.json",
        r#"{"Security": {"Hsts": {"Enabled": true, "MaxAgeDays": 365}}}"#,
    ),
    (
        "i18n.json",
        r#"{"Localization": {"DefaultCulture": "en-GB", "SupportedCultures": ["en-GB", "fr-FR"]}}"#,
    ),
];

/// A temporary directory holding fragment files, removed on drop.
#[derive(Debug)]
pub struct FragmentDir {
    root: Utf8PathBuf,
    dir: Dir,
    _temp: TempDir,
}

impl FragmentDir {
    /// Create an empty fragment directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temporary fragment directory")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("non-UTF-8 temporary path: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        Ok(Self {
            root,
            dir,
            _temp: temp,
        })
    }

    /// Create a directory pre-populated with [`SAMPLE_FRAGMENTS`].
    ///
    /// # Errors
    ///
    /// See [`FragmentDir::new`] and [`FragmentDir::write`].
    pub fn sample() -> Result<Self> {
        SAMPLE_FRAGMENTS
            .iter()
            .try_fold(Self::new()?, |dir, (name, contents)| dir.with_file(name, contents))
    }

    /// Write `contents` to `file_name`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, file_name: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        self.dir
            .write(file_name, contents)
            .with_context(|| format!("write {file_name} in {}", self.root))
    }

    /// Builder-style variant of [`FragmentDir::write`].
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn with_file(self, file_name: &str, contents: impl AsRef<[u8]>) -> Result<Self> {
        self.write(file_name, contents)?;
        Ok(self)
    }

    /// Remove `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be removed.
    pub fn remove(&self, file_name: &str) -> Result<()> {
        self.dir
            .remove_file(file_name)
            .with_context(|| format!("remove {file_name} in {}", self.root))
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }
}
