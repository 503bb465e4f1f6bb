//! Layered tool settings.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML settings file,
//! `MERGE_CONFIG_*` environment variables, then command-line flags.

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use fragment_config::{Environment, FeatureSelection};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Prefix for environment variable overrides, e.g. `MERGE_CONFIG_STEM`.
pub const ENV_PREFIX: &str = "MERGE_CONFIG_";

/// Settings file read from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = ".merge-config.toml";

/// Resolved tool settings.
///
/// ```toml
/// fragments = "config/fragments"
/// output_dir = "src/Api"
/// environment = "Development"
/// stem = "appsettings"
///
/// [features]
/// Auth = true
/// Security = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding the fragment files.
    pub fragments: Utf8PathBuf,
    /// Directory the `write` command writes to.
    pub output_dir: Utf8PathBuf,
    /// Environment used by `assemble`.
    pub environment: Environment,
    /// File stem of written documents.
    pub stem: String,
    /// Feature flags layered over detection.
    pub features: FeatureSelection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fragments: Utf8PathBuf::from("fragments"),
            output_dir: Utf8PathBuf::from("."),
            environment: Environment::Production,
            stem: "appsettings".to_owned(),
            features: FeatureSelection::new(),
        }
    }
}

/// Values supplied on the command line; `None` leaves lower layers intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverrides {
    /// `--fragments`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments: Option<Utf8PathBuf>,
    /// `--output-dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<Utf8PathBuf>,
    /// `--environment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// `--stem`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
}

/// Build the settings figment without extracting it.
///
/// An explicit `config` path must exist; the default settings file is
/// optional.
#[must_use]
pub fn settings_figment(config: Option<&Utf8Path>, overrides: &SettingsOverrides) -> Figment {
    let file = config.map_or_else(
        || Toml::file(DEFAULT_SETTINGS_FILE),
        |path| Toml::file_exact(path.as_std_path()),
    );
    Figment::from(Serialized::defaults(Settings::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(overrides))
}

/// Load settings from every layer.
///
/// # Errors
///
/// Returns [`crate::MergeConfigError::Settings`] when a layer cannot be read
/// or a value fails to deserialise (including unknown features and
/// environments).
pub fn load_settings(config: Option<&Utf8Path>, overrides: &SettingsOverrides) -> Result<Settings> {
    let settings: Settings = settings_figment(config, overrides).extract()?;
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}
