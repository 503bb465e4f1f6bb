//! Feature flags and the caller-supplied selection that gates fragments.

mod detect;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FragmentError, FragmentResult};

pub use detect::FeatureProbe;

/// Optional feature areas that contribute configuration fragments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Feature {
    /// Authentication and authorisation settings.
    Auth,
    /// Outbound HTTP clients and resilience policies.
    Http,
    /// Feature-flag definitions.
    FeatureFlags,
    /// Tracing, metrics and log export.
    Observability,
    /// Security headers and HSTS.
    Security,
    /// Localisation.
    I18n,
}

impl Feature {
    /// Every supported feature in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Auth,
        Self::Http,
        Self::FeatureFlags,
        Self::Observability,
        Self::Security,
        Self::I18n,
    ];

    /// Canonical feature name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "Auth",
            Self::Http => "Http",
            Self::FeatureFlags => "FeatureFlags",
            Self::Observability => "Observability",
            Self::Security => "Security",
            Self::I18n => "I18n",
        }
    }

    fn expected() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FragmentError::UnknownFeature {
                name: s.to_owned(),
                expected: Self::expected(),
            })
    }
}

impl TryFrom<String> for Feature {
    type Error = FragmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Feature> for String {
    fn from(value: Feature) -> Self {
        value.as_str().to_owned()
    }
}

/// Immutable mapping from feature to enabled state for one assembly run.
///
/// Features without an explicit entry are disabled.
///
/// ```rust
/// use fragment_config::{Feature, FeatureSelection};
///
/// let selection = FeatureSelection::from_json_str(r#"{"Auth": true, "Security": false}"#)?;
/// assert!(selection.is_enabled(Feature::Auth));
/// assert!(!selection.is_enabled(Feature::Security));
/// assert!(!selection.is_enabled(Feature::Http));
/// # Ok::<_, std::sync::Arc<fragment_config::FragmentError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSelection {
    flags: BTreeMap<Feature, bool>,
}

impl FeatureSelection {
    /// Create a selection with every feature disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    /// Create a selection enabling exactly `features`.
    #[must_use]
    pub fn from_enabled<I>(features: I) -> Self
    where
        I: IntoIterator<Item = Feature>,
    {
        features.into_iter().map(|feature| (feature, true)).collect()
    }

    /// Parse a JSON object of `"Feature": bool` entries.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::UnknownFeature`] for unrecognised names and
    /// [`FragmentError::InvalidSelection`] when the document is not an object
    /// of booleans.
    pub fn from_json_str(data: &str) -> FragmentResult<Self> {
        let value: Value = serde_json::from_str(data)
            .map_err(|err| FragmentError::InvalidSelection(err.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Build a selection from an already parsed JSON object.
    ///
    /// # Errors
    ///
    /// See [`FeatureSelection::from_json_str`].
    pub fn from_json_value(value: &Value) -> FragmentResult<Self> {
        let Value::Object(entries) = value else {
            return Err(FragmentError::InvalidSelection(
                "expected an object mapping feature names to booleans".to_owned(),
            )
            .into());
        };
        let mut selection = Self::new();
        for (name, enabled) in entries {
            let feature: Feature = name.parse()?;
            let flag = enabled.as_bool().ok_or_else(|| {
                FragmentError::InvalidSelection(format!("feature '{name}' must be true or false"))
            })?;
            selection.set(feature, flag);
        }
        Ok(selection)
    }

    /// Builder-style variant of [`FeatureSelection::set`].
    #[must_use]
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.set(feature, enabled);
        self
    }

    /// Record the enabled state for `feature`.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        self.flags.insert(feature, enabled);
    }

    /// Apply a single toggle.
    pub fn apply(&mut self, toggle: FeatureToggle) {
        self.set(toggle.feature, toggle.enabled);
    }

    /// Apply every explicit entry of `other` on top of this selection.
    pub fn overlay(&mut self, other: &Self) {
        for (feature, enabled) in &other.flags {
            self.set(*feature, *enabled);
        }
    }

    /// Returns `true` when `feature` is explicitly enabled.
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flags.get(&feature).copied().unwrap_or(false)
    }

    /// Enabled features in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        self.flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(feature, _)| *feature)
    }

    /// Explicit entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        self.flags.iter().map(|(feature, enabled)| (*feature, *enabled))
    }
}

impl FromIterator<(Feature, bool)> for FeatureSelection {
    fn from_iter<T: IntoIterator<Item = (Feature, bool)>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

/// A single `NAME[=BOOL]` switch as accepted on the command line.
///
/// ```rust
/// use fragment_config::{Feature, FeatureToggle};
///
/// let toggle: FeatureToggle = "security=false".parse()?;
/// assert_eq!(toggle, FeatureToggle { feature: Feature::Security, enabled: false });
/// let bare: FeatureToggle = "Auth".parse()?;
/// assert!(bare.enabled);
/// # Ok::<_, fragment_config::FragmentError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureToggle {
    /// Feature being switched.
    pub feature: Feature,
    /// Requested state.
    pub enabled: bool,
}

impl FromStr for FeatureToggle {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, state) = s
            .split_once('=')
            .map_or((s, None), |(name, state)| (name, Some(state.trim())));
        let feature = name.parse()?;
        let enabled = match state {
            None => true,
            Some(value) if value.eq_ignore_ascii_case("true") => true,
            Some(value) if value.eq_ignore_ascii_case("false") => false,
            Some(value) => {
                return Err(FragmentError::InvalidSelection(format!(
                    "'{value}' is not a boolean for feature '{feature}'"
                )));
            }
        };
        Ok(Self { feature, enabled })
    }
}
