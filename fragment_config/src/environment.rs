//! Closed set of environments a fragment can be qualified with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FragmentError;

/// Environment selecting which override variant of a fragment applies.
///
/// [`Environment::Base`] stands for the unqualified fragment file
/// (`auth.json`); every other environment names an override file
/// (`auth.Development.json`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    /// Unqualified fragments only.
    Base,
    /// Local development overrides.
    Development,
    /// Staging overrides.
    Staging,
    /// Production overrides.
    Production,
}

impl Environment {
    /// Every supported environment in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Base,
        Self::Development,
        Self::Staging,
        Self::Production,
    ];

    /// Canonical spelling used in file names and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Development => "Development",
            Self::Staging => "Staging",
            Self::Production => "Production",
        }
    }

    /// File-name qualifier for override fragments, `None` for [`Self::Base`].
    #[must_use]
    pub const fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::Base => None,
            other => Some(other.as_str()),
        }
    }

    /// Returns `true` for the unqualified environment.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::Base)
    }

    /// Parse a qualifier exactly as it appears in a file name.
    ///
    /// Unlike [`FromStr`], this is case-sensitive and rejects `Base`, which
    /// never appears as a qualifier.
    #[must_use]
    pub fn from_qualifier(qualifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|env| env.qualifier() == Some(qualifier))
    }

    fn expected() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FragmentError::UnknownEnvironment {
                name: s.to_owned(),
                expected: Self::expected(),
            })
    }
}

impl TryFrom<String> for Environment {
    type Error = FragmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Environment> for String {
    fn from(value: Environment) -> Self {
        value.as_str().to_owned()
    }
}
