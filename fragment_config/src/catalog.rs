//! Fragment naming and the ordered catalog of known fragments.

use std::fmt;

use crate::{Environment, Feature, FeatureSelection, FragmentError, FragmentResult};

const FRAGMENT_EXTENSION: &str = "json";

/// Validated fragment name, safe to embed in a file name.
///
/// Names are non-empty and consist of ASCII alphanumerics, `-` or `_`; dots
/// are reserved for the environment qualifier and the extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentName(String);

impl FragmentName {
    /// Validate and wrap `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::InvalidFragmentName`] when `name` is empty or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn new(raw: impl Into<String>) -> Result<Self, FragmentError> {
        let name = raw.into();
        if name.is_empty() {
            return Err(FragmentError::InvalidFragmentName {
                name,
                reason: "name must not be empty",
            });
        }
        if !name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        {
            return Err(FragmentError::InvalidFragmentName {
                name,
                reason: "only ASCII letters, digits, '-' and '_' are allowed",
            });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one fragment file: a name plus an environment qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId {
    name: FragmentName,
    environment: Environment,
}

impl FragmentId {
    /// Combine a name and an environment.
    #[must_use]
    pub const fn new(name: FragmentName, environment: Environment) -> Self {
        Self { name, environment }
    }

    /// Fragment name.
    #[must_use]
    pub const fn name(&self) -> &FragmentName {
        &self.name
    }

    /// Environment qualifier.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// File name following the `<name>.json` / `<name>.<Environment>.json`
    /// convention.
    ///
    /// ```rust
    /// use fragment_config::{Environment, FragmentId, FragmentName};
    ///
    /// let name = FragmentName::new("auth")?;
    /// let id = FragmentId::new(name, Environment::Development);
    /// assert_eq!(id.file_name(), "auth.Development.json");
    /// # Ok::<_, fragment_config::FragmentError>(())
    /// ```
    #[must_use]
    pub fn file_name(&self) -> String {
        self.environment.qualifier().map_or_else(
            || format!("{}.{FRAGMENT_EXTENSION}", self.name),
            |qualifier| format!("{}.{qualifier}.{FRAGMENT_EXTENSION}", self.name),
        )
    }

    /// Reverse of [`FragmentId::file_name`]. Returns `None` for any file name
    /// that does not follow the convention exactly.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(FRAGMENT_EXTENSION)?.strip_suffix('.')?;
        let (name, environment) = match stem.split_once('.') {
            None => (stem, Environment::Base),
            Some((name, qualifier)) => (name, Environment::from_qualifier(qualifier)?),
        };
        let fragment = FragmentName::new(name).ok()?;
        Some(Self::new(fragment, environment))
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        self.environment
            .qualifier()
            .map_or(Ok(()), |qualifier| write!(f, ".{qualifier}"))
    }
}

/// Condition under which a catalog entry participates in assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentGate {
    /// Always included, independent of the feature selection.
    Always,
    /// Included only when the feature is enabled.
    Feature(Feature),
}

impl FragmentGate {
    /// Returns `true` when the gate admits the fragment under `selection`.
    #[must_use]
    pub fn is_open(self, selection: &FeatureSelection) -> bool {
        match self {
            Self::Always => true,
            Self::Feature(feature) => selection.is_enabled(feature),
        }
    }
}

/// A known fragment and the gate controlling it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    name: FragmentName,
    gate: FragmentGate,
}

impl CatalogEntry {
    /// Create an entry.
    #[must_use]
    pub const fn new(name: FragmentName, gate: FragmentGate) -> Self {
        Self { name, gate }
    }

    /// Fragment name.
    #[must_use]
    pub const fn name(&self) -> &FragmentName {
        &self.name
    }

    /// Gate controlling the fragment.
    #[must_use]
    pub const fn gate(&self) -> FragmentGate {
        self.gate
    }
}

/// Ordered, duplicate-free list of fragments an assembler knows about.
///
/// Catalog order is merge order: when two fragments set the same key, the
/// later entry wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentCatalog {
    entries: Vec<CatalogEntry>,
}

impl FragmentCatalog {
    /// Build a catalog from `(name, gate)` pairs in merge order.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::InvalidFragmentName`] for a malformed name and
    /// [`FragmentError::DuplicateFragment`] when a name repeats.
    pub fn new<I, N>(entries: I) -> FragmentResult<Self>
    where
        I: IntoIterator<Item = (N, FragmentGate)>,
        N: Into<String>,
    {
        let mut catalog = Vec::new();
        for (name, gate) in entries {
            let fragment = FragmentName::new(name)?;
            if catalog
                .iter()
                .any(|entry: &CatalogEntry| entry.name == fragment)
            {
                return Err(FragmentError::DuplicateFragment(fragment.0).into());
            }
            catalog.push(CatalogEntry::new(fragment, gate));
        }
        Ok(Self { entries: catalog })
    }

    /// Entries in merge order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name.as_str() == name)
    }
}

impl Default for FragmentCatalog {
    /// The standard catalog: an always-included `logging` section followed by
    /// one fragment per [`Feature`].
    fn default() -> Self {
        let standard = [
            ("logging", FragmentGate::Always),
            ("auth", FragmentGate::Feature(Feature::Auth)),
            ("http", FragmentGate::Feature(Feature::Http)),
            ("features", FragmentGate::Feature(Feature::FeatureFlags)),
            ("observability", FragmentGate::Feature(Feature::Observability)),
            ("security", FragmentGate::Feature(Feature::Security)),
            ("i18n", FragmentGate::Feature(Feature::I18n)),
        ];
        Self {
            entries: standard
                .into_iter()
                .map(|(name, gate)| CatalogEntry::new(FragmentName(name.to_owned()), gate))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FragmentCatalog, FragmentGate, FragmentId, FragmentName};
    use crate::{Environment, Feature, FeatureSelection, FragmentError};

    #[rstest]
    #[case("")]
    #[case("auth.Development")]
    #[case("../auth")]
    #[case("a b")]
    fn rejects_unsafe_names(#[case] input: &str) {
        assert!(matches!(
            FragmentName::new(input),
            Err(FragmentError::InvalidFragmentName { .. })
        ));
    }

    #[rstest]
    #[case("auth.json", Some(("auth", Environment::Base)))]
    #[case("auth.Development.json", Some(("auth", Environment::Development)))]
    #[case("feature-flags.Production.json", Some(("feature-flags", Environment::Production)))]
    #[case("auth.development.json", None)]
    #[case("auth.Base.json", None)]
    #[case("auth.json5", None)]
    #[case("auth.Development.extra.json", None)]
    #[case(".json", None)]
    #[case("README.md", None)]
    fn parses_file_names(#[case] input: &str, #[case] expected: Option<(&str, Environment)>) {
        let parsed = FragmentId::from_file_name(input);
        let actual = parsed
            .as_ref()
            .map(|id| (id.name().as_str(), id.environment()));
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(Environment::Base, "security.json")]
    #[case(Environment::Staging, "security.Staging.json")]
    fn file_names_round_trip(#[case] env: Environment, #[case] expected: &str) {
        let id = FragmentId::new(FragmentName::new("security").expect("valid"), env);
        assert_eq!(id.file_name(), expected);
        assert_eq!(FragmentId::from_file_name(expected), Some(id));
    }

    #[test]
    fn default_catalog_orders_logging_first() {
        let catalog = FragmentCatalog::default();
        let names: Vec<&str> = catalog
            .entries()
            .iter()
            .map(|entry| entry.name().as_str())
            .collect();
        assert_eq!(
            names,
            ["logging", "auth", "http", "features", "observability", "security", "i18n"]
        );
        assert_eq!(
            catalog.get("features").map(super::CatalogEntry::gate),
            Some(FragmentGate::Feature(Feature::FeatureFlags))
        );
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let err = FragmentCatalog::new([
            ("auth", FragmentGate::Always),
            ("auth", FragmentGate::Feature(Feature::Auth)),
        ])
        .expect_err("duplicate entry");
        assert!(matches!(&*err, FragmentError::DuplicateFragment(name) if name == "auth"));
    }

    #[test]
    fn gates_follow_selection() {
        let selection = FeatureSelection::from_enabled([Feature::Http]);
        assert!(FragmentGate::Always.is_open(&selection));
        assert!(FragmentGate::Feature(Feature::Http).is_open(&selection));
        assert!(!FragmentGate::Feature(Feature::Auth).is_open(&selection));
    }
}
