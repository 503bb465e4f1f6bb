//! Load single fragments from a [`FragmentSource`].

mod parser;

use crate::{
    ConfigDocument, Environment, FragmentError, FragmentId, FragmentName, FragmentResult,
    FragmentSource,
};

pub(crate) use parser::parse_document;

/// A fragment that was found and parsed successfully.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    id: FragmentId,
    location: String,
    document: ConfigDocument,
}

impl Fragment {
    /// Identity of the fragment.
    #[must_use]
    pub const fn id(&self) -> &FragmentId {
        &self.id
    }

    /// Where the fragment was read from.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Parsed contents.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Consume the fragment, returning its contents.
    #[must_use]
    pub fn into_document(self) -> ConfigDocument {
        self.document
    }
}

/// Reads fragment files by naming convention and parses them.
///
/// Absence is not an error: [`FragmentLoader::load`] returns `Ok(None)` when
/// the file does not exist.
#[derive(Debug)]
pub struct FragmentLoader<S> {
    source: S,
}

impl<S: FragmentSource> FragmentLoader<S> {
    /// Wrap a source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the wrapped source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load `name` for `environment`.
    ///
    /// For [`Environment::Base`] this reads `<name>.json`; otherwise it reads
    /// `<name>.<Environment>.json` only.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Invalid`] when the file exists but cannot be
    /// read or parsed as a JSON object, and
    /// [`FragmentError::StorageUnavailable`] when the source cannot be read.
    pub fn load(
        &self,
        name: &FragmentName,
        environment: Environment,
    ) -> FragmentResult<Option<Fragment>> {
        let id = FragmentId::new(name.clone(), environment);
        let file_name = id.file_name();
        let bytes = match self.source.read(&file_name) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::trace!(fragment = %id, "fragment absent");
                return Ok(None);
            }
            Err(err) => {
                return Err(match &*err {
                    FragmentError::Unreadable { location, source } => FragmentError::invalid(
                        id,
                        location.clone(),
                        format!("cannot read: {source}"),
                    ),
                    _ => err,
                });
            }
        };
        let location = self.source.locate(&file_name);
        match parse_document(&bytes) {
            Ok(document) => Ok(Some(Fragment {
                id,
                location,
                document,
            })),
            Err(reason) => Err(FragmentError::invalid(id, location, reason)),
        }
    }
}
