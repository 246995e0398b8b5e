use super::Error;

/// Error when a metadata or record lookup comes back empty.
#[derive(Debug)]
pub(super) struct NotFound {
    what: Box<str>,
}

impl std::error::Error for NotFound {}

impl core::fmt::Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not found: {}", self.what)
    }
}

impl Error {
    /// Creates a not found error. `what` describes the missing item, e.g.
    /// "entity mapping `Book`".
    pub fn not_found(what: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFound {
            what: what.into().into(),
        }))
    }

    /// Returns `true` if this error is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotFound(_))
    }
}
