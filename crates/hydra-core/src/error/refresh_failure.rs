use super::Error;
use crate::stmt::Value;

/// Error when a deferred association fails to load.
///
/// Usually added as context on top of the session's own error, so the root
/// cause stays reachable through [`Error::root`].
#[derive(Debug)]
pub(super) struct RefreshFailure {
    entity: Box<str>,
    key: Box<str>,
}

impl std::error::Error for RefreshFailure {}

impl core::fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to refresh `{}` (key = {})", self.entity, self.key)
    }
}

impl Error {
    /// Creates a refresh failure error for the entity identified by `key`.
    pub fn refresh_failure(entity: impl Into<String>, key: &Value) -> Error {
        Error::from(super::ErrorKind::RefreshFailure(RefreshFailure {
            entity: entity.into().into(),
            key: key.to_string().into(),
        }))
    }

    /// Returns `true` if this error is a refresh failure.
    pub fn is_refresh_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RefreshFailure(_))
    }
}
