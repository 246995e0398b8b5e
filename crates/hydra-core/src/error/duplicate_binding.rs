use super::Error;

/// Error when a column is bound twice on the same entity mapping.
#[derive(Debug)]
pub(super) struct DuplicateBinding {
    entity: Box<str>,
    column: Box<str>,
}

impl std::error::Error for DuplicateBinding {}

impl core::fmt::Display for DuplicateBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "entity mapping `{}` already contains a column named `{}`",
            self.entity, self.column
        )
    }
}

impl Error {
    /// Creates a duplicate binding error.
    pub fn duplicate_binding(entity: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateBinding(DuplicateBinding {
            entity: entity.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate binding error.
    pub fn is_duplicate_binding(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateBinding(_))
    }
}
