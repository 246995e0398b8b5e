use super::Error;

/// Error when a mapped column is absent from a row under the active alias.
#[derive(Debug)]
pub(super) struct MissingColumn {
    entity: Box<str>,
    column: Box<str>,
}

impl std::error::Error for MissingColumn {}

impl core::fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing column `{}` for entity `{}`",
            self.column, self.entity
        )
    }
}

impl Error {
    /// Creates a missing column error.
    pub fn missing_column(entity: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingColumn(MissingColumn {
            entity: entity.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing column error.
    pub fn is_missing_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingColumn(_))
    }
}
