use super::Error;

/// Error when a result shape cannot be resolved against the entity mappings.
///
/// This occurs when:
/// - A join return's owner alias matches no root return, or more than one
/// - A join return's owner property names no one-to-one relation on the owner
/// - A return kind the engine does not materialize (collections)
#[derive(Debug)]
pub(super) struct UnsupportedShape {
    message: Box<str>,
}

impl std::error::Error for UnsupportedShape {}

impl core::fmt::Display for UnsupportedShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported result shape: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported shape error.
    pub fn unsupported_shape(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedShape(UnsupportedShape {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported shape error.
    pub fn is_unsupported_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedShape(_))
    }
}
