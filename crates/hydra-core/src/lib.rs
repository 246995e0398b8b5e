pub mod driver;
pub use driver::{Command, Cursor};

mod error;
pub use error::{Error, IntoError};

pub mod stmt;

/// A Result type alias that uses hydra's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
