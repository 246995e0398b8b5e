pub mod option;
pub mod result;
pub mod same;

pub mod prelude {
    pub use crate::{assert_err, assert_none, assert_ok, assert_not_same, assert_same, assert_some};
}
