use hydra_core::{stmt::Value, Result};
use uuid::Uuid;

/// A field type that can be loaded from a single column value.
pub trait Primitive: Sized {
    fn load(value: Value) -> Result<Self>;

    /// Returns `true` if the primitive accepts null (e.g. `Option`).
    fn nullable() -> bool {
        false
    }
}

macro_rules! impl_primitive {
    ( $($t:ty),+ ) => {
        $(
            impl Primitive for $t {
                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }
            }
        )+
    };
}

impl_primitive!(bool, i32, i64, f64, String, Vec<u8>, Uuid);

impl Primitive for Value {
    fn load(value: Value) -> Result<Self> {
        Ok(value)
    }

    fn nullable() -> bool {
        true
    }
}

impl<T: Primitive> Primitive for Option<T> {
    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn nullable() -> bool {
        true
    }
}
