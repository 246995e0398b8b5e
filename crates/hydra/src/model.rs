use crate::schema::EntityMapping;

use hydra_core::Result;

/// A type that describes its own entity mapping.
///
/// Models can be registered with [`Catalog::builder`](crate::schema::Catalog::builder)
/// by type instead of handing over a mapping.
pub trait Model: Default + 'static {
    /// Builds the mapping for this type.
    fn mapping() -> Result<EntityMapping>;
}
