mod catalog;
pub use catalog::{Builder, Catalog, MetadataStore};

mod entity_type;
pub use entity_type::EntityType;

mod mapping;
pub use mapping::{Column, EntityMapping, OneToOne, PrimaryKey};
