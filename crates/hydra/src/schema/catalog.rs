use super::{EntityMapping, EntityType};
use crate::Model;

use hydra_core::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Resolves entity mappings by name or by type.
///
/// Both lookups must return the same mapping for a given entity.
pub trait MetadataStore {
    fn mapping(&self, name: &str) -> Result<Arc<EntityMapping>>;

    fn mapping_for(&self, entity_type: &EntityType) -> Result<Arc<EntityMapping>>;
}

/// An immutable, in-memory set of entity mappings.
#[derive(Debug, Default)]
pub struct Catalog {
    by_name: IndexMap<String, Arc<EntityMapping>>,
    by_type: IndexMap<EntityType, Arc<EntityMapping>>,
}

#[derive(Default)]
pub struct Builder {
    /// Models registered by type; their mappings are built in `build`.
    models: Vec<fn() -> Result<EntityMapping>>,

    mappings: Vec<EntityMapping>,
}

impl Catalog {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn mappings(&self) -> impl ExactSizeIterator<Item = &Arc<EntityMapping>> + '_ {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl MetadataStore for Catalog {
    fn mapping(&self, name: &str) -> Result<Arc<EntityMapping>> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("entity mapping `{name}`")))
    }

    fn mapping_for(&self, entity_type: &EntityType) -> Result<Arc<EntityMapping>> {
        self.by_type
            .get(entity_type)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("entity mapping for `{entity_type:?}`")))
    }
}

impl<M: MetadataStore + ?Sized> MetadataStore for Arc<M> {
    fn mapping(&self, name: &str) -> Result<Arc<EntityMapping>> {
        (**self).mapping(name)
    }

    fn mapping_for(&self, entity_type: &EntityType) -> Result<Arc<EntityMapping>> {
        (**self).mapping_for(entity_type)
    }
}

impl Builder {
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.models.push(T::mapping);
        self
    }

    /// Adds a mapping assembled by hand.
    pub fn insert(&mut self, mapping: EntityMapping) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    pub fn build(&self) -> Result<Catalog> {
        let mut catalog = Catalog::default();

        let models = self
            .models
            .iter()
            .map(|mapping| mapping())
            .collect::<Result<Vec<_>>>()?;

        for mapping in models.into_iter().chain(self.mappings.iter().cloned()) {
            let mapping = Arc::new(mapping);

            if catalog.by_name.contains_key(mapping.name()) {
                return Err(Error::invalid_argument(format!(
                    "entity `{}` is registered more than once",
                    mapping.name()
                )));
            }

            if catalog.by_type.contains_key(&mapping.entity_type()) {
                return Err(Error::invalid_argument(format!(
                    "type `{:?}` is mapped more than once",
                    mapping.entity_type()
                )));
            }

            catalog
                .by_name
                .insert(mapping.name().to_string(), mapping.clone());
            catalog.by_type.insert(mapping.entity_type(), mapping);
        }

        Ok(catalog)
    }
}
