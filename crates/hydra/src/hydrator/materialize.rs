use super::Hydrator;
use crate::{
    instance::AnyInstance,
    schema::{EntityMapping, OneToOne},
};

use hydra_core::{
    stmt::{Row, Value},
    Error, Result,
};
use std::any::Any;
use tracing::trace;

pub(super) struct Resolved {
    pub(super) instance: AnyInstance,

    /// `false` when the instance was a loaded cache hit and left untouched.
    pub(super) populated: bool,
}

impl Hydrator {
    /// Resolves the entity described by `values` through the identity cache.
    ///
    /// Returns `None` if the primary key is null. A cached, loaded instance is
    /// returned untouched. A cached placeholder is populated in place. Anything
    /// else is allocated, cached under its key, then populated.
    ///
    /// Relations listed in `joined` are left for the join return that supplies
    /// them.
    pub(crate) fn materialize(
        &self,
        mapping: &EntityMapping,
        values: &Row,
        joined: &[String],
    ) -> Result<Option<AnyInstance>> {
        Ok(self
            .resolve(mapping, values, joined)?
            .map(|resolved| resolved.instance))
    }

    /// Like [`materialize`](Self::materialize), but also reports whether this
    /// call wrote the instance's fields.
    pub(super) fn resolve(
        &self,
        mapping: &EntityMapping,
        values: &Row,
        joined: &[String],
    ) -> Result<Option<Resolved>> {
        let primary_key = mapping.primary_key().column();
        let key = values
            .get(primary_key)
            .ok_or_else(|| Error::missing_column(mapping.name(), primary_key))?;

        if key.is_null() {
            trace!(entity = mapping.name(), "null primary key; no entity");
            return Ok(None);
        }

        let entity_type = mapping.entity_type();

        if let Some(instance) = self.cache.try_find(&entity_type, key) {
            if instance.is_loaded() {
                trace!(entity = mapping.name(), %key, "identity cache hit");
                return Ok(Some(Resolved {
                    instance,
                    populated: false,
                }));
            }

            trace!(entity = mapping.name(), %key, "fulfilling placeholder from row");
            self.populate(mapping, &instance, values, joined)?;
            instance.set_loaded();
            return Ok(Some(Resolved {
                instance,
                populated: true,
            }));
        }

        let instance = mapping.instantiate(key.clone(), None)?;

        // Cached before population so a relation back to this identity finds it.
        self.cache.store(&entity_type, key, instance.clone())?;
        self.populate(mapping, &instance, values, joined)?;

        Ok(Some(Resolved {
            instance,
            populated: true,
        }))
    }

    /// Writes a join's output into the owner's relation field.
    pub(super) fn assign(
        &self,
        owner: &AnyInstance,
        relation: &OneToOne,
        target: Option<AnyInstance>,
    ) -> Result<()> {
        if !relation.is_writable() {
            return Ok(());
        }

        owner.with_value_mut(&mut |entity: &mut dyn Any| relation.set(entity, target.clone()))
    }

    fn populate(
        &self,
        mapping: &EntityMapping,
        instance: &AnyInstance,
        values: &Row,
        joined: &[String],
    ) -> Result<()> {
        let mut columns = vec![];

        for column in mapping.columns().filter(|column| column.is_writable()) {
            let value = values
                .get(column.name())
                .ok_or_else(|| Error::missing_column(mapping.name(), column.name()))?;

            columns.push((column, value.clone()));
        }

        let mut relations = vec![];

        for relation in mapping.one_to_one().filter(|relation| {
            relation.is_writable() && !joined.iter().any(|column| column == relation.column())
        }) {
            let key = values
                .get(relation.column())
                .ok_or_else(|| Error::missing_column(mapping.name(), relation.column()))?;

            let target = if key.is_null() {
                trace!(entity = mapping.name(), relation = relation.column(), "null foreign key");
                None
            } else {
                Some(self.resolve_reference(relation, key)?)
            };

            relations.push((relation, target));
        }

        instance.with_value_mut(&mut |entity: &mut dyn Any| {
            for (column, value) in &columns {
                column.set(entity, value.clone())?;
            }

            for (relation, target) in &relations {
                relation.set(entity, target.clone())?;
            }

            Ok(())
        })
    }

    /// Finds the referenced instance in the cache, or caches a placeholder
    /// carrying only its key.
    fn resolve_reference(&self, relation: &OneToOne, key: &Value) -> Result<AnyInstance> {
        let reference = relation.reference();

        if let Some(instance) = self.cache.try_find(&reference, key) {
            trace!(relation = relation.column(), %key, "identity cache hit");
            return Ok(instance);
        }

        let mapping = self.metadata.mapping_for(&reference)?;
        let placeholder = mapping.instantiate(key.clone(), Some(self.loader.clone()))?;
        self.cache.store(&reference, key, placeholder.clone())?;

        trace!(entity = mapping.name(), %key, "created placeholder");

        Ok(placeholder)
    }
}
