mod builder;
pub use builder::{Builder, Config};

mod materialize;

mod plan;
use plan::Plan;

use crate::{
    cache::IdentityCache,
    cursor::Entities,
    instance::AnyInstance,
    result_set::{ResultSetMapping, RootReturn},
    schema::{EntityType, MetadataStore},
    session::LazyLoader,
    Instance,
};

use hydra_core::{driver::Command, stmt::Row, Error, Result};
use std::{any::type_name, rc::Rc, sync::Arc};
use tracing::{debug, trace};

/// Turns command results into entity instances.
///
/// A hydrator is bound to one identity cache, so it belongs to a single unit
/// of work. Every call executes its command once and buffers all rows before
/// any entity is built.
pub struct Hydrator {
    metadata: Arc<dyn MetadataStore>,
    cache: Rc<dyn IdentityCache>,
    loader: LazyLoader,
    config: Config,
}

impl Hydrator {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn metadata(&self) -> &dyn MetadataStore {
        &*self.metadata
    }

    pub fn cache(&self) -> &dyn IdentityCache {
        &*self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hydrates the first row as a `T`, using raw column names.
    ///
    /// Returns `None` when the command produced no rows.
    pub fn hydrate_one<T: 'static>(&self, command: &mut dyn Command) -> Result<Option<Instance<T>>> {
        let mapping = self.metadata.mapping_for(&EntityType::of::<T>())?;
        let shape = ResultSetMapping::new().add_query_return(RootReturn::new(mapping.name()));

        self.hydrate(command, &shape)?.map(downcast::<T>).transpose()
    }

    /// Hydrates one `T` per row, using raw column names.
    ///
    /// Rows are buffered up front and materialized as the iterator advances.
    /// Rows whose primary key is null are skipped.
    pub fn hydrate_many<T: 'static>(&self, command: &mut dyn Command) -> Result<Entities<'_, T>> {
        let mapping = self.metadata.mapping_for(&EntityType::of::<T>())?;
        let rows = self.read(command)?;

        debug!(entity = mapping.name(), rows = rows.len(), "buffered result set");

        Ok(Entities::new(self, mapping, rows))
    }

    /// Returns the first output of [`hydrate_all`](Self::hydrate_all).
    pub fn hydrate(
        &self,
        command: &mut dyn Command,
        shape: &ResultSetMapping,
    ) -> Result<Option<AnyInstance>> {
        Ok(self.hydrate_all(command, shape)?.into_iter().next().flatten())
    }

    /// Hydrates one entity per query return, reported in declaration order.
    ///
    /// Only the first buffered row is used. With no rows, every output is
    /// `None`.
    pub fn hydrate_all(
        &self,
        command: &mut dyn Command,
        shape: &ResultSetMapping,
    ) -> Result<Vec<Option<AnyInstance>>> {
        if shape.is_empty() {
            return Err(Error::invalid_argument(
                "result set mapping has no query returns",
            ));
        }

        let plan = Plan::build(shape, &*self.metadata)?;
        let rows = self.read(command)?;

        debug!(rows = rows.len(), returns = shape.len(), "buffered result set");

        let mut outputs: Vec<Option<AnyInstance>> = vec![None; shape.len()];
        let mut populated = vec![false; shape.len()];

        let Some(row) = rows.first() else {
            return Ok(outputs);
        };

        if rows.len() > 1 {
            trace!(ignored = rows.len() - 1, "only the first row is hydrated");
        }

        for step in plan.steps() {
            let values = step.values(row, &self.config.alias_separator)?;
            let resolved = self.resolve(step.mapping(), &values, step.joined())?;

            let instance = match resolved {
                Some(resolved) => {
                    populated[step.index()] = resolved.populated;
                    Some(resolved.instance)
                }
                None => None,
            };

            if let Some(owner) = step.owner() {
                match &outputs[owner.index] {
                    // A loaded cache hit keeps the relation it already has.
                    Some(target) if populated[owner.index] => {
                        self.assign(target, &owner.relation, instance.clone())?;
                    }
                    Some(target) => {
                        trace!(
                            entity = target.entity(),
                            relation = owner.relation.column(),
                            "owner was a cache hit; join not assigned"
                        );
                    }
                    None => {}
                }
            }

            outputs[step.index()] = instance;
        }

        Ok(outputs)
    }

    fn read(&self, command: &mut dyn Command) -> Result<Vec<Row>> {
        let mut cursor = command.execute()?;
        Row::read_all(&mut *cursor)
    }
}

pub(crate) fn downcast<T: 'static>(instance: AnyInstance) -> Result<Instance<T>> {
    instance.downcast::<T>().ok_or_else(|| {
        Error::invalid_result(format!(
            "`{}` was hydrated as `{:?}`, not `{}`",
            instance.entity(),
            instance.entity_type(),
            type_name::<T>()
        ))
    })
}
