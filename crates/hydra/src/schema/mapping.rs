use super::EntityType;
use crate::{instance::AnyInstance, relation::HasOne, session::LazyLoader, Instance, Primitive};

use hydra_core::{stmt::Value, Error, Result};
use indexmap::IndexMap;
use std::{
    any::{type_name, Any},
    fmt,
    sync::Arc,
};

type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

type RelationSetter = Arc<dyn Fn(&mut dyn Any, Option<AnyInstance>) -> Result<()> + Send + Sync>;

type Instantiate = fn(&EntityMapping, Value, Option<LazyLoader>) -> AnyInstance;

/// Describes how result columns map onto one entity type.
///
/// A mapping is assembled once, registered with a catalog and shared
/// read-only from then on.
#[derive(Clone)]
pub struct EntityMapping {
    name: Arc<str>,
    entity_type: EntityType,
    primary_key: PrimaryKey,
    columns: IndexMap<String, Column>,
    one_to_one: IndexMap<String, OneToOne>,
    instantiate: Instantiate,
}

/// Binds the identity column to a field.
#[derive(Clone)]
pub struct PrimaryKey {
    column: String,
    owner: EntityType,
    setter: Setter,
}

/// Binds a scalar column to a field.
#[derive(Clone)]
pub struct Column {
    column: String,
    owner: EntityType,
    setter: Option<Setter>,
}

/// Binds a foreign-key column on the owning row to an associated entity.
#[derive(Clone)]
pub struct OneToOne {
    column: String,
    owner: EntityType,
    reference: EntityType,
    setter: Option<RelationSetter>,
}

impl EntityMapping {
    /// Creates a mapping for `T` named `name` with its primary key binding.
    pub fn new<T: Default + 'static>(name: impl Into<String>, primary_key: PrimaryKey) -> Result<Self> {
        let name = name.into();
        let entity_type = EntityType::of::<T>();

        if primary_key.owner != entity_type {
            return Err(Error::invalid_argument(format!(
                "primary key `{}` is bound to `{:?}`, not `{:?}`",
                primary_key.column, primary_key.owner, entity_type
            )));
        }

        Ok(Self {
            name: name.into(),
            entity_type,
            primary_key,
            columns: IndexMap::new(),
            one_to_one: IndexMap::new(),
            instantiate: instantiate::<T>,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn one_to_one(&self) -> impl ExactSizeIterator<Item = &OneToOne> + '_ {
        self.one_to_one.values()
    }

    /// Finds the one-to-one relation whose foreign key is `column`.
    pub fn relation(&self, column: &str) -> Option<&OneToOne> {
        self.one_to_one.get(column)
    }

    /// Registers a scalar column.
    ///
    /// Fails with a duplicate binding error if `column` is already bound on
    /// this mapping; the mapping is left unchanged.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        self.verify_binding(&column.column, column.owner)?;
        self.columns.insert(column.column.clone(), column);
        Ok(())
    }

    /// Registers a one-to-one relation, with the same rules as
    /// [`add_column`](Self::add_column).
    pub fn add_relation(&mut self, relation: OneToOne) -> Result<()> {
        self.verify_binding(&relation.column, relation.owner)?;
        self.one_to_one.insert(relation.column.clone(), relation);
        Ok(())
    }

    fn verify_binding(&self, column: &str, owner: EntityType) -> Result<()> {
        if owner != self.entity_type {
            return Err(Error::invalid_argument(format!(
                "column `{column}` is bound to `{owner:?}`, but mapping `{}` is for `{:?}`",
                self.name, self.entity_type
            )));
        }

        if self.primary_key.column == column
            || self.columns.contains_key(column)
            || self.one_to_one.contains_key(column)
        {
            return Err(Error::duplicate_binding(&*self.name, column));
        }

        Ok(())
    }

    /// Allocates an empty instance carrying `key` in its primary key field.
    ///
    /// With a loader the instance is a deferred placeholder; without one it
    /// is considered loaded and is populated by the caller.
    pub(crate) fn instantiate(&self, key: Value, loader: Option<LazyLoader>) -> Result<AnyInstance> {
        let instance = (self.instantiate)(self, key.clone(), loader);
        let primary_key = &self.primary_key;
        instance.with_value_mut(&mut |entity: &mut dyn Any| primary_key.set(entity, key.clone()))?;
        Ok(instance)
    }
}

fn instantiate<T: Default + 'static>(
    mapping: &EntityMapping,
    key: Value,
    loader: Option<LazyLoader>,
) -> AnyInstance {
    Instance::<T>::new(
        mapping.name.clone(),
        mapping.entity_type,
        key,
        T::default(),
        loader,
    )
    .erase()
}

impl fmt::Debug for EntityMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMapping")
            .field("name", &self.name)
            .field("entity_type", &self.entity_type)
            .field("primary_key", &self.primary_key)
            .field("columns", &self.columns.values().collect::<Vec<_>>())
            .field("one_to_one", &self.one_to_one.values().collect::<Vec<_>>())
            .finish()
    }
}

impl PrimaryKey {
    /// Binds `column` to the field returned by `field`.
    pub fn new<T, F>(
        column: impl Into<String>,
        field: impl Fn(&mut T) -> &mut F + Send + Sync + 'static,
    ) -> Self
    where
        T: 'static,
        F: Primitive,
    {
        let column = column.into();

        Self {
            setter: scalar_setter(column.clone(), field),
            owner: EntityType::of::<T>(),
            column,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn set(&self, entity: &mut dyn Any, value: Value) -> Result<()> {
        (self.setter)(entity, value)
    }
}

impl fmt::Debug for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimaryKey")
            .field("column", &self.column)
            .finish()
    }
}

impl Column {
    /// Binds `column` to the field returned by `field`.
    pub fn new<T, F>(
        column: impl Into<String>,
        field: impl Fn(&mut T) -> &mut F + Send + Sync + 'static,
    ) -> Self
    where
        T: 'static,
        F: Primitive,
    {
        let column = column.into();

        Self {
            setter: Some(scalar_setter(column.clone(), field)),
            owner: EntityType::of::<T>(),
            column,
        }
    }

    /// Declares a column on `T` with no settable field. Hydration neither
    /// reads nor writes it.
    pub fn read_only<T: 'static>(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            owner: EntityType::of::<T>(),
            setter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.column
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub(crate) fn set(&self, entity: &mut dyn Any, value: Value) -> Result<()> {
        match &self.setter {
            Some(setter) => setter(entity, value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("column", &self.column)
            .field("writable", &self.is_writable())
            .finish()
    }
}

impl OneToOne {
    /// Binds the foreign key `column` to a [`HasOne`] field referencing `R`.
    pub fn new<T, R>(
        column: impl Into<String>,
        field: impl Fn(&mut T) -> &mut HasOne<R> + Send + Sync + 'static,
    ) -> Self
    where
        T: 'static,
        R: 'static,
    {
        let column = column.into();
        let name = column.clone();

        let setter: RelationSetter = Arc::new(move |entity: &mut dyn Any, target: Option<AnyInstance>| {
            let entity = downcast_mut::<T>(entity, &name)?;
            let target = match target {
                Some(target) => Some(target.downcast::<R>().ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "relation `{name}` expects `{}`, got `{:?}`",
                        type_name::<R>(),
                        target.entity_type()
                    ))
                })?),
                None => None,
            };
            *field(entity) = HasOne::from(target);
            Ok(())
        });

        Self {
            column,
            owner: EntityType::of::<T>(),
            reference: EntityType::of::<R>(),
            setter: Some(setter),
        }
    }

    /// Declares a relation on `T` to `R` with no settable field.
    pub fn read_only<T: 'static, R: 'static>(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            owner: EntityType::of::<T>(),
            reference: EntityType::of::<R>(),
            setter: None,
        }
    }

    /// The foreign-key column on the owning row.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The associated entity type.
    pub fn reference(&self) -> EntityType {
        self.reference
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub(crate) fn set(&self, entity: &mut dyn Any, target: Option<AnyInstance>) -> Result<()> {
        match &self.setter {
            Some(setter) => setter(entity, target),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for OneToOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneToOne")
            .field("column", &self.column)
            .field("reference", &self.reference)
            .field("writable", &self.is_writable())
            .finish()
    }
}

fn scalar_setter<T, F>(
    column: String,
    field: impl Fn(&mut T) -> &mut F + Send + Sync + 'static,
) -> Setter
where
    T: 'static,
    F: Primitive,
{
    Arc::new(move |entity: &mut dyn Any, value: Value| {
        let entity = downcast_mut::<T>(entity, &column)?;
        *field(entity) = F::load(value)?;
        Ok(())
    })
}

fn downcast_mut<'a, T: 'static>(entity: &'a mut dyn Any, column: &str) -> Result<&'a mut T> {
    entity.downcast_mut::<T>().ok_or_else(|| {
        Error::invalid_argument(format!(
            "column `{column}` can only be written to `{}`",
            type_name::<T>()
        ))
    })
}
