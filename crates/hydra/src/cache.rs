use crate::{instance::AnyInstance, schema::EntityType};

use hydra_core::{stmt::Value, Error, Result};
use std::{cell::RefCell, collections::HashMap};

/// Maps an entity identity to the one instance that represents it within a
/// unit of work.
///
/// Both a loaded instance and a deferred placeholder count as present.
pub trait IdentityCache {
    fn try_find(&self, entity_type: &EntityType, key: &Value) -> Option<AnyInstance>;

    /// Records `instance` under its identity. Storing a second, different
    /// instance for an identity already present is an error.
    fn store(&self, entity_type: &EntityType, key: &Value, instance: AnyInstance) -> Result<()>;
}

/// An identity cache scoped to a single session.
///
/// Integer keys are compared by value across widths, so `I32(1)` and `I64(1)`
/// name the same entity. Every other key only matches a key of the same kind
/// with the same display form; `String("1")` never matches `I32(1)`.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: RefCell<HashMap<EntityType, HashMap<Identity, AnyInstance>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    Integer(i64),
    Other(&'static str, String),
}

impl Identity {
    fn of(key: &Value) -> Self {
        match key {
            Value::I32(v) => Identity::Integer(i64::from(*v)),
            Value::I64(v) => Identity::Integer(*v),
            Value::Bool(_) => Identity::Other("bool", key.to_string()),
            Value::F64(_) => Identity::Other("f64", key.to_string()),
            Value::Null => Identity::Other("null", key.to_string()),
            Value::String(_) => Identity::Other("string", key.to_string()),
            Value::Bytes(_) => Identity::Other("bytes", key.to_string()),
            Value::Uuid(_) => Identity::Other("uuid", key.to_string()),
        }
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every instance, ending the unit of work.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl IdentityCache for SessionCache {
    fn try_find(&self, entity_type: &EntityType, key: &Value) -> Option<AnyInstance> {
        self.entries
            .borrow()
            .get(entity_type)?
            .get(&Identity::of(key))
            .cloned()
    }

    fn store(&self, entity_type: &EntityType, key: &Value, instance: AnyInstance) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        let by_key = entries.entry(*entity_type).or_default();

        let identity = Identity::of(key);

        match by_key.get(&identity) {
            Some(existing) if existing.ptr_eq(&instance) => Ok(()),
            Some(_) => Err(Error::invalid_argument(format!(
                "`{}` (key = {key}) is already cached as a different instance",
                instance.entity()
            ))),
            None => {
                by_key.insert(identity, instance);
                Ok(())
            }
        }
    }
}
