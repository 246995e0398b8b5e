use crate::Instance;

use hydra_core::{stmt::Value, Result};
use std::{cell::Ref, fmt};

/// A one-to-one association to another entity.
///
/// The target is either absent, a loaded instance, or a deferred placeholder
/// that is refreshed through the session on first access.
pub struct HasOne<T> {
    value: Option<Instance<T>>,
}

impl<T: 'static> HasOne<T> {
    pub fn new(instance: Instance<T>) -> Self {
        Self {
            value: Some(instance),
        }
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    /// The target's key. Reading it never triggers a refresh.
    pub fn key(&self) -> Option<&Value> {
        self.value.as_ref().map(Instance::key)
    }

    /// Returns `true` if there is no target or the target is loaded.
    pub fn is_loaded(&self) -> bool {
        self.value.as_ref().map_or(true, Instance::is_loaded)
    }

    /// The shared target handle, without loading it.
    pub fn instance(&self) -> Option<&Instance<T>> {
        self.value.as_ref()
    }

    /// Borrows the target, refreshing a placeholder first.
    pub fn get(&self) -> Result<Option<Ref<'_, T>>> {
        self.value.as_ref().map(Instance::get).transpose()
    }
}

impl<T> Default for HasOne<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> From<Option<Instance<T>>> for HasOne<T> {
    fn from(value: Option<Instance<T>>) -> Self {
        Self { value }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasOne<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_ref() {
            Some(instance) => fmt::Debug::fmt(instance, fmt),
            None => write!(fmt, "<none>"),
        }
    }
}
