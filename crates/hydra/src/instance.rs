use crate::{schema::EntityType, session::LazyLoader};

use hydra_core::{stmt::Value, Error, Result};
use std::{
    any::Any,
    cell::{Cell, Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
    sync::Arc,
};

/// A shared handle to one entity instance.
///
/// Clones point to the same instance. The identity cache holds one handle per
/// identity, so everything hydrated within a unit of work that names the same
/// key shares it.
///
/// An instance is either loaded or a deferred placeholder. A placeholder only
/// knows its key; the first call to [`get`](Self::get) or
/// [`get_mut`](Self::get_mut) asks the session to refresh it.
pub struct Instance<T> {
    node: Rc<Node<T>>,
}

/// An [`Instance`] with its entity type erased.
#[derive(Clone)]
pub struct AnyInstance {
    node: Rc<dyn ErasedNode>,
}

struct Node<T> {
    entity: Arc<str>,
    entity_type: EntityType,
    key: Value,
    loaded: Cell<bool>,
    loader: Option<LazyLoader>,
    value: RefCell<T>,
}

trait ErasedNode {
    fn entity(&self) -> &str;

    fn entity_type(&self) -> EntityType;

    fn key(&self) -> &Value;

    fn is_loaded(&self) -> bool;

    fn set_loaded(&self);

    fn with_value_mut(&self, f: &mut dyn FnMut(&mut dyn Any) -> Result<()>) -> Result<()>;

    fn load(self: Rc<Self>) -> Result<()>;

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: 'static> Instance<T> {
    pub(crate) fn new(
        entity: Arc<str>,
        entity_type: EntityType,
        key: Value,
        value: T,
        loader: Option<LazyLoader>,
    ) -> Self {
        Self {
            node: Rc::new(Node {
                entity,
                entity_type,
                key,
                loaded: Cell::new(loader.is_none()),
                loader,
                value: RefCell::new(value),
            }),
        }
    }

    /// The primary key. Reading it never triggers a refresh.
    pub fn key(&self) -> &Value {
        &self.node.key
    }

    /// Name of the entity mapping this instance was created from.
    pub fn entity(&self) -> &str {
        &self.node.entity
    }

    pub fn is_loaded(&self) -> bool {
        self.node.loaded.get()
    }

    /// Refreshes a deferred placeholder. Does nothing once loaded.
    ///
    /// A failed refresh leaves the placeholder deferred; the next access tries
    /// again.
    pub fn load(&self) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }

        let Some(loader) = &self.node.loader else {
            self.node.loaded.set(true);
            return Ok(());
        };

        let _span = tracing::debug_span!(
            "refresh",
            entity = %self.node.entity,
            key = %self.node.key
        )
        .entered();

        loader
            .refresh(&self.erase())
            .map_err(|err| err.context(Error::refresh_failure(self.entity(), self.key())))?;

        self.node.loaded.set(true);
        Ok(())
    }

    /// Borrows the entity, loading it first if it is a placeholder.
    pub fn get(&self) -> Result<Ref<'_, T>> {
        self.load()?;
        self.node.value.try_borrow().map_err(|_| self.borrowed())
    }

    /// Mutably borrows the entity, loading it first if it is a placeholder.
    pub fn get_mut(&self) -> Result<RefMut<'_, T>> {
        self.load()?;
        self.node.value.try_borrow_mut().map_err(|_| self.borrowed())
    }

    /// Returns `true` if both handles point to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn erase(&self) -> AnyInstance {
        AnyInstance {
            node: self.node.clone(),
        }
    }

    fn borrowed(&self) -> Error {
        Error::invalid_argument(format!(
            "`{}` (key = {}) is already mutably borrowed",
            self.node.entity, self.node.key
        ))
    }
}

impl<T> Clone for Instance<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Instance<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.node.loaded.get() {
            return write!(fmt, "<deferred {} key={}>", self.node.entity, self.node.key);
        }

        match self.node.value.try_borrow() {
            Ok(value) => fmt::Debug::fmt(&*value, fmt),
            Err(_) => write!(fmt, "<borrowed {} key={}>", self.node.entity, self.node.key),
        }
    }
}

impl<T: 'static> From<Instance<T>> for AnyInstance {
    fn from(instance: Instance<T>) -> Self {
        AnyInstance {
            node: instance.node,
        }
    }
}

impl AnyInstance {
    pub fn key(&self) -> &Value {
        self.node.key()
    }

    pub fn entity(&self) -> &str {
        self.node.entity()
    }

    pub fn entity_type(&self) -> EntityType {
        self.node.entity_type()
    }

    pub fn is_loaded(&self) -> bool {
        self.node.is_loaded()
    }

    /// See [`Instance::load`].
    pub fn load(&self) -> Result<()> {
        self.node.clone().load()
    }

    /// Recovers the typed handle. Returns `None` if the instance is not a `T`.
    pub fn downcast<T: 'static>(&self) -> Option<Instance<T>> {
        self.node
            .clone()
            .into_any()
            .downcast::<Node<T>>()
            .ok()
            .map(|node| Instance { node })
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.node.entity_type().is::<T>()
    }

    /// Returns `true` if both handles point to the same instance.
    pub fn ptr_eq(&self, other: &AnyInstance) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.node) as *const (),
            Rc::as_ptr(&other.node) as *const (),
        )
    }

    /// Marks a placeholder as loaded after its fields were written in place.
    pub(crate) fn set_loaded(&self) {
        self.node.set_loaded();
    }

    /// Runs `f` against the entity without triggering a refresh.
    pub(crate) fn with_value_mut(
        &self,
        f: &mut dyn FnMut(&mut dyn Any) -> Result<()>,
    ) -> Result<()> {
        self.node.with_value_mut(f)
    }
}

impl fmt::Debug for AnyInstance {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("AnyInstance")
            .field("entity", &self.entity())
            .field("key", self.key())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl<T: 'static> ErasedNode for Node<T> {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn key(&self) -> &Value {
        &self.key
    }

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    fn set_loaded(&self) {
        self.loaded.set(true);
    }

    fn with_value_mut(&self, f: &mut dyn FnMut(&mut dyn Any) -> Result<()>) -> Result<()> {
        let mut value = self.value.try_borrow_mut().map_err(|_| {
            Error::invalid_argument(format!(
                "`{}` (key = {}) cannot be written while it is borrowed",
                self.entity, self.key
            ))
        })?;
        f(&mut *value)
    }

    fn load(self: Rc<Self>) -> Result<()> {
        Instance { node: self }.load()
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
