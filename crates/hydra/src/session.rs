use crate::{instance::AnyInstance, schema::EntityType};

use hydra_core::{err, Result};
use std::{
    fmt,
    rc::{Rc, Weak},
};

/// The unit of work that owns the identity cache and knows how to load a
/// single entity by key.
pub trait Session {
    /// Loads the row for `instance` and writes its fields in place.
    ///
    /// Implementations typically run a keyed query and hydrate it, which
    /// finds the placeholder in the identity cache and fulfils it.
    fn refresh(&self, entity_type: &EntityType, instance: &AnyInstance) -> Result<()>;
}

/// A handle placeholders use to reach their session.
///
/// The handle is weak: placeholders never keep a session alive. Once the
/// session is gone, refreshing fails.
#[derive(Clone, Default)]
pub struct LazyLoader {
    session: Option<Weak<dyn Session>>,
}

impl LazyLoader {
    pub fn new<S: Session + 'static>(session: &Rc<S>) -> Self {
        let session: Rc<dyn Session> = session.clone();
        Self {
            session: Some(Rc::downgrade(&session)),
        }
    }

    /// Builds a loader from a weak handle, e.g. inside `Rc::new_cyclic`.
    pub fn from_weak<S: Session + 'static>(session: Weak<S>) -> Self {
        let session: Weak<dyn Session> = session;
        Self {
            session: Some(session),
        }
    }

    /// A loader that is not attached to any session.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.strong_count() > 0)
    }

    pub(crate) fn refresh(&self, instance: &AnyInstance) -> Result<()> {
        let Some(session) = self.session.as_ref().and_then(Weak::upgrade) else {
            return Err(err!("no session is available to load `{}`", instance.entity()));
        };

        session.refresh(&instance.entity_type(), instance)
    }
}

impl fmt::Debug for LazyLoader {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("LazyLoader")
            .field("attached", &self.is_attached())
            .finish()
    }
}
