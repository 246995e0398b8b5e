use super::Hydrator;
use crate::{
    cache::{IdentityCache, SessionCache},
    schema::MetadataStore,
    session::LazyLoader,
};

use hydra_core::{Error, Result};
use serde::Deserialize;
use std::{rc::Rc, sync::Arc};

/// Tunables for a [`Hydrator`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placed between a return's alias and a column name, e.g. `B_Title`.
    pub alias_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alias_separator: "_".to_string(),
        }
    }
}

#[derive(Default)]
pub struct Builder {
    metadata: Option<Arc<dyn MetadataStore>>,

    /// When unset, each built hydrator gets its own `SessionCache`.
    cache: Option<Rc<dyn IdentityCache>>,

    loader: LazyLoader,

    config: Config,
}

impl Builder {
    pub fn metadata<M: MetadataStore + 'static>(&mut self, metadata: Arc<M>) -> &mut Self {
        let metadata: Arc<dyn MetadataStore> = metadata;
        self.metadata = Some(metadata);
        self
    }

    pub fn cache<C: IdentityCache + 'static>(&mut self, cache: Rc<C>) -> &mut Self {
        let cache: Rc<dyn IdentityCache> = cache;
        self.cache = Some(cache);
        self
    }

    /// The loader handed to every placeholder. Defaults to a detached loader.
    pub fn loader(&mut self, loader: LazyLoader) -> &mut Self {
        self.loader = loader;
        self
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn alias_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.config.alias_separator = separator.into();
        self
    }

    pub fn build(&self) -> Result<Hydrator> {
        let Some(metadata) = self.metadata.clone() else {
            return Err(Error::invalid_argument("a metadata store is required"));
        };

        if self.config.alias_separator.is_empty() {
            return Err(Error::invalid_argument("alias separator must not be empty"));
        }

        let cache: Rc<dyn IdentityCache> = match &self.cache {
            Some(cache) => cache.clone(),
            None => Rc::new(SessionCache::new()),
        };

        Ok(Hydrator {
            metadata,
            cache,
            loader: self.loader.clone(),
            config: self.config.clone(),
        })
    }
}
