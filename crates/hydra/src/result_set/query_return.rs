use indexmap::IndexMap;

/// Maps a mapped column name to the raw result columns that supply it. The
/// first listed raw column wins.
pub type PropertyMappings = IndexMap<String, Vec<String>>;

/// One entry of a [`ResultSetMapping`](super::ResultSetMapping).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryReturn {
    Root(RootReturn),
    Join(JoinReturn),
    Collection(CollectionReturn),
}

/// An entity materialized directly from the row.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReturn {
    alias: String,
    entity: String,
    property_mappings: PropertyMappings,
}

/// An entity materialized from its own alias prefix of the row and assigned
/// to a one-to-one relation of a root return.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinReturn {
    alias: String,
    owner_alias: String,
    owner_property: String,
    property_mappings: PropertyMappings,
}

/// A one-to-many return. Declarable, but not hydrated.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReturn {
    alias: String,
    owner_entity: String,
    owner_property: String,
}

impl QueryReturn {
    pub fn alias(&self) -> &str {
        match self {
            Self::Root(root) => root.alias(),
            Self::Join(join) => join.alias(),
            Self::Collection(collection) => collection.alias(),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root(_))
    }

    pub fn is_join(&self) -> bool {
        matches!(self, Self::Join(_))
    }
}

impl RootReturn {
    /// A root return over raw, unprefixed column names.
    pub fn new(entity: impl Into<String>) -> Self {
        Self::aliased("", entity)
    }

    pub fn aliased(alias: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            entity: entity.into(),
            property_mappings: PropertyMappings::new(),
        }
    }

    pub fn with_property_mappings(mut self, property_mappings: PropertyMappings) -> Self {
        self.property_mappings = property_mappings;
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn property_mappings(&self) -> &PropertyMappings {
        &self.property_mappings
    }
}

impl JoinReturn {
    pub fn new(
        alias: impl Into<String>,
        owner_alias: impl Into<String>,
        owner_property: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            owner_alias: owner_alias.into(),
            owner_property: owner_property.into(),
            property_mappings: PropertyMappings::new(),
        }
    }

    pub fn with_property_mappings(mut self, property_mappings: PropertyMappings) -> Self {
        self.property_mappings = property_mappings;
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Alias of the root return that owns this join. Empty means the
    /// unaliased root.
    pub fn owner_alias(&self) -> &str {
        &self.owner_alias
    }

    /// The foreign-key column on the owner that this join fulfils.
    pub fn owner_property(&self) -> &str {
        &self.owner_property
    }

    pub fn property_mappings(&self) -> &PropertyMappings {
        &self.property_mappings
    }
}

impl CollectionReturn {
    pub fn new(
        alias: impl Into<String>,
        owner_entity: impl Into<String>,
        owner_property: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            owner_entity: owner_entity.into(),
            owner_property: owner_property.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn owner_entity(&self) -> &str {
        &self.owner_entity
    }

    pub fn owner_property(&self) -> &str {
        &self.owner_property
    }
}

impl From<RootReturn> for QueryReturn {
    fn from(value: RootReturn) -> Self {
        Self::Root(value)
    }
}

impl From<JoinReturn> for QueryReturn {
    fn from(value: JoinReturn) -> Self {
        Self::Join(value)
    }
}

impl From<CollectionReturn> for QueryReturn {
    fn from(value: CollectionReturn) -> Self {
        Self::Collection(value)
    }
}
