//! Common imports for test files
//!
//! `use tests::prelude::*;` brings in the fixtures, the hydra surface and the
//! assertion macros.

pub use crate::{setup, Author, Book, Db, ExecLog, LoggedCommand, TestSession};

pub use hydra::{
    driver::memory::ResultSet,
    result_set::PropertyMappings,
    schema::{Catalog, Column, EntityMapping, EntityType, MetadataStore, OneToOne, PrimaryKey},
    stmt::Value,
    AnyInstance, Config, HasOne, Hydrator, IdentityCache, Instance, JoinReturn, LazyLoader, Model,
    ResultSetMapping, RootReturn, SessionCache,
};

pub use std_util::prelude::*;
