pub mod cache;
pub use cache::{IdentityCache, SessionCache};

pub mod cursor;
pub use cursor::Entities;

mod hydrator;
pub use hydrator::{Builder, Config, Hydrator};

mod instance;
pub use instance::{AnyInstance, Instance};

mod model;
pub use model::Model;

mod primitive;
pub use primitive::Primitive;

pub mod relation;
pub use relation::HasOne;

pub mod result_set;
pub use result_set::{CollectionReturn, JoinReturn, QueryReturn, ResultSetMapping, RootReturn};

pub mod schema;

mod session;
pub use session::{LazyLoader, Session};

pub use hydra_core::{bail, driver, err, stmt, Command, Cursor, Error, Result};
