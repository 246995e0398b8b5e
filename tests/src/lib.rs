pub mod db;
pub use db::Db;

mod exec_log;
pub use exec_log::{ExecLog, LoggedCommand};

pub mod models;
pub use models::{Author, Book};

pub mod prelude;

pub use session::TestSession;

pub use std_util::*;

/// Installs a test-friendly tracing subscriber. Filtering follows `RUST_LOG`.
pub fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
