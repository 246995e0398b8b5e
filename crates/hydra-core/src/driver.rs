//! The command execution contract the hydrator consumes.
//!
//! Connection and transaction lifecycle belong to whoever implements these
//! traits; the hydrator only executes a command and reads its rows forward.

pub mod memory;

use crate::{stmt::Value, Result};

/// A prepared command that produces tabular rows when executed.
pub trait Command {
    /// Executes the command and returns a cursor positioned before the first
    /// row.
    fn execute(&mut self) -> Result<Box<dyn Cursor + '_>>;
}

/// A forward-only, single-pass view over a command's rows.
pub trait Cursor {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Number of columns in the current row.
    fn column_count(&self) -> usize;

    /// Name of the column at `index`, as returned by the source.
    fn column_name(&self, index: usize) -> Result<&str>;

    /// Value of the column at `index` in the current row.
    fn value(&self, index: usize) -> Result<Value>;
}

impl<C: Command + ?Sized> Command for &mut C {
    fn execute(&mut self) -> Result<Box<dyn Cursor + '_>> {
        (**self).execute()
    }
}
