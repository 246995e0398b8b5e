use crate::{hydrator::downcast, schema::EntityMapping, Hydrator, Instance};

use hydra_core::{stmt::Row, Result};
use std::{marker::PhantomData, sync::Arc, vec};

/// Entities hydrated from buffered rows, one per row, in row order.
///
/// The command has already been executed and fully read; advancing only
/// materializes the next row. Rows with a null primary key are skipped.
pub struct Entities<'a, T> {
    hydrator: &'a Hydrator,
    mapping: Arc<EntityMapping>,
    rows: vec::IntoIter<Row>,
    _p: PhantomData<T>,
}

impl<'a, T: 'static> Entities<'a, T> {
    pub(crate) fn new(hydrator: &'a Hydrator, mapping: Arc<EntityMapping>, rows: Vec<Row>) -> Self {
        Self {
            hydrator,
            mapping,
            rows: rows.into_iter(),
            _p: PhantomData,
        }
    }

    /// Number of buffered rows not yet materialized.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl<T: 'static> Iterator for Entities<'_, T> {
    type Item = Result<Instance<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            match self.hydrator.materialize(&self.mapping, &row, &[]) {
                Ok(Some(instance)) => return Some(downcast(instance)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rows.len()))
    }
}
