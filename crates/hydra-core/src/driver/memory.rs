use super::{Command, Cursor};
use crate::{
    stmt::{Row, Value},
    Error, Result,
};

/// An in-memory table of rows that can be executed as a command.
///
/// Every execution starts a fresh cursor over the same rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    /// Appends a row. Values are matched to columns by position.
    #[track_caller]
    pub fn row<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.push_row(values);
        self
    }

    #[track_caller]
    pub fn push_row<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let row: Vec<Value> = values.into_iter().map(Into::into).collect();
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row has {} values but the result set has {} columns",
            row.len(),
            self.columns.len()
        );
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns a result set holding only the rows for which `f` returns
    /// `true`.
    pub fn filter(&self, mut f: impl FnMut(&Row) -> bool) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|values| {
                let row = self.columns.iter().cloned().zip(values.iter().cloned()).collect();
                f(&row)
            })
            .cloned()
            .collect();

        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Command for ResultSet {
    fn execute(&mut self) -> Result<Box<dyn Cursor + '_>> {
        Ok(Box::new(MemoryCursor {
            result_set: self,
            position: None,
        }))
    }
}

struct MemoryCursor<'a> {
    result_set: &'a ResultSet,
    position: Option<usize>,
}

impl MemoryCursor<'_> {
    fn current(&self) -> Result<&[Value]> {
        self.position
            .and_then(|position| self.result_set.rows.get(position))
            .map(|row| &row[..])
            .ok_or_else(|| Error::invalid_result("cursor is not positioned on a row"))
    }
}

impl Cursor for MemoryCursor<'_> {
    fn advance(&mut self) -> Result<bool> {
        let next = self.position.map_or(0, |position| position + 1);
        self.position = Some(next.min(self.result_set.rows.len()));
        Ok(next < self.result_set.rows.len())
    }

    fn column_count(&self) -> usize {
        self.result_set.columns.len()
    }

    fn column_name(&self, index: usize) -> Result<&str> {
        self.result_set
            .columns
            .get(index)
            .map(|name| &name[..])
            .ok_or_else(|| Error::invalid_result(format!("no column at index {index}")))
    }

    fn value(&self, index: usize) -> Result<Value> {
        self.current()?
            .get(index)
            .cloned()
            .ok_or_else(|| Error::invalid_result(format!("no column at index {index}")))
    }
}
