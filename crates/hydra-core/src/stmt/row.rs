use super::Value;
use crate::{driver::Cursor, Error, Result};

use indexmap::IndexMap;

/// One buffered result row: column name to value.
///
/// Names are case-sensitive and unique. A column holding the null marker is
/// present with [`Value::Null`]; a column the source never returned is absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the cursor's current row.
    pub fn read(cursor: &dyn Cursor) -> Result<Self> {
        let mut row = Row::new();

        for index in 0..cursor.column_count() {
            let name = cursor.column_name(index)?;
            let value = cursor.value(index)?;

            if row.columns.insert(name.to_string(), value).is_some() {
                return Err(Error::invalid_result(format!(
                    "column `{name}` appears more than once in the row"
                )));
            }
        }

        Ok(row)
    }

    /// Reads every remaining row. The cursor is consumed exactly once.
    pub fn read_all(cursor: &mut dyn Cursor) -> Result<Vec<Self>> {
        let mut rows = vec![];

        while cursor.advance()? {
            rows.push(Row::read(cursor)?);
        }

        Ok(rows)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Sets a column, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.columns.insert(column.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(name, value)| (&name[..], value))
    }

    /// Returns the columns that belong to `alias`.
    ///
    /// With an empty alias the row is returned as is. Otherwise only columns
    /// named `{alias}{separator}{column}` are kept, renamed to `{column}`.
    pub fn project(&self, alias: &str, separator: &str) -> Row {
        if alias.is_empty() {
            return self.clone();
        }

        let columns = self
            .columns
            .iter()
            .filter_map(|(name, value)| {
                let column = name.strip_prefix(alias)?.strip_prefix(separator)?;
                Some((column.to_string(), value.clone()))
            })
            .collect();

        Row { columns }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
