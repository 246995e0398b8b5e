use hydra::{driver::memory::ResultSet, stmt::Value};
use indexmap::IndexMap;

/// In-memory tables, one per entity name.
#[derive(Debug, Default, Clone)]
pub struct Db {
    tables: IndexMap<String, ResultSet>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two authors and four books. Book 13 has no author; author 2 has no
    /// books referencing it by title order.
    pub fn library() -> Self {
        let authors = Db::authors()
            .row([
                Value::from(1),
                "Ada".into(),
                Value::Null,
                "Lovelace".into(),
            ])
            .row([
                Value::from(2),
                "Grace".into(),
                "Brewster".into(),
                "Hopper".into(),
            ]);

        let books = Db::books()
            .row([
                Value::from(10),
                "Notes".into(),
                "On the analytical engine".into(),
                Value::from(1),
            ])
            .row([Value::from(11), "Compilers".into(), Value::Null, Value::from(2)])
            .row([Value::from(12), "Sketch".into(), Value::Null, Value::from(1)])
            .row([Value::from(13), "Orphan".into(), Value::Null, Value::Null]);

        let mut db = Db::new();
        db.insert("Author", authors).insert("Book", books);
        db
    }

    pub fn authors() -> ResultSet {
        ResultSet::new(["Id", "FirstName", "MiddleName", "LastName"])
    }

    pub fn books() -> ResultSet {
        ResultSet::new(["Id", "Title", "Description", "AuthorId"])
    }

    pub fn insert(&mut self, entity: impl Into<String>, table: ResultSet) -> &mut Self {
        self.tables.insert(entity.into(), table);
        self
    }

    #[track_caller]
    pub fn table(&self, entity: &str) -> &ResultSet {
        match self.tables.get(entity) {
            Some(table) => table,
            None => panic!("no table for `{entity}`"),
        }
    }

    /// Rows of `entity` whose `column` has the same identity as `key`.
    pub fn select(&self, entity: &str, column: &str, key: &Value) -> ResultSet {
        let key = key.to_string();

        match self.tables.get(entity) {
            Some(table) => table.filter(|row| {
                row.get(column)
                    .is_some_and(|value| !value.is_null() && value.to_string() == key)
            }),
            None => ResultSet::default(),
        }
    }

    /// Removes the row of `entity` with the given key.
    pub fn delete(&mut self, entity: &str, column: &str, key: &Value) {
        let key = key.to_string();

        if let Some(table) = self.tables.get_mut(entity) {
            *table = table.filter(|row| row.get(column).map(Value::to_string) != Some(key.clone()));
        }
    }
}
