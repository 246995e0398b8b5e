mod query_return;
pub use query_return::{CollectionReturn, JoinReturn, PropertyMappings, QueryReturn, RootReturn};

/// Describes how one result row is shared among entities.
///
/// Returns are kept in the order the caller added them. Nothing is validated
/// here; the hydrator checks the shape when it runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSetMapping {
    returns: Vec<QueryReturn>,
}

impl ResultSetMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_query_return(mut self, query_return: impl Into<QueryReturn>) -> Self {
        self.push(query_return);
        self
    }

    pub fn push(&mut self, query_return: impl Into<QueryReturn>) {
        self.returns.push(query_return.into());
    }

    pub fn query_returns(&self) -> &[QueryReturn] {
        &self.returns
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

impl<R: Into<QueryReturn>> FromIterator<R> for ResultSetMapping {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            returns: iter.into_iter().map(Into::into).collect(),
        }
    }
}
