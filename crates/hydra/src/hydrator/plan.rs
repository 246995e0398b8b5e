use crate::{
    result_set::{PropertyMappings, QueryReturn, ResultSetMapping},
    schema::{EntityMapping, MetadataStore, OneToOne},
};

use hydra_core::{stmt::Row, Error, Result};
use std::sync::Arc;

/// The order in which a shape's returns are materialized.
///
/// Root returns come first, in declaration order, followed by join returns in
/// declaration order. A join therefore always runs after its owner.
#[derive(Debug)]
pub(super) struct Plan<'a> {
    steps: Vec<Step<'a>>,
}

#[derive(Debug)]
pub(super) struct Step<'a> {
    /// Position of the return in the shape; also its output slot.
    index: usize,
    alias: &'a str,
    property_mappings: &'a PropertyMappings,
    mapping: Arc<EntityMapping>,
    owner: Option<Owner>,

    /// Relation columns of this step's mapping that a join return supplies.
    joined: Vec<String>,
}

#[derive(Debug)]
pub(super) struct Owner {
    pub(super) index: usize,
    pub(super) relation: OneToOne,
}

impl<'a> Plan<'a> {
    pub(super) fn build(shape: &'a ResultSetMapping, metadata: &dyn MetadataStore) -> Result<Self> {
        let mut steps = vec![];

        for (index, query_return) in shape.query_returns().iter().enumerate() {
            match query_return {
                QueryReturn::Root(root) => steps.push(Step {
                    index,
                    alias: root.alias(),
                    property_mappings: root.property_mappings(),
                    mapping: metadata.mapping(root.entity())?,
                    owner: None,
                    joined: vec![],
                }),
                QueryReturn::Join(_) => {}
                QueryReturn::Collection(collection) => {
                    return Err(Error::unsupported_shape(format!(
                        "collection return `{}` on `{}.{}` cannot be hydrated",
                        collection.alias(),
                        collection.owner_entity(),
                        collection.owner_property()
                    )));
                }
            }
        }

        let roots = steps.len();

        for (index, query_return) in shape.query_returns().iter().enumerate() {
            let QueryReturn::Join(join) = query_return else {
                continue;
            };

            let mut owners = steps[..roots]
                .iter()
                .enumerate()
                .filter(|(_, step)| step.alias == join.owner_alias());

            let (position, owner) = match (owners.next(), owners.next()) {
                (Some(owner), None) => owner,
                (Some(_), Some(_)) => {
                    return Err(Error::unsupported_shape(format!(
                        "join `{}` is owned by `{}`, which names more than one root return",
                        join.alias(),
                        join.owner_alias()
                    )));
                }
                (None, _) => {
                    let nested = shape
                        .query_returns()
                        .iter()
                        .any(|other| other.is_join() && other.alias() == join.owner_alias());

                    return Err(Error::unsupported_shape(if nested {
                        format!(
                            "join `{}` is owned by join `{}`; nested joins are not supported",
                            join.alias(),
                            join.owner_alias()
                        )
                    } else {
                        format!(
                            "join `{}` is owned by `{}`, which is not a root return",
                            join.alias(),
                            join.owner_alias()
                        )
                    }));
                }
            };

            let Some(relation) = owner.mapping.relation(join.owner_property()) else {
                return Err(Error::unsupported_shape(format!(
                    "`{}` has no one-to-one relation on `{}`",
                    owner.mapping.name(),
                    join.owner_property()
                )));
            };

            if owner.joined.iter().any(|column| column == relation.column()) {
                return Err(Error::unsupported_shape(format!(
                    "relation `{}` of `{}` is joined more than once",
                    relation.column(),
                    join.owner_alias()
                )));
            }

            let relation = relation.clone();
            let owner_index = owner.index;
            let mapping = metadata.mapping_for(&relation.reference())?;

            steps[position].joined.push(relation.column().to_string());
            steps.push(Step {
                index,
                alias: join.alias(),
                property_mappings: join.property_mappings(),
                mapping,
                owner: Some(Owner {
                    index: owner_index,
                    relation,
                }),
                joined: vec![],
            });
        }

        Ok(Self { steps })
    }

    pub(super) fn steps(&self) -> &[Step<'a>] {
        &self.steps
    }
}

impl Step<'_> {
    pub(super) fn index(&self) -> usize {
        self.index
    }

    pub(super) fn mapping(&self) -> &EntityMapping {
        &self.mapping
    }

    pub(super) fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub(super) fn joined(&self) -> &[String] {
        &self.joined
    }

    /// The columns this step sees: the row projected onto its alias, with
    /// property mappings applied on top.
    pub(super) fn values(&self, row: &Row, separator: &str) -> Result<Row> {
        let mut values = row.project(self.alias, separator);

        for (column, sources) in self.property_mappings {
            let Some(source) = sources.first() else {
                continue;
            };

            let value = row
                .get(source)
                .ok_or_else(|| Error::missing_column(self.mapping.name(), source))?;

            values.insert(column.clone(), value.clone());
        }

        Ok(values)
    }
}
