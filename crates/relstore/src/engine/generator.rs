use super::pipeline::{GeneratedQuery, Pipeline};
use super::{ExecutableQuery, Param, QueryKind};

use by_address::ByAddress;
use indexmap::IndexMap;
use relstore_core::schema::app::{FieldId, FieldOrigin, FieldTy, ModelId, Relation};
use relstore_core::{stmt, Error, Result, Schema};
use uuid::Uuid;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Removes the trailing run of eager-fetch markers from an operator list.
///
/// Markers are collected from the end; the returned requests are in removal
/// order (last marker first). Operators preceding the run, fetch markers
/// included, stay in place.
pub fn extract_trailing_fetch_requests(
    operators: &mut Vec<stmt::ResultOperator>,
) -> Vec<Arc<stmt::FetchRequest>> {
    let mut trailing = vec![];
    while matches!(operators.last(), Some(stmt::ResultOperator::Fetch(_))) {
        if let Some(stmt::ResultOperator::Fetch(request)) = operators.pop() {
            trailing.push(request);
        }
    }
    trailing
}

/// Expands a query plus its eager-fetch requests into a tree of executable
/// queries.
///
/// Each fetch request gets a derived query re-rooted through the fetched
/// relation; derived queries are cached per request so nested fetches see a
/// consistent base.
pub struct QueryGenerator<'a> {
    schema: &'a Schema,
    pipeline: Pipeline<'a>,
    unit: String,
    derived: RefCell<HashMap<ByAddress<Arc<stmt::FetchRequest>>, stmt::Query>>,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(schema: &'a Schema, unit: impl Into<String>) -> Self {
        Self {
            schema,
            pipeline: Pipeline::new(schema),
            unit: unit.into(),
            derived: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline<'a>) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn generate(&self, query: &stmt::Query) -> Result<ExecutableQuery> {
        let mut parent = query.clone();

        // Operator partitioning: the trailing fetch-marker run comes off the
        // end first; whatever then follows the last remaining fetch marker
        // belongs to the fetched collections, not the parent.
        let trailing = extract_trailing_fetch_requests(&mut parent.result_operators);

        let moved = match parent.result_operators.iter().rposition(|op| op.is_fetch()) {
            Some(last_fetch) => parent.result_operators.split_off(last_fetch + 1),
            None => vec![],
        };

        let mut requests: Vec<Arc<stmt::FetchRequest>> = vec![];
        parent.result_operators.retain(|op| match op {
            stmt::ResultOperator::Fetch(request) => {
                requests.push(request.clone());
                false
            }
            _ => true,
        });
        // Back to declaration order across both partitions.
        requests.extend(trailing.iter().rev().cloned());

        let selected = parent.projection.selected_entity();
        if !requests.is_empty() && (parent.is_scalar() || selected.is_none()) {
            return Err(Error::not_supported(
                "fetching is only valid for sequences of persistent objects",
            ));
        }

        // The trailing run populates the derived-query cache end-first.
        for request in &trailing {
            self.derived_query(&parent, request, &moved)?;
        }

        let generated = self.pipeline.translate(&parent)?;
        let mut executable = self.executable(generated);

        for request in &requests {
            let derived = self.derived_query(&parent, request, &moved)?;
            let field = self.fetched_relation(selected, request)?.0;
            executable.fetches.insert(field, self.generate(&derived)?);
        }

        Ok(executable)
    }

    /// The derived query loading one fetched relation, created lazily and
    /// cached per request.
    fn derived_query(
        &self,
        parent: &stmt::Query,
        request: &Arc<stmt::FetchRequest>,
        moved: &[stmt::ResultOperator],
    ) -> Result<stmt::Query> {
        if let Some(cached) = self.derived.borrow().get(&ByAddress(request.clone())) {
            return Ok(cached.clone());
        }

        let selected = parent.projection.selected_entity();
        let (_, relation) = self.fetched_relation(selected, request)?;

        let mut derived = stmt::Query {
            source: stmt::Source::Related {
                base: Box::new(parent.clone()),
                member: request.member.clone(),
            },
            filters: vec![],
            order_by: None,
            projection: stmt::Projection::Entity(relation.target),
            result_operators: moved.to_vec(),
        };

        if relation.is_many() {
            if let Some(sort) = &relation.sort {
                derived.order_by = Some(stmt::OrderBy {
                    exprs: vec![stmt::OrderByExpr {
                        expr: self.sort_expr(&relation, sort)?,
                        direction: sort.direction,
                    }],
                });
            }
        }

        if let Some(inner) = &request.inner {
            derived
                .result_operators
                .push(stmt::ResultOperator::Fetch(inner.clone()));
        }

        self.derived
            .borrow_mut()
            .insert(ByAddress(request.clone()), derived.clone());
        Ok(derived)
    }

    /// Re-roots the relation's declared sort expression onto the fetched
    /// target type.
    fn sort_expr(
        &self,
        relation: &Relation,
        sort: &relstore_core::schema::app::SortSpec,
    ) -> Result<stmt::Expr> {
        let target = self.schema.model(relation.target);
        let field = target.field_by_name(&sort.member).ok_or_else(|| {
            Error::unmapped_member(format!("{}.{}", target.name, sort.member))
        })?;

        if let FieldOrigin::Mixin {
            interface,
            introduced: false,
        } = &field.origin
        {
            return Err(Error::not_supported(format!(
                "sort member {} declared by mixin {} is not introduced on type {}",
                sort.member, interface, target.name
            )));
        }

        Ok(stmt::Expr::member(
            stmt::Expr::reference(relation.target),
            sort.member.clone(),
        ))
    }

    /// Validates a fetch request against the selected model's member table.
    fn fetched_relation(
        &self,
        selected: Option<ModelId>,
        request: &stmt::FetchRequest,
    ) -> Result<(FieldId, Relation)> {
        let selected = selected.ok_or_else(|| {
            Error::not_supported("fetching is only valid for sequences of persistent objects")
        })?;

        let model = self.schema.model(selected);
        let field = model.field_by_name(&request.member).ok_or_else(|| {
            Error::unmapped_member(format!("{}.{}", model.name, request.member))
        })?;

        match &field.ty {
            FieldTy::Relation(relation) => Ok((field.id, relation.clone())),
            FieldTy::Raw => Err(Error::not_supported(format!(
                "member {}.{} is backed by a field and cannot be fetched",
                model.name, request.member
            ))),
            FieldTy::Primitive(_) => Err(Error::not_supported(format!(
                "member {}.{} is not a relation end-point",
                model.name, request.member
            ))),
        }
    }

    fn executable(&self, generated: GeneratedQuery) -> ExecutableQuery {
        // A scalar query yields a single value; otherwise a selected entity
        // routes to the collection adapter and anything else to the
        // custom-sequence adapter.
        let kind = if generated.is_scalar {
            QueryKind::Scalar
        } else if generated.selected_model.is_some() {
            QueryKind::Collection
        } else {
            QueryKind::Custom
        };

        ExecutableQuery {
            id: Uuid::new_v4(),
            unit: self.unit.clone(),
            text: generated.command.text,
            params: generated
                .command
                .params
                .into_iter()
                .enumerate()
                .map(|(i, value)| Param::positional(i + 1, value))
                .collect(),
            kind,
            collection_model: match kind {
                QueryKind::Collection => generated.selected_model,
                _ => None,
            },
            projection: generated.projection,
            fetches: IndexMap::new(),
        }
    }
}
