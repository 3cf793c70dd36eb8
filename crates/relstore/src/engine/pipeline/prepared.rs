use relstore_core::schema::app::ModelId;
use relstore_core::{bail, stmt, Result};

/// The first pipeline stage: rewrites the caller's query model into the
/// internal statement model without touching storage.
pub trait PreparationStage {
    fn prepare(&self, query: &stmt::Query) -> Result<PreparedStatement>;
}

/// A query normalized for resolution.
///
/// Result operators are folded into dedicated fields; the declaration-order
/// list does not survive preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    pub source: PreparedSource,

    /// Filter conjuncts, in declaration order
    pub filters: Vec<stmt::Expr>,

    pub order_by: Option<stmt::OrderBy>,

    pub projection: stmt::Projection,

    pub distinct: bool,

    pub offset: Option<u64>,

    pub limit: Option<u64>,

    /// True if the query reduces to a single scalar value
    pub is_scalar: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreparedSource {
    Model(ModelId),

    /// Instances related to the elements of a base statement through one
    /// relation member
    Related {
        base: Box<PreparedStatement>,
        member: String,
    },
}

pub struct DefaultPreparation;

impl PreparationStage for DefaultPreparation {
    fn prepare(&self, query: &stmt::Query) -> Result<PreparedStatement> {
        prepare_query(query)
    }
}

fn prepare_query(query: &stmt::Query) -> Result<PreparedStatement> {
    let source = match &query.source {
        stmt::Source::Model(model) => PreparedSource::Model(*model),
        stmt::Source::Related { base, member } => PreparedSource::Related {
            base: Box::new(prepare_query(base)?),
            member: member.clone(),
        },
    };

    let mut statement = PreparedStatement {
        source,
        filters: query.filters.clone(),
        order_by: query.order_by.clone(),
        projection: query.projection.clone(),
        distinct: false,
        offset: None,
        limit: None,
        is_scalar: false,
    };

    for op in &query.result_operators {
        match op {
            stmt::ResultOperator::Distinct => statement.distinct = true,
            stmt::ResultOperator::Skip(n) => statement.offset = Some(*n),
            stmt::ResultOperator::Take(n) => statement.limit = Some(*n),
            stmt::ResultOperator::Count => statement.is_scalar = true,
            // Two rows are enough to tell "one" from "more than one".
            stmt::ResultOperator::Single { .. } => statement.limit = Some(2),
            stmt::ResultOperator::First { .. } => statement.limit = Some(1),
            stmt::ResultOperator::Fetch(_) => {
                bail!("eager-fetch markers must be expanded before translation")
            }
        }
    }

    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relstore_core::stmt::{Query, ResultOperator};

    #[test]
    fn result_operators_fold_into_fields() {
        let query = Query::entity(ModelId(0))
            .operator(ResultOperator::Distinct)
            .operator(ResultOperator::Skip(10))
            .operator(ResultOperator::Take(5));

        let statement = DefaultPreparation.prepare(&query).unwrap();
        assert!(statement.distinct);
        assert_eq!(statement.offset, Some(10));
        assert_eq!(statement.limit, Some(5));
        assert!(!statement.is_scalar);
    }

    #[test]
    fn single_prepares_with_limit_two() {
        let query =
            Query::entity(ModelId(0)).operator(ResultOperator::Single { or_default: false });
        let statement = DefaultPreparation.prepare(&query).unwrap();
        assert_eq!(statement.limit, Some(2));
    }

    #[test]
    fn count_marks_scalar() {
        let query = Query::entity(ModelId(0)).operator(ResultOperator::Count);
        let statement = DefaultPreparation.prepare(&query).unwrap();
        assert!(statement.is_scalar);
    }

    #[test]
    fn leftover_fetch_marker_is_rejected() {
        let query = Query::entity(ModelId(0))
            .operator(ResultOperator::fetch(stmt::FetchRequest::one("Owner")));
        assert!(DefaultPreparation.prepare(&query).is_err());
    }
}
