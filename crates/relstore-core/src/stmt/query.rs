use super::*;

/// The abstract, caller-supplied description of a query.
///
/// The tree is immutable from this core's point of view: the generator and
/// pipeline read it and derive internal statements from it, they never write
/// back into it. Joins are not stated explicitly; they are implied by member
/// paths that traverse relations and are introduced during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The queried type and where its instances come from
    pub source: Source,

    /// Filter clauses, implicitly ANDed
    pub filters: Vec<Expr>,

    /// Ordering clauses
    pub order_by: Option<OrderBy>,

    /// The projection clause
    pub projection: Projection,

    /// Result operators in declaration order, including fetch markers
    pub result_operators: Vec<ResultOperator>,
}

impl Query {
    /// Creates a query selecting whole instances of `model`.
    pub fn entity(model: impl Into<crate::schema::app::ModelId>) -> Self {
        let model = model.into();
        Self {
            source: Source::Model(model),
            filters: vec![],
            order_by: None,
            projection: Projection::Entity(model),
            result_operators: vec![],
        }
    }

    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        self.filters.push(expr.into());
        self
    }

    pub fn order_by(mut self, expr: OrderByExpr) -> Self {
        self.order_by
            .get_or_insert_with(|| OrderBy { exprs: vec![] })
            .exprs
            .push(expr);
        self
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn operator(mut self, op: ResultOperator) -> Self {
        self.result_operators.push(op);
        self
    }

    /// True if the query reduces to a single scalar value.
    pub fn is_scalar(&self) -> bool {
        self.result_operators
            .iter()
            .any(|op| matches!(op, ResultOperator::Count))
    }

    pub fn fetch_requests(&self) -> impl Iterator<Item = &std::sync::Arc<FetchRequest>> {
        self.result_operators.iter().filter_map(|op| op.as_fetch())
    }

    /// A compact textual form used in fault messages.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Source::Model(model) => write!(f, "from model#{}", model.0)?,
            Source::Related { base, member } => write!(f, "from ({base}).{member}")?,
        }
        for filter in &self.filters {
            write!(f, " where {filter}")?;
        }
        if let Some(order_by) = &self.order_by {
            f.write_str(" order by ")?;
            for (i, expr) in order_by.exprs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", expr.expr)?;
                if !expr.direction.is_asc() {
                    f.write_str(" desc")?;
                }
            }
        }
        match &self.projection {
            Projection::Entity(model) => write!(f, " select model#{}", model.0)?,
            Projection::Expr(expr) => write!(f, " select {expr}")?,
            Projection::Record(exprs) => {
                f.write_str(" select (")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{expr}")?;
                }
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}
