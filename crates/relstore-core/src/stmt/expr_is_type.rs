use super::*;
use crate::schema::app::ModelId;

/// An is-instance-of test against a model in the mapped hierarchy.
///
/// Resolution rewrites this into a constant or a class-tag membership
/// predicate depending on how the hierarchy is mapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsType {
    pub expr: Box<Expr>,
    pub model: ModelId,
}

impl Expr {
    pub fn is_type(expr: impl Into<Expr>, model: impl Into<ModelId>) -> Self {
        ExprIsType {
            expr: Box::new(expr.into()),
            model: model.into(),
        }
        .into()
    }
}

impl From<ExprIsType> for Expr {
    fn from(value: ExprIsType) -> Self {
        Self::IsType(value)
    }
}
