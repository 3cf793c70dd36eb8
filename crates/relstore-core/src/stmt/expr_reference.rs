use super::*;
use crate::schema::app::ModelId;

/// A reference to the query's source, typed by the source's model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprReference {
    pub model: ModelId,
}

impl Expr {
    pub fn reference(model: impl Into<ModelId>) -> Self {
        ExprReference {
            model: model.into(),
        }
        .into()
    }
}

impl From<ExprReference> for Expr {
    fn from(value: ExprReference) -> Self {
        Self::Reference(value)
    }
}
