use super::*;
use crate::schema::app::ModelId;

/// The projection clause of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Project whole instances of a persistent type.
    ///
    /// The model here is the *selected* entity type, which may differ from
    /// the queried type argument (e.g. querying an interface and selecting
    /// the concrete entity).
    Entity(ModelId),

    /// Project a single computed expression per element
    Expr(Expr),

    /// Project a record of expressions per element
    Record(Vec<Expr>),
}

impl Projection {
    /// Returns the selected entity model, if the projection selects one.
    pub fn selected_entity(&self) -> Option<ModelId> {
        match self {
            Projection::Entity(model) => Some(*model),
            _ => None,
        }
    }
}
