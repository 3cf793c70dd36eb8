use super::RowProjection;

use indexmap::IndexMap;
use relstore_core::schema::app::{FieldId, ModelId};
use relstore_core::stmt;
use uuid::Uuid;

/// The outbound value handed to the transaction/session collaborator.
///
/// Carries everything needed to run one translated query: command text,
/// parameters, the per-row post-projection, and one eager-fetch sub-query
/// per fetched relation end-point.
#[derive(Debug, Clone)]
pub struct ExecutableQuery {
    pub id: Uuid,

    /// The target persistence unit
    pub unit: String,

    pub text: String,

    pub params: Vec<Param>,

    pub kind: QueryKind,

    /// Element model of an entity-sequence query. Taken from the selected
    /// entity, which may differ from the queried type argument.
    pub collection_model: Option<ModelId>,

    pub projection: RowProjection,

    /// Eager-fetch sub-queries keyed by the relation being fetched, in
    /// declaration order
    pub fetches: IndexMap<FieldId, ExecutableQuery>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// A single value
    Scalar,

    /// A sequence of persistent objects
    Collection,

    /// A sequence of arbitrary projected shapes
    Custom,
}

impl ExecutableQuery {
    pub fn has_fetches(&self) -> bool {
        !self.fetches.is_empty()
    }
}

/// One bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: stmt::Value,
    pub kind: ParamKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Value,
    Text,
}

impl Param {
    /// A positional parameter named after its one-based position.
    pub fn positional(position: usize, value: stmt::Value) -> Self {
        let kind = match &value {
            stmt::Value::String(_) => ParamKind::Text,
            _ => ParamKind::Value,
        };
        Self {
            name: format!("p{position}"),
            value,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_params_carry_the_text_kind() {
        let param = Param::positional(1, stmt::Value::String("abc".into()));
        assert_eq!(param.name, "p1");
        assert_eq!(param.kind, ParamKind::Text);

        let param = Param::positional(2, stmt::Value::I64(7));
        assert_eq!(param.kind, ParamKind::Value);
    }
}
