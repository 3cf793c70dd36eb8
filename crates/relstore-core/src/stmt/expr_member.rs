use super::*;

/// Member access by name.
///
/// Members are referenced by name rather than by field id because the query
/// model is built before resolution; the effective member table of the base
/// expression's static type assigns the name a meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    pub base: Box<Expr>,
    pub name: String,
}

impl Expr {
    pub fn member(base: impl Into<Expr>, name: impl Into<String>) -> Self {
        ExprMember {
            base: Box::new(base.into()),
            name: name.into(),
        }
        .into()
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Self::Member(value)
    }
}
