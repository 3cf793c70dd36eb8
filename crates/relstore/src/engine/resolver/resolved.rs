use relstore_core::{
    schema::app::{FieldId, ModelId},
    schema::db::{ColumnDef, Entity},
    stmt,
};
use std::sync::Arc;

/// Hands out table aliases for one translation.
///
/// Fresh per invocation; alias state is never shared across translations.
#[derive(Debug, Default)]
pub struct AliasGenerator {
    next: usize,
}

impl AliasGenerator {
    pub fn next_alias(&mut self) -> String {
        let alias = format!("t{}", self.next);
        self.next += 1;
        alias
    }
}

/// A resolved reference to a relational entity under an alias.
#[derive(Debug, Clone)]
pub struct ResolvedEntity {
    /// The model whose instances the entity rows represent
    pub model: ModelId,

    pub entity: Arc<Entity>,

    pub alias: String,
}

/// A column of an aliased entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub table_alias: String,
    pub column: ColumnDef,
}

/// A resolved join: pairwise equality between `left` and `right` columns
/// brings `right` into scope.
#[derive(Debug, Clone)]
pub struct ResolvedJoin {
    pub left: Vec<ResolvedColumn>,
    pub right: ResolvedEntity,
    pub right_columns: Vec<ResolvedColumn>,
}

/// A member access that resolved to a single-valued relation end-point.
///
/// Not yet a column: the caller either rewrites it through the referencing
/// side's foreign key (the optimized path) or materializes a join.
#[derive(Debug, Clone)]
pub struct RelationRef {
    /// The entity the member access was made on
    pub source: ResolvedEntity,

    /// The relation field on the source model
    pub field: FieldId,
}

/// The resolver's output vocabulary, owned by the pipeline for the duration
/// of one translation.
#[derive(Debug, Clone)]
pub enum ResolvedExpr {
    Column(ResolvedColumn),

    Value(stmt::Value),

    Record(Vec<ResolvedExpr>),

    And(Vec<ResolvedExpr>),

    Or(Vec<ResolvedExpr>),

    Not(Box<ResolvedExpr>),

    BinaryOp {
        lhs: Box<ResolvedExpr>,
        op: stmt::BinaryOp,
        rhs: Box<ResolvedExpr>,
    },

    InList {
        expr: Box<ResolvedExpr>,
        list: Vec<ResolvedExpr>,
    },

    IsNull(Box<ResolvedExpr>),

    /// Reference to a whole entity row
    Entity(ResolvedEntity),

    /// Reference to a related entity through a single-valued relation
    Relation(RelationRef),
}

impl ResolvedExpr {
    pub const TRUE: ResolvedExpr = ResolvedExpr::Value(stmt::Value::Bool(true));
    pub const FALSE: ResolvedExpr = ResolvedExpr::Value(stmt::Value::Bool(false));

    pub fn column(table_alias: impl Into<String>, column: ColumnDef) -> Self {
        Self::Column(ResolvedColumn {
            table_alias: table_alias.into(),
            column,
        })
    }

    pub fn is_const_bool(&self, expected: bool) -> bool {
        matches!(self, Self::Value(stmt::Value::Bool(b)) if *b == expected)
    }
}
