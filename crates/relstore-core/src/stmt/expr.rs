use super::*;

/// The caller-facing expression tree.
///
/// Expressions reference the object model (members by name, types by model
/// id); the resolution stage rewrites them into storage terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND over two or more operands
    And(ExprAnd),

    /// A binary comparison
    BinaryOp(ExprBinaryOp),

    /// Set-membership test against a literal list
    InList(ExprInList),

    /// Null test
    IsNull(ExprIsNull),

    /// Polymorphic is-instance-of test
    IsType(ExprIsType),

    /// Member access on a base expression
    Member(ExprMember),

    /// Logical negation
    Not(Box<Expr>),

    /// Logical OR over two or more operands
    Or(ExprOr),

    /// Reference to a query source
    Reference(ExprReference),

    /// A constant value
    Value(Value),
}

impl Expr {
    pub fn not(operand: impl Into<Expr>) -> Self {
        Self::Not(Box::new(operand.into()))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::And(e) => write_operands(f, &e.operands, " and "),
            Expr::BinaryOp(e) => write!(f, "{} {} {}", e.lhs, e.op, e.rhs),
            Expr::InList(e) => {
                write!(f, "{} in [", e.expr)?;
                for (i, item) in e.list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Expr::IsNull(e) => write!(f, "{} is null", e.expr),
            Expr::IsType(e) => write!(f, "{} is model#{}", e.expr, e.model.0),
            Expr::Member(e) => write!(f, "{}.{}", e.base, e.name),
            Expr::Not(e) => write!(f, "not ({e})"),
            Expr::Or(e) => write_operands(f, &e.operands, " or "),
            Expr::Reference(e) => write!(f, "<model#{}>", e.model.0),
            Expr::Value(v) => write!(f, "{v}"),
        }
    }
}

fn write_operands(
    f: &mut std::fmt::Formatter<'_>,
    operands: &[Expr],
    sep: &str,
) -> std::fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "({operand})")?;
    }
    Ok(())
}
