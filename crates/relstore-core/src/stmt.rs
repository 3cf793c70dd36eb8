mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_is_type;
pub use expr_is_type::ExprIsType;

mod expr_member;
pub use expr_member::ExprMember;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_reference;
pub use expr_reference::ExprReference;

mod fetch_request;
pub use fetch_request::{FetchCardinality, FetchRequest};

mod id;
pub use id::Id;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{OrderBy, OrderByExpr};

mod projection;
pub use projection::Projection;

mod query;
pub use query::Query;

mod result_operator;
pub use result_operator::ResultOperator;

mod source;
pub use source::Source;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
