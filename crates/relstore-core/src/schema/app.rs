mod class_tag;
pub use class_tag::ClassTag;

mod field;
pub use field::{Field, FieldId, FieldOrigin, FieldPrimitive, FieldTy};

mod model;
pub use model::{Model, ModelId};

mod relation;
pub use relation::{Cardinality, FkSide, Relation, SortSpec};

mod schema;
pub use schema::Schema;
