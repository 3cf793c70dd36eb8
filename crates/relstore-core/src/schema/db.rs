mod column;
pub use column::ColumnDef;

mod column_value;
pub use column_value::{ColumnValue, ColumnValueProvider, ColumnValueTable, RowValues};

pub mod entity;
pub use entity::{
    EmptyViewDef, Entity, EntityName, EntityVisitor, FilterViewDef, ForeignKey, Index, TableDef,
    UnionViewDef,
};

mod property;
pub use property::{
    CompoundPart, CompoundProperty, ObjectIdProperty, ObjectIdWithoutTagProperty, PartExtractor,
    PropertyVisitor, SerializedObjectIdProperty, SimpleProperty, StorageProperty,
    UnsupportedProperty,
};

mod storage_type;
pub use storage_type::StorageType;

mod ty;
pub use ty::DbType;

mod unify;
pub(crate) use unify::check_same;
