use super::{ColumnDef, ColumnValue, ColumnValueProvider, StorageProperty};
use crate::{
    bail,
    schema::app::ClassTag,
    schema::db::check_same,
    stmt::{self, Id, Value},
    Result,
};

/// Maps an object identity whose concrete class is statically known.
///
/// No class tag column is stored; the tag is reattached from the recorded
/// class when the value is read back.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectIdWithoutTagProperty {
    /// The declared identity type
    pub app_ty: stmt::Type,

    /// Holds the raw key value
    pub column: ColumnDef,

    /// The concrete class every stored identity belongs to
    pub class: ClassTag,
}

impl ObjectIdWithoutTagProperty {
    pub fn new(app_ty: stmt::Type, column: ColumnDef, class: impl Into<ClassTag>) -> Self {
        Self {
            app_ty,
            column,
            class: class.into(),
        }
    }

    pub(super) fn columns(&self) -> Vec<ColumnDef> {
        vec![self.column.clone()]
    }

    pub(super) fn split_value(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let key = match value {
            Value::Null => Value::Null,
            Value::Id(id) => (*id.key).clone(),
            other => bail!("expected an identity value, got {other:?}"),
        };
        Ok(vec![ColumnValue::new(self.column.clone(), key)])
    }

    pub(super) fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<Value> {
        match provider.value(&self.column)? {
            Value::Null => Ok(Value::Null),
            key => Ok(Value::Id(Id {
                class: self.class.clone(),
                key: Box::new(key),
            })),
        }
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        check_same("declared value type", &self.app_ty, &other.app_ty)?;
        check_same("referenced class", &self.class, &other.class)?;
        Ok(Self {
            app_ty: self.app_ty.clone(),
            column: self.column.unify(&other.column)?,
            class: self.class.clone(),
        })
    }
}

impl From<ObjectIdWithoutTagProperty> for StorageProperty {
    fn from(value: ObjectIdWithoutTagProperty) -> Self {
        Self::ObjectIdWithoutTag(value)
    }
}
