use super::{ColumnDef, ColumnValue, ColumnValueProvider, StorageProperty};
use crate::{
    bail,
    schema::db::check_same,
    stmt::{self, Id, Value},
    Error, Result,
};

/// Maps a polymorphic object identity onto a key value column plus a class
/// tag column.
///
/// Column order is value column first, then class tag column. Only the value
/// column participates in equality predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectIdProperty {
    /// The declared identity type
    pub app_ty: stmt::Type,

    /// Holds the raw key value
    pub value_column: ColumnDef,

    /// Holds the class tag of the concrete type
    pub class_column: ColumnDef,
}

impl ObjectIdProperty {
    pub fn new(app_ty: stmt::Type, value_column: ColumnDef, class_column: ColumnDef) -> Self {
        Self {
            app_ty,
            value_column,
            class_column,
        }
    }

    pub(super) fn columns(&self) -> Vec<ColumnDef> {
        vec![self.value_column.clone(), self.class_column.clone()]
    }

    pub(super) fn split_value(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let (key, tag) = match value {
            Value::Null => (Value::Null, Value::Null),
            Value::Id(id) => ((*id.key).clone(), Value::String(id.class.0.clone())),
            other => bail!("expected an identity value, got {other:?}"),
        };
        Ok(vec![
            ColumnValue::new(self.value_column.clone(), key),
            ColumnValue::new(self.class_column.clone(), tag),
        ])
    }

    pub(super) fn split_value_for_comparison(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let key = match value {
            Value::Null => Value::Null,
            Value::Id(id) => (*id.key).clone(),
            other => bail!("expected an identity value, got {other:?}"),
        };
        Ok(vec![ColumnValue::new(self.value_column.clone(), key)])
    }

    pub(super) fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<Value> {
        let key = provider.value(&self.value_column)?;
        let tag = provider.value(&self.class_column)?;

        match (key, tag) {
            (Value::Null, Value::Null) => Ok(Value::Null),
            (key, Value::String(tag)) if !key.is_null() => Ok(Value::Id(Id {
                class: tag.into(),
                key: Box::new(key),
            })),
            (key, Value::Null) if !key.is_null() => Err(Error::storage_consistency(
                &self.class_column.name,
                "identity value present without its class tag",
            )),
            (Value::Null, _) => Err(Error::storage_consistency(
                &self.value_column.name,
                "class tag present without its identity value",
            )),
            (_, tag) => Err(Error::storage_consistency(
                &self.class_column.name,
                format!("class tag column holds a non-string value: {tag:?}"),
            )),
        }
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        check_same("declared value type", &self.app_ty, &other.app_ty)?;
        Ok(Self {
            app_ty: self.app_ty.clone(),
            value_column: self.value_column.unify(&other.value_column)?,
            class_column: self.class_column.unify(&other.class_column)?,
        })
    }
}

impl From<ObjectIdProperty> for StorageProperty {
    fn from(value: ObjectIdProperty) -> Self {
        Self::ObjectId(value)
    }
}
