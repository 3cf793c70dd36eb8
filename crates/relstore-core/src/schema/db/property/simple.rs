use super::{ColumnDef, ColumnValue, ColumnValueProvider, StorageProperty};
use crate::{schema::db::check_same, stmt::Value, Result};

/// Maps one application value to one column, unconverted.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleProperty {
    pub column: ColumnDef,
}

impl SimpleProperty {
    pub fn new(column: ColumnDef) -> Self {
        Self { column }
    }

    pub(super) fn columns(&self) -> Vec<ColumnDef> {
        vec![self.column.clone()]
    }

    pub(super) fn split_value(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        Ok(vec![ColumnValue::new(self.column.clone(), value.clone())])
    }

    pub(super) fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<Value> {
        provider.value(&self.column)
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        // Declared value type equality is implied by the column unification
        // (the storage type carries the application type).
        check_same(
            "declared value type",
            &self.column.ty.app_ty,
            &other.column.ty.app_ty,
        )?;
        Ok(Self {
            column: self.column.unify(&other.column)?,
        })
    }
}

impl From<SimpleProperty> for StorageProperty {
    fn from(value: SimpleProperty) -> Self {
        Self::Simple(value)
    }
}
