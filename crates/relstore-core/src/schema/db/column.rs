use super::{check_same, StorageType};
use crate::Result;

/// A column definition.
///
/// Value equality over (name, type, key flag); columns from different source
/// tables compare equal when their definitions agree, which is what the
/// unification and column-alignment algorithms rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// The name of the column in the database
    pub name: String,

    /// The column's storage type
    pub ty: StorageType,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: StorageType) -> Self {
        Self {
            name: name.into(),
            ty,
            primary_key: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn unify(&self, other: &Self) -> Result<Self> {
        check_same("column name", &self.name, &other.name)?;
        check_same("primary key flag", &self.primary_key, &other.primary_key)?;

        Ok(Self {
            name: self.name.clone(),
            ty: self.ty.unify(&other.ty)?,
            primary_key: self.primary_key,
        })
    }
}
