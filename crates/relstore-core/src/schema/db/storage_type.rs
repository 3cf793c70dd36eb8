use super::{check_same, DbType};
use crate::{stmt, Result};

/// Describes a storage-side scalar type.
///
/// Compared and unified structurally: everything must match exactly except
/// nullability, which widens to nullable if any input is nullable.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageType {
    /// The physical database type
    pub db_ty: DbType,

    /// The application-side value type the column converts to and from
    pub app_ty: stmt::Type,

    /// Whether the column admits null
    pub nullable: bool,

    /// Declared maximum length, where the physical type has one
    pub length: Option<u32>,
}

impl StorageType {
    pub fn new(db_ty: DbType, app_ty: stmt::Type) -> Self {
        Self {
            db_ty,
            app_ty,
            nullable: false,
            length: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn unify(&self, other: &Self) -> Result<Self> {
        check_same("physical type", &self.db_ty, &other.db_ty)?;
        check_same("application type", &self.app_ty, &other.app_ty)?;
        check_same("length", &self.length, &other.length)?;

        Ok(Self {
            db_ty: self.db_ty,
            app_ty: self.app_ty.clone(),
            nullable: self.nullable || other.nullable,
            length: self.length,
        })
    }
}
