use super::ColumnDef;
use crate::{bail, stmt::Value, Result};

/// One (column, value) pair produced by splitting an application value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    pub column: ColumnDef,
    pub value: Value,
}

impl ColumnValue {
    pub fn new(column: ColumnDef, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Supplies one row's column values when combining storage values back into
/// an application value.
pub trait ColumnValueProvider {
    fn value(&self, column: &ColumnDef) -> Result<Value>;
}

impl ColumnValueProvider for [ColumnValue] {
    fn value(&self, column: &ColumnDef) -> Result<Value> {
        for cv in self {
            if cv.column.name == column.name {
                return Ok(cv.value.clone());
            }
        }
        bail!("no value provided for column {}", column.name)
    }
}

impl ColumnValueProvider for Vec<ColumnValue> {
    fn value(&self, column: &ColumnDef) -> Result<Value> {
        self.as_slice().value(column)
    }
}

/// A positionally aligned row: `values[i]` belongs to `columns[i]`.
pub struct RowValues<'a> {
    pub columns: &'a [ColumnDef],
    pub values: &'a [Value],
}

impl ColumnValueProvider for RowValues<'_> {
    fn value(&self, column: &ColumnDef) -> Result<Value> {
        for (def, value) in self.columns.iter().zip(self.values) {
            if def.name == column.name {
                return Ok(value.clone());
            }
        }
        bail!("no value provided for column {}", column.name)
    }
}

/// A rectangular table of column values: one shared column list plus one
/// value row per split input value.
///
/// Every row has exactly one value per declared column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValueTable {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Value>>,
}

impl ColumnValueTable {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: vec![],
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            bail!(
                "row width {} does not match declared column count {}",
                row.len(),
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    /// Concatenates two tables column-wise.
    ///
    /// Both tables must have the same row count; row `i` of the result pairs
    /// row `i` of `self` with row `i` of `other`.
    pub fn combine(mut self, other: Self) -> Result<Self> {
        if self.rows.len() != other.rows.len() {
            bail!(
                "cannot combine column value tables with {} and {} rows",
                self.rows.len(),
                other.rows.len()
            );
        }

        self.columns.extend(other.columns);
        for (row, other_row) in self.rows.iter_mut().zip(other.rows) {
            row.extend(other_row);
        }
        Ok(self)
    }
}
