use super::{ColumnDef, ColumnValue, ColumnValueProvider, StorageProperty};
use crate::{bail, schema::db::check_same, stmt, stmt::Value, Result};

/// Maps a record value across nested storage properties.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundProperty {
    /// The declared record type of the whole value
    pub app_ty: stmt::Type,

    /// Nested properties in declaration order
    pub parts: Vec<CompoundPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundPart {
    /// Extracts this part's sub-value from the whole value before
    /// delegating to the nested property
    pub extractor: PartExtractor,

    pub property: StorageProperty,
}

/// Declared accessor from a compound value to one nested sub-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartExtractor {
    /// Index into a record value
    Field(usize),
}

impl PartExtractor {
    pub fn extract(&self, value: &Value) -> Result<Value> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (PartExtractor::Field(index), Value::Record(items)) => match items.get(*index) {
                Some(item) => Ok(item.clone()),
                None => bail!("record value has no component {index}"),
            },
            (PartExtractor::Field(_), other) => {
                bail!("expected a record value, got {other:?}")
            }
        }
    }
}

impl CompoundProperty {
    pub fn new(app_ty: stmt::Type, parts: Vec<CompoundPart>) -> Self {
        Self { app_ty, parts }
    }

    pub(super) fn columns(&self) -> Vec<ColumnDef> {
        self.parts
            .iter()
            .flat_map(|part| part.property.columns())
            .collect()
    }

    pub(super) fn comparison_columns(&self) -> Vec<ColumnDef> {
        self.parts
            .iter()
            .flat_map(|part| part.property.comparison_columns())
            .collect()
    }

    pub(super) fn split_value(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let mut out = vec![];
        for part in &self.parts {
            let sub = part.extractor.extract(value)?;
            out.extend(part.property.split_value(&sub)?);
        }
        Ok(out)
    }

    pub(super) fn split_value_for_comparison(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let mut out = vec![];
        for part in &self.parts {
            let sub = part.extractor.extract(value)?;
            out.extend(part.property.split_value_for_comparison(&sub)?);
        }
        Ok(out)
    }

    pub(super) fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<Value> {
        let mut items = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            items.push(part.property.combine_value(provider)?);
        }
        Ok(Value::Record(items))
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        check_same("declared value type", &self.app_ty, &other.app_ty)?;
        check_same(
            "compound part count",
            &self.parts.len(),
            &other.parts.len(),
        )?;

        let mut parts = Vec::with_capacity(self.parts.len());
        for (part, other_part) in self.parts.iter().zip(&other.parts) {
            check_same(
                "compound part extractor",
                &part.extractor,
                &other_part.extractor,
            )?;
            parts.push(CompoundPart {
                extractor: part.extractor,
                property: part.property.unify([&other_part.property])?,
            });
        }

        Ok(Self {
            app_ty: self.app_ty.clone(),
            parts,
        })
    }
}

impl From<CompoundProperty> for StorageProperty {
    fn from(value: CompoundProperty) -> Self {
        Self::Compound(value)
    }
}
