use super::{ColumnDef, ColumnValue, ColumnValueProvider, StorageProperty};
use crate::{
    bail,
    schema::db::check_same,
    stmt::{self, Id, Value},
    Error, Result,
};

/// Maps an object identity serialized into a single text column.
///
/// Stored form: `class|key|kind`, where `kind` records the key value's type
/// so the typed key survives a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedObjectIdProperty {
    /// The declared identity type
    pub app_ty: stmt::Type,

    pub column: ColumnDef,
}

impl SerializedObjectIdProperty {
    pub fn new(app_ty: stmt::Type, column: ColumnDef) -> Self {
        Self { app_ty, column }
    }

    pub(super) fn columns(&self) -> Vec<ColumnDef> {
        vec![self.column.clone()]
    }

    pub(super) fn split_value(&self, value: &Value) -> Result<Vec<ColumnValue>> {
        let serialized = match value {
            Value::Null => Value::Null,
            Value::Id(id) => Value::String(serialize(id)?),
            other => bail!("expected an identity value, got {other:?}"),
        };
        Ok(vec![ColumnValue::new(self.column.clone(), serialized)])
    }

    pub(super) fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<Value> {
        match provider.value(&self.column)? {
            Value::Null => Ok(Value::Null),
            Value::String(text) => {
                let id = parse(&text).ok_or_else(|| {
                    Error::storage_consistency(
                        &self.column.name,
                        format!("malformed serialized identity: {text}"),
                    )
                })?;
                Ok(Value::Id(id))
            }
            other => Err(Error::storage_consistency(
                &self.column.name,
                format!("serialized identity column holds a non-string value: {other:?}"),
            )),
        }
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        check_same("declared value type", &self.app_ty, &other.app_ty)?;
        Ok(Self {
            app_ty: self.app_ty.clone(),
            column: self.column.unify(&other.column)?,
        })
    }
}

fn serialize(id: &Id) -> crate::Result<String> {
    let (key, kind) = match &*id.key {
        Value::String(s) => (s.clone(), "s"),
        Value::I32(v) => (v.to_string(), "i32"),
        Value::I64(v) => (v.to_string(), "i64"),
        other => bail!("identity key {other:?} cannot be serialized"),
    };
    Ok(format!("{}|{}|{}", id.class, key, kind))
}

fn parse(text: &str) -> Option<Id> {
    let (rest, kind) = text.rsplit_once('|')?;
    let (class, key) = rest.split_once('|')?;
    let key = match kind {
        "s" => Value::String(key.to_string()),
        "i32" => Value::I32(key.parse().ok()?),
        "i64" => Value::I64(key.parse().ok()?),
        _ => return None,
    };
    Some(Id {
        class: class.into(),
        key: Box::new(key),
    })
}

impl From<SerializedObjectIdProperty> for StorageProperty {
    fn from(value: SerializedObjectIdProperty) -> Self {
        Self::SerializedObjectId(value)
    }
}
