use relstore_core::schema::db::{RowValues, StorageProperty};
use relstore_core::{err, stmt, Result};

/// The compiled in-memory post-projection applied per returned row.
///
/// Needed for composite identity reconstruction and record assembly that is
/// not representable in the storage dialect; the pipeline guarantees every
/// generated command is paired with one of these.
#[derive(Debug, Clone)]
pub enum RowProjection {
    /// Pass one row position through unchanged
    Column(usize),

    /// A constant folded during resolution
    Constant(stmt::Value),

    /// Reconstruct an application value from a property's columns, read
    /// from a contiguous run of row positions starting at `start`
    Property {
        property: StorageProperty,
        start: usize,
    },

    /// Assemble a record value from component projections
    Record(Vec<RowProjection>),
}

impl RowProjection {
    pub fn apply(&self, row: &[stmt::Value]) -> Result<stmt::Value> {
        match self {
            Self::Column(index) => row
                .get(*index)
                .cloned()
                .ok_or_else(|| err!("row has no value at position {}", index)),
            Self::Constant(value) => Ok(value.clone()),
            Self::Property { property, start } => {
                let columns = property.columns();
                let values = row.get(*start..start + columns.len()).ok_or_else(|| {
                    err!("row is narrower than the projected property at position {}", start)
                })?;
                property.combine_value(&RowValues {
                    columns: &columns,
                    values,
                })
            }
            Self::Record(parts) => Ok(stmt::Value::Record(
                parts
                    .iter()
                    .map(|part| part.apply(row))
                    .collect::<Result<_>>()?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relstore_core::schema::db::{ColumnDef, DbType, ObjectIdProperty, StorageType};

    fn id_property() -> StorageProperty {
        StorageProperty::ObjectId(ObjectIdProperty::new(
            stmt::Type::Id(relstore_core::schema::app::ModelId(0)),
            ColumnDef::new("ID", StorageType::new(DbType::Int64, stmt::Type::I64)),
            ColumnDef::new("ClassID", StorageType::new(DbType::Text, stmt::Type::String)),
        ))
    }

    #[test]
    fn property_projection_reconstructs_composite_identity() {
        let projection = RowProjection::Property {
            property: id_property(),
            start: 1,
        };

        let row = vec![
            stmt::Value::String("ignored".into()),
            stmt::Value::I64(42),
            stmt::Value::String("Customer".into()),
        ];

        assert_eq!(
            projection.apply(&row).unwrap(),
            stmt::Value::Id(stmt::Id::new("Customer", 42i64)),
        );
    }

    #[test]
    fn record_projection_assembles_components() {
        let projection = RowProjection::Record(vec![
            RowProjection::Column(0),
            RowProjection::Constant(stmt::Value::Bool(true)),
        ]);

        let row = vec![stmt::Value::I32(7)];
        assert_eq!(
            projection.apply(&row).unwrap(),
            stmt::Value::Record(vec![stmt::Value::I32(7), stmt::Value::Bool(true)]),
        );
    }

    #[test]
    fn narrow_row_is_an_error() {
        let projection = RowProjection::Column(3);
        assert!(projection.apply(&[stmt::Value::Null]).is_err());
    }
}
