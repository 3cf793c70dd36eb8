/// The physical database type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    Boolean,
    Int32,
    Int64,
    Text,
    Binary,
    Timestamp,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DbType::Boolean => "boolean",
            DbType::Int32 => "int32",
            DbType::Int64 => "int64",
            DbType::Text => "text",
            DbType::Binary => "binary",
            DbType::Timestamp => "timestamp",
        })
    }
}
