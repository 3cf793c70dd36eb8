use crate::schema::app::ModelId;

/// An expression type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Boolean value
    Bool,

    /// String type
    String,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// An opaque type that uniquely identifies an instance of a model.
    Id(ModelId),

    /// An instance of a model
    Model(ModelId),

    /// A fixed-length tuple where each item can have a different type.
    Record(Vec<Type>),

    /// A list of a single type
    List(Box<Type>),

    /// The null type can be cast to any type.
    Null,
}
