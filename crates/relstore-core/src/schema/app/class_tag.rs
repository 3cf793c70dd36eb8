/// The discriminator value identifying the concrete runtime type of a row
/// within a polymorphic union or filter view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassTag(pub String);

impl ClassTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClassTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassTag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClassTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<ClassTag> for crate::stmt::Value {
    fn from(value: ClassTag) -> Self {
        Self::String(value.0)
    }
}
