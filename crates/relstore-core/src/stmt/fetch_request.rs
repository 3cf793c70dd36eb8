use std::sync::Arc;

/// A request to eagerly load a relation member alongside the main query.
///
/// Fetch requests appear in the owning query's result-operator list. The
/// query generator consumes them, replacing each marker with a resolved
/// executable sub-query derived from the owning query.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Name of the relation member to load
    pub member: String,

    /// Whether the member is single- or many-valued
    pub cardinality: FetchCardinality,

    /// At most one nested fetch applied to the fetched relation's own query
    pub inner: Option<Arc<FetchRequest>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCardinality {
    One,
    Many,
}

impl FetchRequest {
    pub fn one(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            cardinality: FetchCardinality::One,
            inner: None,
        }
    }

    pub fn many(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            cardinality: FetchCardinality::Many,
            inner: None,
        }
    }

    pub fn with_inner(mut self, inner: FetchRequest) -> Self {
        self.inner = Some(Arc::new(inner));
        self
    }
}
