use super::*;
use std::sync::Arc;

/// An operator applied to the query's result sequence, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultOperator {
    /// Remove duplicate elements
    Distinct,

    /// Skip the first `n` elements
    Skip(u64),

    /// Keep at most `n` elements
    Take(u64),

    /// Reduce the sequence to its element count (scalar query)
    Count,

    /// Eager-fetch marker; consumed by the query generator
    Fetch(Arc<FetchRequest>),

    /// Extract exactly one element
    Single { or_default: bool },

    /// Extract the first element
    First { or_default: bool },
}

impl ResultOperator {
    pub fn fetch(request: FetchRequest) -> Self {
        Self::Fetch(Arc::new(request))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn as_fetch(&self) -> Option<&Arc<FetchRequest>> {
        match self {
            Self::Fetch(request) => Some(request),
            _ => None,
        }
    }
}
