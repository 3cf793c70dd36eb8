use super::*;
use crate::schema::app::ModelId;

/// The source clause of a query: the queried type plus its origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Query all instances of a model
    Model(ModelId),

    /// Query the instances related to the elements of a base query through
    /// one extracted relation member. This is the re-rooted source the query
    /// generator builds for eager-fetch sub-queries.
    Related { base: Box<Query>, member: String },
}

impl From<ModelId> for Source {
    fn from(model: ModelId) -> Self {
        Self::Model(model)
    }
}
