use super::{Model, ModelId};
use indexmap::IndexMap;

/// The application-level type hierarchy, in declaration order.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn try_model(&self, id: impl Into<ModelId>) -> Option<&Model> {
        self.models.get(&id.into())
    }

    pub fn register(&mut self, model: Model) -> ModelId {
        let id = model.id;
        self.models.insert(id, model);
        id
    }

    /// True if `sub` is `sup` or transitively derives from it.
    pub fn is_assignable(&self, sub: ModelId, sup: ModelId) -> bool {
        let mut current = Some(sub);
        while let Some(id) = current {
            if id == sup {
                return true;
            }
            current = self.try_model(id).and_then(|model| model.base);
        }
        false
    }

    /// All concrete models assignable to `sup`, in declaration order.
    pub fn concrete_subtypes(&self, sup: ModelId) -> Vec<&Model> {
        self.models
            .values()
            .filter(|model| model.is_concrete() && self.is_assignable(model.id, sup))
            .collect()
    }
}
