use super::{Command, CommandBuilder, ResolvedStatement, RowProjection};
use relstore_core::schema::app::ModelId;
use relstore_core::Result;

/// The third pipeline stage: serializes the resolved statement into command
/// text plus parameters and pairs it with the compiled row projection.
pub trait GenerationStage {
    fn generate(
        &self,
        statement: &ResolvedStatement,
        builder: &dyn CommandBuilder,
    ) -> Result<GeneratedQuery>;
}

/// The pipeline's output: a renderable command paired with the per-row
/// post-projection and the query's result classification inputs.
#[derive(Debug, Clone)]
pub struct GeneratedQuery {
    pub command: Command,

    pub projection: RowProjection,

    /// The selected entity model, when the query yields whole instances
    pub selected_model: Option<ModelId>,

    pub is_scalar: bool,
}

pub struct DefaultGeneration;

impl GenerationStage for DefaultGeneration {
    fn generate(
        &self,
        statement: &ResolvedStatement,
        builder: &dyn CommandBuilder,
    ) -> Result<GeneratedQuery> {
        let command = builder.build(statement)?;
        Ok(GeneratedQuery {
            command,
            projection: statement.projection.clone(),
            selected_model: statement.selected_model,
            is_scalar: statement.is_scalar,
        })
    }
}
