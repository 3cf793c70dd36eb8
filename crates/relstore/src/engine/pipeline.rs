mod command;
pub use command::{Command, CommandBuilder, DefaultCommandBuilder};

mod generated;
pub use generated::{DefaultGeneration, GeneratedQuery, GenerationStage};

mod prepared;
pub use prepared::{DefaultPreparation, PreparationStage, PreparedSource, PreparedStatement};

mod projection;
pub use projection::RowProjection;

mod resolved;
pub use resolved::{DefaultResolution, ResolutionStage, ResolvedStatement};

use relstore_core::{stmt, Error, Result, Schema};

/// The three-stage translation state machine: prepared, resolved, generated.
///
/// Each stage is replaceable through its trait; the pipeline owns the single
/// fault-translation boundary between the caller's query and the stages, so
/// stage implementations signal plain errors and never wrap them themselves.
pub struct Pipeline<'a> {
    schema: &'a Schema,
    preparation: Box<dyn PreparationStage>,
    resolution: Box<dyn ResolutionStage>,
    generation: Box<dyn GenerationStage>,
    command_builder: Box<dyn CommandBuilder>,
}

impl<'a> Pipeline<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            preparation: Box::new(DefaultPreparation),
            resolution: Box::new(DefaultResolution),
            generation: Box::new(DefaultGeneration),
            command_builder: Box::new(DefaultCommandBuilder),
        }
    }

    pub fn with_command_builder(mut self, builder: impl CommandBuilder + 'static) -> Self {
        self.command_builder = Box::new(builder);
        self
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Translates a query through all three stages.
    ///
    /// Preparation and resolution errors are re-signaled as a single
    /// "could not be prepared or resolved" fault carrying the query's
    /// textual form; generation errors as a distinct "generation failed"
    /// fault with the same contract. Unmapped-item faults pass through
    /// unwrapped so callers can tell "your query references something
    /// unmapped" from "this shape could not be handled".
    pub fn translate(&self, query: &stmt::Query) -> Result<GeneratedQuery> {
        let prepared = self
            .preparation
            .prepare(query)
            .map_err(|err| wrap(err, Error::preparation_failed(query.describe())))?;

        let resolved = self
            .resolution
            .resolve(self.schema, &prepared)
            .map_err(|err| wrap(err, Error::preparation_failed(query.describe())))?;

        self.generation
            .generate(&resolved, &*self.command_builder)
            .map_err(|err| wrap(err, Error::generation_failed(query.describe())))
    }
}

fn wrap(err: Error, consequent: Error) -> Error {
    if err.is_unmapped_item() {
        err
    } else {
        err.context(consequent)
    }
}
