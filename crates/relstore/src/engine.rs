mod executable;
pub use executable::{ExecutableQuery, Param, ParamKind, QueryKind};

mod executor;
pub use executor::{ActiveContext, QueryExecutor};

mod generator;
pub use generator::{extract_trailing_fetch_requests, QueryGenerator};

mod pipeline;
pub use pipeline::{
    Command, CommandBuilder, DefaultCommandBuilder, DefaultGeneration, DefaultPreparation,
    DefaultResolution, GeneratedQuery, GenerationStage, Pipeline, PreparationStage,
    PreparedSource, PreparedStatement, ResolutionStage, ResolvedStatement, RowProjection,
};

mod resolver;
pub use resolver::{
    AliasGenerator, MappingResolver, RelationRef, ResolvedColumn, ResolvedEntity, ResolvedExpr,
    ResolvedJoin,
};
