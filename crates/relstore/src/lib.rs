mod engine;
pub use engine::{
    extract_trailing_fetch_requests, ActiveContext, AliasGenerator, Command, CommandBuilder,
    DefaultCommandBuilder, DefaultGeneration, DefaultPreparation, DefaultResolution,
    ExecutableQuery, GeneratedQuery, GenerationStage, MappingResolver, Param, ParamKind, Pipeline,
    PreparationStage, PreparedSource, PreparedStatement, QueryExecutor, QueryGenerator, QueryKind,
    RelationRef, ResolutionStage, ResolvedColumn, ResolvedEntity, ResolvedExpr, ResolvedJoin,
    ResolvedStatement, RowProjection,
};

pub use relstore_core::{schema, stmt, Error, Result, Schema};
