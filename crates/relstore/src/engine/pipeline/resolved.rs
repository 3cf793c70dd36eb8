use super::{PreparedSource, PreparedStatement, RowProjection};
use crate::engine::{
    AliasGenerator, MappingResolver, RelationRef, ResolvedColumn, ResolvedEntity, ResolvedExpr,
    ResolvedJoin,
};

use relstore_core::schema::app::ModelId;
use relstore_core::schema::db::StorageProperty;
use relstore_core::{stmt, Error, Result, Schema};

use std::collections::HashMap;

/// The second pipeline stage: walks the prepared statement, invoking the
/// mapping resolver for every unresolved table, join, member, and type-check
/// node.
pub trait ResolutionStage {
    fn resolve(&self, schema: &Schema, statement: &PreparedStatement) -> Result<ResolvedStatement>;
}

/// A fully storage-resolved statement.
#[derive(Debug, Clone)]
pub struct ResolvedStatement {
    /// The entity rows are read from
    pub root: ResolvedEntity,

    /// Joins materialized during resolution, in creation order
    pub joins: Vec<ResolvedJoin>,

    pub filter: Option<ResolvedExpr>,

    pub order_by: Vec<(ResolvedExpr, stmt::Direction)>,

    /// The columns the command must return, in projection order
    pub selection: Vec<ResolvedColumn>,

    /// The per-row post-projection over `selection`
    pub projection: RowProjection,

    /// The selected entity model, when the projection selects whole
    /// instances
    pub selected_model: Option<ModelId>,

    pub distinct: bool,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub is_scalar: bool,
}

pub struct DefaultResolution;

impl ResolutionStage for DefaultResolution {
    fn resolve(&self, schema: &Schema, statement: &PreparedStatement) -> Result<ResolvedStatement> {
        let mut walker = Walker {
            resolver: MappingResolver::new(schema),
            aliases: AliasGenerator::default(),
            joins: vec![],
            join_cache: HashMap::new(),
            entities: HashMap::new(),
        };
        walker.resolve_statement(statement)
    }
}

/// Per-translation resolution context: alias generation, join bookkeeping,
/// and the model-to-entity table reference expressions resolve through.
struct Walker<'a> {
    resolver: MappingResolver<'a>,
    aliases: AliasGenerator,
    joins: Vec<ResolvedJoin>,

    /// Joins already materialized, keyed by (source alias, member name) so a
    /// member traversed twice reuses one join.
    join_cache: HashMap<(String, String), ResolvedEntity>,

    entities: HashMap<ModelId, ResolvedEntity>,
}

impl Walker<'_> {
    fn resolve_statement(&mut self, statement: &PreparedStatement) -> Result<ResolvedStatement> {
        let mut conjuncts = vec![];
        let (root, selected) = self.resolve_source(statement, &mut conjuncts)?;

        for filter in &statement.filters {
            let resolved = self.resolve_expr(filter)?;
            conjuncts.push(resolved);
        }
        let filter = combine_conjuncts(conjuncts);

        let mut order_by = vec![];
        if let Some(clause) = &statement.order_by {
            for entry in &clause.exprs {
                order_by.push((self.resolve_expr(&entry.expr)?, entry.direction));
            }
        }

        // A scalar query returns one value per row regardless of the stated
        // projection; the selection and entity reconstruction fall away.
        let (selection, projection, selected_model) = if statement.is_scalar {
            (vec![], RowProjection::Column(0), None)
        } else {
            self.resolve_projection(&statement.projection, &selected)?
        };

        Ok(ResolvedStatement {
            root,
            joins: std::mem::take(&mut self.joins),
            filter,
            order_by,
            selection,
            projection,
            selected_model,
            distinct: statement.distinct,
            offset: statement.offset,
            limit: statement.limit,
            is_scalar: statement.is_scalar,
        })
    }

    /// Resolves the statement's source clause, returning the root entity the
    /// command reads from and the entity the statement's own clauses refer
    /// to. They differ for re-rooted (related) sources, where the root is
    /// the base query's entity and the clauses refer to the join target.
    fn resolve_source(
        &mut self,
        statement: &PreparedStatement,
        conjuncts: &mut Vec<ResolvedExpr>,
    ) -> Result<(ResolvedEntity, ResolvedEntity)> {
        match &statement.source {
            PreparedSource::Model(model) => {
                let entity = self.resolver.resolve_table(*model, &mut self.aliases)?;
                self.entities.insert(*model, entity.clone());
                Ok((entity.clone(), entity))
            }
            PreparedSource::Related { base, member } => {
                // The base folds into the join as plain filters; its
                // row-set operators cannot survive the re-rooting.
                if base.distinct || base.limit.is_some() || base.offset.is_some() {
                    return Err(Error::not_supported(format!(
                        "relation {member} cannot be reached through a query \
                         constrained by Distinct, Skip, or Take"
                    )));
                }

                let (root, base_selected) = self.resolve_source(base, conjuncts)?;
                for filter in &base.filters {
                    let resolved = self.resolve_expr(filter)?;
                    conjuncts.push(resolved);
                }

                let join = self
                    .resolver
                    .resolve_join(&base_selected, member, &mut self.aliases)?;
                let target = join.right.clone();
                self.joins.push(join);
                self.entities.insert(target.model, target.clone());
                Ok((root, target))
            }
        }
    }

    fn resolve_expr(&mut self, expr: &stmt::Expr) -> Result<ResolvedExpr> {
        match expr {
            stmt::Expr::And(e) => Ok(ResolvedExpr::And(self.resolve_operands(&e.operands)?)),
            stmt::Expr::Or(e) => Ok(ResolvedExpr::Or(self.resolve_operands(&e.operands)?)),
            stmt::Expr::Not(e) => Ok(ResolvedExpr::Not(Box::new(self.resolve_expr(e)?))),
            stmt::Expr::Value(value) => Ok(ResolvedExpr::Value(value.clone())),
            stmt::Expr::Reference(e) => Ok(ResolvedExpr::Entity(self.entity_for(e.model)?)),
            stmt::Expr::Member(e) => self.resolve_member_expr(e),
            stmt::Expr::BinaryOp(e) => {
                let lhs = self.resolve_expr(&e.lhs)?;
                let lhs = self.lower_entity_operand(lhs)?;
                let rhs = self.resolve_expr(&e.rhs)?;
                let rhs = self.lower_entity_operand(rhs)?;
                let rhs = self.coerce_comparison_value(&lhs, rhs)?;
                let lhs = self.coerce_comparison_value(&rhs, lhs)?;
                Ok(ResolvedExpr::BinaryOp {
                    lhs: Box::new(lhs),
                    op: e.op,
                    rhs: Box::new(rhs),
                })
            }
            stmt::Expr::InList(e) => {
                let subject = self.resolve_expr(&e.expr)?;
                let subject = self.lower_entity_operand(subject)?;
                let list = e
                    .list
                    .iter()
                    .map(|item| {
                        let resolved = self.resolve_expr(item)?;
                        self.coerce_comparison_value(&subject, resolved)
                    })
                    .collect::<Result<_>>()?;
                Ok(ResolvedExpr::InList {
                    expr: Box::new(subject),
                    list,
                })
            }
            stmt::Expr::IsNull(e) => {
                let operand = self.resolve_expr(&e.expr)?;
                let operand = self.lower_entity_operand(operand)?;
                Ok(ResolvedExpr::IsNull(Box::new(operand)))
            }
            stmt::Expr::IsType(e) => {
                let (source, static_model) = self.type_check_subject(&e.expr)?;
                self.resolver.resolve_type_check(&source, static_model, e.model)
            }
        }
    }

    fn resolve_operands(&mut self, operands: &[stmt::Expr]) -> Result<Vec<ResolvedExpr>> {
        operands.iter().map(|op| self.resolve_expr(op)).collect()
    }

    fn resolve_member_expr(&mut self, member: &stmt::ExprMember) -> Result<ResolvedExpr> {
        let base = self.resolve_expr(&member.base)?;
        match base {
            ResolvedExpr::Entity(entity) => self.resolver.resolve_member(&entity, &member.name),
            ResolvedExpr::Relation(relation) => {
                if let Some(optimized) = self
                    .resolver
                    .try_resolve_optimized_member(&relation, &member.name)
                {
                    return Ok(optimized);
                }
                let target = self.join_for(&relation)?;
                self.resolver.resolve_member(&target, &member.name)
            }
            _ => Err(Error::not_supported(format!(
                "member {} accessed on a non-entity expression",
                member.name
            ))),
        }
    }

    /// The entity and static model an is-instance-of test applies to.
    fn type_check_subject(&mut self, expr: &stmt::Expr) -> Result<(ResolvedEntity, ModelId)> {
        match self.resolve_expr(expr)? {
            ResolvedExpr::Entity(entity) => {
                let model = entity.model;
                Ok((entity, model))
            }
            ResolvedExpr::Relation(relation) => {
                let target = self.join_for(&relation)?;
                let model = target.model;
                Ok((target, model))
            }
            _ => Err(Error::not_supported(
                "type tests apply only to entity-valued expressions",
            )),
        }
    }

    /// Materializes (or reuses) the join behind a relation reference.
    fn join_for(&mut self, relation: &RelationRef) -> Result<ResolvedEntity> {
        let member = self
            .resolver
            .schema
            .model(relation.source.model)
            .field(relation.field)
            .name
            .clone();

        let key = (relation.source.alias.clone(), member.clone());
        if let Some(target) = self.join_cache.get(&key) {
            return Ok(target.clone());
        }

        let join = self
            .resolver
            .resolve_join(&relation.source, &member, &mut self.aliases)?;
        let target = join.right.clone();
        self.joins.push(join);
        self.join_cache.insert(key, target.clone());
        self.entities.insert(target.model, target.clone());
        Ok(target)
    }

    /// Lowers an entity- or relation-valued comparison operand to its
    /// identity columns. A relation lowers through the referencing side's
    /// foreign key when the optimization applies, else through a join.
    fn lower_entity_operand(&mut self, expr: ResolvedExpr) -> Result<ResolvedExpr> {
        match expr {
            ResolvedExpr::Entity(entity) => Ok(identity_expr(&entity)),
            ResolvedExpr::Relation(relation) => {
                if let Some(optimized) = self.resolver.try_resolve_optimized_identity(&relation) {
                    return Ok(optimized);
                }
                let target = self.join_for(&relation)?;
                Ok(identity_expr(&target))
            }
            other => Ok(other),
        }
    }

    /// Rewrites a constant compared against a property-backed column into
    /// the column's storage representation. A composite identity constant,
    /// for example, compares by its key value; the class tag is redundant on
    /// the value domain.
    fn coerce_comparison_value(
        &self,
        target: &ResolvedExpr,
        value: ResolvedExpr,
    ) -> Result<ResolvedExpr> {
        let ResolvedExpr::Value(constant) = &value else {
            return Ok(value);
        };
        if constant.is_null() {
            return Ok(value);
        }
        let ResolvedExpr::Column(column) = target else {
            return Ok(value);
        };
        let Some(property) = self.property_for_column(column) else {
            return Ok(value);
        };

        let mut split = property.split_value_for_comparison(constant)?;
        if split.len() == 1 {
            return Ok(ResolvedExpr::Value(split.remove(0).value));
        }
        Ok(value)
    }

    /// The storage property owning a resolved column, looked up through the
    /// column's entity alias.
    fn property_for_column(&self, column: &ResolvedColumn) -> Option<StorageProperty> {
        let entity = self
            .entities
            .values()
            .find(|entity| entity.alias == column.table_alias)?;

        entity_properties(entity)
            .find(|property| {
                property
                    .comparison_columns()
                    .iter()
                    .any(|candidate| candidate.name == column.column.name)
            })
            .cloned()
    }

    fn entity_for(&self, model: ModelId) -> Result<ResolvedEntity> {
        if let Some(entity) = self.entities.get(&model) {
            return Ok(entity.clone());
        }

        // A reference typed by a supertype or subtype of a resolved source
        // still points at that source's rows.
        let app = &self.resolver.schema.app;
        self.entities
            .values()
            .find(|entity| {
                app.is_assignable(entity.model, model) || app.is_assignable(model, entity.model)
            })
            .cloned()
            .ok_or_else(|| Error::unmapped_type(&self.resolver.schema.model(model).name))
    }

    fn resolve_projection(
        &mut self,
        projection: &stmt::Projection,
        selected: &ResolvedEntity,
    ) -> Result<(Vec<ResolvedColumn>, RowProjection, Option<ModelId>)> {
        match projection {
            stmt::Projection::Entity(model) => {
                let entity = if *model == selected.model {
                    selected.clone()
                } else {
                    self.entity_for(*model)?
                };
                let mut selection = vec![];
                let row = self.project_entity(&entity, &mut selection);
                Ok((selection, row, Some(*model)))
            }
            stmt::Projection::Expr(expr) => {
                let resolved = self.resolve_expr(expr)?;
                let mut selection = vec![];
                let row = self.compile_projection(resolved, &mut selection)?;
                Ok((selection, row, None))
            }
            stmt::Projection::Record(exprs) => {
                let mut selection = vec![];
                let mut parts = vec![];
                for expr in exprs {
                    let resolved = self.resolve_expr(expr)?;
                    parts.push(self.compile_projection(resolved, &mut selection)?);
                }
                Ok((selection, RowProjection::Record(parts), None))
            }
        }
    }

    /// Selects every column of the entity and compiles the per-property
    /// reconstruction, keeping property column runs contiguous.
    fn project_entity(
        &self,
        entity: &ResolvedEntity,
        selection: &mut Vec<ResolvedColumn>,
    ) -> RowProjection {
        let mut parts = vec![];
        for property in entity_properties(entity) {
            let columns = property.columns();
            if columns.is_empty() {
                continue;
            }
            let start = selection.len();
            selection.extend(columns.into_iter().map(|column| ResolvedColumn {
                table_alias: entity.alias.clone(),
                column,
            }));
            parts.push(RowProjection::Property {
                property: property.clone(),
                start,
            });
        }
        RowProjection::Record(parts)
    }

    fn compile_projection(
        &mut self,
        expr: ResolvedExpr,
        selection: &mut Vec<ResolvedColumn>,
    ) -> Result<RowProjection> {
        match expr {
            ResolvedExpr::Column(column) => {
                let index = selection.len();
                selection.push(column);
                Ok(RowProjection::Column(index))
            }
            ResolvedExpr::Value(value) => Ok(RowProjection::Constant(value)),
            ResolvedExpr::Record(parts) => Ok(RowProjection::Record(
                parts
                    .into_iter()
                    .map(|part| self.compile_projection(part, selection))
                    .collect::<Result<_>>()?,
            )),
            ResolvedExpr::Entity(entity) => Ok(self.project_entity(&entity, selection)),
            ResolvedExpr::Relation(relation) => {
                // Projecting a single-valued relation yields the related
                // object's identity, which needs the full column layout
                // (class tag included), so the join is always materialized.
                let target = self.join_for(&relation)?;
                let property = target.entity.id_property().clone();
                let columns = property.columns();
                let start = selection.len();
                selection.extend(columns.into_iter().map(|column| ResolvedColumn {
                    table_alias: target.alias.clone(),
                    column,
                }));
                Ok(RowProjection::Property { property, start })
            }
            _ => Err(Error::not_supported(
                "a computed predicate cannot be projected",
            )),
        }
    }
}

fn combine_conjuncts(conjuncts: Vec<ResolvedExpr>) -> Option<ResolvedExpr> {
    let mut kept: Vec<_> = conjuncts
        .into_iter()
        .filter(|expr| !expr.is_const_bool(true))
        .collect();

    match kept.len() {
        0 => None,
        1 => Some(kept.remove(0)),
        _ => Some(ResolvedExpr::And(kept)),
    }
}

/// The entity's identity in comparison layout.
fn identity_expr(entity: &ResolvedEntity) -> ResolvedExpr {
    let mut columns: Vec<_> = entity
        .entity
        .id_property()
        .comparison_columns()
        .into_iter()
        .map(|column| {
            ResolvedExpr::Column(ResolvedColumn {
                table_alias: entity.alias.clone(),
                column,
            })
        })
        .collect();
    if columns.len() == 1 {
        columns.remove(0)
    } else {
        ResolvedExpr::Record(columns)
    }
}

/// Identity, timestamp, then data properties in declaration order.
fn entity_properties(entity: &ResolvedEntity) -> impl Iterator<Item = &StorageProperty> {
    std::iter::once(entity.entity.id_property())
        .chain(std::iter::once(entity.entity.timestamp_property()))
        .chain(entity.entity.properties().iter())
}
