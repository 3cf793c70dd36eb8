mod resolved;
pub use resolved::{
    AliasGenerator, RelationRef, ResolvedColumn, ResolvedEntity, ResolvedExpr, ResolvedJoin,
};

use relstore_core::{
    schema::app::{Field, FieldTy, FkSide, ModelId},
    schema::db::{Entity, StorageProperty},
    Error, Result, Schema,
};

/// Resolves type, member, join, and type-check references from the query
/// model onto relational-entity-model terms.
///
/// Stateless between calls; all per-translation state (aliases, join
/// bookkeeping) lives with the caller.
pub struct MappingResolver<'a> {
    pub schema: &'a Schema,
}

impl<'a> MappingResolver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Resolves an unresolved type reference into an aliased entity.
    pub fn resolve_table(
        &self,
        model: ModelId,
        aliases: &mut AliasGenerator,
    ) -> Result<ResolvedEntity> {
        let entity = self.schema.entity_for(model)?;
        if matches!(**entity, Entity::EmptyView(_)) {
            return Err(Error::unmapped_type(&self.schema.model(model).name));
        }
        Ok(ResolvedEntity {
            model,
            entity: entity.clone(),
            alias: aliases.next_alias(),
        })
    }

    /// Resolves a relation member into a join.
    ///
    /// The member may be declared on the source model itself, on a supertype,
    /// via a mixed-in capability interface, or on a type derived from the
    /// source model (a down-cast join).
    pub fn resolve_join(
        &self,
        source: &ResolvedEntity,
        member: &str,
        aliases: &mut AliasGenerator,
    ) -> Result<ResolvedJoin> {
        let field = self.find_member(source.model, member).ok_or_else(|| {
            Error::unmapped_member(format!(
                "{}.{}",
                self.schema.model(source.model).name,
                member
            ))
        })?;

        let Some(relation) = field.as_relation() else {
            return Err(Error::unmapped_relation(format!(
                "{}.{}",
                self.schema.model(field.id.model).name,
                member
            )));
        };

        let right = self.resolve_table(relation.target, aliases)?;
        let fk_columns = self.fk_comparison_columns(relation.fk_field)?;

        let (left, right_columns) = match relation.fk {
            FkSide::Referencing => (
                aliased(&source.alias, fk_columns),
                aliased(
                    &right.alias,
                    right.entity.id_property().comparison_columns(),
                ),
            ),
            FkSide::Referenced => (
                aliased(
                    &source.alias,
                    source.entity.id_property().comparison_columns(),
                ),
                aliased(&right.alias, fk_columns),
            ),
        };

        Ok(ResolvedJoin {
            left,
            right,
            right_columns,
        })
    }

    /// Resolves a member access into a column or relation-reference
    /// expression.
    pub fn resolve_member(&self, source: &ResolvedEntity, member: &str) -> Result<ResolvedExpr> {
        let model = self.schema.model(source.model);

        // The identity member resolves through a dedicated path: its column
        // layout comes from the entity's identity property, not from an
        // ordinary field mapping.
        if member == model.identity_member {
            return self.resolve_identity(source);
        }

        let field = model.field_by_name(member).ok_or_else(|| {
            Error::unmapped_member(format!("{}.{}", model.name, member))
        })?;

        match &field.ty {
            FieldTy::Relation(relation) if relation.is_many() => {
                Err(Error::not_supported(format!(
                    "collection-valued member {}.{} can only be traversed via a join",
                    model.name, member
                )))
            }
            FieldTy::Relation(_) => Ok(ResolvedExpr::Relation(RelationRef {
                source: source.clone(),
                field: field.id,
            })),
            FieldTy::Primitive(_) => {
                let property = self.schema.property_for(field.id).ok_or_else(|| {
                    Error::unmapped_member(format!("{}.{}", model.name, member))
                })?;
                if let StorageProperty::Unsupported(p) = property {
                    return Err(Error::not_supported(p.message.clone()));
                }
                Ok(columns_expr(&source.alias, property.comparison_columns()))
            }
            FieldTy::Raw => Err(Error::unmapped_member(format!(
                "{}.{}",
                model.name, member
            ))),
        }
    }

    fn resolve_identity(&self, source: &ResolvedEntity) -> Result<ResolvedExpr> {
        Ok(columns_expr(
            &source.alias,
            source.entity.id_property().comparison_columns(),
        ))
    }

    /// Resolves an is-instance-of test against a polymorphic entity.
    ///
    /// `static_model` is the checked expression's static type; rows flowing
    /// through `source` are instances of it or of its subtypes.
    pub fn resolve_type_check(
        &self,
        source: &ResolvedEntity,
        static_model: ModelId,
        desired: ModelId,
    ) -> Result<ResolvedExpr> {
        let app = &self.schema.app;

        // The static type already satisfies the desired type.
        if app.is_assignable(static_model, desired) {
            return Ok(ResolvedExpr::TRUE);
        }

        // Concrete types that could satisfy the check at run time, in
        // declaration order.
        let tags: Vec<_> = app
            .concrete_subtypes(desired)
            .into_iter()
            .filter(|model| app.is_assignable(model.id, static_model))
            .filter_map(|model| model.class_tag.clone())
            .collect();

        if tags.is_empty() {
            return Ok(ResolvedExpr::FALSE);
        }

        // Entities whose rows can span a hierarchy carry a class tag column
        // and must discriminate per row. Tables shared across a hierarchy
        // keep theirs, so tag presence decides, not the entity variant. A
        // tagless source holds rows of a single concrete type, and that
        // type is one of the candidates above.
        let Some(tag_column) = source.entity.class_tag_column() else {
            return Ok(ResolvedExpr::TRUE);
        };

        Ok(ResolvedExpr::InList {
            expr: Box::new(ResolvedExpr::column(&source.alias, tag_column)),
            list: tags
                .into_iter()
                .map(|tag| ResolvedExpr::Value(tag.into()))
                .collect(),
        })
    }

    /// Rewrites a relation-ref's identity access directly through the
    /// referencing side's foreign key columns, skipping the join.
    ///
    /// Non-authoritative: returns `None` whenever the shortcut does not
    /// apply, and the caller falls back to the join path. Presence or
    /// absence of the optimization never changes query results, only query
    /// shape.
    pub fn try_resolve_optimized_identity(&self, relation: &RelationRef) -> Option<ResolvedExpr> {
        let field = self.schema.model(relation.source.model).field(relation.field);
        let rel = field.as_relation()?;
        if rel.fk != FkSide::Referencing {
            return None;
        }
        let property = self.schema.property_for(rel.fk_field)?;
        Some(columns_expr(
            &relation.source.alias,
            property.comparison_columns(),
        ))
    }

    /// Like [`Self::try_resolve_optimized_identity`], but for a member
    /// access on the relation ref. Only the identity member itself can be
    /// optimized; any other member returns `None`.
    pub fn try_resolve_optimized_member(
        &self,
        relation: &RelationRef,
        member: &str,
    ) -> Option<ResolvedExpr> {
        let field = self.schema.model(relation.source.model).field(relation.field);
        let rel = field.as_relation()?;
        if member != self.schema.model(rel.target).identity_member {
            return None;
        }
        self.try_resolve_optimized_identity(relation)
    }

    /// Looks the member up in the model's effective member table, falling
    /// back to models derived from it (down-cast access).
    fn find_member(&self, model: ModelId, member: &str) -> Option<&Field> {
        if let Some(field) = self.schema.model(model).field_by_name(member) {
            return Some(field);
        }
        self.schema
            .app
            .models
            .values()
            .filter(|m| m.id != model && self.schema.app.is_assignable(m.id, model))
            .find_map(|m| m.field_by_name(member))
    }

    fn fk_comparison_columns(
        &self,
        field: relstore_core::schema::app::FieldId,
    ) -> Result<Vec<relstore_core::schema::db::ColumnDef>> {
        let property = self.schema.property_for(field).ok_or_else(|| {
            Error::unmapped_relation(format!(
                "{}.{}",
                self.schema.model(field.model).name,
                self.schema.model(field.model).field(field).name
            ))
        })?;
        Ok(property.comparison_columns())
    }
}

fn aliased(
    alias: &str,
    columns: Vec<relstore_core::schema::db::ColumnDef>,
) -> Vec<ResolvedColumn> {
    columns
        .into_iter()
        .map(|column| ResolvedColumn {
            table_alias: alias.to_string(),
            column,
        })
        .collect()
}

fn columns_expr(
    alias: &str,
    columns: Vec<relstore_core::schema::db::ColumnDef>,
) -> ResolvedExpr {
    let mut resolved = aliased(alias, columns);
    if resolved.len() == 1 {
        ResolvedExpr::Column(resolved.remove(0))
    } else {
        ResolvedExpr::Record(resolved.into_iter().map(ResolvedExpr::Column).collect())
    }
}
