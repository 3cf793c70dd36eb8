use super::ResolvedStatement;
use crate::engine::{ResolvedColumn, ResolvedEntity, ResolvedExpr};

use relstore_core::schema::db::{ColumnDef, Entity, TableDef, UnionViewDef};
use relstore_core::{err, stmt, Error, Result};

use std::fmt::Write;

/// A renderable command: text plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub text: String,
    pub params: Vec<stmt::Value>,
}

/// Renders a resolved statement into command text and bound parameters.
///
/// The real dialect emitter lives with the storage provider; the pipeline
/// only requires this seam.
pub trait CommandBuilder {
    fn build(&self, statement: &ResolvedStatement) -> Result<Command>;
}

/// Plain SQL-text rendering with `?n` placeholders.
///
/// Sufficient for tests and simple providers; dialect-specific emitters
/// replace it. Union branches are aligned positionally, padding absent
/// columns with an explicit `NULL` literal.
#[derive(Debug, Default)]
pub struct DefaultCommandBuilder;

impl CommandBuilder for DefaultCommandBuilder {
    fn build(&self, statement: &ResolvedStatement) -> Result<Command> {
        let mut serializer = Serializer::default();
        serializer.statement(statement)?;
        Ok(Command {
            text: serializer.text,
            params: serializer.params,
        })
    }
}

#[derive(Default)]
struct Serializer {
    text: String,
    params: Vec<stmt::Value>,
}

impl Serializer {
    fn statement(&mut self, statement: &ResolvedStatement) -> Result<()> {
        self.text.push_str("SELECT ");
        if statement.is_scalar {
            self.text.push_str("COUNT(*)");
        } else {
            if statement.distinct {
                self.text.push_str("DISTINCT ");
            }
            if statement.selection.is_empty() {
                self.text.push('*');
            }
            for (i, column) in statement.selection.iter().enumerate() {
                if i > 0 {
                    self.text.push_str(", ");
                }
                self.column(column);
            }
        }

        self.text.push_str(" FROM ");
        let mut view_filters = vec![];
        self.entity(&statement.root, &mut view_filters)?;

        for join in &statement.joins {
            self.text.push_str(" INNER JOIN ");
            self.entity(&join.right, &mut view_filters)?;
            self.text.push_str(" ON ");
            for (i, (left, right)) in join.left.iter().zip(&join.right_columns).enumerate() {
                if i > 0 {
                    self.text.push_str(" AND ");
                }
                self.column(left);
                self.text.push_str(" = ");
                self.column(right);
            }
        }

        let mut conjuncts = view_filters;
        if let Some(filter) = &statement.filter {
            conjuncts.push(filter.clone());
        }
        if !conjuncts.is_empty() {
            self.text.push_str(" WHERE ");
            for (i, conjunct) in conjuncts.iter().enumerate() {
                if i > 0 {
                    self.text.push_str(" AND ");
                }
                self.expr(conjunct)?;
            }
        }

        if !statement.is_scalar && !statement.order_by.is_empty() {
            self.text.push_str(" ORDER BY ");
            for (i, (expr, direction)) in statement.order_by.iter().enumerate() {
                if i > 0 {
                    self.text.push_str(", ");
                }
                self.expr(expr)?;
                if !direction.is_asc() {
                    self.text.push_str(" DESC");
                }
            }
        }

        if let Some(limit) = statement.limit {
            write!(self.text, " LIMIT {limit}").map_err(|_| err!("command text write failed"))?;
        }
        if let Some(offset) = statement.offset {
            write!(self.text, " OFFSET {offset}").map_err(|_| err!("command text write failed"))?;
        }

        Ok(())
    }

    /// Renders an aliased entity into the FROM/JOIN clause. Filter views
    /// contribute their class-tag restriction to `view_filters` rather than
    /// to the rendered storage object.
    fn entity(&mut self, entity: &ResolvedEntity, view_filters: &mut Vec<ResolvedExpr>) -> Result<()> {
        self.storage_object(&entity.entity, &entity.alias)?;

        if let Entity::FilterView(view) = &*entity.entity {
            if let Some(tag_column) = entity.entity.class_tag_column() {
                let list = view
                    .class_tags
                    .iter()
                    .map(|tag| ResolvedExpr::Value(tag.clone().into()))
                    .collect();
                view_filters.push(ResolvedExpr::InList {
                    expr: Box::new(ResolvedExpr::column(&entity.alias, tag_column)),
                    list,
                });
            }
        }
        Ok(())
    }

    fn storage_object(&mut self, entity: &Entity, alias: &str) -> Result<()> {
        match entity {
            Entity::Table(table) => {
                self.table_name(table);
                self.push_alias(alias);
                Ok(())
            }
            Entity::UnionView(union) => self.union(union, alias),
            Entity::FilterView(view) => self.storage_object(&view.base, alias),
            Entity::EmptyView(_) => Err(Error::unmapped_type(entity.name().name.clone())),
        }
    }

    fn union(&mut self, union: &UnionViewDef, alias: &str) -> Result<()> {
        let declared = declared_columns(union);

        self.text.push('(');
        for (i, table) in union.all_tables().iter().enumerate() {
            if i > 0 {
                self.text.push_str(" UNION ALL ");
            }
            self.text.push_str("SELECT ");

            let available = table.columns();
            for (j, slot) in union.full_column_list(&available).iter().enumerate() {
                if j > 0 {
                    self.text.push_str(", ");
                }
                match slot {
                    Some(column) => self.text.push_str(&column.name),
                    None => self.text.push_str("NULL"),
                }
                self.text.push_str(" AS ");
                self.text.push_str(&declared[j].name);
            }

            self.text.push_str(" FROM ");
            self.table_name(table);
        }
        self.text.push(')');
        self.push_alias(alias);
        Ok(())
    }

    fn expr(&mut self, expr: &ResolvedExpr) -> Result<()> {
        match expr {
            ResolvedExpr::Column(column) => {
                self.column(column);
                Ok(())
            }
            ResolvedExpr::Value(value) => {
                self.param(value.clone());
                Ok(())
            }
            ResolvedExpr::Record(parts) => self.expr_list(parts, ", ", true),
            ResolvedExpr::And(operands) => self.expr_list(operands, " AND ", false),
            ResolvedExpr::Or(operands) => self.expr_list(operands, " OR ", false),
            ResolvedExpr::Not(operand) => {
                self.text.push_str("NOT (");
                self.expr(operand)?;
                self.text.push(')');
                Ok(())
            }
            ResolvedExpr::BinaryOp { lhs, op, rhs } => {
                // Null comparisons use the dedicated SQL form.
                if let ResolvedExpr::Value(stmt::Value::Null) = &**rhs {
                    if matches!(op, stmt::BinaryOp::Eq | stmt::BinaryOp::Ne) {
                        self.expr(lhs)?;
                        self.text.push_str(match op {
                            stmt::BinaryOp::Eq => " IS NULL",
                            _ => " IS NOT NULL",
                        });
                        return Ok(());
                    }
                }
                self.expr(lhs)?;
                write!(self.text, " {op} ").map_err(|_| err!("command text write failed"))?;
                self.expr(rhs)
            }
            ResolvedExpr::InList { expr, list } => {
                self.expr(expr)?;
                self.text.push_str(" IN ");
                self.expr_list(list, ", ", true)
            }
            ResolvedExpr::IsNull(operand) => {
                self.expr(operand)?;
                self.text.push_str(" IS NULL");
                Ok(())
            }
            ResolvedExpr::Entity(entity) => Err(Error::not_supported(format!(
                "entity reference {} cannot be rendered as command text",
                entity.entity.name()
            ))),
            ResolvedExpr::Relation(_) => Err(Error::not_supported(
                "an unresolved relation reference cannot be rendered as command text",
            )),
        }
    }

    fn expr_list(&mut self, exprs: &[ResolvedExpr], sep: &str, parens: bool) -> Result<()> {
        if parens {
            self.text.push('(');
        }
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.text.push_str(sep);
            }
            if !parens {
                self.text.push('(');
            }
            self.expr(expr)?;
            if !parens {
                self.text.push(')');
            }
        }
        if parens {
            self.text.push(')');
        }
        Ok(())
    }

    fn column(&mut self, column: &ResolvedColumn) {
        self.text.push_str(&column.table_alias);
        self.text.push('.');
        self.text.push_str(&column.column.name);
    }

    fn param(&mut self, value: stmt::Value) {
        self.params.push(value);
        let n = self.params.len();
        self.text.push('?');
        self.text.push_str(&n.to_string());
    }

    fn table_name(&mut self, table: &TableDef) {
        let name = table.name.to_string();
        self.text.push_str(&name);
    }

    fn push_alias(&mut self, alias: &str) {
        self.text.push_str(" AS ");
        self.text.push_str(alias);
    }
}

/// The union view's declared column list: identity, class tag, timestamp,
/// then data columns in declaration order.
fn declared_columns(union: &UnionViewDef) -> Vec<ColumnDef> {
    let mut declared = union.id_property.columns();
    declared.extend(union.timestamp_property.columns());
    for property in &union.properties {
        declared.extend(property.columns());
    }
    declared
}
