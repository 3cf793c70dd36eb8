use super::{EmptyViewDef, FilterViewDef, TableDef, UnionViewDef};

/// Visitor dispatch over entity variants.
///
/// Lets an external DDL emitter process each variant without this core
/// depending on the emitter.
pub trait EntityVisitor {
    fn visit_table(&mut self, table: &TableDef);
    fn visit_filter_view(&mut self, view: &FilterViewDef);
    fn visit_union_view(&mut self, view: &UnionViewDef);
    fn visit_empty_view(&mut self, view: &EmptyViewDef);
}
