mod support;

use support::*;

use relstore::schema::app::FieldId;
use relstore::{AliasGenerator, MappingResolver, RelationRef, ResolvedExpr};

#[test]
fn resolve_table_assigns_fresh_aliases() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();

    assert_eq!(customers.alias, "t0");
    assert_eq!(orders.alias, "t1");
    assert!(customers.entity.is_union_view());
}

#[test]
fn subtype_sharing_its_supertype_table_resolves_to_a_filter_view() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let cars = resolver.resolve_table(CAR, &mut aliases).unwrap();
    assert!(cars.entity.is_filter_view());

    let resolved = resolver.resolve_member(&cars, "LicensePlate").unwrap();
    match resolved {
        ResolvedExpr::Column(column) => {
            assert_eq!(column.table_alias, "t0");
            assert_eq!(column.column.name, "LicensePlate");
        }
        other => panic!("expected a column, got {other:?}"),
    }
}

#[test]
fn resolve_table_rejects_an_empty_view() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let err = resolver.resolve_table(GHOST, &mut aliases).unwrap_err();
    assert!(err.is_unmapped_item());
    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn identity_member_resolves_to_the_value_column() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();
    let resolved = resolver.resolve_member(&orders, "ID").unwrap();

    match resolved {
        ResolvedExpr::Column(column) => {
            assert_eq!(column.table_alias, "t0");
            assert_eq!(column.column.name, "ID");
        }
        other => panic!("expected a column, got {other:?}"),
    }
}

#[test]
fn unmapped_member_is_named_in_the_error() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let err = resolver.resolve_member(&customers, "Bogus").unwrap_err();

    assert!(err.is_unmapped_item());
    assert!(err.to_string().contains("Customer.Bogus"));
}

#[test]
fn collection_member_access_requires_a_join() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let err = resolver.resolve_member(&customers, "Orders").unwrap_err();

    assert!(err.is_not_supported());
    assert!(err.to_string().contains("join"));
}

#[test]
fn raw_member_is_unmapped() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();
    let err = resolver.resolve_member(&orders, "InternalState").unwrap_err();

    assert!(err.is_unmapped_item());
    assert!(err.to_string().contains("Order.InternalState"));
}

// =============================================================================
// Joins
// =============================================================================

#[test]
fn referencing_side_join_pairs_fk_against_target_identity() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();
    let join = resolver.resolve_join(&orders, "Customer", &mut aliases).unwrap();

    assert_eq!(join.left.len(), 1);
    assert_eq!(join.left[0].table_alias, "t0");
    assert_eq!(join.left[0].column.name, "CustomerID");
    assert_eq!(join.right.alias, "t1");
    assert_eq!(join.right_columns[0].column.name, "ID");
}

#[test]
fn referenced_side_join_pairs_identity_against_fk() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let join = resolver.resolve_join(&customers, "Orders", &mut aliases).unwrap();

    assert_eq!(join.left[0].table_alias, "t0");
    assert_eq!(join.left[0].column.name, "ID");
    assert_eq!(join.right.model, ORDER);
    assert_eq!(join.right_columns[0].column.name, "CustomerID");
}

#[test]
fn join_member_inherited_from_a_supertype_resolves() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let premium = resolver.resolve_table(PREMIUM_CUSTOMER, &mut aliases).unwrap();
    let join = resolver.resolve_join(&premium, "Orders", &mut aliases).unwrap();
    assert_eq!(join.right.model, ORDER);
}

#[test]
fn join_member_declared_on_a_derived_type_resolves() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    // Referrer is declared on PremiumCustomer; reaching it from a Customer
    // source is a down-cast join.
    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let join = resolver.resolve_join(&customers, "Referrer", &mut aliases).unwrap();
    assert_eq!(join.left[0].column.name, "ReferrerID");
    assert_eq!(join.right.model, CUSTOMER);
}

#[test]
fn scalar_member_through_the_join_path_is_an_unmapped_relation() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let err = resolver.resolve_join(&customers, "Name", &mut aliases).unwrap_err();

    assert!(err.is_unmapped_item());
    assert!(err.to_string().contains("Customer.Name"));
}

// =============================================================================
// Type checks
// =============================================================================

#[test]
fn type_check_against_a_satisfied_type_is_constant_true() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let premium = resolver.resolve_table(PREMIUM_CUSTOMER, &mut aliases).unwrap();
    let resolved = resolver
        .resolve_type_check(&premium, PREMIUM_CUSTOMER, PREMIUM_CUSTOMER)
        .unwrap();
    assert!(resolved.is_const_bool(true));

    // The supertype is satisfied statically too.
    let resolved = resolver
        .resolve_type_check(&premium, PREMIUM_CUSTOMER, CUSTOMER)
        .unwrap();
    assert!(resolved.is_const_bool(true));
}

#[test]
fn type_check_against_an_unrelated_type_is_constant_false() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();
    let resolved = resolver
        .resolve_type_check(&orders, ORDER, PREMIUM_CUSTOMER)
        .unwrap();
    assert!(resolved.is_const_bool(false));
}

#[test]
fn type_check_lists_concrete_tags_in_declaration_order() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let parties = resolver.resolve_table(PARTY, &mut aliases).unwrap();
    let resolved = resolver.resolve_type_check(&parties, PARTY, CUSTOMER).unwrap();

    match resolved {
        ResolvedExpr::InList { expr, list } => {
            match *expr {
                ResolvedExpr::Column(column) => assert_eq!(column.column.name, "ClassID"),
                other => panic!("expected the class tag column, got {other:?}"),
            }
            let tags: Vec<_> = list
                .iter()
                .map(|item| match item {
                    ResolvedExpr::Value(relstore::stmt::Value::String(tag)) => tag.as_str(),
                    other => panic!("expected a tag constant, got {other:?}"),
                })
                .collect();
            assert_eq!(
                tags,
                ["PremiumCustomer", "StandardCustomer", "VipCustomer"]
            );
        }
        other => panic!("expected a class-tag IN predicate, got {other:?}"),
    }
}

#[test]
fn type_check_on_a_shared_table_keeps_the_class_tag_predicate() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    // The Vehicle table holds Car and Truck rows side by side; the check
    // must discriminate per row even though the source is a plain table.
    let vehicles = resolver.resolve_table(VEHICLE, &mut aliases).unwrap();
    let resolved = resolver.resolve_type_check(&vehicles, VEHICLE, CAR).unwrap();

    match resolved {
        ResolvedExpr::InList { expr, list } => {
            match *expr {
                ResolvedExpr::Column(column) => assert_eq!(column.column.name, "ClassID"),
                other => panic!("expected the class tag column, got {other:?}"),
            }
            assert_eq!(list.len(), 1);
            match &list[0] {
                ResolvedExpr::Value(relstore::stmt::Value::String(tag)) => {
                    assert_eq!(tag, "Car");
                }
                other => panic!("expected a tag constant, got {other:?}"),
            }
        }
        other => panic!("expected a class-tag IN predicate, got {other:?}"),
    }
}

#[test]
fn type_check_covering_every_concrete_type_is_constant_true() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    // Every row the Car view exposes is a Car already.
    let cars = resolver.resolve_table(CAR, &mut aliases).unwrap();
    let resolved = resolver.resolve_type_check(&cars, CAR, CAR).unwrap();
    assert!(resolved.is_const_bool(true));
}

#[test]
fn type_check_with_a_single_matching_subtype_keeps_the_in_shape() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let resolved = resolver
        .resolve_type_check(&customers, CUSTOMER, PREMIUM_CUSTOMER)
        .unwrap();

    match resolved {
        ResolvedExpr::InList { list, .. } => assert_eq!(list.len(), 1),
        other => panic!("expected a class-tag IN predicate, got {other:?}"),
    }
}

// =============================================================================
// Optimized identity resolution
// =============================================================================

#[test]
fn optimized_identity_rewrites_through_the_referencing_fk() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let orders = resolver.resolve_table(ORDER, &mut aliases).unwrap();
    let relation = RelationRef {
        source: orders,
        field: FieldId {
            model: ORDER,
            index: 1,
        },
    };

    let optimized = resolver.try_resolve_optimized_identity(&relation).unwrap();
    match optimized {
        ResolvedExpr::Column(column) => {
            assert_eq!(column.table_alias, "t0");
            assert_eq!(column.column.name, "CustomerID");
        }
        other => panic!("expected the fk column, got {other:?}"),
    }

    // The identity member by name takes the same shortcut; any other member
    // declines.
    assert!(resolver.try_resolve_optimized_member(&relation, "ID").is_some());
    assert!(resolver.try_resolve_optimized_member(&relation, "Name").is_none());
}

#[test]
fn optimized_identity_declines_on_the_referenced_side() {
    let schema = schema();
    let resolver = MappingResolver::new(&schema);
    let mut aliases = AliasGenerator::default();

    let customers = resolver.resolve_table(CUSTOMER, &mut aliases).unwrap();
    let relation = RelationRef {
        source: customers,
        field: FieldId {
            model: CUSTOMER,
            index: 1,
        },
    };

    assert!(resolver.try_resolve_optimized_identity(&relation).is_none());
}
