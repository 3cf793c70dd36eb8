#![allow(dead_code)]

use relstore::schema::app::{
    self, Cardinality, ClassTag, Field, FieldId, FieldOrigin, FieldPrimitive, FieldTy, FkSide,
    Model, ModelId, Relation, SortSpec,
};
use relstore::schema::db::{
    ColumnDef, DbType, EmptyViewDef, Entity, EntityName, FilterViewDef, ObjectIdProperty,
    SimpleProperty, StorageProperty, StorageType, TableDef, UnionViewDef,
};
use relstore::schema::mapping;
use relstore::stmt::{Direction, Type};
use relstore::Schema;

use std::sync::Arc;

pub const CUSTOMER: ModelId = ModelId(0);
pub const PREMIUM_CUSTOMER: ModelId = ModelId(1);
pub const STANDARD_CUSTOMER: ModelId = ModelId(2);
pub const ORDER: ModelId = ModelId(3);
pub const VIP_CUSTOMER: ModelId = ModelId(4);
pub const NOTE: ModelId = ModelId(5);
pub const PARTY: ModelId = ModelId(6);
pub const GHOST: ModelId = ModelId(7);
pub const VEHICLE: ModelId = ModelId(8);
pub const CAR: ModelId = ModelId(9);
pub const TRUCK: ModelId = ModelId(10);

/// A small polymorphic domain: an abstract `Party`/`Customer` hierarchy
/// mapped as a union of three concrete tables, plus `Order` and `Note` rows
/// referencing customers through composite identities, a `Ghost` hierarchy
/// with no concrete table at all, and a `Vehicle` hierarchy whose subtypes
/// share one table behind class-tag filter views.
pub fn schema() -> Schema {
    let mut app = app::Schema::default();

    app.register(Model {
        id: CUSTOMER,
        name: "Customer".into(),
        base: Some(PARTY),
        class_tag: None,
        identity_member: "ID".into(),
        fields: customer_fields(CUSTOMER, Some(PARTY)),
    });
    app.register(Model {
        id: PREMIUM_CUSTOMER,
        name: "PremiumCustomer".into(),
        base: Some(CUSTOMER),
        class_tag: Some(ClassTag::from("PremiumCustomer")),
        identity_member: "ID".into(),
        fields: {
            let mut fields = customer_fields(PREMIUM_CUSTOMER, Some(CUSTOMER));
            fields.push(Field {
                id: FieldId {
                    model: PREMIUM_CUSTOMER,
                    index: 3,
                },
                name: "Discount".into(),
                ty: FieldTy::Primitive(FieldPrimitive { ty: Type::I32 }),
                origin: FieldOrigin::Own,
            });
            // Declared on the subtype only; reaching it from a Customer
            // source is a down-cast join.
            fields.push(Field {
                id: FieldId {
                    model: PREMIUM_CUSTOMER,
                    index: 4,
                },
                name: "Referrer".into(),
                ty: FieldTy::Relation(Relation {
                    target: CUSTOMER,
                    cardinality: Cardinality::One,
                    fk: FkSide::Referencing,
                    fk_field: FieldId {
                        model: PREMIUM_CUSTOMER,
                        index: 4,
                    },
                    sort: None,
                }),
                origin: FieldOrigin::Own,
            });
            fields
        },
    });
    app.register(Model {
        id: STANDARD_CUSTOMER,
        name: "StandardCustomer".into(),
        base: Some(CUSTOMER),
        class_tag: Some(ClassTag::from("StandardCustomer")),
        identity_member: "ID".into(),
        fields: customer_fields(STANDARD_CUSTOMER, Some(CUSTOMER)),
    });
    app.register(Model {
        id: ORDER,
        name: "Order".into(),
        base: None,
        class_tag: Some(ClassTag::from("Order")),
        identity_member: "ID".into(),
        fields: vec![
            Field {
                id: FieldId {
                    model: ORDER,
                    index: 0,
                },
                name: "OrderNumber".into(),
                ty: FieldTy::Primitive(FieldPrimitive { ty: Type::I32 }),
                origin: FieldOrigin::Own,
            },
            Field {
                id: FieldId {
                    model: ORDER,
                    index: 1,
                },
                name: "Customer".into(),
                ty: FieldTy::Relation(Relation {
                    target: CUSTOMER,
                    cardinality: Cardinality::One,
                    fk: FkSide::Referencing,
                    fk_field: FieldId {
                        model: ORDER,
                        index: 1,
                    },
                    sort: None,
                }),
                origin: FieldOrigin::Own,
            },
            Field {
                id: FieldId {
                    model: ORDER,
                    index: 2,
                },
                name: "InternalState".into(),
                ty: FieldTy::Raw,
                origin: FieldOrigin::Own,
            },
        ],
    });
    app.register(Model {
        id: VIP_CUSTOMER,
        name: "VipCustomer".into(),
        base: Some(CUSTOMER),
        class_tag: Some(ClassTag::from("VipCustomer")),
        identity_member: "ID".into(),
        fields: customer_fields(VIP_CUSTOMER, Some(CUSTOMER)),
    });
    app.register(Model {
        id: NOTE,
        name: "Note".into(),
        base: None,
        class_tag: Some(ClassTag::from("Note")),
        identity_member: "ID".into(),
        fields: vec![
            Field {
                id: FieldId {
                    model: NOTE,
                    index: 0,
                },
                name: "Position".into(),
                ty: FieldTy::Primitive(FieldPrimitive { ty: Type::I32 }),
                // Declared by a mixin but never exposed through an interface
                // introduced on Note; sorting by it must be rejected.
                origin: FieldOrigin::Mixin {
                    interface: "ISortable".into(),
                    introduced: false,
                },
            },
            Field {
                id: FieldId {
                    model: NOTE,
                    index: 1,
                },
                name: "Owner".into(),
                ty: FieldTy::Relation(Relation {
                    target: CUSTOMER,
                    cardinality: Cardinality::One,
                    fk: FkSide::Referencing,
                    fk_field: FieldId {
                        model: NOTE,
                        index: 1,
                    },
                    sort: None,
                }),
                origin: FieldOrigin::Own,
            },
        ],
    });

    app.register(Model {
        id: PARTY,
        name: "Party".into(),
        base: None,
        class_tag: None,
        identity_member: "ID".into(),
        fields: customer_fields(PARTY, None),
    });
    app.register(Model {
        id: GHOST,
        name: "Ghost".into(),
        base: None,
        class_tag: None,
        identity_member: "ID".into(),
        fields: vec![],
    });

    app.register(Model {
        id: VEHICLE,
        name: "Vehicle".into(),
        base: None,
        class_tag: None,
        identity_member: "ID".into(),
        fields: vehicle_fields(VEHICLE, None),
    });
    app.register(Model {
        id: CAR,
        name: "Car".into(),
        base: Some(VEHICLE),
        class_tag: Some(ClassTag::from("Car")),
        identity_member: "ID".into(),
        fields: vehicle_fields(CAR, Some(VEHICLE)),
    });
    app.register(Model {
        id: TRUCK,
        name: "Truck".into(),
        base: Some(VEHICLE),
        class_tag: Some(ClassTag::from("Truck")),
        identity_member: "ID".into(),
        fields: vehicle_fields(TRUCK, Some(VEHICLE)),
    });

    let premium_table = Arc::new(customer_table("PremiumCustomer", true));
    let standard_table = Arc::new(customer_table("StandardCustomer", false));
    let vip_table = Arc::new(customer_table("VipCustomer", false));

    let customer_union = Arc::new(Entity::UnionView(UnionViewDef {
        name: EntityName::new("CustomerView"),
        members: vec![
            premium_table.clone(),
            standard_table.clone(),
            vip_table.clone(),
        ],
        id_property: id_property(CUSTOMER, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![
            simple("Name", DbType::Text, Type::String),
            nullable_simple("Discount", DbType::Int32, Type::I32),
        ],
        synonyms: vec![],
    }));

    let order_table = Arc::new(Entity::Table(TableDef {
        name: EntityName::new("Order"),
        id_property: id_property(ORDER, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![
            simple("OrderNumber", DbType::Int32, Type::I32),
            fk_property(CUSTOMER, "CustomerID", "CustomerClassID"),
        ],
        indices: vec![],
        foreign_keys: vec![],
        synonyms: vec![],
    }));

    let note_table = Arc::new(Entity::Table(TableDef {
        name: EntityName::new("Note"),
        id_property: id_property(NOTE, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![
            simple("Position", DbType::Int32, Type::I32),
            fk_property(CUSTOMER, "OwnerID", "OwnerClassID"),
        ],
        indices: vec![],
        foreign_keys: vec![],
        synonyms: vec![],
    }));

    // Single shared table for the whole Vehicle hierarchy; the subtypes see
    // it through class-tag filter views.
    let vehicle_table = Arc::new(Entity::Table(TableDef {
        name: EntityName::new("Vehicle"),
        id_property: id_property(VEHICLE, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![simple("LicensePlate", DbType::Text, Type::String)],
        indices: vec![],
        foreign_keys: vec![],
        synonyms: vec![],
    }));
    let car_view = Arc::new(Entity::FilterView(FilterViewDef {
        name: EntityName::new("CarView"),
        base: vehicle_table.clone(),
        class_tags: vec![ClassTag::from("Car")],
        id_property: id_property(CAR, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![simple("LicensePlate", DbType::Text, Type::String)],
        synonyms: vec![],
    }));
    let truck_view = Arc::new(Entity::FilterView(FilterViewDef {
        name: EntityName::new("TruckView"),
        base: vehicle_table.clone(),
        class_tags: vec![ClassTag::from("Truck")],
        id_property: id_property(TRUCK, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties: vec![simple("LicensePlate", DbType::Text, Type::String)],
        synonyms: vec![],
    }));

    let party_union = customer_union.clone();

    let mut map = mapping::Mapping::default();
    map.register(mapping::Model {
        model: CUSTOMER,
        entity: customer_union,
        properties: [(0, simple("Name", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: PREMIUM_CUSTOMER,
        entity: premium_table,
        properties: [
            (0, simple("Name", DbType::Text, Type::String)),
            (3, nullable_simple("Discount", DbType::Int32, Type::I32)),
            (4, fk_property(CUSTOMER, "ReferrerID", "ReferrerClassID")),
        ]
        .into(),
    });
    map.register(mapping::Model {
        model: STANDARD_CUSTOMER,
        entity: standard_table,
        properties: [(0, simple("Name", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: VIP_CUSTOMER,
        entity: vip_table,
        properties: [(0, simple("Name", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: ORDER,
        entity: order_table,
        properties: [
            (0, simple("OrderNumber", DbType::Int32, Type::I32)),
            (1, fk_property(CUSTOMER, "CustomerID", "CustomerClassID")),
        ]
        .into(),
    });
    map.register(mapping::Model {
        model: PARTY,
        entity: party_union,
        properties: [(0, simple("Name", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: GHOST,
        entity: Arc::new(Entity::EmptyView(EmptyViewDef {
            name: EntityName::new("Ghost"),
            id_property: id_property(GHOST, "ID", "ClassID"),
            timestamp_property: timestamp_property(),
            properties: vec![],
            synonyms: vec![],
        })),
        properties: Default::default(),
    });
    map.register(mapping::Model {
        model: VEHICLE,
        entity: vehicle_table,
        properties: [(0, simple("LicensePlate", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: CAR,
        entity: car_view,
        properties: [(0, simple("LicensePlate", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: TRUCK,
        entity: truck_view,
        properties: [(0, simple("LicensePlate", DbType::Text, Type::String))].into(),
    });
    map.register(mapping::Model {
        model: NOTE,
        entity: note_table,
        properties: [
            (0, simple("Position", DbType::Int32, Type::I32)),
            (1, fk_property(CUSTOMER, "OwnerID", "OwnerClassID")),
        ]
        .into(),
    });

    Schema { app, mapping: map }
}

fn customer_fields(model: ModelId, base: Option<ModelId>) -> Vec<Field> {
    let origin = match base {
        Some(base) => FieldOrigin::Base(base),
        None => FieldOrigin::Own,
    };
    vec![
        Field {
            id: FieldId { model, index: 0 },
            name: "Name".into(),
            ty: FieldTy::Primitive(FieldPrimitive { ty: Type::String }),
            origin: origin.clone(),
        },
        Field {
            id: FieldId { model, index: 1 },
            name: "Orders".into(),
            ty: FieldTy::Relation(Relation {
                target: ORDER,
                cardinality: Cardinality::Many,
                fk: FkSide::Referenced,
                fk_field: FieldId {
                    model: ORDER,
                    index: 1,
                },
                sort: Some(SortSpec {
                    member: "OrderNumber".into(),
                    direction: Direction::Asc,
                }),
            }),
            origin: origin.clone(),
        },
        Field {
            id: FieldId { model, index: 2 },
            name: "Notes".into(),
            ty: FieldTy::Relation(Relation {
                target: NOTE,
                cardinality: Cardinality::Many,
                fk: FkSide::Referenced,
                fk_field: FieldId {
                    model: NOTE,
                    index: 1,
                },
                sort: Some(SortSpec {
                    member: "Position".into(),
                    direction: Direction::Asc,
                }),
            }),
            origin,
        },
    ]
}

fn vehicle_fields(model: ModelId, base: Option<ModelId>) -> Vec<Field> {
    let origin = match base {
        Some(base) => FieldOrigin::Base(base),
        None => FieldOrigin::Own,
    };
    vec![Field {
        id: FieldId { model, index: 0 },
        name: "LicensePlate".into(),
        ty: FieldTy::Primitive(FieldPrimitive { ty: Type::String }),
        origin,
    }]
}

fn customer_table(name: &str, premium: bool) -> Entity {
    let mut properties = vec![simple("Name", DbType::Text, Type::String)];
    if premium {
        properties.push(nullable_simple("Discount", DbType::Int32, Type::I32));
        properties.push(fk_property(CUSTOMER, "ReferrerID", "ReferrerClassID"));
    }
    Entity::Table(TableDef {
        name: EntityName::new(name),
        id_property: id_property(CUSTOMER, "ID", "ClassID"),
        timestamp_property: timestamp_property(),
        properties,
        indices: vec![],
        foreign_keys: vec![],
        synonyms: vec![],
    })
}

pub fn id_property(model: ModelId, value_column: &str, class_column: &str) -> StorageProperty {
    StorageProperty::ObjectId(ObjectIdProperty::new(
        Type::Id(model),
        ColumnDef::new(value_column, StorageType::new(DbType::Int64, Type::I64)).primary_key(),
        ColumnDef::new(class_column, StorageType::new(DbType::Text, Type::String)),
    ))
}

/// A foreign-key identity: same shape as [`id_property`] without the
/// primary-key flag.
pub fn fk_property(model: ModelId, value_column: &str, class_column: &str) -> StorageProperty {
    StorageProperty::ObjectId(ObjectIdProperty::new(
        Type::Id(model),
        ColumnDef::new(value_column, StorageType::new(DbType::Int64, Type::I64)),
        ColumnDef::new(class_column, StorageType::new(DbType::Text, Type::String)),
    ))
}

pub fn timestamp_property() -> StorageProperty {
    simple("Timestamp", DbType::Timestamp, Type::I64)
}

pub fn simple(name: &str, db_ty: DbType, app_ty: Type) -> StorageProperty {
    StorageProperty::Simple(SimpleProperty::new(ColumnDef::new(
        name,
        StorageType::new(db_ty, app_ty),
    )))
}

pub fn nullable_simple(name: &str, db_ty: DbType, app_ty: Type) -> StorageProperty {
    StorageProperty::Simple(SimpleProperty::new(ColumnDef::new(
        name,
        StorageType::new(db_ty, app_ty).nullable(),
    )))
}
