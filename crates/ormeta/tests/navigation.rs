mod fixtures;

use fixtures::{Community, Province, Town};
use ormeta::{global::with_registry, prelude::*};

#[test]
fn resolving_the_root_builds_the_whole_graph() {
    let tables = with_registry(|registry| {
        fixtures::register(registry);
        registry
            .resolve_entity::<Province>()
            .expect("navigation domain should resolve");

        ["Province", "Town", "Community"].map(|name| {
            registry
                .get(name)
                .map(|entity| entity.table_name().to_string())
        })
    });

    assert_eq!(
        tables,
        [
            Some("provinces".to_string()),
            Some("towns".to_string()),
            Some("communities".to_string()),
        ]
    );
}

#[test]
fn relationship_fields_follow_naming_conventions() {
    with_registry(|registry| {
        fixtures::register(registry);
        let town = registry
            .resolve_entity::<Town>()
            .expect("Town should resolve");

        let fields: Vec<(&str, &str)> = town
            .property_mappings()
            .iter()
            .map(|mapping| (mapping.class_property_name(), mapping.table_field_name()))
            .collect();
        assert_eq!(
            fields,
            [
                ("id", "id"),
                ("name", "town_name"),
                ("kind", "kind"),
                ("province", "province_id"),
                ("communities", ""),
            ]
        );

        let kind = town.class_property_mapping("kind").unwrap();
        assert!(kind.is_enumeration());
        assert_eq!(kind.data_type(), DataType::Int32);
    });
}

#[test]
fn inverse_sides_point_back_at_their_owner() {
    with_registry(|registry| {
        fixtures::register(registry);
        registry.resolve_entity::<Community>().unwrap();

        let town = registry.get("Town").expect("Town is resolved through Community");
        let communities = town.class_property_mapping("communities").unwrap();
        assert!(communities.is_transient());

        let community = registry.referenced(communities).unwrap();
        let back: Vec<_> = community
            .references_to(town.key())
            .map(PropertyMapping::class_property_name)
            .collect();
        assert_eq!(back, ["town"]);
    });
}

#[test]
fn declared_identity_column_and_flags_are_kept() {
    with_registry(|registry| {
        fixtures::register(registry);
        let community = registry.resolve_entity::<Community>().unwrap();

        let id = community.identity_mapping().expect("id is the identity");
        assert_eq!(id.table_field_name(), "community_id");
        assert!(!id.is_autogenerated());
        assert_eq!(id.data_type(), DataType::Uuid);

        let population = community.class_property_mapping("population").unwrap();
        assert!(population.is_transient());

        let tags = community.table_field_mapping("tags").unwrap();
        assert_eq!(tags.data_type(), DataType::List);
        assert!(!tags.is_reference());
    });
}

#[test]
fn repeated_resolution_is_served_from_cache() {
    let (before, after, same) = with_registry(|registry| {
        fixtures::register(registry);
        let first: *const EntityMetadata = registry.resolve_entity::<Province>().unwrap();
        let before = registry.len();
        let second: *const EntityMetadata = registry.resolve_entity::<Province>().unwrap();

        (before, registry.len(), std::ptr::eq(first, second))
    });

    assert_eq!(before, after);
    assert!(same);
}

#[test]
fn misdeclared_entity_does_not_disturb_the_shared_registry() {
    const PROPERTIES: &[PropertyDescriptor] = &[
        PropertyDescriptor::scalar("id", DataType::Int64),
        PropertyDescriptor::reference("district", "District"),
    ];
    static VILLAGE: EntityDescriptor = EntityDescriptor::new("Village").properties(PROPERTIES);

    let err = with_registry(|registry| {
        fixtures::register(registry);
        registry
            .resolve(&VILLAGE)
            .expect_err("District is not registered")
    });

    assert_eq!(err.class, SchemaErrorClass::TypeResolution);
    assert_eq!(
        err.to_string(),
        "entity 'Village', property 'district': an unregistered type District is used \
         (hint: if District is an entity, register it with MetadataRegistry::register; \
         if it is an enumeration, register it with MetadataRegistry::register_enum; \
         container aliases are not supported)"
    );

    with_registry(|registry| {
        assert!(registry.get("Village").is_none());
        assert!(registry.resolve_entity::<Province>().is_ok());
    });
}

#[test]
fn metadata_exports_as_json() {
    let json = with_registry(|registry| {
        fixtures::register(registry);
        let province = registry.resolve_entity::<Province>().unwrap();

        serde_json::to_value(province).expect("metadata should serialize")
    });

    assert_eq!(json["table_name"], "provinces");
    assert_eq!(json["user_declaration"]["Schema"], "update");
    assert_eq!(json["property_mappings"][2]["is_transient"], true);
    assert_eq!(json["property_mappings"][2]["referenced_entity"], "Town");
}
