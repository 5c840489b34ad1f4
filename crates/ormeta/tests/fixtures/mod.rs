//! Navigation domain shared by the integration tests: provinces own towns,
//! towns own communities.

use ormeta::prelude::*;

pub struct Province;
pub struct Town;
pub struct Community;

const TOWNS: PropertyType =
    PropertyType::Collection(Container::Vector, &PropertyType::Reference("Town"));
const COMMUNITIES: PropertyType =
    PropertyType::Collection(Container::List, &PropertyType::Reference("Community"));
const TAGS: PropertyType =
    PropertyType::Collection(Container::Set, &PropertyType::Scalar(DataType::Text));

const PROVINCE_PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::scalar("id", DataType::Int64),
    PropertyDescriptor::scalar("name", DataType::Text),
    PropertyDescriptor::new("towns", TOWNS),
];

const TOWN_PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::scalar("id", DataType::Int64),
    PropertyDescriptor::scalar("name", DataType::Text),
    PropertyDescriptor::new("kind", PropertyType::Enumeration("TownKind")),
    PropertyDescriptor::reference("province", "Province"),
    PropertyDescriptor::new("communities", COMMUNITIES),
    PropertyDescriptor::scalar("objectName", DataType::Text).inherited(),
];

const COMMUNITY_PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor::scalar("id", DataType::Uuid),
    PropertyDescriptor::scalar("title", DataType::Text),
    PropertyDescriptor::reference("town", "Town"),
    PropertyDescriptor::new("tags", TAGS),
    PropertyDescriptor::scalar("population", DataType::Uint32)
        .read_only()
        .not_stored(),
];

static PROVINCE: EntityDescriptor = EntityDescriptor::new("Province")
    .class_declarations(&["TABLE provinces SCHEMA update"])
    .properties(PROVINCE_PROPERTIES);

static TOWN: EntityDescriptor = EntityDescriptor::new("Town")
    .class_declarations(&["TABLE towns"])
    .property_declarations(&["name COLUMN town_name"])
    .properties(TOWN_PROPERTIES)
    .constructors(&[ConstructorDescriptor::WITH_PARENT]);

static COMMUNITY: EntityDescriptor = EntityDescriptor::new("Community")
    .class_declarations(&["TABLE communities"])
    .property_declarations(&["id COLUMN community_id AUTOGENERATED false"])
    .properties(COMMUNITY_PROPERTIES);

impl OrmEntity for Province {
    const DESCRIPTOR: &'static EntityDescriptor = &PROVINCE;
}

impl OrmEntity for Town {
    const DESCRIPTOR: &'static EntityDescriptor = &TOWN;
}

impl OrmEntity for Community {
    const DESCRIPTOR: &'static EntityDescriptor = &COMMUNITY;
}

/// Register the whole navigation domain.
pub fn register(registry: &mut MetadataRegistry) {
    registry.register_enum("TownKind");
    registry
        .register_entity::<Province>()
        .expect("Province should register");
    registry
        .register_entity::<Town>()
        .expect("Town should register");
    registry
        .register_entity::<Community>()
        .expect("Community should register");
}
