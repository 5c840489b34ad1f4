//! Object-relational mapping metadata engine.
//!
//! Entity types describe themselves with static [`introspect::EntityDescriptor`]
//! tables and compact keyword declarations (`TABLE provinces`,
//! `id COLUMN province_id AUTOGENERATED IDENTITY`). The
//! [`registry::MetadataRegistry`] turns them into cached, cross-referenced
//! [`model::entity::EntityMetadata`] records for persistence layers.

pub mod config;
pub mod declaration;
pub mod error;
pub mod global;
pub mod introspect;
pub mod model;
pub mod registry;
pub mod types;

///
/// Prelude
///
/// Vocabulary needed to describe and resolve entities.
///

pub mod prelude {
    pub use crate::{
        config::RegistryConfig,
        error::{SchemaError, SchemaErrorClass},
        introspect::{
            ConstructorDescriptor, ConstructorParameter, EntityDescriptor, OrmEntity,
            PropertyDescriptor, PropertyType, Visibility,
        },
        model::{EntityKey, entity::EntityMetadata, mapping::PropertyMapping},
        registry::MetadataRegistry,
        types::{Container, DataType},
    };
}
