//! Metadata registry: resolves entity descriptors into cached
//! [`EntityMetadata`] records.
//!
//! Resolution is memoized per entity type. A placeholder record is cached
//! *before* an entity's properties are resolved, so a relationship that leads
//! back to an entity still under construction finds the placeholder instead
//! of recursing again. Once the outermost resolution finishes, every
//! constructed entity is checked for cross-reference consistency.

mod mapping;
mod validate;


use crate::{
    config::RegistryConfig,
    declaration::{UserDeclaration, parse_class_declaration, parse_property_declaration},
    error::{SchemaError, SchemaErrorClass},
    introspect::{EntityDescriptor, OrmEntity, PropertyOrigin},
    model::{EntityKey, entity::EntityMetadata, mapping::PropertyMapping},
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

///
/// ResolutionState
///
/// Entities whose construction has started but not finished, and entities
/// fully constructed. Only mutated inside `resolve`.
///

#[derive(Debug, Default)]
pub struct ResolutionState {
    under_construction: BTreeSet<EntityKey>,
    constructed: BTreeSet<EntityKey>,
}

impl ResolutionState {
    #[must_use]
    pub fn is_under_construction(&self, name: &str) -> bool {
        self.under_construction.contains(name)
    }

    #[must_use]
    pub fn is_constructed(&self, name: &str) -> bool {
        self.constructed.contains(name)
    }

    pub fn constructed(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.constructed.iter().copied()
    }
}

///
/// MetadataRegistry
///
/// Owns every resolved record for its lifetime. Records are boxed, so a
/// reference handed out for an entity always points at the same record.
///

#[derive(Debug, Default)]
pub struct MetadataRegistry {
    config: RegistryConfig,
    descriptors: HashMap<&'static str, &'static EntityDescriptor>,
    enumerations: BTreeSet<&'static str>,
    slots: Vec<Box<EntityMetadata>>,
    index: HashMap<EntityKey, usize>,
    state: ResolutionState,
}

impl MetadataRegistry {
    /// Create an empty registry with default naming conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &ResolutionState {
        &self.state
    }

    ///
    /// REGISTRATION
    ///

    /// Make an entity type resolvable as a relationship target.
    /// Registering the same descriptor twice is a no-op.
    pub fn register(&mut self, descriptor: &'static EntityDescriptor) -> Result<(), SchemaError> {
        let name = descriptor.class_name;

        match self.descriptors.get(name) {
            Some(existing) if *existing != descriptor => Err(SchemaError::duplicate(
                name,
                "a different entity descriptor is already registered under this name",
            )),
            Some(_) => Ok(()),
            None => {
                trace!(entity = name, "registered entity descriptor");
                self.descriptors.insert(name, descriptor);
                Ok(())
            }
        }
    }

    pub fn register_entity<T: OrmEntity>(&mut self) -> Result<(), SchemaError> {
        self.register(T::DESCRIPTOR)
    }

    /// Make an enumeration type usable as a property type.
    pub fn register_enum(&mut self, name: &'static str) {
        self.enumerations.insert(name);
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    ///
    /// RESOLUTION
    ///

    /// Resolve (or return the cached) metadata for an entity type.
    ///
    /// On failure every record created by this call is discarded, so no
    /// partially built record is ever observable. A descriptor registered
    /// implicitly by the failed call is unregistered again.
    pub fn resolve(
        &mut self,
        descriptor: &'static EntityDescriptor,
    ) -> Result<&EntityMetadata, SchemaError> {
        let newly_registered = !self.is_registered(descriptor.class_name);
        self.register(descriptor)?;

        let checkpoint = self.slots.len();
        match self.resolve_descriptor(descriptor) {
            Ok(slot) => Ok(&*self.slots[slot]),
            Err(err) => {
                self.rollback(checkpoint);
                // an implicit registration does not outlive a failed resolve
                if newly_registered {
                    self.descriptors.remove(descriptor.class_name);
                }
                debug!(
                    entity = descriptor.class_name,
                    error = %err,
                    "entity resolution failed; discarded partial records"
                );

                Err(err)
            }
        }
    }

    pub fn resolve_entity<T: OrmEntity>(&mut self) -> Result<&EntityMetadata, SchemaError> {
        self.resolve(T::DESCRIPTOR)
    }

    /// Resolve a previously registered entity by class name.
    pub fn resolve_name(&mut self, name: &str) -> Result<&EntityMetadata, SchemaError> {
        let descriptor = self.descriptors.get(name).copied().ok_or_else(|| {
            SchemaError::new(
                SchemaErrorClass::TypeResolution,
                name,
                "entity type is not registered",
            )
            .with_hint("register the entity type with MetadataRegistry::register")
        })?;

        self.resolve(descriptor)
    }

    // Build one entity (recursing into relationship targets). Returns the
    // slot holding its record, which is the placeholder when the entity is
    // still under construction further up the stack.
    fn resolve_descriptor(
        &mut self,
        descriptor: &'static EntityDescriptor,
    ) -> Result<usize, SchemaError> {
        let key = EntityKey::new(descriptor.class_name);
        if let Some(&slot) = self.index.get(&key) {
            return Ok(slot);
        }

        debug!(entity = %key, "resolving entity metadata");

        // Phase 1: cache a placeholder before anything can recurse back here.
        let slot = self.slots.len();
        self.state.under_construction.insert(key);
        self.index.insert(key, slot);
        self.slots.push(Box::new(EntityMetadata::placeholder(key)));

        // Phase 2: shape checks and declarations.
        validate::validate_constructor(descriptor)?;

        if let Some(declaration) = class_declaration(descriptor)? {
            self.slots[slot].apply_class_declaration(declaration);
        }
        let mut declarations = property_declarations(descriptor)?;

        // Phase 3: property mappings, in declaration order.
        for property in descriptor
            .properties
            .iter()
            .filter(|property| property.origin == PropertyOrigin::Entity)
        {
            let declaration = declarations.remove(property.name).unwrap_or_default();
            let mapping = self.build_mapping(key, property, declaration)?;

            trace!(entity = %key, mapping = %mapping, "mapped property");
            self.slots[slot].push_mapping(mapping)?;
        }

        self.state.under_construction.remove(&key);
        self.state.constructed.insert(key);

        // Phase 4: the outermost call checks the whole constructed graph.
        if self.state.under_construction.is_empty() {
            validate::validate_cross_references(self)?;
        }

        debug!(entity = %key, table = self.slots[slot].table_name(), "resolved entity metadata");

        Ok(slot)
    }

    // Drop every record created since `checkpoint` and reset construction state.
    fn rollback(&mut self, checkpoint: usize) {
        for record in self.slots.drain(checkpoint..) {
            let key = record.key();
            self.index.remove(&key);
            self.state.constructed.remove(&key);
        }
        self.state.under_construction.clear();
    }

    ///
    /// LOOKUP
    ///

    /// Cached record for a class name, if it has been resolved.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityMetadata> {
        self.index.get(name).map(|&slot| &*self.slots[slot])
    }

    /// Record a relationship mapping points at.
    #[must_use]
    pub fn referenced(&self, mapping: &PropertyMapping) -> Option<&EntityMetadata> {
        mapping
            .referenced_entity()
            .and_then(|key| self.get(key.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolved records in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityMetadata> {
        self.slots.iter().map(Box::as_ref)
    }

    fn descriptor(&self, name: &str) -> Option<&'static EntityDescriptor> {
        self.descriptors.get(name).copied()
    }

    const fn enumerations(&self) -> &BTreeSet<&'static str> {
        &self.enumerations
    }
}

// At most one class-level declaration per entity.
fn class_declaration(
    descriptor: &EntityDescriptor,
) -> Result<Option<UserDeclaration>, SchemaError> {
    let entity = descriptor.class_name;

    match descriptor.class_declarations {
        [] => Ok(None),
        [source] => parse_class_declaration(entity, source).map(Some),
        _ => Err(SchemaError::duplicate(
            entity,
            "entity has more than one class declaration",
        )),
    }
}

// Parse property declarations keyed by property name, rejecting duplicates
// and declarations for properties the entity does not have.
fn property_declarations(
    descriptor: &EntityDescriptor,
) -> Result<HashMap<String, UserDeclaration>, SchemaError> {
    let entity = descriptor.class_name;
    let mut declarations = HashMap::new();

    for source in descriptor.property_declarations {
        let declaration = parse_property_declaration(entity, source)?;
        let property = declaration.property_name().unwrap_or_default().to_string();

        if descriptor.property(&property).is_none() {
            return Err(SchemaError::property(
                SchemaErrorClass::MissingDeclaration,
                entity,
                &property,
                "declaration has no corresponding property",
            ));
        }

        if declarations.contains_key(&property) {
            return Err(SchemaError::duplicate(
                entity,
                "property has more than one declaration",
            )
            .at_property(&property));
        }

        declarations.insert(property, declaration);
    }

    Ok(declarations)
}
