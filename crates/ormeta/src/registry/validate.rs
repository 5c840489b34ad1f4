use crate::{
    error::{SchemaError, SchemaErrorClass},
    introspect::{ConstructorDescriptor, EntityDescriptor},
    registry::MetadataRegistry,
};

/// Ensure the mapping layer can instantiate the entity: at least one
/// constructor, and every constructor public with no argument or only the
/// optional parent handle.
pub(super) fn validate_constructor(descriptor: &EntityDescriptor) -> Result<(), SchemaError> {
    let usable = !descriptor.constructors.is_empty()
        && descriptor
            .constructors
            .iter()
            .all(ConstructorDescriptor::is_usable);

    if usable {
        return Ok(());
    }

    Err(SchemaError::new(
        SchemaErrorClass::Constructor,
        descriptor.class_name,
        "entity requires a public constructor taking no arguments or only an optional parent",
    )
    .with_hint(format!(
        "declare ConstructorDescriptor::DEFAULT or ConstructorDescriptor::WITH_PARENT for {}",
        descriptor.class_name
    )))
}

/// Check relationship integrity across every constructed entity.
///
/// * inverse (transient) side: the target must reference the owner back;
/// * owning (many-to-one) side: the target must have an identity.
pub(super) fn validate_cross_references(registry: &MetadataRegistry) -> Result<(), SchemaError> {
    for key in registry.state.constructed() {
        let Some(entity) = registry.get(key.as_str()) else {
            continue;
        };

        for mapping in entity.property_mappings() {
            let Some(target) = registry.referenced(mapping) else {
                continue;
            };
            let property = mapping.class_property_name();

            if mapping.is_transient() {
                if target.references_to(key).next().is_none() {
                    return Err(SchemaError::relation(
                        key.as_str(),
                        property,
                        format!(
                            "entity {} referenced in {key}::{property} must have a back-reference to {key}",
                            target.class_name()
                        ),
                    )
                    .with_hint(format!(
                        "declare a property of type Reference(\"{key}\") in {}",
                        target.class_name()
                    )));
                }
            } else if target.identity_mapping().is_none() {
                return Err(SchemaError::relation(
                    key.as_str(),
                    property,
                    format!(
                        "entity {} referenced in {key}::{property} must have an identity property",
                        target.class_name()
                    ),
                )
                .with_hint(format!(
                    "name a property '{}' or declare one IDENTITY in {}",
                    registry.config().identity_property,
                    target.class_name()
                )));
            }
        }
    }

    Ok(())
}
