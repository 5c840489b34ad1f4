use crate::{
    declaration::{Keyword, UserDeclaration},
    error::{SchemaError, SchemaErrorClass},
    introspect::{PropertyDescriptor, PropertyType},
    model::{EntityKey, mapping::PropertyMapping},
    registry::MetadataRegistry,
    types::DataType,
};

///
/// Relationship
/// Side of a relationship a property sits on, if any.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Relationship {
    None,

    /// Direct reference; the foreign key is stored on this entity.
    ManyToOne(&'static str),

    /// Collection of references; the foreign key lives on the target.
    OneToMany(&'static str),
}

impl MetadataRegistry {
    /// Build the mapping for one property, resolving relationship targets
    /// through the registry.
    pub(super) fn build_mapping(
        &mut self,
        entity: EntityKey,
        property: &'static PropertyDescriptor,
        declaration: UserDeclaration,
    ) -> Result<PropertyMapping, SchemaError> {
        let name = property.name;
        let column = declaration.text(Keyword::Column);

        // defaults, then explicit declarations
        let implicit_identity = self.config.is_identity_property(name);
        let mut table_field_name =
            column.map_or_else(|| self.config.default_table_field(name), str::to_string);
        let is_identity = declaration
            .flag(Keyword::Identity)
            .unwrap_or(implicit_identity);
        // `id IDENTITY false` also drops the implicit autogeneration
        let is_autogenerated = declaration
            .flag(Keyword::Autogenerated)
            .unwrap_or(implicit_identity && is_identity);
        let mut is_transient = declaration
            .flag(Keyword::Transient)
            .unwrap_or(!property.stored);

        let (data_type, is_enumeration, relationship) = self.classify(entity, property)?;

        let referenced_entity = match relationship {
            Relationship::None => None,
            Relationship::ManyToOne(target) => {
                is_transient = false;
                if column.is_none() {
                    table_field_name.push_str(self.config.reference_suffix);
                }

                Some(self.resolve_target(entity, name, target)?)
            }
            Relationship::OneToMany(target) => {
                is_transient = true;
                table_field_name.clear();

                Some(self.resolve_target(entity, name, target)?)
            }
        };

        let mapping = PropertyMapping {
            enclosing_entity: entity,
            class_property_name: name,
            table_field_name,
            data_type,
            property_type: property.ty,
            is_identity,
            is_autogenerated,
            is_transient,
            is_enumeration,
            referenced_entity,
            user_declaration: declaration,
        };
        validate_mapping(entity, property, &mapping)?;

        Ok(mapping)
    }

    // Derive the data type tag and relationship side from the declared type.
    fn classify(
        &self,
        entity: EntityKey,
        property: &PropertyDescriptor,
    ) -> Result<(DataType, bool, Relationship), SchemaError> {
        let entity = entity.as_str();
        let name = property.name;

        match property.ty {
            PropertyType::Scalar(data_type) => Ok((data_type, false, Relationship::None)),
            PropertyType::Enumeration(enumeration) => {
                self.require_enumeration(entity, name, enumeration)?;

                Ok((DataType::ENUMERATION, true, Relationship::None))
            }
            PropertyType::Reference(target) => {
                Ok((DataType::Reference, false, Relationship::ManyToOne(target)))
            }
            PropertyType::Collection(..) => match *property.ty.element() {
                PropertyType::Reference(target) => {
                    Ok((DataType::List, false, Relationship::OneToMany(target)))
                }
                PropertyType::Scalar(_) => Ok((DataType::List, false, Relationship::None)),
                PropertyType::Enumeration(enumeration) => {
                    self.require_enumeration(entity, name, enumeration)?;

                    Ok((DataType::List, false, Relationship::None))
                }
                PropertyType::Collection(..) | PropertyType::Alias(_) => {
                    Err(SchemaError::type_resolution(
                        entity,
                        name,
                        format!("cannot unwrap the element type of {}", property.ty),
                    )
                    .with_hint("nested containers and container aliases are not supported"))
                }
                PropertyType::Unregistered(type_name) => {
                    Err(unregistered_type(entity, name, type_name))
                }
            },
            PropertyType::Alias(alias) => Err(SchemaError::type_resolution(
                entity,
                name,
                format!("type alias {alias} cannot be unwrapped"),
            )
            .with_hint("declare the property with the aliased type itself")),
            PropertyType::Unregistered(type_name) => {
                Err(unregistered_type(entity, name, type_name))
            }
        }
    }

    // Resolve a relationship target, recursing into its construction.
    fn resolve_target(
        &mut self,
        entity: EntityKey,
        property: &str,
        target: &'static str,
    ) -> Result<EntityKey, SchemaError> {
        let descriptor = self
            .descriptor(target)
            .ok_or_else(|| unregistered_type(entity.as_str(), property, target))?;
        self.resolve_descriptor(descriptor)?;

        Ok(EntityKey::new(descriptor.class_name))
    }

    fn require_enumeration(
        &self,
        entity: &str,
        property: &str,
        enumeration: &str,
    ) -> Result<(), SchemaError> {
        if self.enumerations().contains(enumeration) {
            return Ok(());
        }

        Err(SchemaError::type_resolution(
            entity,
            property,
            format!("enumeration {enumeration} is not registered"),
        )
        .with_hint(format!(
            "register it with MetadataRegistry::register_enum(\"{enumeration}\")"
        )))
    }
}

// Per-property invariants that do not need other entities.
fn validate_mapping(
    entity: EntityKey,
    property: &PropertyDescriptor,
    mapping: &PropertyMapping,
) -> Result<(), SchemaError> {
    let entity = entity.as_str();
    let name = property.name;

    if !mapping.is_transient() && !property.is_fully_wired() {
        return Err(SchemaError::property(
            SchemaErrorClass::Capability,
            entity,
            name,
            "a persisted property must be readable, writable and notifiable",
        )
        .with_hint("add the missing accessors or declare the property TRANSIENT"));
    }

    if mapping.is_transient() && mapping.is_identity() {
        return Err(SchemaError::property(
            SchemaErrorClass::ConflictingDeclaration,
            entity,
            name,
            "a property cannot be TRANSIENT and IDENTITY at the same time",
        ));
    }

    if mapping.is_autogenerated() && !mapping.is_identity() {
        return Err(SchemaError::property(
            SchemaErrorClass::ConflictingDeclaration,
            entity,
            name,
            "a property cannot be AUTOGENERATED without IDENTITY",
        ));
    }

    Ok(())
}

fn unregistered_type(entity: &str, property: &str, type_name: &str) -> SchemaError {
    SchemaError::type_resolution(
        entity,
        property,
        format!("an unregistered type {type_name} is used"),
    )
    .with_hint(format!(
        "if {type_name} is an entity, register it with MetadataRegistry::register; \
         if it is an enumeration, register it with MetadataRegistry::register_enum; \
         container aliases are not supported"
    ))
}
