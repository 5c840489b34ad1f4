use crate::{
    declaration::{Keyword, UserDeclaration},
    error::SchemaError,
    model::{EntityKey, mapping::PropertyMapping},
};
use serde::Serialize;
use std::{collections::HashMap, fmt};

///
/// EntityMetadata
///
/// Resolved mapping of one entity type onto its table. Mappings keep the
/// declaration order of the entity's properties.
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityMetadata {
    key: EntityKey,
    table_name: String,
    property_mappings: Vec<PropertyMapping>,

    #[serde(skip)]
    class_property_index: HashMap<&'static str, usize>,

    #[serde(skip)]
    table_field_index: HashMap<String, usize>,

    identity_index: Option<usize>,
    user_declaration: UserDeclaration,
}

impl EntityMetadata {
    /// Record inserted before an entity's properties are resolved. Its table
    /// name defaults to the class name until a declaration says otherwise.
    pub(crate) fn placeholder(key: EntityKey) -> Self {
        Self {
            key,
            table_name: key.as_str().to_string(),
            property_mappings: Vec::new(),
            class_property_index: HashMap::new(),
            table_field_index: HashMap::new(),
            identity_index: None,
            user_declaration: UserDeclaration::new(),
        }
    }

    pub(crate) fn apply_class_declaration(&mut self, declaration: UserDeclaration) {
        if let Some(table) = declaration.text(Keyword::Table) {
            self.table_name = table.to_string();
        }
        self.user_declaration = declaration;
    }

    /// Append a mapping and index it.
    pub(crate) fn push_mapping(&mut self, mapping: PropertyMapping) -> Result<(), SchemaError> {
        let entity = self.key.as_str();
        let property = mapping.class_property_name();

        if self.class_property_index.contains_key(property) {
            return Err(SchemaError::duplicate(
                entity,
                format!("property '{property}' is mapped more than once"),
            ));
        }

        if let Some(&existing) = self.table_field_index.get(mapping.table_field_name()) {
            return Err(SchemaError::duplicate(
                entity,
                format!(
                    "table field '{}' is mapped by both '{}' and '{property}'",
                    mapping.table_field_name(),
                    self.property_mappings[existing].class_property_name(),
                ),
            ));
        }

        if mapping.is_identity()
            && let Some(existing) = self.identity_mapping()
        {
            return Err(SchemaError::duplicate(
                entity,
                format!(
                    "'{property}' cannot be an identity: '{}' already is",
                    existing.class_property_name()
                ),
            ));
        }

        let idx = self.property_mappings.len();

        self.class_property_index.insert(property, idx);
        // inverse relationship sides have no table field of their own
        if !mapping.table_field_name().is_empty() {
            self.table_field_index
                .insert(mapping.table_field_name().to_string(), idx);
        }
        if mapping.is_identity() {
            self.identity_index = Some(idx);
        }

        self.property_mappings.push(mapping);

        Ok(())
    }

    #[must_use]
    pub const fn key(&self) -> EntityKey {
        self.key
    }

    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.key.as_str()
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Schema mode from the class declaration, if any.
    #[must_use]
    pub fn schema_mode(&self) -> Option<&str> {
        self.user_declaration.text(Keyword::Schema)
    }

    #[must_use]
    pub const fn user_declaration(&self) -> &UserDeclaration {
        &self.user_declaration
    }

    #[must_use]
    pub fn property_mappings(&self) -> &[PropertyMapping] {
        &self.property_mappings
    }

    #[must_use]
    pub fn class_property_mapping(&self, property: &str) -> Option<&PropertyMapping> {
        self.class_property_index
            .get(property)
            .map(|&idx| &self.property_mappings[idx])
    }

    #[must_use]
    pub fn table_field_mapping(&self, field: &str) -> Option<&PropertyMapping> {
        self.table_field_index
            .get(field)
            .map(|&idx| &self.property_mappings[idx])
    }

    #[must_use]
    pub fn identity_mapping(&self) -> Option<&PropertyMapping> {
        self.identity_index.map(|idx| &self.property_mappings[idx])
    }

    /// Relationship mappings pointing at `target`.
    pub fn references_to(&self, target: EntityKey) -> impl Iterator<Item = &PropertyMapping> {
        self.property_mappings
            .iter()
            .filter(move |mapping| mapping.referenced_entity() == Some(target))
    }
}

impl fmt::Display for EntityMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityMetadata({} => {})", self.key, self.table_name)
    }
}

///
/// TESTS
///
