use crate::{
    declaration::UserDeclaration,
    introspect::PropertyType,
    model::EntityKey,
    types::DataType,
};
use serde::Serialize;
use std::fmt;

///
/// PropertyMapping
///
/// How one entity property maps onto a table field, plus the relationship
/// it participates in (if any). The referenced entity is held by key; look
/// it up through the registry.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyMapping {
    pub(crate) enclosing_entity: EntityKey,
    pub(crate) class_property_name: &'static str,
    pub(crate) table_field_name: String,
    pub(crate) data_type: DataType,
    pub(crate) property_type: PropertyType,
    pub(crate) is_identity: bool,
    pub(crate) is_autogenerated: bool,
    pub(crate) is_transient: bool,
    pub(crate) is_enumeration: bool,
    pub(crate) referenced_entity: Option<EntityKey>,
    pub(crate) user_declaration: UserDeclaration,
}

impl PropertyMapping {
    #[must_use]
    pub const fn enclosing_entity(&self) -> EntityKey {
        self.enclosing_entity
    }

    #[must_use]
    pub const fn class_property_name(&self) -> &'static str {
        self.class_property_name
    }

    /// Table field name; empty for the inverse side of a one-to-many
    /// relationship, whose foreign key lives on the other entity.
    #[must_use]
    pub fn table_field_name(&self) -> &str {
        &self.table_field_name
    }

    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Declared type name, e.g. `Vector<Town>`.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.property_type.to_string()
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.is_identity
    }

    #[must_use]
    pub const fn is_autogenerated(&self) -> bool {
        self.is_autogenerated
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.is_transient
    }

    #[must_use]
    pub const fn is_enumeration(&self) -> bool {
        self.is_enumeration
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.referenced_entity.is_some()
    }

    #[must_use]
    pub const fn referenced_entity(&self) -> Option<EntityKey> {
        self.referenced_entity
    }

    #[must_use]
    pub const fn user_declaration(&self) -> &UserDeclaration {
        &self.user_declaration
    }
}

impl fmt::Display for PropertyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PropertyMapping({} => {}, {}",
            self.class_property_name, self.table_field_name, self.data_type
        )?;

        if self.is_autogenerated {
            f.write_str(", autogenerated")?;
        }
        if self.is_identity {
            f.write_str(", identity")?;
        }
        if self.is_transient {
            f.write_str(", transient")?;
        }
        if let Some(target) = self.referenced_entity {
            write!(f, ", references {target}")?;
        }

        f.write_str(")")
    }
}
