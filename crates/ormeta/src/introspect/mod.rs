//! Introspection surface.
//!
//! Each entity type supplies a static [`EntityDescriptor`] describing its
//! declarations, properties and constructors. The registry consumes these
//! tables instead of reflecting over live types.

mod property;

pub use property::{PropertyDescriptor, PropertyOrigin, PropertyType};

use serde::Serialize;

///
/// OrmEntity
///
/// Binds a Rust type to its static descriptor.
///

pub trait OrmEntity {
    const DESCRIPTOR: &'static EntityDescriptor;
}

///
/// EntityDescriptor
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct EntityDescriptor {
    /// Class name; doubles as the stable entity key.
    pub class_name: &'static str,

    /// Class-level declarations (`TABLE <name> [SCHEMA <mode>]`); at most one.
    pub class_declarations: &'static [&'static str],

    pub property_declarations: &'static [&'static str],
    pub properties: &'static [PropertyDescriptor],
    pub constructors: &'static [ConstructorDescriptor],
}

impl EntityDescriptor {
    /// Descriptor with no declarations, no properties and a public default
    /// constructor.
    #[must_use]
    pub const fn new(class_name: &'static str) -> Self {
        Self {
            class_name,
            class_declarations: &[],
            property_declarations: &[],
            properties: &[],
            constructors: &[ConstructorDescriptor::DEFAULT],
        }
    }

    #[must_use]
    pub const fn class_declarations(mut self, declarations: &'static [&'static str]) -> Self {
        self.class_declarations = declarations;
        self
    }

    #[must_use]
    pub const fn property_declarations(mut self, declarations: &'static [&'static str]) -> Self {
        self.property_declarations = declarations;
        self
    }

    #[must_use]
    pub const fn properties(mut self, properties: &'static [PropertyDescriptor]) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub const fn constructors(mut self, constructors: &'static [ConstructorDescriptor]) -> Self {
        self.constructors = constructors;
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}

///
/// ConstructorDescriptor
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ConstructorDescriptor {
    pub visibility: Visibility,
    pub parameters: &'static [ConstructorParameter],
}

impl ConstructorDescriptor {
    /// `pub fn new() -> Self`
    pub const DEFAULT: Self = Self {
        visibility: Visibility::Public,
        parameters: &[],
    };

    /// `pub fn new(parent: Option<Parent>) -> Self`
    pub const WITH_PARENT: Self = Self {
        visibility: Visibility::Public,
        parameters: &[ConstructorParameter::Parent],
    };

    /// Whether the mapping layer can invoke this constructor.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.visibility == Visibility::Public
            && matches!(self.parameters, [] | [ConstructorParameter::Parent])
    }
}

///
/// Visibility
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Visibility {
    Public,
    Restricted,
}

///
/// ConstructorParameter
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ConstructorParameter {
    /// Optional owning parent object handle.
    Parent,

    /// Any other argument, by type name.
    Value(&'static str),
}
