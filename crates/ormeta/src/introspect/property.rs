use crate::types::{Container, DataType};
use serde::Serialize;
use std::fmt;

///
/// PropertyDescriptor
///
/// One introspectable property: declared type plus the accessor and
/// storage capabilities the mapping layer relies on.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub ty: PropertyType,
    pub readable: bool,
    pub writable: bool,
    pub notifiable: bool,
    pub stored: bool,
    pub origin: PropertyOrigin,
}

impl PropertyDescriptor {
    /// Fully wired, stored property declared by the entity itself.
    #[must_use]
    pub const fn new(name: &'static str, ty: PropertyType) -> Self {
        Self {
            name,
            ty,
            readable: true,
            writable: true,
            notifiable: true,
            stored: true,
            origin: PropertyOrigin::Entity,
        }
    }

    #[must_use]
    pub const fn scalar(name: &'static str, data_type: DataType) -> Self {
        Self::new(name, PropertyType::Scalar(data_type))
    }

    #[must_use]
    pub const fn reference(name: &'static str, target: &'static str) -> Self {
        Self::new(name, PropertyType::Reference(target))
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    #[must_use]
    pub const fn without_notify(mut self) -> Self {
        self.notifiable = false;
        self
    }

    #[must_use]
    pub const fn not_stored(mut self) -> Self {
        self.stored = false;
        self
    }

    /// Mark as boilerplate inherited from the base object type.
    #[must_use]
    pub const fn inherited(mut self) -> Self {
        self.origin = PropertyOrigin::Base;
        self
    }

    #[must_use]
    pub const fn is_fully_wired(&self) -> bool {
        self.readable && self.writable && self.notifiable
    }
}

///
/// PropertyOrigin
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum PropertyOrigin {
    #[default]
    Entity,

    /// Declared by the shared base object; never mapped.
    Base,
}

///
/// PropertyType
///
/// Declared type of a property as seen by relationship inference.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum PropertyType {
    Scalar(DataType),

    /// Registered enumeration, by name.
    Enumeration(&'static str),

    /// Direct reference to another entity type, by class name.
    Reference(&'static str),

    /// Multi-value container of an element type.
    Collection(Container, &'static PropertyType),

    /// Named alias the engine cannot see through.
    Alias(&'static str),

    /// Type the host never registered.
    Unregistered(&'static str),
}

impl PropertyType {
    /// Element type for collections, `self` otherwise.
    #[must_use]
    pub const fn element(&self) -> &Self {
        match self {
            Self::Collection(_, element) => *element,
            _ => self,
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(..))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(data_type) => write!(f, "{data_type}"),
            Self::Enumeration(name)
            | Self::Reference(name)
            | Self::Alias(name)
            | Self::Unregistered(name) => f.write_str(name),
            Self::Collection(container, element) => write!(f, "{container}<{element}>"),
        }
    }
}
