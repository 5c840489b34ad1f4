//! User declarations: the keyword-encoded hints attached to an entity and
//! its properties, and the parser that turns them into typed maps.

mod parse;

pub use parse::{parse_class_declaration, parse_property_declaration};

use derive_more::{Deref, Display, IntoIterator};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Keyword
///

#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Keyword {
    #[display("TABLE")]
    Table,
    #[display("SCHEMA")]
    Schema,
    #[display("PROPERTY")]
    Property,
    #[display("COLUMN")]
    Column,
    #[display("IDENTITY")]
    Identity,
    #[display("TRANSIENT")]
    Transient,
    #[display("AUTOGENERATED")]
    Autogenerated,
}

impl Keyword {
    /// Keywords recognized in a class-level declaration.
    pub const CLASS: &'static [Self] = &[Self::Table, Self::Schema];

    /// Keywords recognized in a property-level declaration.
    pub const PROPERTY: &'static [Self] = &[
        Self::Column,
        Self::Identity,
        Self::Transient,
        Self::Autogenerated,
    ];

    /// Source token as it appears in declaration text.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Schema => "SCHEMA",
            Self::Property => "PROPERTY",
            Self::Column => "COLUMN",
            Self::Identity => "IDENTITY",
            Self::Transient => "TRANSIENT",
            Self::Autogenerated => "AUTOGENERATED",
        }
    }

    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Identity | Self::Transient | Self::Autogenerated)
    }
}

///
/// DeclarationValue
///

#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeclarationValue {
    Text(String),
    Flag(bool),
}

impl DeclarationValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Text(_) => None,
        }
    }
}

///
/// UserDeclaration
///
/// Parsed keyword/value map for one class or property declaration.
/// Kept verbatim inside the resulting metadata for external layers.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
pub struct UserDeclaration(BTreeMap<Keyword, DeclarationValue>);

impl UserDeclaration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; returns the previous value for the keyword, if any.
    pub fn insert(
        &mut self,
        keyword: Keyword,
        value: DeclarationValue,
    ) -> Option<DeclarationValue> {
        self.0.insert(keyword, value)
    }

    #[must_use]
    pub fn text(&self, keyword: Keyword) -> Option<&str> {
        self.0.get(&keyword).and_then(DeclarationValue::as_text)
    }

    #[must_use]
    pub fn flag(&self, keyword: Keyword) -> Option<bool> {
        self.0.get(&keyword).and_then(DeclarationValue::as_flag)
    }

    /// Declared property name (property-level declarations only).
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        self.text(Keyword::Property)
    }
}
