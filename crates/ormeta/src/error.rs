use std::fmt;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Unrecoverable schema-definition error raised while resolving entity
/// metadata. The same input always fails the same way; callers decide
/// whether to surface or abort.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{}", render(.entity, .property, .message, .hint))]
pub struct SchemaError {
    pub class: SchemaErrorClass,
    pub entity: String,
    pub property: Option<String>,
    pub message: String,

    /// Optional remediation hint appended to the rendered message.
    pub hint: Option<String>,
}

impl SchemaError {
    /// Construct an entity-level error.
    pub fn new(
        class: SchemaErrorClass,
        entity: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            class,
            entity: entity.into(),
            property: None,
            message: message.into(),
            hint: None,
        }
    }

    /// Construct a property-level error.
    pub fn property(
        class: SchemaErrorClass,
        entity: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            property: Some(property.into()),
            ..Self::new(class, entity, message)
        }
    }

    /// Attach a remediation hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub(crate) fn syntax(entity: &str, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorClass::Syntax, entity, message)
    }

    pub(crate) fn duplicate(entity: &str, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorClass::DuplicateDeclaration, entity, message)
    }

    pub(crate) fn relation(entity: &str, property: &str, message: impl Into<String>) -> Self {
        Self::property(SchemaErrorClass::RelationIntegrity, entity, property, message)
    }

    pub(crate) fn type_resolution(
        entity: &str,
        property: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::property(SchemaErrorClass::TypeResolution, entity, property, message)
    }

    /// Attach a property name after the fact (parser errors are raised
    /// before the property is known to the caller).
    #[must_use]
    pub(crate) fn at_property(mut self, property: &str) -> Self {
        if self.property.is_none() && !property.is_empty() {
            self.property = Some(property.to_string());
        }
        self
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class)
    }
}

// Render `entity 'E'[, property 'P']: message[ (hint: ...)]`.
fn render(
    entity: &str,
    property: &Option<String>,
    message: &str,
    hint: &Option<String>,
) -> String {
    let mut out = match property {
        Some(property) => format!("entity '{entity}', property '{property}': {message}"),
        None => format!("entity '{entity}': {message}"),
    };

    if let Some(hint) = hint {
        out.push_str(" (hint: ");
        out.push_str(hint);
        out.push(')');
    }

    out
}

///
/// SchemaErrorClass
/// Taxonomy of schema-definition failures.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum SchemaErrorClass {
    Capability,
    ConflictingDeclaration,
    Constructor,
    DuplicateDeclaration,
    MissingDeclaration,
    RelationIntegrity,
    Syntax,
    TypeResolution,
}

impl fmt::Display for SchemaErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Capability => "capability",
            Self::ConflictingDeclaration => "conflicting_declaration",
            Self::Constructor => "constructor",
            Self::DuplicateDeclaration => "duplicate_declaration",
            Self::MissingDeclaration => "missing_declaration",
            Self::RelationIntegrity => "relation_integrity",
            Self::Syntax => "syntax",
            Self::TypeResolution => "type_resolution",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_entity_property_and_hint() {
        let err = SchemaError::type_resolution("Town", "province", "unregistered type Province")
            .with_hint("register the entity type");

        assert_eq!(
            err.to_string(),
            "entity 'Town', property 'province': unregistered type Province (hint: register the entity type)"
        );
        assert_eq!(
            err.display_with_class(),
            format!("type_resolution: {err}"),
            "class label should prefix the rendered message"
        );
    }

    #[test]
    fn at_property_does_not_override_existing_property() {
        let err = SchemaError::relation("A", "bs", "missing back-reference").at_property("other");
        assert_eq!(err.property.as_deref(), Some("bs"));

        let err = SchemaError::syntax("A", "bad").at_property("name");
        assert_eq!(err.property.as_deref(), Some("name"));
    }
}
