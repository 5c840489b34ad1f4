//! Keyword scanner for class and property declarations.
//!
//! Declarations are compact keyword-encoded strings. Whitespace carries no
//! meaning and is removed first, so `TABLE Province SCHEMA update` is read as
//! `TABLEProvinceSCHEMAupdate`. A value runs from the end of its keyword to
//! the start of the next recognized keyword, or to the end of the string.

use crate::{
    declaration::{DeclarationValue, Keyword, UserDeclaration},
    error::{SchemaError, SchemaErrorClass},
};

///
/// KeywordPosition
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct KeywordPosition {
    pos: usize,
    keyword: Keyword,
}

impl KeywordPosition {
    // Offset of the first byte after the keyword token.
    const fn value_start(self) -> usize {
        self.pos + self.keyword.token().len()
    }
}

/// Parse a class-level declaration (`TABLE <name> [SCHEMA <mode>]`).
pub fn parse_class_declaration(entity: &str, source: &str) -> Result<UserDeclaration, SchemaError> {
    let data = normalize(source);
    let mut declaration = UserDeclaration::new();

    let mut next = find_next_keyword(&data, 0, Keyword::CLASS);
    if next.map(|position| position.pos) != Some(0) {
        return Err(unanchored_class_declaration(entity, &data));
    }

    while let Some(current) = next {
        let (value, following) = extract_text(&data, current.value_start(), Keyword::CLASS);
        if value.is_empty() {
            return Err(missing_argument(entity, current.keyword));
        }

        insert_unique(
            entity,
            &mut declaration,
            current.keyword,
            DeclarationValue::Text(value.to_string()),
        )?;
        next = following;
    }

    // SCHEMA may lead, but a class declaration always names its table.
    if declaration.text(Keyword::Table).is_none() {
        return Err(unanchored_class_declaration(entity, &data));
    }

    Ok(declaration)
}

/// Parse a property-level declaration
/// (`<name> [COLUMN <name>] [IDENTITY[true|false]] [TRANSIENT[...]] [AUTOGENERATED[...]]`).
///
/// Everything before the first keyword is the property name.
pub fn parse_property_declaration(
    entity: &str,
    source: &str,
) -> Result<UserDeclaration, SchemaError> {
    let data = normalize(source);

    let Some(first) = find_next_keyword(&data, 0, Keyword::PROPERTY) else {
        return Err(SchemaError::syntax(
            entity,
            format!("cannot find any keywords in property declaration '{data}'"),
        ));
    };

    let property = &data[..first.pos];
    if property.is_empty() {
        return Err(SchemaError::new(
            SchemaErrorClass::MissingDeclaration,
            entity,
            format!("property declaration '{data}' has an undefined property name"),
        ));
    }

    let mut declaration = UserDeclaration::new();
    declaration.insert(Keyword::Property, DeclarationValue::Text(property.to_string()));

    let mut next = Some(first);
    while let Some(current) = next {
        let (value, following) = extract_text(&data, current.value_start(), Keyword::PROPERTY);

        let value = if current.keyword.is_boolean() {
            DeclarationValue::Flag(parse_flag(value).ok_or_else(|| {
                SchemaError::syntax(
                    entity,
                    format!(
                        "unexpected value '{value}' after {} (expected 'true' or 'false')",
                        current.keyword
                    ),
                )
                .at_property(property)
            })?)
        } else if value.is_empty() {
            return Err(missing_argument(entity, current.keyword).at_property(property));
        } else {
            DeclarationValue::Text(value.to_string())
        };

        insert_unique(entity, &mut declaration, current.keyword, value)
            .map_err(|err| err.at_property(property))?;
        next = following;
    }

    Ok(declaration)
}

// Strip all whitespace; keywords and values never contain any.
fn normalize(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

// Locate the next keyword at or after `start`. Only upper-case characters can
// open a keyword; the first token in `keywords` matching there wins.
fn find_next_keyword(data: &str, start: usize, keywords: &[Keyword]) -> Option<KeywordPosition> {
    data[start..]
        .char_indices()
        .filter(|(_, c)| c.is_uppercase())
        .find_map(|(offset, _)| {
            let pos = start + offset;

            keywords
                .iter()
                .find(|keyword| data[pos..].starts_with(keyword.token()))
                .map(|&keyword| KeywordPosition { pos, keyword })
        })
}

// Read the raw value starting at `pos` up to the next keyword.
fn extract_text<'a>(
    data: &'a str,
    pos: usize,
    keywords: &[Keyword],
) -> (&'a str, Option<KeywordPosition>) {
    let next = find_next_keyword(data, pos, keywords);
    let end = next.map_or(data.len(), |position| position.pos);

    (&data[pos..end], next)
}

// Boolean keywords default to true when no literal follows.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "" | "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn insert_unique(
    entity: &str,
    declaration: &mut UserDeclaration,
    keyword: Keyword,
    value: DeclarationValue,
) -> Result<(), SchemaError> {
    if declaration.insert(keyword, value).is_some() {
        return Err(SchemaError::duplicate(
            entity,
            format!("{keyword} is declared more than once"),
        ));
    }

    Ok(())
}

fn unanchored_class_declaration(entity: &str, data: &str) -> SchemaError {
    SchemaError::syntax(
        entity,
        format!("class declaration '{data}' must begin with a keyword and declare TABLE <table name>"),
    )
}

fn missing_argument(entity: &str, keyword: Keyword) -> SchemaError {
    let argument = match keyword {
        Keyword::Table => "table name",
        Keyword::Schema => "schema mode",
        _ => "column name",
    };

    SchemaError::syntax(
        entity,
        format!("{keyword} <{argument}> requires a string argument"),
    )
}

///
/// TESTS
///
