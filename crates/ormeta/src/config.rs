///
/// RegistryConfig
///
/// Naming conventions applied when a property carries no overriding
/// declaration. The defaults are the conventions every entity relies on
/// unless the embedding application says otherwise.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    /// Property name implicitly treated as an autogenerated identity
    /// (compared case-insensitively).
    pub identity_property: &'static str,

    /// Suffix appended to the table field of a many-to-one reference.
    pub reference_suffix: &'static str,

    /// Lower-case property names when deriving table field names.
    pub lowercase_table_fields: bool,
}

impl RegistryConfig {
    pub const DEFAULT: Self = Self {
        identity_property: "id",
        reference_suffix: "_id",
        lowercase_table_fields: true,
    };

    /// Table field derived from a property name.
    #[must_use]
    pub fn default_table_field(&self, property: &str) -> String {
        if self.lowercase_table_fields {
            property.to_lowercase()
        } else {
            property.to_string()
        }
    }

    #[must_use]
    pub fn is_identity_property(&self, property: &str) -> bool {
        property.eq_ignore_ascii_case(self.identity_property)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
