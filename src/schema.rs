//! Schema types consumed by the compiler
//!
//! These mirror the JSON data model files: one [`Model`] or [`EnumDef`] per
//! file, with camelCase keys. Nothing in this crate mutates them after load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire prefix marking an array-valued type reference
pub const ARRAY_PREFIX: &str = "ArrayOf#";

/// A fully-qualified type identifier plus an array flag.
///
/// Serialized as a single string, with arrays written as
/// `ArrayOf#https://schema.org/Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeReference {
    iri: String,
    array: bool,
}

impl TypeReference {
    /// Reference from its wire form; an `ArrayOf#` prefix marks an array
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match raw.strip_prefix(ARRAY_PREFIX) {
            Some(inner) => Self::array_of(inner),
            None => Self {
                iri: raw,
                array: false,
            },
        }
    }

    pub fn array_of(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            array: true,
        }
    }

    /// Parse the wire form, stripping the array prefix if present
    pub fn parse(raw: &str) -> Self {
        Self::new(raw)
    }

    /// The identifier without any array marker
    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn is_array(&self) -> bool {
        self.array
    }
}

impl From<String> for TypeReference {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<TypeReference> for String {
    fn from(reference: TypeReference) -> Self {
        reference.to_string()
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "{}{}", ARRAY_PREFIX, self.iri)
        } else {
            write!(f, "{}", self.iri)
        }
    }
}

/// Documentation carried through compilation untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// A single field of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Raw field name as written in the schema
    pub field_name: String,

    /// Serialized name, when it differs from `field_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,

    /// Declared order, unique within the model
    #[serde(default)]
    pub order: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_type: Option<TypeReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_types: Vec<TypeReference>,

    /// Reference to another model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<TypeReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_models: Vec<TypeReference>,

    /// Set when the field comes from a vocabulary extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_prefix: Option<String>,

    /// Disinherited from the parent type
    #[serde(default)]
    pub obsolete: bool,

    #[serde(default, rename = "override")]
    pub is_override: bool,

    /// Replaces a member of the foundation vocabulary
    #[serde(default)]
    pub derived_from_schema: bool,

    #[serde(flatten)]
    pub docs: Documentation,
}

impl Field {
    pub fn new(field_name: impl Into<String>, order: u32) -> Self {
        Self {
            field_name: field_name.into(),
            order,
            ..Self::default()
        }
    }

    pub fn is_extension_sourced(&self) -> bool {
        self.extension_prefix.is_some()
    }

    /// The name this field is serialized under
    pub fn wire_name(&self) -> &str {
        self.member_name.as_deref().unwrap_or(&self.field_name)
    }
}

/// A class-like record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Type identifier, e.g. `SessionSeries` or `https://openactive.io/SessionSeries`
    #[serde(rename = "type")]
    pub type_id: String,

    /// Explicit parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_class_of: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(flatten)]
    pub docs: Documentation,
}

/// An enumeration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    #[serde(rename = "type")]
    pub type_id: String,

    /// Namespace IRI the enumeration is defined in
    pub namespace: String,

    #[serde(default)]
    pub values: Vec<String>,

    #[serde(flatten)]
    pub docs: Documentation,
}

/// Everything loaded for one compilation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub models: Vec<Model>,
    pub enums: Vec<EnumDef>,
}
