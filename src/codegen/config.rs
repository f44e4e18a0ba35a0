//! Target Profile
//!
//! Names used when resolved models are rendered as C#. Resolution itself is
//! profile-free: type expressions, base classes and converter hints are
//! structured values, and only the renderer turns them into text.

use serde::{Deserialize, Serialize};

/// .NET naming for the generated library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetProfile {
    /// Namespace generated classes are placed in
    pub namespace: String,

    /// Namespace of the foundation vocabulary class library
    pub foundation_namespace: String,

    /// Root object of the foundation library, used when a model has no foundation parent
    pub root_object: String,

    /// Generic list container
    pub list_container: String,

    /// Generic "exactly one of N" container
    pub union_container: String,

    /// Message on disinherited members
    pub obsolete_message: String,

    pub converters: ConverterNames,
}

/// JSON converter classes attached by converter hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterNames {
    pub duration: String,
    pub time: String,
    pub tagged_union: String,
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self {
            namespace: "OpenActive.NET".to_string(),
            foundation_namespace: "Schema.NET".to_string(),
            root_object: "JsonLdObject".to_string(),
            list_container: "List".to_string(),
            union_container: "SingleValues".to_string(),
            obsolete_message: "This property is disinherited in this type, and must not be used."
                .to_string(),
            converters: ConverterNames::default(),
        }
    }
}

impl Default for ConverterNames {
    fn default() -> Self {
        Self {
            duration: "OpenActiveTimeSpanToISO8601DurationValuesConverter".to_string(),
            time: "OpenActiveDateTimeOffsetToISO8601TimeValuesConverter".to_string(),
            tagged_union: "ValuesConverter".to_string(),
        }
    }
}

impl TargetProfile {
    /// Qualify a name with the foundation namespace
    pub fn foundation(&self, name: &str) -> String {
        format!("{}.{}", self.foundation_namespace, name)
    }
}
