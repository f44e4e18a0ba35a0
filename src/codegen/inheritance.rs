//! Inheritance Resolver
//!
//! Every generated class has exactly one base. An explicit parent
//! (`subClassOf`) wins over a derived-from marker; a derived-from target
//! outside the foundation vocabulary falls back to the foundation root
//! object, since the local target is being replaced rather than extended.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::TargetProfile;
use super::names::to_pascal_case;
use crate::error::ResolveError;
use crate::vocabulary::{short_name, Vocabulary};

/// The resolved base class of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BaseClass {
    /// Class from the foundation library
    Foundation(String),
    /// Locally generated class
    Local(String),
    /// Root object of the foundation library
    FoundationRoot,
}

impl BaseClass {
    /// Whether the base contributes inherited members a field could shadow
    pub fn has_members(&self) -> bool {
        !matches!(self, Self::FoundationRoot)
    }

    pub fn render(&self, profile: &TargetProfile) -> String {
        match self {
            Self::Foundation(name) => profile.foundation(name),
            Self::Local(name) => name.clone(),
            Self::FoundationRoot => profile.foundation(&profile.root_object),
        }
    }
}

impl fmt::Display for BaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TargetProfile::default()))
    }
}

/// Pick the single base class for a model
pub fn resolve_base(
    explicit_parent: Option<&str>,
    derived_from: Option<&str>,
    model_type: &str,
    vocabulary: &Vocabulary,
) -> Result<BaseClass, ResolveError> {
    fn present(marker: Option<&str>) -> Option<&str> {
        marker.filter(|m| !m.is_empty())
    }

    if let Some(parent) = present(explicit_parent) {
        let name = to_pascal_case(short_name(parent));
        return Ok(if vocabulary.contains(parent) {
            BaseClass::Foundation(name)
        } else {
            BaseClass::Local(name)
        });
    }

    if let Some(derived) = present(derived_from) {
        return Ok(if vocabulary.contains(derived) {
            BaseClass::Foundation(to_pascal_case(short_name(derived)))
        } else {
            BaseClass::FoundationRoot
        });
    }

    Err(ResolveError::MissingBaseClass {
        model: model_type.to_string(),
    })
}
