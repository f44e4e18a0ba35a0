//! Type Expressions
//!
//! A resolved field type is a small tree, not a string: scalars, enum and
//! model references, foundation vocabulary references, lists and tagged
//! unions. Nullability is tracked per node so that list wrapping can drop it
//! structurally instead of trimming a trailing `?`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::TargetProfile;
use super::csharp;

// =============================================================================
// Scalar Kinds
// =============================================================================

/// Built-in scalar types, keyed by schema short name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Boolean,
    DateTime,
    Time,
    Integer,
    Float,
    Number,
    Date,
    Text,
    Duration,
    Url,
    Property,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 11] = [
        Self::Boolean,
        Self::DateTime,
        Self::Time,
        Self::Integer,
        Self::Float,
        Self::Number,
        Self::Date,
        Self::Text,
        Self::Duration,
        Self::Url,
        Self::Property,
    ];

    /// Look up a scalar by its schema short name
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.short_name() == name)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::Text => "Text",
            Self::Duration => "Duration",
            Self::Url => "URL",
            Self::Property => "Property",
        }
    }

    /// .NET type name, without nullability
    pub fn clr_name(self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::DateTime | Self::Time => "DateTimeOffset",
            Self::Integer => "int",
            Self::Float | Self::Number => "decimal",
            // TODO: map Date to a date-only type once the foundation library has one
            Self::Date | Self::Text => "string",
            Self::Duration => "TimeSpan",
            Self::Url | Self::Property => "Uri",
        }
    }

    /// Value types are emitted nullable; reference types are not
    pub fn is_value_type(self) -> bool {
        !matches!(self, Self::Date | Self::Text | Self::Url | Self::Property)
    }
}

// =============================================================================
// Type Expression
// =============================================================================

/// A resolved, target-ready type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Scalar {
        scalar: ScalarKind,
        nullable: bool,
    },
    /// Enumeration, local or from the foundation library
    Enum {
        name: String,
        foundation: bool,
        nullable: bool,
    },
    /// Locally generated class
    Model { name: String },
    /// Type from the foundation library.
    ///
    /// `assumed` marks references taken on trust from an extension field
    /// that the vocabulary could not confirm.
    Foundation {
        name: String,
        nullable: bool,
        assumed: bool,
    },
    List { item: Box<TypeExpr> },
    Union { members: Vec<TypeExpr> },
}

impl TypeExpr {
    /// The fixed mapping for a built-in scalar
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar {
            scalar: kind,
            nullable: kind.is_value_type(),
        }
    }

    /// List of `item`, with the item's nullability removed
    pub fn list_of(item: TypeExpr) -> Self {
        Self::List {
            item: Box::new(item.without_nullable()),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Scalar { nullable, .. }
            | Self::Enum { nullable, .. }
            | Self::Foundation { nullable, .. } => *nullable,
            Self::Model { .. } | Self::List { .. } | Self::Union { .. } => false,
        }
    }

    /// Same type with any nullability marker removed
    pub fn without_nullable(self) -> Self {
        match self {
            Self::Scalar { scalar, .. } => Self::Scalar {
                scalar,
                nullable: false,
            },
            Self::Enum {
                name, foundation, ..
            } => Self::Enum {
                name,
                foundation,
                nullable: false,
            },
            Self::Foundation { name, assumed, .. } => Self::Foundation {
                name,
                nullable: false,
                assumed,
            },
            other => other,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union { .. })
    }

    /// Whether this is exactly the given scalar, nullable
    pub fn is_nullable_scalar(&self, kind: ScalarKind) -> bool {
        matches!(self, Self::Scalar { scalar, nullable: true } if *scalar == kind)
    }

    /// Foundation names taken on trust anywhere in this expression
    pub fn assumed_references(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_assumed(&mut found);
        found
    }

    fn collect_assumed<'a>(&'a self, found: &mut Vec<&'a str>) {
        match self {
            Self::Foundation {
                name,
                assumed: true,
                ..
            } => found.push(name),
            Self::List { item } => item.collect_assumed(found),
            Self::Union { members } => {
                for member in members {
                    member.collect_assumed(found);
                }
            }
            _ => {}
        }
    }

    /// Render with a specific profile
    pub fn render(&self, profile: &TargetProfile) -> String {
        csharp::render_type(self, profile)
    }
}

/// Renders with the default .NET profile
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TargetProfile::default()))
    }
}
