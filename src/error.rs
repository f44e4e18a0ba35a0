//! Error types for class compilation

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loading and compilation
pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a single resolver step.
///
/// These carry only what the failing step knows. The model compiler wraps
/// them into a [`CompileError`] that names the offending model and field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unrecognised type or enum referenced: {short_name}, {compact_key}")]
    UnresolvedType {
        short_name: String,
        compact_key: String,
    },

    #[error("No type found for field: {field}")]
    EmptyUnion { field: String },

    #[error("No base class specified for: {model}")]
    MissingBaseClass { model: String },

    #[error("Order {order} of extension field {field} leaves no room for the extension offset")]
    OrderOverflow { field: String, order: u32 },
}

/// A resolver failure scoped to the model (and field) it occurred in
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("{model}.{field}: {source}")]
    Field {
        model: String,
        field: String,
        #[source]
        source: ResolveError,
    },

    #[error("{model}: {source}")]
    Model {
        model: String,
        #[source]
        source: ResolveError,
    },
}

impl CompileError {
    /// Type identifier of the model that failed
    pub fn model(&self) -> &str {
        match self {
            Self::Field { model, .. } | Self::Model { model, .. } => model,
        }
    }

    /// Raw name of the field that failed, if the failure was field-scoped
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field { field, .. } => Some(field),
            Self::Model { .. } => None,
        }
    }

    /// The underlying resolver failure
    pub fn cause(&self) -> &ResolveError {
        match self {
            Self::Field { source, .. } | Self::Model { source, .. } => source,
        }
    }
}

/// Crate-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Invalid schema file {}: {source}", path.display())]
    InvalidSchema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
