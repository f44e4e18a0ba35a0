//! .NET Class Generator
//!
//! Compiles JSON data model definitions into strongly-typed C# class
//! definitions that extend a foundation vocabulary library (Schema.NET).
//!
//! ## Pipeline
//!
//! ```text
//! data-models/{models,enums}/*.json
//!        │  loader
//!        ▼
//!     Schema ──► LookupTables (enums by compact key, models by short name)
//!        │
//!        ▼  Compiler (one model at a time, in parallel)
//!   type resolver → union composer → property compiler → model compiler
//!        │
//!        ▼
//!   ResolvedModel ──► JSON report / C# source
//! ```
//!
//! Every model compiles independently: an unresolvable type or a missing
//! base class fails only the model it appears in.

pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod schema;
pub mod vocabulary;

pub use codegen::{CompilationReport, CompileContext, Compiler, ResolvedField, ResolvedModel, TypeExpr};
pub use config::ClassgenConfig;
pub use diagnostics::{DiagnosticCode, DiagnosticItem, Diagnostics, Severity};
pub use error::{CompileError, Error, ResolveError, Result};
pub use schema::{EnumDef, Field, Model, Schema, TypeReference};
pub use vocabulary::Vocabulary;
