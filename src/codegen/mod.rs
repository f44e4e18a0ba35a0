//! Class Compilation
//!
//! Resolves schema models into target-ready class definitions.
//!
//! Architecture:
//! - LookupTables: EnumMap/ModelMap, built once per run, immutable afterwards
//! - CompileContext: borrowed view of the tables and vocabulary handed to every resolver
//! - Resolvers: type → union → property → model, each a pure function
//! - Emitters: render ResolvedModels; they never read raw schema files
//!
//! Models compile independently. A failure is scoped to its model and is
//! reported alongside the models that did compile.

pub mod config;
pub mod csharp;
pub mod inheritance;
pub mod model;
pub mod names;
pub mod property;
pub mod resolver;
pub mod tables;
pub mod types;
pub mod union;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

pub use inheritance::BaseClass;
pub use model::{compile_model, ResolvedModel};
pub use property::{ConverterHint, ResolvedField, Serialization, Shadowing};
pub use tables::{EnumInfo, LookupTables};
pub use types::{ScalarKind, TypeExpr};

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::schema::{Model, Schema};
use crate::vocabulary::Vocabulary;

// =============================================================================
// CompileContext
// =============================================================================

/// Read-only state shared by every resolver call in a run
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub tables: &'a LookupTables,
    pub vocabulary: &'a Vocabulary,
}

impl<'a> CompileContext<'a> {
    pub fn new(tables: &'a LookupTables, vocabulary: &'a Vocabulary) -> Self {
        Self { tables, vocabulary }
    }
}

// =============================================================================
// Compiler
// =============================================================================

/// Owns the run-scoped tables for one schema
pub struct Compiler {
    tables: LookupTables,
    vocabulary: Vocabulary,
}

impl Compiler {
    /// Build the lookup tables for `schema`
    pub fn new(schema: &Schema, vocabulary: Vocabulary) -> Self {
        let tables = LookupTables::build(schema, &vocabulary);
        info!(
            models = tables.model_count(),
            enums = tables.enum_count(),
            "Built lookup tables"
        );
        Self { tables, vocabulary }
    }

    pub fn context(&self) -> CompileContext<'_> {
        CompileContext::new(&self.tables, &self.vocabulary)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Compile a single model
    pub fn compile(&self, model: &Model) -> Result<ResolvedModel, CompileError> {
        compile_model(model, &self.context())
    }

    /// Compile every model, in parallel, collecting failures instead of stopping
    pub fn compile_all(&self, models: &[Model]) -> CompilationReport {
        let ctx = self.context();
        let results: Vec<Result<ResolvedModel, CompileError>> = models
            .par_iter()
            .map(|model| compile_model(model, &ctx))
            .collect();

        let mut report = CompilationReport::default();
        for result in results {
            match result {
                Ok(resolved) => {
                    for (field, type_name) in resolved.assumed_references() {
                        report
                            .diagnostics
                            .assumed_foundation_type(&resolved.type_id, field, type_name);
                    }
                    report.models.push(resolved);
                }
                Err(err) => {
                    report
                        .diagnostics
                        .compile_error(&err, self.tables.known_names());
                    report.failures.push(err);
                }
            }
        }

        info!(
            compiled = report.models.len(),
            failed = report.failures.len(),
            "Compilation finished"
        );
        report
    }

    /// Compile every model, failing with the first error in declaration order
    pub fn compile_strict(&self, models: &[Model]) -> Result<Vec<ResolvedModel>, CompileError> {
        let ctx = self.context();
        let results: Vec<Result<ResolvedModel, CompileError>> = models
            .par_iter()
            .map(|model| compile_model(model, &ctx))
            .collect();
        results.into_iter().collect()
    }
}

// =============================================================================
// Compilation Report
// =============================================================================

/// Outcome of compiling a whole schema
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompilationReport {
    /// Successfully compiled models, in input order
    pub models: Vec<ResolvedModel>,
    /// Models that failed, in input order
    #[serde(skip)]
    pub failures: Vec<CompileError>,
    pub diagnostics: Diagnostics,
}

impl CompilationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
