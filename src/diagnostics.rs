//! Diagnostics
//!
//! Collects errors and warnings from a compilation run, each tied to the
//! model (and field) that caused it so it can be located in the data models.

use std::fmt;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, ResolveError};

// =============================================================================
// Diagnostic Codes
// =============================================================================

/// Diagnostic code for categorizing issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Reference matches no scalar, enum, model or foundation type
    UnresolvedType,
    /// Field declares no type at all
    EmptyUnion,
    /// Model declares neither parent nor derived-from marker
    MissingBaseClass,
    /// Extension offset pushes a field order out of range
    OrderOverflow,
    /// Extension field referenced a foundation type that could not be verified
    AssumedFoundationType,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnresolvedType => "E001",
            Self::EmptyUnion => "E002",
            Self::MissingBaseClass => "E003",
            Self::OrderOverflow => "E004",
            Self::AssumedFoundationType => "W001",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::UnresolvedType
            | Self::EmptyUnion
            | Self::MissingBaseClass
            | Self::OrderOverflow => Severity::Error,
            Self::AssumedFoundationType => Severity::Warning,
        }
    }
}

impl From<&ResolveError> for DiagnosticCode {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::UnresolvedType { .. } => Self::UnresolvedType,
            ResolveError::EmptyUnion { .. } => Self::EmptyUnion,
            ResolveError::MissingBaseClass { .. } => Self::MissingBaseClass,
            ResolveError::OrderOverflow { .. } => Self::OrderOverflow,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Diagnostic Item
// =============================================================================

/// A single diagnostic item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticItem {
    /// Model that caused this diagnostic
    pub model: String,
    /// Field within the model, if field-scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: DiagnosticCode,
    pub message: String,
    /// Additional context (e.g. suggestions)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

impl DiagnosticItem {
    pub fn new(model: impl Into<String>, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            field: None,
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    fn location(&self) -> String {
        match &self.field {
            Some(field) => format!("{}.{}", self.model, field),
            None => self.model.clone(),
        }
    }
}

impl From<&CompileError> for DiagnosticItem {
    fn from(err: &CompileError) -> Self {
        let item = Self::new(err.model(), err.cause().into(), err.cause().to_string());
        match err.field() {
            Some(field) => item.with_field(field),
            None => item,
        }
    }
}

impl fmt::Display for DiagnosticItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.code,
            self.code.severity(),
            self.message,
            self.location()
        )?;

        for ctx in &self.context {
            write!(f, "\n  - {}", ctx)?;
        }

        Ok(())
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Collection of diagnostics from a compilation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<DiagnosticItem>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic item
    pub fn push(&mut self, item: DiagnosticItem) {
        self.items.push(item);
    }

    /// Add a compile failure, suggesting close names for unresolved types
    pub fn compile_error<'a>(
        &mut self,
        err: &CompileError,
        known_names: impl IntoIterator<Item = &'a str>,
    ) {
        let mut item = DiagnosticItem::from(err);
        if let ResolveError::UnresolvedType { short_name, .. } = err.cause() {
            if let Some(suggestion) = suggest(short_name, known_names) {
                item = item.with_context(format!("did you mean '{}'?", suggestion));
            }
        }
        self.push(item);
    }

    /// Add a warning for a foundation reference taken on trust
    pub fn assumed_foundation_type(&mut self, model: &str, field: &str, type_name: &str) {
        self.push(
            DiagnosticItem::new(
                model,
                DiagnosticCode::AssumedFoundationType,
                format!(
                    "Extension referenced foundation type '{}' which could not be verified",
                    type_name
                ),
            )
            .with_field(field),
        );
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|i| i.severity() == Severity::Error)
    }

    /// Get all errors
    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticItem> {
        self.items.iter().filter(|i| i.severity() == Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticItem> {
        self.items.iter().filter(|i| i.severity() == Severity::Warning)
    }

    pub fn all(&self) -> &[DiagnosticItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Format all diagnostics for display
    pub fn format_all(&self) -> String {
        let mut output = String::new();

        for item in &self.items {
            output.push_str(&format!("{}\n", item));
        }

        if self.has_errors() {
            output.push_str(&format!(
                "\n{} error(s), {} warning(s)\n",
                self.error_count(),
                self.warning_count()
            ));
        } else if !self.is_empty() {
            output.push_str(&format!("\n{} warning(s)\n", self.warning_count()));
        }

        output
    }
}

/// Closest known name to an unresolved one
fn suggest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default();
    candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, name)
                .map(|score| (score, candidate))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1)))
        .map(|(_, candidate)| candidate)
}
