//! Union Composer
//!
//! Collapses every type a field admits into one expression. The candidate
//! order is fixed (alternative types, required type, alternative models,
//! model) because it becomes the positional argument order of the
//! generated `SingleValues<…>`.
//!
//! A union never holds the same base type twice. The data models are
//! authored that way and it is not checked here.

use super::resolver::resolve_type;
use super::types::TypeExpr;
use super::CompileContext;
use crate::error::ResolveError;
use crate::schema::{Field, TypeReference};

/// A field's type references in union argument order, absent entries dropped
pub fn candidate_types(field: &Field) -> Vec<&TypeReference> {
    field
        .alternative_types
        .iter()
        .chain(field.required_type.as_ref())
        .chain(field.alternative_models.iter())
        .chain(field.model.as_ref())
        .collect()
}

/// Resolve all candidates and compose them
pub fn compose_type(
    field: &Field,
    ctx: &CompileContext<'_>,
    is_extension: bool,
) -> Result<TypeExpr, ResolveError> {
    let mut members = candidate_types(field)
        .into_iter()
        .map(|reference| resolve_type(reference, ctx, is_extension))
        .collect::<Result<Vec<_>, _>>()?;

    match members.len() {
        0 => Err(ResolveError::EmptyUnion {
            field: field.field_name.clone(),
        }),
        1 => Ok(members.remove(0)),
        _ => Ok(TypeExpr::Union { members }),
    }
}
