//! Type Resolver
//!
//! Maps one type reference to a [`TypeExpr`]. Resolution order is fixed:
//! built-in scalar, enum table, model table, foundation vocabulary, then
//! (extension fields only) an assumed foundation reference. Anything left is
//! an error; there is no catch-all type.

use tracing::warn;

use super::names::to_pascal_case;
use super::types::{ScalarKind, TypeExpr};
use super::CompileContext;
use crate::error::ResolveError;
use crate::schema::TypeReference;
use crate::vocabulary::short_name;

/// Resolve a reference, wrapping array references in a list
pub fn resolve_type(
    reference: &TypeReference,
    ctx: &CompileContext<'_>,
    is_extension: bool,
) -> Result<TypeExpr, ResolveError> {
    let base = resolve_base_type(reference.iri(), ctx, is_extension)?;
    if reference.is_array() {
        Ok(TypeExpr::list_of(base))
    } else {
        Ok(base)
    }
}

fn resolve_base_type(
    iri: &str,
    ctx: &CompileContext<'_>,
    is_extension: bool,
) -> Result<TypeExpr, ResolveError> {
    let type_name = short_name(iri);
    let compact_key = ctx.vocabulary.compact(iri);

    if let Some(kind) = ScalarKind::from_short_name(type_name) {
        return Ok(TypeExpr::scalar(kind));
    }

    let class_name = to_pascal_case(type_name);

    if let Some(info) = ctx.tables.enum_info(&compact_key) {
        return Ok(TypeExpr::Enum {
            name: class_name,
            foundation: info.is_external,
            nullable: true,
        });
    }

    if ctx.tables.has_model(type_name) {
        return Ok(TypeExpr::Model { name: class_name });
    }

    if ctx.vocabulary.contains(&compact_key) {
        return Ok(TypeExpr::Foundation {
            name: class_name,
            nullable: true,
            assumed: false,
        });
    }

    if is_extension {
        // Extension schemas may name foundation types we have no term list entry for
        warn!(
            type_name,
            compact_key = %compact_key,
            "Extension referenced unverified foundation type, assuming {}",
            class_name
        );
        return Ok(TypeExpr::Foundation {
            name: class_name,
            nullable: false,
            assumed: true,
        });
    }

    Err(ResolveError::UnresolvedType {
        short_name: type_name.to_string(),
        compact_key,
    })
}
