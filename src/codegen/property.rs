//! Property Compiler
//!
//! Turns one schema field into a [`ResolvedField`]: its type, serialization
//! metadata, shadowing keyword and converter hint. Obsolete fields become
//! disinheritance stubs that only exist to hide the inherited member.

use serde::{Deserialize, Serialize};

use super::names::to_pascal_case;
use super::types::{ScalarKind, TypeExpr};
use super::union::compose_type;
use super::CompileContext;
use crate::error::ResolveError;
use crate::schema::{Documentation, Field};
use crate::vocabulary::short_name;

/// Added to the declared order of extension fields so they sort after core
/// fields. Must exceed the field count of any core model.
pub const EXTENSION_ORDER_OFFSET: u32 = 1000;

/// Member modifier for hiding an inherited member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shadowing {
    #[default]
    None,
    New,
    Override,
}

/// JSON converter a member needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConverterHint {
    #[default]
    None,
    Duration,
    Time,
    TaggedUnion,
}

/// Wire metadata of a serialized member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Serialization {
    pub wire_name: String,
    pub order: u32,
}

/// A fully resolved member, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedField {
    /// Raw schema field name
    pub field_name: String,
    pub property_name: String,
    pub type_expr: TypeExpr,
    /// Absent on disinheritance stubs
    pub serialization: Option<Serialization>,
    pub shadowing: Shadowing,
    /// Stub that hides an inherited member and must not be used
    pub disinherited: bool,
    pub converter: ConverterHint,
    /// Examples are written unquoted when the required type is Integer or Float
    pub numeric_example: bool,
    pub docs: Documentation,
}

impl ResolvedField {
    /// Final serialization order, if serialized
    pub fn order(&self) -> Option<u32> {
        self.serialization.as_ref().map(|s| s.order)
    }

    pub fn wire_name(&self) -> Option<&str> {
        self.serialization.as_ref().map(|s| s.wire_name.as_str())
    }
}

/// Compile one field of a model
pub fn compile_field(
    field: &Field,
    ctx: &CompileContext<'_>,
    has_base_class: bool,
) -> Result<ResolvedField, ResolveError> {
    let is_extension = field.is_extension_sourced();
    let type_expr = compose_type(field, ctx, is_extension)?;
    let property_name = to_pascal_case(&field.field_name);

    if field.obsolete {
        return Ok(ResolvedField {
            field_name: field.field_name.clone(),
            property_name,
            type_expr,
            serialization: None,
            shadowing: Shadowing::Override,
            disinherited: true,
            converter: ConverterHint::None,
            numeric_example: numeric_example(field),
            docs: field.docs.clone(),
        });
    }

    // Only members hiding a foundation member need `new`; extension names never collide
    let shadowing =
        if !is_extension && has_base_class && (field.derived_from_schema || field.is_override) {
            Shadowing::New
        } else {
            Shadowing::None
        };

    let order = if is_extension {
        field
            .order
            .checked_add(EXTENSION_ORDER_OFFSET)
            .ok_or_else(|| ResolveError::OrderOverflow {
                field: field.field_name.clone(),
                order: field.order,
            })?
    } else {
        field.order
    };

    let converter = converter_hint(field, &type_expr, ctx);

    Ok(ResolvedField {
        field_name: field.field_name.clone(),
        property_name,
        serialization: Some(Serialization {
            wire_name: field.wire_name().to_string(),
            order,
        }),
        type_expr,
        shadowing,
        disinherited: false,
        converter,
        numeric_example: numeric_example(field),
        docs: field.docs.clone(),
    })
}

fn numeric_example(field: &Field) -> bool {
    field.required_type.as_ref().is_some_and(|required| {
        matches!(
            ScalarKind::from_short_name(short_name(required.iri())),
            Some(ScalarKind::Integer | ScalarKind::Float)
        )
    })
}

fn converter_hint(field: &Field, type_expr: &TypeExpr, ctx: &CompileContext<'_>) -> ConverterHint {
    let required_is_time = field.required_type.as_ref().is_some_and(|required| {
        !required.is_array() && ctx.vocabulary.is_foundation_term(required.iri(), "Time")
    });

    if type_expr.is_nullable_scalar(ScalarKind::Duration) {
        ConverterHint::Duration
    } else if required_is_time {
        ConverterHint::Time
    } else if type_expr.is_union() {
        ConverterHint::TaggedUnion
    } else {
        ConverterHint::None
    }
}
