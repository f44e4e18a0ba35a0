//! Model Compiler

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::inheritance::{resolve_base, BaseClass};
use super::names::to_pascal_case;
use super::property::{compile_field, ResolvedField};
use super::CompileContext;
use crate::error::CompileError;
use crate::schema::{Documentation, Model};
use crate::vocabulary::short_name;

/// A model ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub type_id: String,
    pub class_name: String,
    pub base: BaseClass,
    /// In field declaration order
    pub fields: Vec<ResolvedField>,
    pub docs: Documentation,
}

impl ResolvedModel {
    /// Foundation names taken on trust by extension fields, with the field that used them
    pub fn assumed_references(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|field| {
                field
                    .type_expr
                    .assumed_references()
                    .into_iter()
                    .map(move |name| (field.field_name.as_str(), name))
            })
            .collect()
    }
}

/// Resolve the base class once, then compile every field in order
pub fn compile_model(model: &Model, ctx: &CompileContext<'_>) -> Result<ResolvedModel, CompileError> {
    let base = resolve_base(
        model.sub_class_of.as_deref(),
        model.derived_from.as_deref(),
        &model.type_id,
        ctx.vocabulary,
    )
    .map_err(|source| CompileError::Model {
        model: model.type_id.clone(),
        source,
    })?;

    let has_base_class = base.has_members();

    let fields = model
        .fields
        .iter()
        .map(|field| {
            compile_field(field, ctx, has_base_class).map_err(|source| CompileError::Field {
                model: model.type_id.clone(),
                field: field.field_name.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(model = %model.type_id, base = %base, fields = fields.len(), "Compiled model");

    Ok(ResolvedModel {
        type_id: model.type_id.clone(),
        class_name: to_pascal_case(short_name(&model.type_id)),
        base,
        fields,
        docs: model.docs.clone(),
    })
}
