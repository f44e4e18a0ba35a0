//! C# Code Emitter
//!
//! Renders resolved models and local enums as C# source.
//!
//! Key constraints:
//! - This module ONLY receives ResolvedModel / EnumDef + TargetProfile
//! - Every naming and typing decision was made during resolution
//! - Foundation enums are never emitted; they live in the foundation library

use super::config::TargetProfile;
use super::model::ResolvedModel;
use super::names::to_pascal_case;
use super::property::{ConverterHint, ResolvedField, Shadowing};
use super::types::TypeExpr;
use crate::schema::{Documentation, EnumDef};
use crate::vocabulary::short_name;

// =============================================================================
// Public API
// =============================================================================

/// Render a type expression
pub fn render_type(expr: &TypeExpr, profile: &TargetProfile) -> String {
    match expr {
        TypeExpr::Scalar { scalar, nullable } => nullable_suffix(scalar.clr_name(), *nullable),
        TypeExpr::Enum {
            name,
            foundation,
            nullable,
        } => {
            let qualified = if *foundation {
                profile.foundation(name)
            } else {
                name.clone()
            };
            nullable_suffix(&qualified, *nullable)
        }
        TypeExpr::Model { name } => name.clone(),
        TypeExpr::Foundation { name, nullable, .. } => {
            nullable_suffix(&profile.foundation(name), *nullable)
        }
        TypeExpr::List { item } => {
            format!("{}<{}>", profile.list_container, render_type(item, profile))
        }
        TypeExpr::Union { members } => {
            let rendered: Vec<String> = members.iter().map(|m| render_type(m, profile)).collect();
            format!("{}<{}>", profile.union_container, rendered.join(", "))
        }
    }
}

/// Emit a complete source file for the given enums and models
pub fn emit_file(enums: &[&EnumDef], models: &[ResolvedModel], profile: &TargetProfile) -> String {
    let mut output = String::new();

    output.push_str("// <auto-generated>\n");
    output.push_str("// Generated by classgen from the data models - DO NOT EDIT\n");
    output.push_str("// </auto-generated>\n\n");

    output.push_str("using System;\n");
    output.push_str("using System.Collections.Generic;\n");
    output.push_str("using System.Runtime.Serialization;\n");
    output.push_str("using Newtonsoft.Json;\n\n");

    output.push_str(&format!("namespace {}\n{{\n", profile.namespace));

    let bodies = enums
        .iter()
        .map(|def| emit_enum(def))
        .chain(models.iter().map(|model| emit_model(model, profile)));

    let mut first = true;
    for body in bodies {
        if !first {
            output.push('\n');
        }
        first = false;
        output.push_str(&indent(&body));
    }

    output.push_str("}\n");
    output
}

/// Emit a single class
pub fn emit_model(model: &ResolvedModel, profile: &TargetProfile) -> String {
    let mut output = String::new();

    emit_docs(&mut output, &model.docs, None, false);
    output.push_str("[DataContract]\n");
    output.push_str(&format!(
        "public partial class {} : {}\n{{\n",
        model.class_name,
        model.base.render(profile)
    ));

    let mut first = true;
    for field in &model.fields {
        if !first {
            output.push('\n');
        }
        first = false;

        let mut member = String::new();
        emit_field(&mut member, field, profile);
        output.push_str(&indent(&member));
    }

    output.push_str("}\n");
    output
}

/// Emit a local enumeration
pub fn emit_enum(def: &EnumDef) -> String {
    let mut output = String::new();

    emit_docs(&mut output, &def.docs, None, false);
    output.push_str(&format!(
        "public enum {}\n{{\n",
        to_pascal_case(short_name(&def.type_id))
    ));

    for value in &def.values {
        output.push_str(&format!("    [EnumMember(Value = \"{}\")]\n", value));
        output.push_str(&format!("    {},\n", to_pascal_case(short_name(value))));
    }

    output.push_str("}\n");
    output
}

// =============================================================================
// Member Emission
// =============================================================================

fn emit_field(output: &mut String, field: &ResolvedField, profile: &TargetProfile) {
    emit_docs(output, &field.docs, Some(&field.field_name), field.numeric_example);

    let type_name = render_type(&field.type_expr, profile);

    let Some(serialization) = &field.serialization else {
        output.push_str(&format!(
            "[Obsolete(\"{}\", true)]\n",
            profile.obsolete_message
        ));
        output.push_str(&format!(
            "public override {} {} {{ get; set; }}\n",
            type_name, field.property_name
        ));
        return;
    };

    output.push_str(&format!(
        "[DataMember(Name = \"{}\", EmitDefaultValue = false, Order = {})]\n",
        serialization.wire_name, serialization.order
    ));

    let converter = match field.converter {
        ConverterHint::None => None,
        ConverterHint::Duration => Some(&profile.converters.duration),
        ConverterHint::Time => Some(&profile.converters.time),
        ConverterHint::TaggedUnion => Some(&profile.converters.tagged_union),
    };
    if let Some(converter) = converter {
        output.push_str(&format!("[JsonConverter(typeof({}))]\n", converter));
    }

    let modifier = match field.shadowing {
        Shadowing::New => "new ",
        // stubs are handled above; a serialized member is never an override
        Shadowing::None | Shadowing::Override => "",
    };
    output.push_str(&format!(
        "public {}virtual {} {} {{ get; set; }}\n",
        modifier, type_name, field.property_name
    ));
}

fn emit_docs(output: &mut String, docs: &Documentation, field_name: Option<&str>, numeric: bool) {
    if !docs.description.is_empty() {
        output.push_str("/// <summary>\n");
        for line in &docs.description {
            output.push_str(&format!("/// {}\n", xml_escape(line)));
        }
        output.push_str("/// </summary>\n");
    }

    if let Some(example) = &docs.example {
        output.push_str("/// <example>\n/// <code>\n");
        for line in example_body(example, field_name, numeric).lines() {
            output.push_str(&format!("/// {}\n", xml_escape(line)));
        }
        output.push_str("/// </code>\n/// </example>\n");
    }
}

// =============================================================================
// Helper Utilities
// =============================================================================

/// Wrap an example value in a `<code>` block.
///
/// Objects and arrays are pretty-printed JSON. Scalars are quoted unless the
/// member is numeric.
pub fn render_code_example(
    example: &serde_json::Value,
    field_name: Option<&str>,
    numeric: bool,
) -> String {
    format!("<code>\n{}\n</code>", example_body(example, field_name, numeric))
}

fn example_body(example: &serde_json::Value, field_name: Option<&str>, numeric: bool) -> String {
    let prefix = field_name
        .map(|name| format!("\"{}\": ", name))
        .unwrap_or_default();

    let body = match example {
        serde_json::Value::Object(_) | serde_json::Value::Array(_) | serde_json::Value::Null => {
            serde_json::to_string_pretty(example).unwrap_or_default()
        }
        serde_json::Value::String(s) if !numeric => format!("\"{}\"", s),
        serde_json::Value::String(s) => s.clone(),
        other if numeric => other.to_string(),
        other => format!("\"{}\"", other),
    };

    format!("{}{}", prefix, body)
}

fn nullable_suffix(name: &str, nullable: bool) -> String {
    if nullable {
        format!("{}?", name)
    } else {
        name.to_string()
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("    {}\n", line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::inheritance::BaseClass;
    use crate::codegen::property::Serialization;
    use crate::codegen::types::ScalarKind;
    use serde_json::json;

    fn field(name: &str, type_expr: TypeExpr) -> ResolvedField {
        ResolvedField {
            field_name: name.to_string(),
            property_name: to_pascal_case(name),
            type_expr,
            serialization: Some(Serialization {
                wire_name: name.to_string(),
                order: 3,
            }),
            shadowing: Shadowing::None,
            disinherited: false,
            converter: ConverterHint::None,
            numeric_example: false,
            docs: Documentation::default(),
        }
    }

    fn emit(field: &ResolvedField) -> String {
        let mut output = String::new();
        emit_field(&mut output, field, &TargetProfile::default());
        output
    }

    #[test]
    fn test_plain_member() {
        let output = emit(&field("startDate", TypeExpr::scalar(ScalarKind::Date)));
        assert_eq!(
            output,
            "[DataMember(Name = \"startDate\", EmitDefaultValue = false, Order = 3)]\n\
             public virtual string StartDate { get; set; }\n"
        );
    }

    #[test]
    fn test_new_member_with_converter() {
        let mut member = field("duration", TypeExpr::scalar(ScalarKind::Duration));
        member.shadowing = Shadowing::New;
        member.converter = ConverterHint::Duration;

        let output = emit(&member);
        assert!(output.contains(
            "[JsonConverter(typeof(OpenActiveTimeSpanToISO8601DurationValuesConverter))]\n"
        ));
        assert!(output.ends_with("public new virtual TimeSpan? Duration { get; set; }\n"));
    }

    #[test]
    fn test_disinherited_member() {
        let mut member = field("duration", TypeExpr::scalar(ScalarKind::Duration));
        member.serialization = None;
        member.shadowing = Shadowing::Override;
        member.disinherited = true;

        assert_eq!(
            emit(&member),
            "[Obsolete(\"This property is disinherited in this type, and must not be used.\", true)]\n\
             public override TimeSpan? Duration { get; set; }\n"
        );
    }

    #[test]
    fn test_union_member_example_unquoted_for_integer_required_type() {
        let mut member = field(
            "identifier",
            TypeExpr::Union {
                members: vec![
                    TypeExpr::scalar(ScalarKind::Text),
                    TypeExpr::scalar(ScalarKind::Integer),
                ],
            },
        );
        member.numeric_example = true;
        member.docs.example = Some(json!(5));

        let output = emit(&member);
        assert!(output.contains("/// <code>\n/// \"identifier\": 5\n/// </code>\n"));
    }

    #[test]
    fn test_render_code_example() {
        assert_eq!(
            render_code_example(&json!("Yoga"), Some("name"), false),
            "<code>\n\"name\": \"Yoga\"\n</code>"
        );
        assert_eq!(
            render_code_example(&json!(12), Some("maximumAttendeeCapacity"), true),
            "<code>\n\"maximumAttendeeCapacity\": 12\n</code>"
        );
        assert_eq!(
            render_code_example(&json!(12), None, false),
            "<code>\n\"12\"\n</code>"
        );
        assert_eq!(
            render_code_example(&json!({"a": 1}), Some("geo"), false),
            "<code>\n\"geo\": {\n  \"a\": 1\n}\n</code>"
        );
    }

    #[test]
    fn test_emit_model() {
        let model = ResolvedModel {
            type_id: "SessionSeries".to_string(),
            class_name: "SessionSeries".to_string(),
            base: BaseClass::Local("Event".to_string()),
            fields: vec![field("name", TypeExpr::scalar(ScalarKind::Text))],
            docs: Documentation {
                description: vec!["A session series & its <sessions>.".to_string()],
                example: None,
            },
        };

        let output = emit_model(&model, &TargetProfile::default());
        assert!(output.starts_with(
            "/// <summary>\n/// A session series &amp; its &lt;sessions&gt;.\n/// </summary>\n[DataContract]\npublic partial class SessionSeries : Event\n{\n"
        ));
        assert!(output.contains("    public virtual string Name { get; set; }\n"));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_emit_enum() {
        let def = EnumDef {
            type_id: "https://openactive.io/RequiredStatusType".to_string(),
            namespace: "https://openactive.io/".to_string(),
            values: vec![
                "https://openactive.io/Required".to_string(),
                "https://openactive.io/Optional".to_string(),
            ],
            docs: Documentation::default(),
        };

        assert_eq!(
            emit_enum(&def),
            "public enum RequiredStatusType\n{\n    \
             [EnumMember(Value = \"https://openactive.io/Required\")]\n    Required,\n    \
             [EnumMember(Value = \"https://openactive.io/Optional\")]\n    Optional,\n}\n"
        );
    }

    #[test]
    fn test_emit_file_wraps_namespace() {
        let output = emit_file(&[], &[], &TargetProfile::default());
        assert!(output.contains("namespace OpenActive.NET\n{\n}\n"));
    }
}
