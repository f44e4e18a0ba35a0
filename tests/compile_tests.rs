//! End-to-end compilation tests
//!
//! Loads the data models under `tests/fixtures/data-models` through the loader
//! and checks the resolved classes and the rendered C#.

use std::path::Path;

use dotnet_classgen::codegen::{csharp, BaseClass, ConverterHint, Shadowing};
use dotnet_classgen::diagnostics::DiagnosticCode;
use dotnet_classgen::{
    loader, ClassgenConfig, CompilationReport, Compiler, ResolveError, ResolvedField,
    ResolvedModel, Schema,
};

fn fixtures_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/data-models")
        .leak()
}

fn fixture_config() -> ClassgenConfig {
    let mut config = ClassgenConfig::default();
    config.schema.path = fixtures_path().to_path_buf();
    config
}

fn load() -> (Schema, Compiler) {
    let config = fixture_config();
    let schema = loader::load_schema(&config).unwrap();
    let vocabulary = loader::load_vocabulary(&config).unwrap();
    let compiler = Compiler::new(&schema, vocabulary);
    (schema, compiler)
}

fn compile_fixtures() -> CompilationReport {
    let (schema, compiler) = load();
    compiler.compile_all(&schema.models)
}

fn model<'a>(report: &'a CompilationReport, class_name: &str) -> &'a ResolvedModel {
    report
        .models
        .iter()
        .find(|m| m.class_name == class_name)
        .unwrap_or_else(|| panic!("{} not compiled", class_name))
}

fn field<'a>(model: &'a ResolvedModel, name: &str) -> &'a ResolvedField {
    model
        .fields
        .iter()
        .find(|f| f.field_name == name)
        .unwrap_or_else(|| panic!("{}.{} missing", model.class_name, name))
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_fixtures_load_in_file_name_order() {
    let (schema, _) = load();
    let names: Vec<&str> = schema.models.iter().map(|m| m.type_id.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "https://openactive.io/Concept",
            "https://openactive.io/Event",
            "https://openactive.io/Place",
            "https://openactive.io/SessionSeries",
            "https://openactive.io/Slot",
        ]
    );
    assert_eq!(schema.enums.len(), 2);
}

// =============================================================================
// Failure Isolation
// =============================================================================

#[test]
fn test_failure_is_scoped_to_its_model() {
    let report = compile_fixtures();

    assert!(!report.is_success());
    assert_eq!(report.models.len(), 4);
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!(failure.model(), "https://openactive.io/Slot");
    assert_eq!(failure.field(), Some("facilityUse"));
    assert_eq!(
        failure.cause(),
        &ResolveError::UnresolvedType {
            short_name: "FacilityUs".to_string(),
            compact_key: "oa:FacilityUs".to_string(),
        }
    );
}

#[test]
fn test_diagnostics_report_errors_and_assumed_types() {
    let report = compile_fixtures();

    let errors: Vec<_> = report.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, DiagnosticCode::UnresolvedType);

    let warnings: Vec<_> = report.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, DiagnosticCode::AssumedFoundationType);
    assert_eq!(warnings[0].field.as_deref(), Some("leader"));
}

#[test]
fn test_compile_single_model() {
    let (schema, compiler) = load();
    let place = compiler.compile(&schema.models[2]).unwrap();
    assert_eq!(place.class_name, "Place");
    assert!(compiler.compile(&schema.models[4]).is_err());
}

#[test]
fn test_strict_compile_stops_on_failure() {
    let (schema, compiler) = load();
    let err = compiler.compile_strict(&schema.models).unwrap_err();
    assert_eq!(err.model(), "https://openactive.io/Slot");
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_event_members() {
    let report = compile_fixtures();
    let event = model(&report, "Event");

    assert_eq!(event.base, BaseClass::Foundation("Event".to_string()));

    let start_date = field(event, "startDate");
    assert_eq!(start_date.type_expr.to_string(), "string");
    assert_eq!(start_date.order(), Some(3));
    assert_eq!(start_date.shadowing, Shadowing::New);

    let duration = field(event, "duration");
    assert_eq!(duration.type_expr.to_string(), "TimeSpan?");
    assert_eq!(duration.order(), Some(1005));
    assert_eq!(duration.converter, ConverterHint::Duration);
    assert_eq!(duration.shadowing, Shadowing::None);

    assert_eq!(
        field(event, "eventStatus").type_expr.to_string(),
        "Schema.NET.EventStatusType?"
    );
    assert_eq!(
        field(event, "attendeeInstructions").type_expr.to_string(),
        "List<string>"
    );
}

#[test]
fn test_session_series_members() {
    let report = compile_fixtures();
    let series = model(&report, "SessionSeries");

    assert_eq!(series.base, BaseClass::Local("Event".to_string()));

    let id = field(series, "id");
    assert_eq!(id.wire_name(), Some("@id"));
    assert_eq!(id.type_expr.to_string(), "Uri");

    let identifier = field(series, "identifier");
    assert_eq!(identifier.type_expr.to_string(), "SingleValues<string, int?>");
    assert_eq!(identifier.converter, ConverterHint::TaggedUnion);

    let location = field(series, "location");
    assert_eq!(location.type_expr.to_string(), "Place");
    assert_eq!(location.shadowing, Shadowing::New);

    assert_eq!(field(series, "startTime").converter, ConverterHint::Time);
    assert_eq!(
        field(series, "leader").type_expr.to_string(),
        "Schema.NET.SportsTeam"
    );
    assert_eq!(
        field(series, "accessibilityInformation").type_expr.to_string(),
        "SingleValues<RequiredStatusType?, List<Place>, Schema.NET.Audience?>"
    );

    let duration = field(series, "duration");
    assert!(duration.disinherited);
    assert_eq!(duration.shadowing, Shadowing::Override);
    assert_eq!(duration.order(), None);
}

#[test]
fn test_derived_from_bases() {
    let report = compile_fixtures();

    let place = model(&report, "Place");
    assert_eq!(place.base.to_string(), "Schema.NET.Place");
    assert_eq!(field(place, "name").shadowing, Shadowing::New);

    let concept = model(&report, "Concept");
    assert_eq!(concept.base.to_string(), "Schema.NET.JsonLdObject");
    assert_eq!(field(concept, "prefLabel").shadowing, Shadowing::None);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_session_series() {
    let report = compile_fixtures();
    let config = fixture_config();
    let output = csharp::emit_model(model(&report, "SessionSeries"), &config.target);

    assert!(output.contains("[DataContract]\npublic partial class SessionSeries : Event\n"));
    assert!(output.contains(
        "    [DataMember(Name = \"@id\", EmitDefaultValue = false, Order = 1)]\n    public virtual Uri Id { get; set; }\n"
    ));
    assert!(output.contains(
        "    [JsonConverter(typeof(ValuesConverter))]\n    public virtual SingleValues<string, int?> Identifier { get; set; }\n"
    ));
    assert!(output.contains("    /// \"identifier\": 5\n"));
    assert!(output.contains(
        "    [JsonConverter(typeof(OpenActiveDateTimeOffsetToISO8601TimeValuesConverter))]\n"
    ));
    assert!(output.contains("    public new virtual Place Location { get; set; }\n"));
    assert!(output.contains(
        "    [Obsolete(\"This property is disinherited in this type, and must not be used.\", true)]\n    public override TimeSpan? Duration { get; set; }\n"
    ));
}

#[test]
fn test_render_examples() {
    let report = compile_fixtures();
    let config = fixture_config();
    let output = csharp::emit_model(model(&report, "Event"), &config.target);

    assert!(output.contains("    /// <code>\n    /// \"startDate\": \"2018-01-27\"\n    /// </code>\n"));
    assert!(output.contains("    /// \"maximumAttendeeCapacity\": 12\n"));
    assert!(output.contains("    [DataMember(Name = \"duration\", EmitDefaultValue = false, Order = 1005)]\n"));
}

#[test]
fn test_render_file_skips_foundation_enums() {
    let (schema, compiler) = load();
    let report = compiler.compile_all(&schema.models);
    let local: Vec<_> = schema
        .enums
        .iter()
        .filter(|def| !compiler.vocabulary().contains(&def.namespace))
        .collect();

    let output = csharp::emit_file(&local, &report.models, &fixture_config().target);

    assert!(output.contains("namespace OpenActive.NET\n{\n"));
    assert!(output.contains("    public enum RequiredStatusType\n"));
    assert!(output.contains("        [EnumMember(Value = \"https://openactive.io/Unavailable\")]\n        Unavailable,\n"));
    assert!(!output.contains("enum EventStatusType"));
    assert!(!output.contains("class Slot"));
}

#[test]
fn test_report_serializes_models_in_order() {
    let report = compile_fixtures();
    let json = serde_json::to_value(&report).unwrap();

    let classes: Vec<&str> = json["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["class_name"].as_str().unwrap())
        .collect();
    assert_eq!(classes, vec!["Concept", "Event", "Place", "SessionSeries"]);
}
