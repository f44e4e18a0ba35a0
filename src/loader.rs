//! Schema Loading
//!
//! Reads data model and enumeration files from disk into a [`Schema`].
//!
//! Layout:
//! ```text
//! data-models/
//! ├── models/
//! │   ├── SessionSeries.json
//! │   └── ...
//! └── enums/
//!     ├── RequiredStatusType.json
//!     └── ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::ClassgenConfig;
use crate::error::{Error, Result};
use crate::schema::{EnumDef, Model, Schema};
use crate::vocabulary::{short_name, Vocabulary};

/// Load every model and enum named by the configuration
pub fn load_schema(config: &ClassgenConfig) -> Result<Schema> {
    let models = load_models(&config.models_path())?;

    // a schema without enums is valid; a schema without models is not
    let enums_path = config.enums_path();
    let enums = if enums_path.is_dir() {
        load_enums(&enums_path)?
    } else {
        debug!(path = %enums_path.display(), "No enum directory");
        Vec::new()
    };

    info!(models = models.len(), enums = enums.len(), "Loaded schema");
    Ok(Schema { models, enums })
}

/// Load one `Model` per JSON file under `dir`
pub fn load_models(dir: &Path) -> Result<Vec<Model>> {
    load_directory(dir)
}

/// Load one `EnumDef` per JSON file under `dir`
pub fn load_enums(dir: &Path) -> Result<Vec<EnumDef>> {
    load_directory(dir)
}

/// Read a foundation term list: a JSON array of names or IRIs
pub fn load_terms(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let terms: Vec<String> = serde_json::from_str(&content).map_err(|source| Error::InvalidSchema {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(terms.iter().map(|term| short_name(term).to_string()).collect())
}

/// Build the vocabulary for a run, restricted to the term list when one is configured
pub fn load_vocabulary(config: &ClassgenConfig) -> Result<Vocabulary> {
    let vocabulary = Vocabulary::from_config(&config.vocabulary);

    match &config.vocabulary.terms_file {
        Some(path) => {
            let terms = load_terms(path)?;
            info!(terms = terms.len(), path = %path.display(), "Loaded foundation terms");
            Ok(vocabulary.with_terms(terms))
        }
        None => Ok(vocabulary),
    }
}

fn load_directory<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let mut items = Vec::new();
    for path in json_files(dir)? {
        let content = fs::read_to_string(&path)?;
        let item = serde_json::from_str(&content)
            .map_err(|source| Error::InvalidSchema { path: path.clone(), source })?;
        debug!(path = %path.display(), "Loaded schema file");
        items.push(item);
    }

    Ok(items)
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_models_sorted_by_file_name() {
        let temp = TempDir::new().unwrap();
        let models = temp.path().join("models");
        write(&models, "b.json", r#"{"type": "Beta", "derivedFrom": "https://schema.org/Thing"}"#);
        write(&models, "a.json", r#"{"type": "Alpha", "subClassOf": "https://schema.org/Event"}"#);
        write(&models, "notes.txt", "ignored");

        let loaded = load_models(&models).unwrap();
        let names: Vec<&str> = loaded.iter().map(|m| m.type_id.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_invalid_file_names_path() {
        let temp = TempDir::new().unwrap();
        let models = temp.path().join("models");
        write(&models, "Broken.json", "{ not json");

        let err = load_models(&models).unwrap_err();
        match err {
            Error::InvalidSchema { path, .. } => assert!(path.ends_with("Broken.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_model_directory() {
        let temp = TempDir::new().unwrap();
        let err = load_models(&temp.path().join("models")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory(_)));
    }

    #[test]
    fn test_missing_enum_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("models"),
            "Event.json",
            r#"{"type": "Event", "subClassOf": "https://schema.org/Event"}"#,
        );

        let mut config = ClassgenConfig::default();
        config.schema.path = temp.path().to_path_buf();

        let schema = load_schema(&config).unwrap();
        assert_eq!(schema.models.len(), 1);
        assert!(schema.enums.is_empty());
    }

    #[test]
    fn test_terms_restrict_vocabulary() {
        let temp = TempDir::new().unwrap();
        let terms = temp.path().join("terms.json");
        fs::write(&terms, r#"["https://schema.org/Place", "Event"]"#).unwrap();

        let mut config = ClassgenConfig::default();
        config.vocabulary.terms_file = Some(terms);

        let vocabulary = load_vocabulary(&config).unwrap();
        assert!(vocabulary.contains("https://schema.org/Place"));
        assert!(vocabulary.contains("https://schema.org/Event"));
        assert!(!vocabulary.contains("https://schema.org/Widget"));
    }
}
