//! Lookup Tables
//!
//! EnumMap and ModelMap, built once per run from the whole schema and read
//! concurrently by every model compilation afterwards.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::vocabulary::{short_name, Vocabulary};

/// What the resolver needs to know about an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumInfo {
    /// Namespace IRI the enumeration is defined in
    pub namespace: String,
    /// Defined by the foundation vocabulary rather than locally
    pub is_external: bool,
}

/// Cross-model lookup tables
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    /// compact key -> enum info
    enums: HashMap<String, EnumInfo>,
    /// short model names
    models: HashSet<String>,
}

impl LookupTables {
    pub fn build(schema: &Schema, vocabulary: &Vocabulary) -> Self {
        let enums = schema
            .enums
            .iter()
            .map(|def| {
                let info = EnumInfo {
                    namespace: def.namespace.clone(),
                    is_external: vocabulary.contains(&def.namespace),
                };
                (vocabulary.compact(&def.type_id), info)
            })
            .collect();

        let models = schema
            .models
            .iter()
            .map(|model| short_name(&model.type_id).to_string())
            .collect();

        Self { enums, models }
    }

    /// Insert an enum under its compact key
    pub fn insert_enum(&mut self, compact_key: impl Into<String>, info: EnumInfo) {
        self.enums.insert(compact_key.into(), info);
    }

    /// Insert a model under its short name
    pub fn insert_model(&mut self, name: impl Into<String>) {
        self.models.insert(name.into());
    }

    pub fn enum_info(&self, compact_key: &str) -> Option<&EnumInfo> {
        self.enums.get(compact_key)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    /// Every short name a reference could have meant, for suggestions
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.models
            .iter()
            .map(String::as_str)
            .chain(self.enums.keys().map(|key| short_name(key)))
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
