//! Configuration management for classgen
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (classgen.toml)
//! - Environment variables (CLASSGEN__*)
//!
//! ## Example config file (classgen.toml):
//! ```toml
//! [schema]
//! path = "./data-models"
//! models_dir = "models"
//! enums_dir = "enums"
//!
//! [vocabulary]
//! foundation_prefix = "schema"
//! terms_file = "./schema-org-terms.json"
//!
//! [vocabulary.prefixes]
//! schema = "https://schema.org/"
//! oa = "https://openactive.io/"
//! beta = "https://openactive.io/ns-beta#"
//!
//! [target]
//! namespace = "OpenActive.NET"
//! foundation_namespace = "Schema.NET"
//!
//! [output]
//! format = "csharp"
//! fail_fast = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::codegen::config::TargetProfile;
use crate::error::Result;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassgenConfig {
    /// Where the data model files live
    #[serde(default)]
    pub schema: SchemaSourceConfig,

    /// Namespace prefixes and the foundation vocabulary
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Target language naming
    #[serde(default)]
    pub target: TargetProfile,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Schema source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSourceConfig {
    /// Root of the data model tree
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,

    /// Model files, relative to `path`
    #[serde(default = "default_models_dir")]
    pub models_dir: String,

    /// Enum files, relative to `path`
    #[serde(default = "default_enums_dir")]
    pub enums_dir: String,
}

/// Vocabulary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Prefix of the foundation vocabulary
    #[serde(default = "default_foundation_prefix")]
    pub foundation_prefix: String,

    /// JSON array of known foundation terms. Without it every name in the
    /// foundation namespace is accepted.
    #[serde(default)]
    pub terms_file: Option<PathBuf>,

    /// Prefix -> namespace IRI
    #[serde(default = "default_prefixes")]
    pub prefixes: BTreeMap<String, String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Stop at the first model that fails to compile
    #[serde(default)]
    pub fail_fast: bool,
}

/// What the CLI writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Resolved models as JSON
    #[default]
    Json,
    /// Rendered C# source
    #[value(name = "csharp")]
    CSharp,
}

// Default value functions
fn default_schema_path() -> PathBuf {
    PathBuf::from("./data-models")
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_enums_dir() -> String {
    "enums".to_string()
}

fn default_foundation_prefix() -> String {
    "schema".to_string()
}

fn default_prefixes() -> BTreeMap<String, String> {
    [
        ("schema", "https://schema.org/"),
        ("oa", "https://openactive.io/"),
        ("beta", "https://openactive.io/ns-beta#"),
    ]
    .into_iter()
    .map(|(p, n)| (p.to_string(), n.to_string()))
    .collect()
}

impl Default for SchemaSourceConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
            models_dir: default_models_dir(),
            enums_dir: default_enums_dir(),
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            foundation_prefix: default_foundation_prefix(),
            terms_file: None,
            prefixes: default_prefixes(),
        }
    }
}

impl ClassgenConfig {
    /// Load configuration from the default locations, plus `config_path` when given
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["classgen.toml", ".classgen.toml", "config/classgen.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("io", "openactive", "classgen") {
            let xdg_config = config_dir.config_dir().join("classgen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // CLASSGEN__OUTPUT__FAIL_FAST=true etc.
        builder = builder.add_source(
            Environment::with_prefix("CLASSGEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Absolute path of the model directory
    pub fn models_path(&self) -> PathBuf {
        self.schema_root().join(&self.schema.models_dir)
    }

    /// Absolute path of the enum directory
    pub fn enums_path(&self) -> PathBuf {
        self.schema_root().join(&self.schema.enums_dir)
    }

    fn schema_root(&self) -> PathBuf {
        if self.schema.path.is_absolute() {
            self.schema.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.schema.path)
        }
    }
}
