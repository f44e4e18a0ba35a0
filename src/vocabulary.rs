//! Vocabulary namespaces
//!
//! Type references arrive as full IRIs (`https://schema.org/Event`), compact
//! keys (`schema:Event`) or local fragments (`#Place`). This module turns
//! them into the two keys the resolver works with:
//! - the short name (`Event`), used for class names and the model table
//! - the compact key (`schema:Event`), used for the enum table and for
//!   foundation membership
//!
//! The foundation vocabulary is the externally maintained type library
//! (schema.org) that generated classes extend and reference.

use std::collections::HashSet;

use crate::config::VocabularyConfig;

/// Last path segment of a type reference.
///
/// `https://schema.org/Event`, `schema:Event` and `#Event` all yield `Event`.
pub fn short_name(reference: &str) -> &str {
    reference
        .rsplit(|c| matches!(c, '/' | '#' | ':'))
        .next()
        .unwrap_or(reference)
}

/// Namespace prefixes plus the foundation vocabulary membership test
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// (prefix, namespace IRI), longest namespace first
    prefixes: Vec<(String, String)>,
    foundation_prefix: String,
    /// Known foundation terms. `None` accepts every name in the foundation namespace.
    terms: Option<HashSet<String>>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::from_config(&VocabularyConfig::default())
    }
}

impl Vocabulary {
    pub fn new<I, P, N>(prefixes: I, foundation_prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        let mut prefixes: Vec<(String, String)> = prefixes
            .into_iter()
            .map(|(p, n)| (p.into(), n.into()))
            .collect();
        // ns-beta# must win over the bare openactive.io/ namespace
        prefixes.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));

        Self {
            prefixes,
            foundation_prefix: foundation_prefix.into(),
            terms: None,
        }
    }

    pub fn from_config(config: &VocabularyConfig) -> Self {
        Self::new(
            config.prefixes.iter().map(|(p, n)| (p.as_str(), n.as_str())),
            config.foundation_prefix.as_str(),
        )
    }

    /// Restrict foundation membership to a known term list
    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms = Some(terms.into_iter().map(Into::into).collect());
        self
    }

    /// Replace a known namespace IRI with its prefix.
    ///
    /// References outside every known namespace come back unchanged.
    pub fn compact(&self, reference: &str) -> String {
        for (prefix, namespace) in &self.prefixes {
            if let Some(rest) = reference.strip_prefix(namespace.as_str()) {
                return format!("{}:{}", prefix, rest);
            }
        }
        reference.to_string()
    }

    /// Whether a reference (type or bare namespace) belongs to the foundation vocabulary
    pub fn contains(&self, reference: &str) -> bool {
        let compact = self.compact(reference);
        let Some(term) = compact
            .strip_prefix(self.foundation_prefix.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
        else {
            return false;
        };

        if term.is_empty() {
            return true;
        }
        self.terms.as_ref().map_or(true, |terms| terms.contains(term))
    }

    /// Whether `reference` is exactly the foundation term `term`
    pub fn is_foundation_term(&self, reference: &str, term: &str) -> bool {
        let compact = self.compact(reference);
        compact
            .strip_prefix(self.foundation_prefix.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            == Some(term)
    }
}
