//! The set of keyword names recognized when highlighting Robot Framework
//! snippets, and the providers it is built from.

use crate::config::Config;
use crate::stdlib;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("unknown keyword namespace: {0}")]
    Unknown(String),
    #[error("keyword namespace {namespace} is unavailable: {reason}")]
    Unavailable { namespace: String, reason: String },
}

/// Resolves a namespace identifier to the keyword names it defines.
pub trait KeywordNamespaces {
    fn keyword_names(&self, namespace: &str) -> Result<Vec<String>, NamespaceError>;
}

/// The Robot Framework standard libraries, compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardLibraries;

impl KeywordNamespaces for StandardLibraries {
    fn keyword_names(&self, namespace: &str) -> Result<Vec<String>, NamespaceError> {
        stdlib::keywords(namespace)
            .map(|names| names.iter().map(|n| n.to_string()).collect())
            .ok_or_else(|| NamespaceError::Unknown(namespace.to_string()))
    }
}

/// Cached, sorted and deduplicated keyword names.
///
/// Populated on first use and rebuilt whenever one of the current document's
/// own keywords is missing from the cached set.
#[derive(Debug, Default)]
pub struct KeywordVocabulary {
    cached: Option<Vec<String>>,
}

impl KeywordVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        config: &Config,
        namespaces: &dyn KeywordNamespaces,
        own_keywords: &[String],
    ) -> &[String] {
        let stale = match &self.cached {
            Some(cached) => own_keywords
                .iter()
                .any(|k| cached.binary_search(k).is_err()),
            None => true,
        };
        if stale {
            self.cached = None;
        }
        self.cached
            .get_or_insert_with(|| build(config, namespaces, own_keywords))
    }

    /// Whether a vocabulary has been built.
    pub fn is_populated(&self) -> bool {
        self.cached.is_some()
    }
}

fn build(
    config: &Config,
    namespaces: &dyn KeywordNamespaces,
    own_keywords: &[String],
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for namespace in &config.standard_libraries {
        match namespaces.keyword_names(namespace) {
            Ok(found) => names.extend(found),
            Err(e) => warn!("skipping keyword namespace {namespace}: {e}"),
        }
    }
    names.extend(own_keywords.iter().cloned());
    names.extend(config.custom_keywords.iter().cloned());

    names.retain(|n| !n.trim().is_empty());
    names.sort();
    names.dedup();
    debug!(count = names.len(), "built keyword vocabulary");
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts lookups so tests can observe cache rebuilds.
    struct Counting {
        calls: Cell<usize>,
    }

    impl KeywordNamespaces for Counting {
        fn keyword_names(&self, namespace: &str) -> Result<Vec<String>, NamespaceError> {
            self.calls.set(self.calls.get() + 1);
            match namespace {
                "Broken" => Err(NamespaceError::Unavailable {
                    namespace: namespace.to_string(),
                    reason: "import failed".to_string(),
                }),
                _ => Ok(vec!["Log".to_string(), "Sleep".to_string()]),
            }
        }
    }

    fn config(libraries: &[&str], custom: &[&str]) -> Config {
        Config {
            custom_keywords: custom.iter().map(|s| s.to_string()).collect(),
            standard_libraries: libraries.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_sources_sorted_and_deduplicated() {
        let provider = Counting { calls: Cell::new(0) };
        let mut vocabulary = KeywordVocabulary::new();
        let names = vocabulary.get(
            &config(&["A"], &["Sleep", "Custom Step"]),
            &provider,
            &owned(&["Open Thing"]),
        );
        assert_eq!(names, owned(&["Custom Step", "Log", "Open Thing", "Sleep"]).as_slice());
    }

    #[test]
    fn failing_namespace_is_skipped() {
        let provider = Counting { calls: Cell::new(0) };
        let mut vocabulary = KeywordVocabulary::new();
        let names = vocabulary.get(&config(&["Broken", "A"], &[]), &provider, &[]);
        assert_eq!(names, owned(&["Log", "Sleep"]).as_slice());
    }

    #[test]
    fn cache_is_reused_while_fresh() {
        let provider = Counting { calls: Cell::new(0) };
        let cfg = config(&["A"], &[]);
        let own = owned(&["Open Thing"]);
        let mut vocabulary = KeywordVocabulary::new();
        vocabulary.get(&cfg, &provider, &own);
        vocabulary.get(&cfg, &provider, &own);
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn cache_rebuilds_for_new_document() {
        let provider = Counting { calls: Cell::new(0) };
        let cfg = config(&["A"], &[]);
        let mut vocabulary = KeywordVocabulary::new();
        vocabulary.get(&cfg, &provider, &owned(&["First Library Keyword"]));
        let names = vocabulary.get(&cfg, &provider, &owned(&["Second Library Keyword"]));
        assert!(names.contains(&"Second Library Keyword".to_string()));
        assert!(!names.contains(&"First Library Keyword".to_string()));
        assert_eq!(provider.calls.get(), 2);
    }

    #[test]
    fn standard_libraries_resolve_known_names() {
        let names = StandardLibraries
            .keyword_names("robot.libraries.BuiltIn")
            .unwrap();
        assert!(names.contains(&"Should Be Equal".to_string()));
        assert!(matches!(
            StandardLibraries.keyword_names("NoSuchLibrary"),
            Err(NamespaceError::Unknown(_))
        ));
    }

    #[test]
    fn default_config_vocabulary() {
        let mut vocabulary = KeywordVocabulary::new();
        assert!(!vocabulary.is_populated());
        let names = vocabulary.get(&Config::default(), &StandardLibraries, &[]);
        assert!(names.contains(&"Open Application".to_string()));
        assert!(names.contains(&"Append To List".to_string()));
        assert!(vocabulary.is_populated());
    }
}
