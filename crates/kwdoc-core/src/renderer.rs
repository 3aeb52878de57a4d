//! Run-scoped rendering context.

use crate::config::Config;
use crate::highlight::{self, robot, GenericLexer};
use crate::markup::{self, MarkupBlock};
use crate::model::{FunctionRecord, KeywordSignature, LibraryDocument, LibrarySource};
use crate::signature;
use crate::vocabulary::{KeywordNamespaces, KeywordVocabulary, StandardLibraries};
use tracing::debug;

/// Owns everything one documentation run shares between documents: the
/// configuration, the keyword namespace provider, an optional external lexer
/// and the keyword vocabulary cache.
pub struct DocRenderer {
    config: Config,
    namespaces: Box<dyn KeywordNamespaces>,
    lexer: Option<Box<dyn GenericLexer>>,
    vocabulary: KeywordVocabulary,
    document_keywords: Vec<String>,
}

impl Default for DocRenderer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DocRenderer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            namespaces: Box::new(StandardLibraries),
            lexer: None,
            vocabulary: KeywordVocabulary::new(),
            document_keywords: Vec::new(),
        }
    }

    pub fn with_namespaces(mut self, namespaces: impl KeywordNamespaces + 'static) -> Self {
        self.namespaces = Box::new(namespaces);
        self
    }

    pub fn with_lexer(mut self, lexer: impl GenericLexer + 'static) -> Self {
        self.lexer = Some(Box::new(lexer));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Keyword names of the document being rendered; they are always part of
    /// the highlighting vocabulary.
    pub fn set_document_keywords(&mut self, names: Vec<String>) {
        self.document_keywords = names;
    }

    pub fn render_markup(&mut self, text: &str) -> String {
        let blocks = markup::parse_blocks(text);
        self.render_blocks(&blocks)
    }

    fn render_blocks(&mut self, blocks: &[MarkupBlock]) -> String {
        markup::render_blocks(blocks, |lines, language| self.render_code_block(lines, language))
    }

    pub fn render_code_block(&mut self, lines: &[String], language: &str) -> String {
        let vocabulary: &[String] = if language == robot::LANGUAGE {
            self.vocabulary.get(
                &self.config,
                self.namespaces.as_ref(),
                &self.document_keywords,
            )
        } else {
            &[]
        };
        highlight::render_code_block(lines, language, vocabulary, self.lexer.as_deref())
    }

    pub fn extract_signature(&mut self, record: &FunctionRecord) -> KeywordSignature {
        let blocks = markup::parse_blocks(&record.docstring);
        KeywordSignature {
            name: signature::keyword_name(record),
            description: self.render_blocks(&blocks),
            example: signature::example(&blocks),
            parameters: signature::parameters(record),
            return_type: signature::return_type(record),
            source_line: record.line,
        }
    }

    /// Render a scanned library. Its keyword names become the document
    /// keywords for the duration of the call.
    pub fn build_library(&mut self, source: &LibrarySource) -> LibraryDocument {
        self.set_document_keywords(source.functions.iter().map(signature::keyword_name).collect());

        let description = self.render_markup(&source.docstring);
        let keywords: Vec<KeywordSignature> = source
            .functions
            .iter()
            .map(|f| self.extract_signature(f))
            .collect();
        debug!(library = %source.name, keywords = keywords.len(), "rendered library");

        LibraryDocument {
            name: source.name.clone(),
            version: source.version.clone(),
            scope: source.scope.clone(),
            description,
            keywords,
        }
    }
}
