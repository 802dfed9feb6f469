//! Language-specific reference finders built on tree-sitter grammars.

pub mod common;
pub mod javascript;
pub mod registry;

pub use common::{ModuleReferences, ReferenceFinder, WordMatcher};
pub use javascript::JavaScriptRequireFinder;
pub use registry::{
    create_parser_for_language, get_tree_sitter_language, normalize_language_key,
    registered_languages, LanguageInfo,
};
