//! Factory utilities and metadata for the built-in grammars.

use tree_sitter::{Language, Parser};

use crate::core::errors::{ExtractError, Result};

/// Metadata describing one of the built-in grammars.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInfo {
    /// Canonical short key (matches CLI/config usage, e.g. "js").
    pub key: &'static str,
    /// Human-friendly display name.
    pub name: &'static str,
    /// Source file extensions conventionally parsed with this grammar.
    pub extensions: &'static [&'static str],
}

const REGISTERED_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        key: "js",
        name: "JavaScript",
        extensions: &["js", "jsx", "mjs", "cjs"],
    },
    LanguageInfo {
        key: "ts",
        name: "TypeScript",
        extensions: &["ts", "mts", "cts"],
    },
    LanguageInfo {
        key: "tsx",
        name: "TSX",
        extensions: &["tsx"],
    },
];

/// Return the languages that are compiled into this build.
pub fn registered_languages() -> &'static [LanguageInfo] {
    REGISTERED_LANGUAGES
}

/// Normalizes a language identifier to its canonical key.
pub fn normalize_language_key(language: &str) -> Option<&'static str> {
    match language.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
        "js" | "jsx" | "mjs" | "cjs" | "javascript" | "node" => Some("js"),
        "ts" | "mts" | "cts" | "typescript" => Some("ts"),
        "tsx" => Some("tsx"),
        _ => None,
    }
}

/// Display name used in diagnostics for a canonical language key.
pub fn language_display_name(language_key: &str) -> &'static str {
    match normalize_language_key(language_key) {
        Some("ts") => "typescript",
        Some("tsx") => "tsx",
        _ => "javascript",
    }
}

/// Get tree-sitter language for a given language key
pub fn get_tree_sitter_language(language_key: &str) -> Result<Language> {
    match normalize_language_key(language_key) {
        Some("js") => Ok(tree_sitter_javascript::LANGUAGE.into()),
        Some("ts") => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        Some("tsx") => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        _ => Err(ExtractError::unsupported(format!(
            "No tree-sitter grammar for: {}",
            language_key
        ))),
    }
}

/// Create a new parser for the given language
pub fn create_parser_for_language(language_key: &str) -> Result<Parser> {
    let mut parser = Parser::new();
    let tree_sitter_language = get_tree_sitter_language(language_key)?;
    parser.set_language(&tree_sitter_language).map_err(|e| {
        ExtractError::parse(
            language_display_name(language_key),
            format!("Failed to set parser language: {}", e),
        )
    })?;
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_key_normalization() {
        for alias in ["js", "JSX", ".mjs", "cjs", "javascript", "node"] {
            assert_eq!(normalize_language_key(alias), Some("js"), "alias {}", alias);
        }
        for alias in ["ts", "mts", "cts", "TypeScript"] {
            assert_eq!(normalize_language_key(alias), Some("ts"), "alias {}", alias);
        }
        assert_eq!(normalize_language_key("tsx"), Some("tsx"));
        assert_eq!(normalize_language_key("python"), None);
        assert_eq!(normalize_language_key(""), None);
    }

    #[test]
    fn test_parser_creation_for_registered_languages() {
        for info in registered_languages() {
            let parser = create_parser_for_language(info.key);
            assert!(parser.is_ok(), "Should create parser for {}", info.key);
        }
    }

    #[test]
    fn test_unknown_language_is_unsupported() {
        let err = get_tree_sitter_language("cobol").unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported { .. }));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(language_display_name("mjs"), "javascript");
        assert_eq!(language_display_name("typescript"), "typescript");
        assert_eq!(language_display_name("tsx"), "tsx");
    }
}
