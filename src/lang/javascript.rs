//! JavaScript-family require finder with tree-sitter integration.
//!
//! The same finder drives the JavaScript, TypeScript and TSX grammars: all
//! three expose `call_expression` nodes with `function` and `arguments`
//! fields and share the string and template literal node kinds.

use tree_sitter::{Node, Parser, Tree};

use super::common::{
    cook_string_literal, is_identifier, ModuleReferences, ReferenceFinder, WordMatcher,
};
use super::registry::{create_parser_for_language, language_display_name, normalize_language_key};
use crate::core::config::{ExtractConfig, DEFAULT_REQUIRE_WORD};
use crate::core::errors::{ExtractError, Result};

#[cfg(test)]
#[path = "javascript_tests.rs"]
mod tests;

/// Longest snippet of offending source quoted in a syntax error message.
const MAX_ERROR_SNIPPET: usize = 32;

/// Finds `require(...)` style module references in JavaScript-family source.
///
/// References are reported in post-order (a call nested inside another call's
/// arguments is reported before the outer call) and never deduplicated.
pub struct JavaScriptRequireFinder {
    /// Tree-sitter parser for the configured grammar
    parser: Parser,

    /// Canonical language key ("js", "ts" or "tsx")
    language_key: &'static str,

    /// Matcher for the identifier treated as the require function
    matcher: WordMatcher,
}

impl JavaScriptRequireFinder {
    /// Create a finder for plain JavaScript and the `require` identifier
    pub fn new() -> Result<Self> {
        Self::for_language("js", DEFAULT_REQUIRE_WORD)
    }

    /// Create a finder for a language key and require identifier
    pub fn for_language(language: &str, word: &str) -> Result<Self> {
        let language_key = normalize_language_key(language).ok_or_else(|| {
            ExtractError::unsupported(format!("No require finder for language: {}", language))
        })?;

        if !is_identifier(word) {
            return Err(ExtractError::validation(
                format!("'{}' is not a valid identifier", word),
                "word",
            ));
        }

        let parser = create_parser_for_language(language_key)?;
        let matcher = WordMatcher::new(word)?;

        Ok(Self {
            parser,
            language_key,
            matcher,
        })
    }

    /// Create a finder from a validated configuration
    pub fn from_config(config: &ExtractConfig) -> Result<Self> {
        Self::for_language(&config.language, &config.word)
    }

    /// The identifier treated as the require function
    pub fn word(&self) -> &str {
        self.matcher.word()
    }

    /// Parse source text, failing on any syntax error in the tree.
    pub fn parse_tree(&mut self, source: &str) -> Result<Tree> {
        let language = language_display_name(self.language_key);
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::parse(language, "Parser produced no syntax tree"))?;

        if let Some(node) = first_syntax_error(tree.root_node()) {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("Missing `{}`", node.kind())
            } else {
                format!("Unexpected input `{}`", error_snippet(node, source))
            };
            return Err(ExtractError::parse_at(
                language,
                message,
                position.row + 1,
                position.column + 1,
            ));
        }

        Ok(tree)
    }

    /// Walk the tree in post-order and collect every require reference.
    fn collect_references(&self, root: Node, source: &str) -> ModuleReferences {
        let mut references = ModuleReferences::new();
        let mut cursor = root.walk();

        loop {
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                self.visit(cursor.node(), source, &mut references);
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return references;
                }
            }
        }
    }

    fn visit(&self, node: Node, source: &str, references: &mut ModuleReferences) {
        let argument = match node.kind() {
            "call_expression" => self.require_call_argument(node, source),
            "import_require_clause" if self.word() == DEFAULT_REQUIRE_WORD => {
                import_require_source(node)
            }
            _ => None,
        };

        if let Some(argument) = argument {
            classify_argument(argument, source, references);
        }
    }

    /// First argument of a call whose callee is the bare require identifier.
    fn require_call_argument<'tree>(&self, node: Node<'tree>, source: &str) -> Option<Node<'tree>> {
        let callee = node.child_by_field_name("function")?;
        if callee.kind() != "identifier" || node_text(callee, source)? != self.word() {
            return None;
        }

        // Tagged templates put a template_string in the arguments field.
        let arguments = node.child_by_field_name("arguments")?;
        if arguments.kind() != "arguments" {
            return None;
        }

        first_non_comment_child(arguments).map(unwrap_parentheses)
    }
}

impl ReferenceFinder for JavaScriptRequireFinder {
    fn find_references(&mut self, source: &str) -> Result<ModuleReferences> {
        if !self.matcher.occurs_in(source) {
            tracing::debug!(word = self.word(), "word absent from source, skipping parse");
            return Ok(ModuleReferences::new());
        }

        let tree = self.parse_tree(source)?;
        let references = self.collect_references(tree.root_node(), source);

        tracing::debug!(
            language = self.language_name(),
            strings = references.strings.len(),
            expressions = references.expressions.len(),
            "collected module references"
        );
        Ok(references)
    }

    fn language_name(&self) -> &str {
        language_display_name(self.language_key)
    }
}

fn classify_argument(argument: Node, source: &str, references: &mut ModuleReferences) {
    let Some(text) = node_text(argument, source) else {
        return;
    };

    match argument.kind() {
        "string" => {
            if let Some(body) = strip_delimiters(text) {
                let value = cook_string_literal(body);
                tracing::trace!(module = %value, "string reference");
                references.strings.push(value);
            }
        }
        "template_string" if !has_child_of_kind(argument, "template_substitution") => {
            if let Some(raw) = strip_delimiters(text) {
                tracing::trace!(module = raw, "template reference");
                references.strings.push(raw.to_string());
            }
        }
        _ => {
            tracing::trace!(expression = text, "dynamic reference");
            references.expressions.push(text.to_string());
        }
    }
}

/// The string operand of a TypeScript `import x = require("...")` clause.
fn import_require_source(node: Node) -> Option<Node> {
    node.child_by_field_name("source").or_else(|| {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "string");
        found
    })
}

fn first_non_comment_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    found
}

fn unwrap_parentheses(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        match first_non_comment_child(node) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn has_child_of_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == kind);
    found
}

fn node_text<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    source.get(node.byte_range())
}

/// Remove the opening and closing quote (or backtick) of a literal.
fn strip_delimiters(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    if open != close || !matches!(open, '"' | '\'' | '`') {
        return None;
    }
    Some(chars.as_str())
}

/// Pre-order search for the first ERROR or MISSING node, skipping clean subtrees.
fn first_syntax_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn error_snippet(node: Node, source: &str) -> String {
    let text = node_text(node, source).unwrap_or_default();
    let first_line = text.lines().next().unwrap_or_default().trim();
    let mut snippet: String = first_line.chars().take(MAX_ERROR_SNIPPET).collect();
    if first_line.chars().count() > MAX_ERROR_SNIPPET {
        snippet.push_str("...");
    }
    snippet
}
