//! Parsed source document backed by a tree-sitter syntax tree
//!
//! A [`Document`] owns the original text and one immutable parse of it. All
//! analysis works on byte ranges into that text; nothing here mutates the
//! tree. Inline disable comments (`// collate-disable <rule>`) are scanned
//! once at parse time.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("incompatible tree-sitter grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse {0}")]
    Parse(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source language, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Javascript,
    Typescript,
    Tsx,
}

impl SourceLanguage {
    /// Detect the language from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::Javascript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::Typescript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    fn grammar(self) -> Language {
        match self {
            SourceLanguage::Javascript => tree_sitter_javascript::LANGUAGE.into(),
            SourceLanguage::Typescript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A parsed source file
#[derive(Debug)]
pub struct Document {
    source: String,
    tree: Tree,
    path: PathBuf,
    language: SourceLanguage,
    line_starts: Vec<usize>,
    disabled_lines: HashMap<String, HashSet<usize>>,
    disabled_file_rules: HashSet<String>,
}

impl Document {
    /// Parse source text, picking the grammar from the path's extension.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let language = SourceLanguage::from_path(path).ok_or_else(|| {
            ParseError::UnsupportedExtension(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string(),
            )
        })?;
        Self::parse_as(content, path, language)
    }

    /// Parse source text with an explicit language.
    pub fn parse_as(
        content: &str,
        path: &Path,
        language: SourceLanguage,
    ) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&language.grammar())?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ParseError::Parse(path.to_path_buf()))?;

        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        let (disabled_lines, disabled_file_rules) = parse_disable_comments(content);

        Ok(Self {
            source: content.to_string(),
            tree,
            path: path.to_path_buf(),
            language,
            line_starts,
            disabled_lines,
            disabled_file_rules,
        })
    }

    /// Root node of the parse tree (`program`).
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The full source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The file path this document was parsed from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The language this document was parsed as.
    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Exact text of a node.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    /// Exact text of a byte range.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    /// 1-based line number containing a byte offset.
    pub fn line_of(&self, byte: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= byte)
    }

    /// 1-based (line, column) of a byte offset. Columns count characters,
    /// not bytes.
    pub fn line_col(&self, byte: usize) -> (usize, usize) {
        let line = self.line_of(byte);
        let start = self.line_starts[line - 1];
        let col = self.source[start..byte].chars().count() + 1;
        (line, col)
    }

    /// Byte offset of the start of the line containing `byte`.
    pub fn line_start(&self, byte: usize) -> usize {
        self.line_starts[self.line_of(byte) - 1]
    }

    /// Get source line at line number (1-based).
    pub fn get_source_line(&self, line: usize) -> Option<&str> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .map(|&next| next - 1)
            .unwrap_or(self.source.len());
        Some(&self.source[start..end])
    }

    /// All `comment` nodes in the tree, in source order.
    pub fn comments(&self) -> Vec<Node<'_>> {
        let mut out = Vec::new();
        collect_kind(self.root(), "comment", &mut out);
        out
    }

    /// All nodes of a given kind, in source order.
    pub fn nodes_of_kind<'a>(&'a self, kind: &str) -> Vec<Node<'a>> {
        let mut out = Vec::new();
        collect_kind(self.root(), kind, &mut out);
        out
    }

    /// Check if a rule is disabled at a specific line (inline comments).
    pub fn is_rule_disabled(&self, rule_id: &str, line: usize) -> bool {
        for id in [rule_id, "all"] {
            if let Some(lines) = self.disabled_lines.get(id) {
                if lines.contains(&line) {
                    return true;
                }
            }
        }
        false
    }

    /// Check if a rule is disabled for the entire file.
    pub fn is_rule_disabled_for_file(&self, rule_id: &str) -> bool {
        self.disabled_file_rules.contains("all") || self.disabled_file_rules.contains(rule_id)
    }
}

/// Pre-order collection of nodes with a given kind.
fn collect_kind<'a>(node: Node<'a>, kind: &str, out: &mut Vec<Node<'a>>) {
    if node.kind() == kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_kind(child, kind, out);
    }
}

type DisableParseResult = (HashMap<String, HashSet<usize>>, HashSet<String>);

/// Scan source lines for disable comments.
///
/// Supported forms (in `//` or `/* */` comments):
/// - `collate-disable <rule>` — disable on this line
/// - `collate-disable-next-line <rule>` — disable on the next line
/// - `collate-disable-file <rule>` — disable for the whole file
///
/// `<rule>` may be `all`.
fn parse_disable_comments(content: &str) -> DisableParseResult {
    let mut disabled_lines: HashMap<String, HashSet<usize>> = HashMap::new();
    let mut disabled_file_rules: HashSet<String> = HashSet::new();

    let re = match Regex::new(r"collate-disable(-next-line|-file)?\s+([A-Za-z0-9*_-]+)") {
        Ok(re) => re,
        Err(_) => return (disabled_lines, disabled_file_rules),
    };

    for (i, line) in content.lines().enumerate() {
        let line_num = i + 1;
        // Only honor the directive inside a comment
        if !line.contains("//") && !line.contains("/*") {
            continue;
        }
        for cap in re.captures_iter(line) {
            let rule_id = cap[2].to_string();
            match cap.get(1).map(|m| m.as_str()) {
                Some("-file") => {
                    disabled_file_rules.insert(rule_id);
                }
                Some("-next-line") => {
                    disabled_lines
                        .entry(rule_id)
                        .or_default()
                        .insert(line_num + 1);
                }
                _ => {
                    disabled_lines.entry(rule_id).or_default().insert(line_num);
                }
            }
        }
    }

    (disabled_lines, disabled_file_rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_js(content: &str) -> Document {
        Document::parse(content, Path::new("test.js")).unwrap()
    }

    #[test]
    fn test_parse_javascript() {
        let doc = parse_js("const x = 1;\n");
        assert_eq!(doc.root().kind(), "program");
        assert!(!doc.root().has_error());
    }

    #[test]
    fn test_parse_typescript() {
        let doc =
            Document::parse("export type A = string;\n", Path::new("test.ts")).unwrap();
        assert_eq!(doc.root().kind(), "program");
        assert!(!doc.root().has_error());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Document::parse("x", Path::new("test.py")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(
            SourceLanguage::from_path(Path::new("a.tsx")),
            Some(SourceLanguage::Tsx)
        );
        assert_eq!(
            SourceLanguage::from_path(Path::new("a.mjs")),
            Some(SourceLanguage::Javascript)
        );
        assert_eq!(SourceLanguage::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_line_col() {
        let doc = parse_js("const a = 1;\nconst b = 2;\n");
        assert_eq!(doc.line_col(0), (1, 1));
        assert_eq!(doc.line_col(13), (2, 1));
        assert_eq!(doc.line_col(19), (2, 7));
        assert_eq!(doc.line_of(25), 2);
    }

    #[test]
    fn test_line_col_counts_chars_not_bytes() {
        // "α" is two bytes but one column
        let doc = parse_js("const α = 1; const b = 2;\n");
        let byte = doc.source().find("const b").unwrap();
        assert_eq!(byte, 14);
        assert_eq!(doc.line_col(byte), (1, 14));
    }

    #[test]
    fn test_get_source_line() {
        let doc = parse_js("const a = 1;\nconst b = 2;\n");
        assert_eq!(doc.get_source_line(1), Some("const a = 1;"));
        assert_eq!(doc.get_source_line(2), Some("const b = 2;"));
        assert_eq!(doc.get_source_line(0), None);
    }

    #[test]
    fn test_comments_enumeration() {
        let doc = parse_js("// one\nconst a = 1; // two\n/* three */\n");
        let comments = doc.comments();
        assert_eq!(comments.len(), 3);
        assert_eq!(doc.text(comments[0]), "// one");
        assert_eq!(doc.text(comments[2]), "/* three */");
    }

    #[test]
    fn test_node_text() {
        let doc = parse_js("const abc = 1;\n");
        let decl = doc.root().named_child(0).unwrap();
        assert_eq!(doc.text(decl), "const abc = 1;");
    }

    #[test]
    fn test_disable_line() {
        let doc = parse_js("const o = { b: 1, a: 2 }; // collate-disable sort-keys\n");
        assert!(doc.is_rule_disabled("sort-keys", 1));
        assert!(!doc.is_rule_disabled("sort-exports", 1));
    }

    #[test]
    fn test_disable_next_line() {
        let doc = parse_js("// collate-disable-next-line sort-keys\nconst o = { b: 1, a: 2 };\n");
        assert!(doc.is_rule_disabled("sort-keys", 2));
        assert!(!doc.is_rule_disabled("sort-keys", 1));
    }

    #[test]
    fn test_disable_file() {
        let doc = parse_js("/* collate-disable-file all */\nconst o = { b: 1, a: 2 };\n");
        assert!(doc.is_rule_disabled_for_file("sort-keys"));
        assert!(doc.is_rule_disabled_for_file("sort-exports"));
    }

    #[test]
    fn test_directive_outside_comment_ignored() {
        let doc = parse_js("const s = \"collate-disable sort-keys\";\n");
        assert!(!doc.is_rule_disabled("sort-keys", 1));
    }
}
