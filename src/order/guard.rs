//! Forward-dependency guard
//!
//! Reordering top-level exports can change evaluation order, so a run where
//! any item references a name declared by a textually later item is left
//! unfixed. Detection is conservative and token-based: any `identifier` or
//! `type_identifier` occurring anywhere in an item's subtree counts as a
//! reference. Object literals never take this path; property order has no
//! evaluation-order hazard the rule cares about.

use std::collections::HashSet;

use tree_sitter::Node;

use crate::document::Document;

/// Names an export statement declares.
pub fn declared_names(export: Node<'_>, doc: &Document) -> Vec<String> {
    let mut names = Vec::new();
    let Some(decl) = export.child_by_field_name("declaration") else {
        return names;
    };
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "variable_declarator")
            {
                if let Some(name) = declarator.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        names.push(doc.text(name).to_string());
                    } else {
                        // Destructuring: every bound identifier counts
                        collect_identifiers(name, doc, &mut names);
                    }
                }
            }
        }
        _ => {
            if let Some(name) = decl.child_by_field_name("name") {
                names.push(doc.text(name).to_string());
            }
        }
    }
    names
}

/// All identifier-like tokens in a subtree, including the declared names.
pub fn referenced_names(node: Node<'_>, doc: &Document) -> HashSet<String> {
    let mut out = HashSet::new();
    collect_references(node, doc, &mut out);
    out
}

fn collect_references(node: Node<'_>, doc: &Document, out: &mut HashSet<String>) {
    match node.kind() {
        "identifier" | "type_identifier" | "shorthand_property_identifier" => {
            out.insert(doc.text(node).to_string());
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_references(child, doc, out);
    }
}

fn collect_identifiers(node: Node<'_>, doc: &Document, out: &mut Vec<String>) {
    if node.kind() == "identifier" || node.kind() == "shorthand_property_identifier_pattern" {
        out.push(doc.text(node).to_string());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_identifiers(child, doc, out);
    }
}

/// Does any item of the run reference a name declared by a later item?
///
/// Positions are in original source order. One hit suppresses the fix for the
/// whole run.
pub fn run_has_forward_dependency(items: &[Node<'_>], doc: &Document) -> bool {
    if items.len() < 2 {
        return false;
    }

    // declared[i] = names item i declares
    let declared: Vec<Vec<String>> = items.iter().map(|n| declared_names(*n, doc)).collect();

    // Names declared strictly after position i, built back to front
    let mut later: HashSet<&str> = HashSet::new();
    let mut later_at: Vec<HashSet<&str>> = vec![HashSet::new(); items.len()];
    for i in (0..items.len()).rev() {
        later_at[i] = later.clone();
        for name in &declared[i] {
            later.insert(name.as_str());
        }
    }

    for (i, item) in items.iter().enumerate() {
        if later_at[i].is_empty() {
            continue;
        }
        let refs = referenced_names(*item, doc);
        if refs.iter().any(|r| later_at[i].contains(r.as_str())) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn exports(content: &str) -> (Document, Vec<(usize, usize)>) {
        let doc = Document::parse(content, Path::new("t.ts")).unwrap();
        let spans: Vec<(usize, usize)> = doc
            .nodes_of_kind("export_statement")
            .iter()
            .map(|n| (n.start_byte(), n.end_byte()))
            .collect();
        (doc, spans)
    }

    fn check(content: &str) -> bool {
        let (doc, spans) = exports(content);
        let nodes: Vec<_> = doc
            .nodes_of_kind("export_statement")
            .into_iter()
            .filter(|n| spans.contains(&(n.start_byte(), n.end_byte())))
            .collect();
        run_has_forward_dependency(&nodes, &doc)
    }

    #[test]
    fn test_independent_exports() {
        assert!(!check("export const b = 2;\nexport const a = 1;\n"));
    }

    #[test]
    fn test_forward_reference_detected() {
        assert!(check("export const b = a + 1;\nexport const a = 1;\n"));
    }

    #[test]
    fn test_backward_reference_allowed() {
        assert!(!check("export const a = 1;\nexport const b = a + 1;\n"));
    }

    #[test]
    fn test_forward_reference_in_function_body() {
        // Conservative: hoisting would make this legal at runtime, but the
        // token appears before its declaration so the run stays unfixed
        assert!(check(
            "export const use = () => helper();\nexport function helper() {}\n"
        ));
    }

    #[test]
    fn test_type_reference_detected() {
        assert!(check(
            "export const x: T = y;\nexport type T = number;\nexport const y = 1;\n"
        ));
    }

    #[test]
    fn test_member_access_property_not_a_reference() {
        assert!(!check(
            "export const first = config.second;\nexport const second = 2;\n"
        ));
    }

    #[test]
    fn test_declared_names_multi_declarator() {
        let (doc, _) = exports("export const a = 1, b = 2;\n");
        let nodes = doc.nodes_of_kind("export_statement");
        assert_eq!(declared_names(nodes[0], &doc), vec!["a", "b"]);
    }

    #[test]
    fn test_declared_names_function_and_type() {
        let (doc, _) = exports("export function f() {}\nexport type T = string;\n");
        let nodes = doc.nodes_of_kind("export_statement");
        assert_eq!(declared_names(nodes[0], &doc), vec!["f"]);
        assert_eq!(declared_names(nodes[1], &doc), vec!["T"]);
    }
}
