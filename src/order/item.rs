//! Item classification
//!
//! Turns raw sibling nodes (object members, export statements) into
//! [`OrderableItem`]s carrying a sort name and kind. Members that cannot be
//! named (spreads, computed keys, re-export clauses, destructuring) classify
//! to `None`; a `None` anywhere in a run leaves the run diagnosable but not
//! fixable.

use tree_sitter::Node;

use crate::document::Document;

/// What a run of siblings is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Members of an object literal.
    ObjectLiteral,
    /// A maximal contiguous run of top-level `export` statements.
    ExportRun,
}

/// Coarse kind of an item, used by the grouping and type-first tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Plain value: data property, `const`/`let`/`var`, class, enum.
    Value,
    /// Function-valued: method, function declaration, arrow/function initializer.
    Function,
    /// Type-only export: `type` alias or `interface`.
    Type,
}

/// A classified, sortable item.
///
/// Holds no tree references so it can be built and compared independently of
/// a parse. `index` is the item's position among the raw siblings of its run.
#[derive(Debug, Clone)]
pub struct OrderableItem {
    /// Name used for ordering comparisons.
    pub name: String,
    /// Coarse kind for the grouping tiers.
    pub kind: ItemKind,
    /// Whether the item's text can be moved verbatim. Multi-declarator
    /// exports are diagnosable under their first name but not movable.
    pub simple: bool,
    /// Position among the raw siblings of the run.
    pub index: usize,
    /// Byte span of the item node itself (comments excluded).
    pub start_byte: usize,
    /// End of the item node, exclusive.
    pub end_byte: usize,
}

/// Classify one raw sibling. `None` means the item has no usable sort name.
pub fn classify(node: Node<'_>, doc: &Document, container: ContainerKind, index: usize) -> Option<OrderableItem> {
    match container {
        ContainerKind::ObjectLiteral => classify_property(node, doc, index),
        ContainerKind::ExportRun => classify_export(node, doc, index),
    }
}

fn classify_property(node: Node<'_>, doc: &Document, index: usize) -> Option<OrderableItem> {
    let (name, kind) = match node.kind() {
        "pair" => {
            let key = node.child_by_field_name("key")?;
            let name = property_key_name(key, doc)?;
            let kind = match node.child_by_field_name("value") {
                Some(v) if is_function_value(v.kind()) => ItemKind::Function,
                _ => ItemKind::Value,
            };
            (name, kind)
        }
        "shorthand_property_identifier" => (doc.text(node).to_string(), ItemKind::Value),
        "method_definition" => {
            let key = node.child_by_field_name("name")?;
            (property_key_name(key, doc)?, ItemKind::Function)
        }
        // spread_element, computed keys inside pair are handled by
        // property_key_name returning None; anything else is unknown
        _ => return None,
    };

    Some(OrderableItem {
        name,
        kind,
        simple: true,
        index,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    })
}

/// Resolve a property key to its sort name.
///
/// Identifiers and string keys use their (unquoted) text; numeric keys use
/// their literal text. Computed keys and template strings have no static name.
fn property_key_name(key: Node<'_>, doc: &Document) -> Option<String> {
    match key.kind() {
        "property_identifier" | "identifier" | "number" => Some(doc.text(key).to_string()),
        "string" => {
            let mut cursor = key.walk();
            let fragment = key
                .children(&mut cursor)
                .find(|c| c.kind() == "string_fragment");
            // Empty string key has no fragment node
            Some(fragment.map(|f| doc.text(f).to_string()).unwrap_or_default())
        }
        _ => None,
    }
}

fn classify_export(node: Node<'_>, doc: &Document, index: usize) -> Option<OrderableItem> {
    // Clauses, re-exports and `export default` carry no single sortable name
    let decl = node.child_by_field_name("declaration")?;

    let named = |kind: ItemKind, simple: bool| -> Option<OrderableItem> {
        let name = decl.child_by_field_name("name")?;
        Some(OrderableItem {
            name: doc.text(name).to_string(),
            kind,
            simple,
            index,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        })
    };

    match decl.kind() {
        "function_declaration" | "generator_function_declaration" => {
            named(ItemKind::Function, true)
        }
        "class_declaration" | "abstract_class_declaration" | "enum_declaration" => {
            named(ItemKind::Value, true)
        }
        "type_alias_declaration" | "interface_declaration" => named(ItemKind::Type, true),
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            let declarators: Vec<Node<'_>> = decl
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "variable_declarator")
                .collect();
            let first = declarators.first()?;
            let name = first.child_by_field_name("name")?;
            if name.kind() != "identifier" {
                // Destructuring pattern: no single name
                return None;
            }
            let kind = match first.child_by_field_name("value") {
                Some(v) if is_function_value(v.kind()) => ItemKind::Function,
                _ => ItemKind::Value,
            };
            Some(OrderableItem {
                name: doc.text(name).to_string(),
                kind,
                simple: declarators.len() == 1,
                index,
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
            })
        }
        _ => None,
    }
}

/// Does a value node's kind denote a function?
fn is_function_value(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}
