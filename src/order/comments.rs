//! Comment ownership
//!
//! Partitions run-level comments among the items they document using line
//! adjacency: a comment starting on the same line a construct ends on trails
//! that construct; any other comment preceding an item leads it. Block
//! comments are indivisible and follow the same rule by their start line.

use tree_sitter::Node;

/// Comments leading `item`: before its start, after `lower_bound`, excluding
/// comments that start on `prev_end_row` (those trail the previous construct,
/// whether that is the previous item, the container's opening token, or the
/// statement before the run).
pub fn leading_comments<'a>(
    comments: &[Node<'a>],
    item: Node<'a>,
    lower_bound: usize,
    prev_end_row: Option<usize>,
) -> Vec<Node<'a>> {
    comments
        .iter()
        .copied()
        .filter(|c| {
            c.end_byte() <= item.start_byte()
                && c.start_byte() >= lower_bound
                && prev_end_row != Some(c.start_position().row)
        })
        .collect()
}

/// Comments trailing `item`: starting at or after its end, on the same line
/// its end lies on, and before the next item (when there is one).
pub fn trailing_comments<'a>(
    comments: &[Node<'a>],
    item: Node<'a>,
    next: Option<Node<'a>>,
) -> Vec<Node<'a>> {
    comments
        .iter()
        .copied()
        .filter(|c| {
            c.start_byte() >= item.end_byte()
                && c.start_position().row == item.end_position().row
                && next.map_or(true, |n| c.end_byte() <= n.start_byte())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::path::Path;

    fn members_and_comments(content: &str) -> (Document, Vec<(usize, usize)>) {
        let doc = Document::parse(content, Path::new("t.js")).unwrap();
        let spans: Vec<(usize, usize)> = {
            let objects = doc.nodes_of_kind("object");
            let object = objects[0];
            let mut cursor = object.walk();
            object
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|n| (n.start_byte(), n.end_byte()))
                .collect()
        };
        (doc, spans)
    }

    fn node_at<'a>(doc: &'a Document, span: (usize, usize)) -> Node<'a> {
        let objects = doc.nodes_of_kind("object");
        let mut cursor = objects[0].walk();
        let node = objects[0]
            .named_children(&mut cursor)
            .find(|n| (n.start_byte(), n.end_byte()) == span)
            .unwrap();
        node
    }

    fn object_comments<'a>(doc: &'a Document) -> Vec<Node<'a>> {
        let objects = doc.nodes_of_kind("object");
        let mut cursor = objects[0].walk();
        objects[0]
            .children(&mut cursor)
            .filter(|c| c.kind() == "comment")
            .collect()
    }

    #[test]
    fn test_leading_comment_owned_by_item() {
        let src = "const o = {\n  // about b\n  b: 1,\n  a: 2,\n};\n";
        let (doc, spans) = members_and_comments(src);
        let b = node_at(&doc, spans[0]);
        let comments = object_comments(&doc);
        let lead = leading_comments(&comments, b, 0, None);
        assert_eq!(lead.len(), 1);
        assert_eq!(doc.text(lead[0]), "// about b");
    }

    #[test]
    fn test_trailing_same_line_belongs_to_prev() {
        let src = "const o = {\n  b: 1, // trails b\n  a: 2,\n};\n";
        let (doc, spans) = members_and_comments(src);
        let b = node_at(&doc, spans[0]);
        let a = node_at(&doc, spans[1]);
        let comments = object_comments(&doc);

        let trail = trailing_comments(&comments, b, Some(a));
        assert_eq!(trail.len(), 1);
        assert_eq!(doc.text(trail[0]), "// trails b");

        // The same comment must not also lead `a`
        let lead = leading_comments(&comments, a, b.end_byte(), Some(b.end_position().row));
        assert!(lead.is_empty());
    }

    #[test]
    fn test_comment_on_own_line_leads_next() {
        let src = "const o = {\n  b: 1,\n  // about a\n  a: 2,\n};\n";
        let (doc, spans) = members_and_comments(src);
        let b = node_at(&doc, spans[0]);
        let a = node_at(&doc, spans[1]);
        let comments = object_comments(&doc);

        assert!(trailing_comments(&comments, b, Some(a)).is_empty());
        let lead = leading_comments(&comments, a, b.end_byte(), Some(b.end_position().row));
        assert_eq!(lead.len(), 1);
        assert_eq!(doc.text(lead[0]), "// about a");
    }

    #[test]
    fn test_comment_on_open_brace_line_not_claimed() {
        let src = "const o = { // header\n  b: 1,\n  a: 2,\n};\n";
        let (doc, spans) = members_and_comments(src);
        let b = node_at(&doc, spans[0]);
        let comments = object_comments(&doc);
        // Floor row is the line of the opening brace
        let lead = leading_comments(&comments, b, 0, Some(0));
        assert!(lead.is_empty());
    }

    #[test]
    fn test_multiple_leading_comments() {
        let src = "const o = {\n  // one\n  /* two */\n  b: 1,\n  a: 2,\n};\n";
        let (doc, spans) = members_and_comments(src);
        let b = node_at(&doc, spans[0]);
        let comments = object_comments(&doc);
        let lead = leading_comments(&comments, b, 0, None);
        assert_eq!(lead.len(), 2);
    }
}
