//! Replacement builder
//!
//! Rebuilds a fixable run in sorted order as a single text-range replacement.
//! Each item travels as a chunk: its leading comments, its own text, and its
//! trailing comments. Object separators (commas) are stripped from chunk text
//! and re-inserted at the item's end after sorting, so the trailing-comma
//! style of the run survives. Layout outside the replaced range is untouched.

use tree_sitter::Node;

use crate::config::SortConfig;
use crate::document::Document;

use super::comments::{leading_comments, trailing_comments};
use super::compare::compare;
use super::item::{ContainerKind, OrderableItem};

/// A single-range replacement that reorders a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPlan {
    /// Start byte of the replaced range.
    pub start: usize,
    /// End byte of the replaced range, exclusive.
    pub end: usize,
    /// Replacement text.
    pub replacement: String,
}

/// One movable unit: comments + item text, comma stripped.
struct Chunk {
    text: String,
    /// Offset within `text` of the item's end, where a comma re-inserts.
    insert_at: usize,
    had_comma: bool,
    has_line_comment: bool,
    ends_with_line_comment: bool,
    ext_start: usize,
    ext_end: usize,
}

/// Build the replacement for a run already known to be fixable.
///
/// `raw_items` and `orderables` are parallel and in source order. `floor` and
/// `floor_row` bound the first item's leading comments (the container's
/// opening token, or the statement preceding an export run). Returns `None`
/// when sorting would produce byte-identical text, or when a single-line run
/// carries `//` comments that would swallow code after rejoining.
pub fn build_fix(
    doc: &Document,
    raw_items: &[Node<'_>],
    orderables: &[OrderableItem],
    comments: &[Node<'_>],
    container: ContainerKind,
    policy: &SortConfig,
    floor: usize,
    floor_row: Option<usize>,
) -> Option<FixPlan> {
    let n = raw_items.len();
    if n < 2 || orderables.len() != n {
        return None;
    }

    let commas: Vec<Node<'_>> = match container {
        ContainerKind::ObjectLiteral => {
            let parent = raw_items[0].parent()?;
            let mut cursor = parent.walk();
            parent
                .children(&mut cursor)
                .filter(|c| c.kind() == ",")
                .collect()
        }
        ContainerKind::ExportRun => Vec::new(),
    };

    // Attachments first: each chunk's start must be known before comma
    // ownership can be decided, so extents never overlap.
    let mut leads: Vec<Vec<Node<'_>>> = Vec::with_capacity(n);
    let mut trails: Vec<Vec<Node<'_>>> = Vec::with_capacity(n);
    let mut ext_starts: Vec<usize> = Vec::with_capacity(n);
    for i in 0..n {
        let item = raw_items[i];
        let prev = if i > 0 { Some(raw_items[i - 1]) } else { None };
        let lower = prev.map(|p| p.end_byte()).unwrap_or(floor);
        let prev_row = prev.map(|p| p.end_position().row).or(floor_row);
        let lead = leading_comments(comments, item, lower, prev_row);
        let trail = trailing_comments(comments, item, raw_items.get(i + 1).copied());
        ext_starts.push(
            lead.first()
                .map(|c| c.start_byte())
                .unwrap_or_else(|| item.start_byte()),
        );
        leads.push(lead);
        trails.push(trail);
    }

    // The separator comma after item i. In comma-first style it sits past the
    // next chunk's leading comments; the next chunk strips it then.
    let mut gap_commas: Vec<Option<Node<'_>>> = Vec::with_capacity(n);
    for i in 0..n {
        let item = raw_items[i];
        let next_start = raw_items.get(i + 1).map(|nx| nx.start_byte());
        gap_commas.push(
            commas
                .iter()
                .find(|c| {
                    c.start_byte() >= item.end_byte()
                        && next_start.map_or(true, |s| c.end_byte() <= s)
                })
                .copied(),
        );
    }

    let mut chunks: Vec<Chunk> = Vec::with_capacity(n);
    for i in 0..n {
        let item = raw_items[i];
        let ext_start = ext_starts[i];
        let next_ext_start = ext_starts.get(i + 1).copied();
        let owned_comma = gap_commas[i]
            .filter(|c| next_ext_start.map_or(true, |s| c.end_byte() <= s));

        let mut ext_end = item.end_byte();
        if let Some(t) = trails[i].last() {
            ext_end = ext_end.max(t.end_byte());
        }
        if let Some(c) = owned_comma {
            ext_end = ext_end.max(c.end_byte());
        }

        // Comma bytes to drop from this slice, back to front
        let mut strip: Vec<usize> = Vec::new();
        if let Some(c) = owned_comma {
            strip.push(c.start_byte() - ext_start);
        }
        if i > 0 {
            if let Some(c) = gap_commas[i - 1] {
                if c.start_byte() >= ext_start {
                    strip.push(c.start_byte() - ext_start);
                }
            }
        }
        strip.sort_unstable_by(|a, b| b.cmp(a));

        let mut text = doc.slice(ext_start, ext_end).to_string();
        let mut insert_at = item.end_byte() - ext_start;
        for off in strip {
            text.remove(off);
            if off < insert_at {
                insert_at -= 1;
            }
        }

        let is_line = |c: &Node<'_>| doc.text(*c).starts_with("//");
        chunks.push(Chunk {
            text,
            insert_at,
            had_comma: gap_commas[i].is_some(),
            has_line_comment: leads[i].iter().any(is_line) || trails[i].iter().any(is_line),
            ends_with_line_comment: trails[i].last().map(is_line).unwrap_or(false),
            ext_start,
            ext_end,
        });
    }

    let multi_line =
        raw_items[0].start_position().row != raw_items[n - 1].end_position().row;
    if !multi_line && chunks.iter().any(|c| c.has_line_comment) {
        return None;
    }

    let indent = if multi_line {
        chunks
            .iter()
            .find_map(|c| {
                let ls = doc.line_start(c.ext_start);
                let prefix = doc.slice(ls, c.ext_start);
                prefix
                    .chars()
                    .all(|ch| ch == ' ' || ch == '\t')
                    .then(|| prefix.to_string())
            })
            .unwrap_or_default()
    } else {
        String::new()
    };
    let separator = if multi_line {
        format!("\n{}", indent)
    } else {
        " ".to_string()
    };

    let mut sorted: Vec<usize> = (0..n).collect();
    sorted.sort_by(|&a, &b| compare(&orderables[a], &orderables[b], policy));

    let keep_trailing_comma = chunks[n - 1].had_comma;
    let mut parts: Vec<String> = Vec::with_capacity(n);
    for (pos, &idx) in sorted.iter().enumerate() {
        let chunk = &chunks[idx];
        let mut text = chunk.text.clone();
        let needs_comma = container == ContainerKind::ObjectLiteral
            && (pos + 1 < n || keep_trailing_comma);
        if needs_comma {
            text.insert(chunk.insert_at, ',');
        }
        parts.push(text);
    }
    let mut replacement = parts.join(&separator);

    let start = chunks[0].ext_start;
    let end = chunks[n - 1].ext_end;
    if replacement == doc.slice(start, end) {
        return None;
    }

    // A `//` comment now ending the run must not swallow code that follows
    // on the closing line
    if chunks[sorted[n - 1]].ends_with_line_comment {
        let rest_of_line = doc.source()[end..].split('\n').next().unwrap_or("");
        if !rest_of_line.trim().is_empty() {
            replacement.push('\n');
            replacement.push_str(&indent);
        }
    }

    Some(FixPlan {
        start,
        end,
        replacement,
    })
}
