//! The ordering pipeline shared by both rules
//!
//! Stages, in order: locate run-level comments, classify siblings into
//! orderable items, detect the first out-of-order adjacent pair, check
//! fixability (named, simple, no forward dependencies), and build a single
//! text-range replacement. Everything here is pure with respect to the
//! document: no IO, no mutation, byte offsets in, byte offsets out.

pub mod builder;
pub mod comments;
pub mod compare;
pub mod detect;
pub mod guard;
pub mod item;

pub use builder::FixPlan;
pub use detect::{Violation, ViolationReason};
pub use item::{ContainerKind, ItemKind, OrderableItem};

use tree_sitter::Node;

use crate::config::SortConfig;
use crate::document::Document;

/// Why a detected violation carries no fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unfixable {
    /// The run contains a member with no static name (spread, computed key,
    /// re-export clause, `export default`, destructuring).
    UnnamedItem,
    /// A compound declaration (`export const a = 1, b = 2`) cannot move as
    /// a unit under its first name.
    CompoundDeclaration,
    /// An item references a name declared later in the run.
    ForwardDependency,
}

/// Result of analyzing one run: the first violation plus fix or the reason
/// there is none.
#[derive(Debug)]
pub struct RunAnalysis {
    pub violation: Violation,
    /// Name of the item the reported one should precede.
    pub prev_name: String,
    /// Name of the out-of-place item.
    pub current_name: String,
    /// Byte span of the out-of-place item, for the diagnostic location.
    pub start_byte: usize,
    pub end_byte: usize,
    pub fix: Option<FixPlan>,
    pub unfixable: Option<Unfixable>,
}

/// Analyze the members of one object literal.
pub fn analyze_object(
    doc: &Document,
    object: Node<'_>,
    policy: &SortConfig,
) -> Option<RunAnalysis> {
    let mut cursor = object.walk();
    let raw: Vec<Node<'_>> = object
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    let mut cursor = object.walk();
    let comments: Vec<Node<'_>> = object
        .children(&mut cursor)
        .filter(|c| c.kind() == "comment")
        .collect();

    // Leading comments of the first member are bounded by the `{` token
    let open = object.child(0)?;
    analyze_run(
        doc,
        &raw,
        &comments,
        ContainerKind::ObjectLiteral,
        policy,
        open.end_byte(),
        Some(open.end_position().row),
    )
}

/// Analyze one maximal run of top-level export statements. `comments` are the
/// program-level comment nodes between the run's bounds; `floor`/`floor_row`
/// describe the statement (or file start) preceding the run.
pub fn analyze_export_run(
    doc: &Document,
    raw: &[Node<'_>],
    comments: &[Node<'_>],
    policy: &SortConfig,
    floor: usize,
    floor_row: Option<usize>,
) -> Option<RunAnalysis> {
    analyze_run(
        doc,
        raw,
        comments,
        ContainerKind::ExportRun,
        policy,
        floor,
        floor_row,
    )
}

fn analyze_run(
    doc: &Document,
    raw: &[Node<'_>],
    comments: &[Node<'_>],
    container: ContainerKind,
    policy: &SortConfig,
    floor: usize,
    floor_row: Option<usize>,
) -> Option<RunAnalysis> {
    let classified: Vec<Option<OrderableItem>> = raw
        .iter()
        .enumerate()
        .map(|(i, n)| item::classify(*n, doc, container, i))
        .collect();
    let orderables: Vec<OrderableItem> = classified.iter().flatten().cloned().collect();

    let violation = detect::detect(&orderables, policy)?;

    let unfixable = if classified.iter().any(|c| c.is_none()) {
        Some(Unfixable::UnnamedItem)
    } else if orderables.iter().any(|o| !o.simple) {
        Some(Unfixable::CompoundDeclaration)
    } else if container == ContainerKind::ExportRun && guard::run_has_forward_dependency(raw, doc)
    {
        Some(Unfixable::ForwardDependency)
    } else {
        None
    };

    let fix = if unfixable.is_none() {
        builder::build_fix(
            doc, raw, &orderables, comments, container, policy, floor, floor_row,
        )
    } else {
        None
    };

    let prev = &orderables[violation.prev];
    let curr = &orderables[violation.current];
    Some(RunAnalysis {
        violation,
        prev_name: prev.name.clone(),
        current_name: curr.name.clone(),
        start_byte: curr.start_byte,
        end_byte: curr.end_byte,
        fix,
        unfixable,
    })
}
