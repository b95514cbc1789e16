//! First-violation detection
//!
//! Scans adjacent classified pairs in source order and reports the first pair
//! the comparator puts in the wrong order. Equal names are never violations.
//! Runs shorter than `min_keys` are not scanned at all.

use std::cmp::Ordering;

use crate::config::SortConfig;

use super::compare::compare;
use super::item::{ItemKind, OrderableItem};

/// Why a pair is out of order, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// Names out of alphabetical (or natural/descending) order.
    Alphabetical,
    /// A function member precedes a non-function member under grouping.
    Grouping,
    /// A value export precedes a type-only export.
    KindOrder,
}

/// The first out-of-order adjacent pair of a run.
#[derive(Debug, Clone, Copy)]
pub struct Violation {
    /// Index of the earlier item of the pair, into the classified items.
    pub prev: usize,
    /// Index of the later item; the diagnostic points here.
    pub current: usize,
    /// Which ordering tier the pair breaks.
    pub reason: ViolationReason,
}

/// Find the first adjacent out-of-order pair, if any.
pub fn detect(items: &[OrderableItem], policy: &SortConfig) -> Option<Violation> {
    if items.len() < policy.min_keys.max(2) {
        return None;
    }
    for i in 1..items.len() {
        let prev = &items[i - 1];
        let curr = &items[i];
        if compare(prev, curr, policy) == Ordering::Greater {
            return Some(Violation {
                prev: i - 1,
                current: i,
                reason: violation_reason(prev, curr, policy),
            });
        }
    }
    None
}

/// Classify the broken tier. Kind tiers take precedence over names so the
/// message tells the user what actually needs to move.
fn violation_reason(
    prev: &OrderableItem,
    curr: &OrderableItem,
    policy: &SortConfig,
) -> ViolationReason {
    if (prev.kind == ItemKind::Type) != (curr.kind == ItemKind::Type) {
        return ViolationReason::KindOrder;
    }
    if policy.variables_before_functions
        && prev.kind == ItemKind::Function
        && curr.kind != ItemKind::Function
    {
        return ViolationReason::Grouping;
    }
    ViolationReason::Alphabetical
}
