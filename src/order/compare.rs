//! Total order over orderable items under the active policy
//!
//! Three tiers, checked in sequence:
//!
//! 1. type-only exports sort before value exports, regardless of direction
//! 2. with grouping enabled, non-functions sort before functions
//! 3. names compare case-folded / natural / lexical, negated for descending
//!
//! Ties (equal names) return `Equal` and never count as violations.

use std::cmp::Ordering;

use crate::config::{SortConfig, SortOrder};

use super::item::{ItemKind, OrderableItem};

/// Compare two items under the policy. Strict weak ordering.
pub fn compare(a: &OrderableItem, b: &OrderableItem, policy: &SortConfig) -> Ordering {
    let a_type = a.kind == ItemKind::Type;
    let b_type = b.kind == ItemKind::Type;
    if a_type != b_type {
        return if a_type {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    if policy.variables_before_functions {
        let a_fn = a.kind == ItemKind::Function;
        let b_fn = b.kind == ItemKind::Function;
        if a_fn != b_fn {
            return if a_fn {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
    }

    let ord = compare_names(&a.name, &b.name, policy);
    match policy.order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Name comparison honoring `case_sensitive` and `natural`.
pub fn compare_names(a: &str, b: &str, policy: &SortConfig) -> Ordering {
    if policy.case_sensitive {
        if policy.natural {
            natural_cmp(a, b)
        } else {
            a.cmp(b)
        }
    } else {
        let fa = a.to_lowercase();
        let fb = b.to_lowercase();
        if policy.natural {
            natural_cmp(&fa, &fb)
        } else {
            fa.cmp(&fb)
        }
    }
}

/// Numeric-aware lexical comparison: runs of ASCII digits compare by value,
/// everything else byte-wise (UTF-8 byte order equals code-point order).
///
/// Equal-valued digit runs with differing leading zeros compare by run length
/// so the ordering stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ab = a.as_bytes();
    let bb = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < ab.len() && j < bb.len() {
        if ab[i].is_ascii_digit() && bb[j].is_ascii_digit() {
            let si = i;
            while i < ab.len() && ab[i].is_ascii_digit() {
                i += 1;
            }
            let sj = j;
            while j < bb.len() && bb[j].is_ascii_digit() {
                j += 1;
            }
            let da = a[si..i].trim_start_matches('0');
            let db = b[sj..j].trim_start_matches('0');
            let ord = da
                .len()
                .cmp(&db.len())
                .then_with(|| da.cmp(db))
                .then_with(|| (i - si).cmp(&(j - sj)));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = ab[i].cmp(&bb[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (ab.len() - i).cmp(&(bb.len() - j))
}
