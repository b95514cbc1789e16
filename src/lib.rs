//! Collate - declaration-ordering linter for JavaScript and TypeScript
//!
//! A small, fast linter with two rules backed by a shared comment-aware,
//! dependency-safe reordering engine:
//!
//! - `sort-keys` checks that object-literal properties are sorted
//! - `sort-exports` checks that contiguous runs of top-level `export`
//!   declarations are sorted
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> Rule -> ordering pipeline -> Diagnostic (+ Fix)
//! ```
//!
//! The engine loads configuration, parses each file with tree-sitter, runs
//! the registered rules and collects diagnostics. Each violation carries at
//! most one text-range fix; the fixer applies a single fix per file per pass
//! and re-runs the pipeline on the result until it converges.
//!
//! Both rules share the ordering pipeline in [`order`], which classifies
//! sibling declarations, detects the first out-of-order pair under the
//! configured policy, keeps comments attached to the item they document, and
//! refuses to reorder export runs with forward references between items.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod fixer;
pub mod order;
pub mod output;
pub mod rule;
pub mod rules;

// Re-export main types
pub use config::{Config, SortConfig, SortOrder};
pub use diagnostic::{Diagnostic, Fix, FixSafety, Location, Severity};
pub use document::{Document, ParseError};
pub use engine::{Engine, LintResult, RuleTiming};
pub use fixer::{FixMode, FixResult, Fixer};
pub use order::{FixPlan, ItemKind, OrderableItem, ViolationReason};
pub use output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use rule::{LintRule, RuleCategory};
pub use rules::all_rules;
