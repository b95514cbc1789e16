//! sort-keys: object-literal properties must be sorted

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::order::analyze_object;
use crate::rule::{LintRule, RuleCategory};

/// Checks that object-literal properties appear in sorted order.
pub struct SortKeys;

impl LintRule for SortKeys {
    fn id(&self) -> &'static str {
        "sort-keys"
    }

    fn description(&self) -> &'static str {
        "Object literal properties should be sorted"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Ordering
    }

    fn check(&self, doc: &Document, config: &Config) -> Vec<Diagnostic> {
        if doc.is_rule_disabled_for_file(self.id()) {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for object in doc.nodes_of_kind("object") {
            let Some(analysis) = analyze_object(doc, object, &config.sort) else {
                continue;
            };
            let line = doc.line_of(analysis.start_byte);
            if doc.is_rule_disabled(self.id(), line) {
                continue;
            }
            diagnostics.push(super::ordering_diagnostic(
                doc, self, config, &analysis, "Property",
            ));
        }
        diagnostics
    }
}
