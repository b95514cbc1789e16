//! sort-exports: contiguous top-level export declarations must be sorted

use tree_sitter::Node;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::order::analyze_export_run;
use crate::rule::{LintRule, RuleCategory};

/// Checks that maximal contiguous runs of top-level `export` statements are
/// sorted. Comments between exports do not break a run; any other statement
/// does.
pub struct SortExports;

/// One maximal run of export statements plus its surrounding bounds.
struct ExportRun<'a> {
    exports: Vec<Node<'a>>,
    comments: Vec<Node<'a>>,
    floor: usize,
    floor_row: Option<usize>,
}

impl LintRule for SortExports {
    fn id(&self) -> &'static str {
        "sort-exports"
    }

    fn description(&self) -> &'static str {
        "Top-level export declarations should be sorted"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Ordering
    }

    fn check(&self, doc: &Document, config: &Config) -> Vec<Diagnostic> {
        if doc.is_rule_disabled_for_file(self.id()) {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for run in export_runs(doc) {
            let Some(analysis) = analyze_export_run(
                doc,
                &run.exports,
                &run.comments,
                &config.sort,
                run.floor,
                run.floor_row,
            ) else {
                continue;
            };
            let line = doc.line_of(analysis.start_byte);
            if doc.is_rule_disabled(self.id(), line) {
                continue;
            }
            diagnostics.push(super::ordering_diagnostic(
                doc, self, config, &analysis, "Export",
            ));
        }
        diagnostics
    }
}

/// Split the program's top-level statements into maximal export runs.
fn export_runs<'a>(doc: &'a Document) -> Vec<ExportRun<'a>> {
    let program = doc.root();
    let mut cursor = program.walk();
    let children: Vec<Node<'a>> = program.children(&mut cursor).collect();

    let mut runs = Vec::new();
    let mut floor = 0usize;
    let mut floor_row: Option<usize> = None;
    let mut i = 0;

    while i < children.len() {
        match children[i].kind() {
            "export_statement" => {
                let run_floor = floor;
                let run_floor_row = floor_row;
                let mut exports = vec![children[i]];
                let mut j = i + 1;
                while j < children.len() {
                    match children[j].kind() {
                        "export_statement" => exports.push(children[j]),
                        "comment" => {}
                        _ => break,
                    }
                    j += 1;
                }
                let limit = children
                    .get(j)
                    .map(|n| n.start_byte())
                    .unwrap_or_else(|| doc.source().len());
                let comments = children[..j]
                    .iter()
                    .copied()
                    .filter(|c| {
                        c.kind() == "comment"
                            && c.start_byte() >= run_floor
                            && c.start_byte() < limit
                    })
                    .collect();
                runs.push(ExportRun {
                    exports,
                    comments,
                    floor: run_floor,
                    floor_row: run_floor_row,
                });
                i = j;
            }
            "comment" => i += 1,
            _ => {
                floor = children[i].end_byte();
                floor_row = Some(children[i].end_position().row);
                i += 1;
            }
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check(content: &str) -> Vec<Diagnostic> {
        let doc = Document::parse(content, Path::new("t.ts")).unwrap();
        SortExports.check(&doc, &Config::default())
    }

    #[test]
    fn test_sorted_clean() {
        assert!(check("export const a = 1;\nexport const b = 2;\n").is_empty());
    }

    #[test]
    fn test_unsorted_flagged() {
        let diags = check("export const b = 2;\nexport const a = 1;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "sort-exports");
        assert!(diags[0].has_safe_fix());
    }

    #[test]
    fn test_statement_breaks_run() {
        // Each run is sorted on its own
        let src = "export const b = 2;\nconst x = 0;\nexport const a = 1;\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn test_comment_does_not_break_run() {
        let src = "export const b = 2;\n// note\nexport const a = 1;\n";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_two_runs_two_diagnostics() {
        let src = "export const b = 2;\nexport const a = 1;\nconst x = 0;\nexport const d = 4;\nexport const c = 3;\n";
        assert_eq!(check(src).len(), 2);
    }

    #[test]
    fn test_forward_dependency_suppresses_fix() {
        let src = "export const b = a + 1;\nexport const a = 1;\n";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].has_fix());
        assert!(diags[0].notes[0].contains("declaration after a use"));
    }

    #[test]
    fn test_default_export_poisons_fix() {
        let src = "export const b = 2;\nexport const a = 1;\nexport default a;\n";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].has_fix());
    }

    #[test]
    fn test_type_before_value_required() {
        let src = "export const a = 1;\nexport type T = string;\n";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Type export 'T'"));
    }

    #[test]
    fn test_disable_next_line() {
        let src = "export const b = 2;\n// collate-disable-next-line sort-exports\nexport const a = 1;\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn test_short_run_ignored() {
        assert!(check("export const z = 1;\n").is_empty());
    }
}
