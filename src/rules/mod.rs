//! Rule registry and shared diagnostic construction

mod sort_exports;
mod sort_keys;

pub use sort_exports::SortExports;
pub use sort_keys::SortKeys;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Fix, Location, Severity};
use crate::document::Document;
use crate::order::{RunAnalysis, Unfixable, ViolationReason};
use crate::rule::LintRule;

/// All registered rules.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(SortKeys), Box::new(SortExports)]
}

/// Build the diagnostic for one run analysis. `noun` is "Property" or
/// "Export" depending on the rule.
fn ordering_diagnostic(
    doc: &Document,
    rule: &dyn LintRule,
    config: &Config,
    analysis: &RunAnalysis,
    noun: &str,
) -> Diagnostic {
    let message = match analysis.violation.reason {
        ViolationReason::Alphabetical => format!(
            "{} '{}' should come before '{}'",
            noun, analysis.current_name, analysis.prev_name
        ),
        ViolationReason::Grouping => format!(
            "{} '{}' should come before function '{}'",
            noun, analysis.current_name, analysis.prev_name
        ),
        ViolationReason::KindOrder => format!(
            "Type export '{}' should come before value export '{}'",
            analysis.current_name, analysis.prev_name
        ),
    };

    let severity = config
        .severity_override(rule.id())
        .unwrap_or(Severity::Warning);
    let (line, column) = doc.line_col(analysis.start_byte);
    let location = Location::new(doc.path().to_path_buf(), line, column)
        .with_length(analysis.end_byte - analysis.start_byte);

    let mut diag = Diagnostic::new(rule.id(), severity, &message, location)
        .with_help(rule.description());
    if let Some(source_line) = doc.get_source_line(line) {
        diag = diag.with_source_line(source_line);
    }

    if let Some(plan) = &analysis.fix {
        let description = format!("reorder so '{}' comes first", analysis.current_name);
        diag = diag.with_fix(Fix::safe(
            &description,
            plan.start,
            plan.end,
            plan.replacement.clone(),
        ));
    } else if let Some(reason) = analysis.unfixable {
        let note = match reason {
            Unfixable::UnnamedItem => "not auto-fixable: the run contains an unnamed member",
            Unfixable::CompoundDeclaration => {
                "not auto-fixable: a compound declaration cannot be moved as a unit"
            }
            Unfixable::ForwardDependency => {
                "not auto-fixable: reordering would move a declaration after a use of it"
            }
        };
        diag = diag.with_note(note);
    }

    diag
}
