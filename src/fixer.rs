//! Auto-fix system
//!
//! Applies at most one fix per file per pass, then re-lints the mutated text
//! and repeats until no applicable fix remains. Re-linting after every edit
//! means byte offsets are always computed against current text, so fixes
//! never overlap or go stale.
//!
//! Fixes are classified as safe or unsafe:
//! - Safe fixes preserve code meaning and can be applied automatically
//! - Unsafe fixes may change runtime behavior and require explicit opt-in

use std::path::{Path, PathBuf};

use crate::diagnostic::FixSafety;
use crate::document::ParseError;
use crate::engine::Engine;

/// Passes per file before giving up. Each pass applies one fix, so this also
/// caps the number of fixes per file.
const MAX_PASSES: usize = 50;

/// Fix mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Apply only safe fixes (default)
    #[default]
    SafeOnly,
    /// Apply all fixes including unsafe
    All,
    /// Diff mode - show changes without applying
    Diff,
    /// Show fixes without applying
    ShowOnly,
}

/// Result of fixing one file
#[derive(Debug, Default)]
pub struct FixResult {
    /// File the result is for
    pub path: PathBuf,
    /// Number of fixes applied
    pub fixes_applied: usize,
    /// Number of fixes skipped (unsafe when not allowed)
    pub fixes_skipped: usize,
    /// Whether the loop reached a fixpoint within the pass budget
    pub converged: bool,
    /// New content, when it differs from the original
    pub fixed: Option<String>,
    /// Unified diff (diff mode only)
    pub diff: Option<String>,
}

/// Applies fixes produced by the engine's rules
pub struct Fixer<'a> {
    engine: &'a Engine,
    mode: FixMode,
    dry_run: bool,
}

impl<'a> Fixer<'a> {
    /// Create a new fixer
    pub fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            mode: FixMode::SafeOnly,
            dry_run: false,
        }
    }

    /// Set the fix mode
    pub fn with_mode(mut self, mode: FixMode) -> Self {
        self.mode = mode;
        self
    }

    /// Include unsafe fixes
    pub fn with_unsafe_fixes(mut self, include: bool) -> Self {
        if include {
            self.mode = FixMode::All;
        }
        self
    }

    /// Don't write changes to disk
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get the current fix mode
    pub fn mode(&self) -> FixMode {
        self.mode
    }

    fn should_apply(&self, safety: FixSafety) -> bool {
        match self.mode {
            FixMode::All => true,
            FixMode::SafeOnly | FixMode::Diff => safety == FixSafety::Safe,
            FixMode::ShowOnly => false,
        }
    }

    /// Run the fix loop on in-memory text. Returns the final text and the
    /// counts; the text equals the input when nothing applied.
    pub fn fix_source(&self, content: &str, path: &Path) -> Result<FixResult, ParseError> {
        let mut result = FixResult {
            path: path.to_path_buf(),
            ..Default::default()
        };
        let mut current = content.to_string();

        for _ in 0..MAX_PASSES {
            let diagnostics = self.engine.lint_source(&current, path)?;
            let fixable = diagnostics.iter().find_map(|d| d.fix.as_ref());
            let Some(fix) = fixable else {
                result.converged = true;
                break;
            };
            if !self.should_apply(fix.safety) {
                result.fixes_skipped += 1;
                result.converged = true;
                break;
            }
            match fix.apply(&current) {
                Some(next) => {
                    current = next;
                    result.fixes_applied += 1;
                }
                None => {
                    // Stale offsets should be impossible after a re-lint;
                    // stop rather than loop
                    log::error!("fix for {} had invalid offsets", path.display());
                    break;
                }
            }
        }

        if result.fixes_applied > 0 {
            if self.mode == FixMode::Diff {
                result.diff = Some(unified_diff(path, content, &current));
            }
            result.fixed = Some(current);
        }
        Ok(result)
    }

    /// Fix one file on disk, writing the result unless in dry-run, diff or
    /// show-only mode.
    pub fn fix_file(&self, path: &Path) -> Result<FixResult, ParseError> {
        let content = std::fs::read_to_string(path)?;
        let result = self.fix_source(&content, path)?;
        if let Some(fixed) = &result.fixed {
            let write = !self.dry_run && matches!(self.mode, FixMode::SafeOnly | FixMode::All);
            if write {
                std::fs::write(path, fixed)?;
            }
        }
        Ok(result)
    }
}

/// Simple line-based unified diff with one hunk covering the changed region.
fn unified_diff(file: &Path, original: &str, modified: &str) -> String {
    let original_lines: Vec<&str> = original.lines().collect();
    let modified_lines: Vec<&str> = modified.lines().collect();

    // Common prefix and suffix, leaving the changed middle
    let mut prefix = 0;
    while prefix < original_lines.len()
        && prefix < modified_lines.len()
        && original_lines[prefix] == modified_lines[prefix]
    {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < original_lines.len() - prefix
        && suffix < modified_lines.len() - prefix
        && original_lines[original_lines.len() - 1 - suffix]
            == modified_lines[modified_lines.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let context = 3;
    let ctx_start = prefix.saturating_sub(context);
    let old_end = original_lines.len() - suffix;
    let new_end = modified_lines.len() - suffix;
    let old_ctx_end = (old_end + context).min(original_lines.len());

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", file.display()));
    diff.push_str(&format!("+++ b/{}\n", file.display()));
    diff.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        ctx_start + 1,
        old_ctx_end - ctx_start,
        ctx_start + 1,
        (new_end + old_ctx_end - old_end) - ctx_start,
    ));
    for line in &original_lines[ctx_start..prefix] {
        diff.push_str(&format!(" {}\n", line));
    }
    for line in &original_lines[prefix..old_end] {
        diff.push_str(&format!("-{}\n", line));
    }
    for line in &modified_lines[prefix..new_end] {
        diff.push_str(&format!("+{}\n", line));
    }
    for line in &original_lines[old_end..old_ctx_end] {
        diff.push_str(&format!(" {}\n", line));
    }
    diff
}
