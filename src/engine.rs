//! Lint engine: file discovery, parallel execution, result aggregation

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::document::{Document, ParseError};
use crate::rule::LintRule;
use crate::rules::all_rules;

/// Accumulated time spent in one rule across all files.
#[derive(Debug, Clone)]
pub struct RuleTiming {
    pub rule_id: String,
    pub duration: Duration,
}

/// Result of a lint run over a set of files.
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics, sorted by file, line, column.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files successfully checked.
    pub files_checked: usize,
    /// Files that failed to read or parse, with the failure message.
    pub failures: Vec<(PathBuf, String)>,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// Per-rule timing, slowest first.
    pub timings: Vec<RuleTiming>,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.has_fix()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }

    /// Process exit code: 0 clean, 1 diagnostics found, 2 tool failure.
    /// `exit_zero` downgrades findings (but not failures) to 0.
    pub fn exit_code(&self, exit_zero: bool) -> i32 {
        if !self.failures.is_empty() {
            2
        } else if !self.diagnostics.is_empty() && !exit_zero {
            1
        } else {
            0
        }
    }
}

struct FileOutcome {
    diagnostics: Vec<Diagnostic>,
    failure: Option<(PathBuf, String)>,
    timings: Vec<(String, Duration)>,
}

/// The lint engine. Holds the configuration and the enabled rules.
pub struct Engine {
    config: Config,
    rules: Vec<Box<dyn LintRule>>,
}

impl Engine {
    /// Create an engine with the registered rules, filtered by config.
    pub fn new(config: Config) -> Self {
        let rules = all_rules()
            .into_iter()
            .filter(|r| config.is_rule_enabled(r.id()))
            .collect();
        Self { config, rules }
    }

    /// Create an engine with an explicit rule set (tests, embedding).
    pub fn with_rules(config: Config, rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Expand inputs (files, directories, glob patterns) into a sorted,
    /// deduplicated file list with excludes applied.
    pub fn collect_files(&self, inputs: &[String]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            let path = Path::new(input);
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for pattern in &self.config.files.include {
                    let full = path.join(pattern);
                    let Some(pattern_str) = full.to_str() else {
                        continue;
                    };
                    if let Ok(matches) = glob::glob(pattern_str) {
                        files.extend(matches.flatten().filter(|p| p.is_file()));
                    }
                }
            } else if let Ok(matches) = glob::glob(input) {
                files.extend(matches.flatten().filter(|p| p.is_file()));
            } else {
                log::warn!("no files matched input '{}'", input);
            }
        }
        files.sort();
        files.dedup();
        if let Some(exclude) = self.config.exclude_set() {
            files.retain(|f| !exclude.is_match(f));
        }
        files
    }

    /// Lint already-loaded source text. Used by the fixer's re-lint loop and
    /// by embedders that hold text in memory.
    pub fn lint_source(&self, content: &str, path: &Path) -> Result<Vec<Diagnostic>, ParseError> {
        let doc = Document::parse(content, path)?;
        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            diagnostics.extend(rule.check(&doc, &self.config));
        }
        diagnostics.sort_by_key(|d| (d.location.line, d.location.column));
        Ok(diagnostics)
    }

    /// Lint one file from disk.
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.lint_source(&content, path)
    }

    /// Lint a set of files, in parallel when enabled.
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let outcomes: Vec<FileOutcome> = if self.config.engine.parallel && files.len() > 1 {
            let jobs = if self.config.engine.jobs == 0 {
                num_cpus::get()
            } else {
                self.config.engine.jobs
            };
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => {
                    pool.install(|| files.par_iter().map(|p| self.process_file(p)).collect())
                }
                Err(e) => {
                    log::warn!("falling back to sequential linting: {}", e);
                    files.iter().map(|p| self.process_file(p)).collect()
                }
            }
        } else {
            files.iter().map(|p| self.process_file(p)).collect()
        };

        let mut result = LintResult {
            duration: start.elapsed(),
            ..Default::default()
        };
        let mut timing: HashMap<String, Duration> = HashMap::new();
        for outcome in outcomes {
            match outcome.failure {
                Some(failure) => result.failures.push(failure),
                None => result.files_checked += 1,
            }
            result.diagnostics.extend(outcome.diagnostics);
            for (rule_id, duration) in outcome.timings {
                *timing.entry(rule_id).or_default() += duration;
            }
        }
        result.diagnostics.sort_by(|a, b| {
            (&a.location.file, a.location.line, a.location.column).cmp(&(
                &b.location.file,
                b.location.line,
                b.location.column,
            ))
        });
        result.timings = timing
            .into_iter()
            .map(|(rule_id, duration)| RuleTiming { rule_id, duration })
            .collect();
        result.timings.sort_by(|a, b| b.duration.cmp(&a.duration));
        result
    }

    fn process_file(&self, path: &Path) -> FileOutcome {
        let mut outcome = FileOutcome {
            diagnostics: Vec::new(),
            failure: None,
            timings: Vec::new(),
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                outcome.failure = Some((path.to_path_buf(), e.to_string()));
                return outcome;
            }
        };
        let doc = match Document::parse(&content, path) {
            Ok(doc) => doc,
            Err(e) => {
                outcome.failure = Some((path.to_path_buf(), e.to_string()));
                return outcome;
            }
        };

        for rule in &self.rules {
            let rule_start = Instant::now();
            outcome.diagnostics.extend(rule.check(&doc, &self.config));
            outcome
                .timings
                .push((rule.id().to_string(), rule_start.elapsed()));
        }
        outcome
    }
}
