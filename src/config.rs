//! Configuration system
//!
//! Reads configuration from `.collaterc.yaml` / `.collaterc.json`
//! (project-level, discovered by walking up from the working directory).

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Enable parallel processing
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Verbose output
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Compact,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "compact" => Ok(OutputFormat::Compact),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// File handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Include patterns
    pub include: Vec<String>,

    /// Exclude patterns
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: vec![
                "**/*.js".to_string(),
                "**/*.jsx".to_string(),
                "**/*.ts".to_string(),
                "**/*.tsx".to_string(),
            ],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
                "**/*.min.js".to_string(),
            ],
        }
    }
}

/// Rule selection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Disabled rules
    pub disabled: Vec<String>,

    /// Enabled rules (empty = all)
    pub enabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Ordering policy consumed by the comparator and classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    /// Sort direction
    pub order: SortOrder,

    /// Compare names case-sensitively
    pub case_sensitive: bool,

    /// Numeric-aware natural ordering
    pub natural: bool,

    /// Minimum run length before ordering is checked (>= 2)
    pub min_keys: usize,

    /// Group non-function members before function members
    pub variables_before_functions: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::Asc,
            case_sensitive: false,
            natural: false,
            min_keys: 2,
            variables_before_functions: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// File include/exclude patterns
    pub files: FilesConfig,

    /// Rule selection and severity overrides
    pub rules: RulesConfig,

    /// Ordering policy
    pub sort: SortConfig,
}

impl Config {
    /// Load configuration from an explicit file (YAML or JSON by extension).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Discover `.collaterc.yaml` / `.collaterc.json` walking up from `dir`.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let mut current = Some(dir);
        while let Some(d) = current {
            for name in [".collaterc.yaml", ".collaterc.yml", ".collaterc.json"] {
                let candidate = d.join(name);
                if candidate.is_file() {
                    return Ok(Some(Self::load(&candidate)?));
                }
            }
            current = d.parent();
        }
        Ok(None)
    }

    /// Validate option ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sort.min_keys < 2 {
            return Err(ConfigError::Invalid(format!(
                "sort.min_keys must be >= 2 (got {})",
                self.sort.min_keys
            )));
        }
        Ok(())
    }

    /// Check if a rule is enabled by the selection lists.
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled.iter().any(|r| r == rule_id) {
            return false;
        }
        if self.rules.enabled.is_empty() {
            return true;
        }
        self.rules.enabled.iter().any(|r| r == rule_id)
    }

    /// Get the severity override for a rule, if any.
    pub fn severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.severity.get(rule_id).copied()
    }

    /// Build a matcher for the exclude patterns.
    pub fn exclude_set(&self) -> Option<globset::GlobSet> {
        let mut builder = globset::GlobSetBuilder::new();
        for pat in &self.files.exclude {
            match globset::Glob::new(pat) {
                Ok(g) => {
                    builder.add(g);
                }
                Err(e) => log::warn!("ignoring invalid exclude pattern '{}': {}", pat, e),
            }
        }
        builder.build().ok()
    }
}
