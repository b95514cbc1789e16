//! Collate CLI - declaration-ordering linter for JavaScript and TypeScript

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use collate::config::{Config, OutputFormat, SortOrder};
use collate::engine::Engine;
use collate::fixer::{FixMode, Fixer};
use collate::output::formatter_for;
use collate::rules::all_rules;
use collate::Severity;

#[derive(Parser)]
#[command(
    name = "collate",
    version,
    about = "Declaration-ordering linter for JavaScript and TypeScript",
    long_about = "Checks that object-literal properties and top-level export declarations \
                  are sorted, with comment-aware, dependency-safe autofixes."
)]
struct Cli {
    /// Files, directories or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Only enable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Auto-fix issues where possible (dry-run by default, use with --write to apply)
    #[arg(long)]
    fix: bool,

    /// Write fixes to files (requires --fix)
    #[arg(long, requires = "fix")]
    write: bool,

    /// Show diff of changes instead of applying fixes
    #[arg(long, conflicts_with = "fix")]
    diff: bool,

    /// Show all fixes that would be applied
    #[arg(long)]
    show_fixes: bool,

    /// Include unsafe fixes (may change code behavior)
    #[arg(long)]
    unsafe_fixes: bool,

    /// Exit with 0 even if issues are found
    #[arg(long)]
    exit_zero: bool,

    /// Show per-rule timing statistics
    #[arg(long)]
    timing: bool,

    /// Sort direction (asc, desc)
    #[arg(long)]
    order: Option<String>,

    /// Compare names case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Numeric-aware natural ordering
    #[arg(long)]
    natural: bool,

    /// Minimum run length before ordering is checked
    #[arg(long)]
    min_keys: Option<usize>,

    /// Group non-function members before function members
    #[arg(long)]
    group_functions: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Output format (yaml, json)
        #[arg(long, default_value = "yaml")]
        output_format: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Compact,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    Info,
    Warning,
    Error,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Init { output_format }) = &cli.command {
        handle_init(output_format);
        return;
    }

    if cli.list_rules {
        list_rules();
        return;
    }

    let mut config = load_config(&cli);
    merge_cli(&cli, &mut config);
    if let Err(e) = config.validate() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(2);
    }

    let engine = Engine::new(config);

    let inputs = if cli.files.is_empty() {
        vec![".".to_string()]
    } else {
        cli.files.clone()
    };
    let files = engine.collect_files(&inputs);
    if files.is_empty() {
        eprintln!("{}: no files to lint", "warning".yellow());
        std::process::exit(0);
    }
    if cli.verbose {
        eprintln!("linting {} files", files.len());
    }

    if cli.fix || cli.diff {
        run_fixer(&cli, &engine, &files);
    }

    let mut result = engine.lint(&files);

    if let Some(min) = cli.min_severity {
        let threshold = match min {
            MinSeverity::Info => Severity::Info,
            MinSeverity::Warning => Severity::Warning,
            MinSeverity::Error => Severity::Error,
        };
        result.diagnostics.retain(|d| d.severity >= threshold);
    }

    if cli.show_fixes {
        print_fixes(&result);
    }

    let format = match cli.format {
        Format::Text => OutputFormat::Text,
        Format::Compact => OutputFormat::Compact,
        Format::Json => OutputFormat::Json,
    };
    let formatter = formatter_for(format, !cli.no_color);
    print!("{}", formatter.format(&result));

    if cli.timing {
        println!("\nPer-rule timing:");
        for t in &result.timings {
            println!("  {:<16} {:>8.2}ms", t.rule_id, t.duration.as_secs_f64() * 1000.0);
        }
    }

    std::process::exit(result.exit_code(cli.exit_zero));
}

fn load_config(cli: &Cli) -> Config {
    if let Some(path) = &cli.config {
        Config::load(path).unwrap_or_else(|e| {
            eprintln!("{}: failed to load config: {}", "error".red().bold(), e);
            std::process::exit(2);
        })
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match Config::discover(&cwd) {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("{}: failed to load config: {}", "error".red().bold(), e);
                std::process::exit(2);
            }
        }
    }
}

fn merge_cli(cli: &Cli, config: &mut Config) {
    if let Some(disable) = &cli.disable {
        config.rules.disabled.extend(disable.iter().cloned());
    }
    if let Some(select) = &cli.select {
        config.rules.enabled = select.clone();
    }
    if cli.jobs > 0 {
        config.engine.jobs = cli.jobs;
    }
    if cli.verbose {
        config.output.verbose = true;
    }
    if let Some(order) = &cli.order {
        match order.parse::<SortOrder>() {
            Ok(order) => config.sort.order = order,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(2);
            }
        }
    }
    if cli.case_sensitive {
        config.sort.case_sensitive = true;
    }
    if cli.natural {
        config.sort.natural = true;
    }
    if let Some(min_keys) = cli.min_keys {
        config.sort.min_keys = min_keys;
    }
    if cli.group_functions {
        config.sort.variables_before_functions = true;
    }
}

fn run_fixer(cli: &Cli, engine: &Engine, files: &[PathBuf]) {
    let mode = if cli.diff {
        FixMode::Diff
    } else if cli.unsafe_fixes {
        FixMode::All
    } else {
        FixMode::SafeOnly
    };
    let fixer = Fixer::new(engine)
        .with_mode(mode)
        .with_dry_run(cli.fix && !cli.write);

    let mut total_applied = 0;
    let mut total_files = 0;
    for file in files {
        match fixer.fix_file(file) {
            Ok(result) => {
                if let Some(diff) = &result.diff {
                    print!("{}", diff);
                }
                if result.fixes_applied > 0 {
                    total_applied += result.fixes_applied;
                    total_files += 1;
                    if cli.verbose {
                        eprintln!(
                            "{}: {} fixes{}",
                            file.display(),
                            result.fixes_applied,
                            if cli.write { "" } else { " (dry run)" }
                        );
                    }
                }
                if !result.converged {
                    eprintln!(
                        "{}: fix loop did not converge for {}",
                        "warning".yellow(),
                        file.display()
                    );
                }
            }
            Err(e) => eprintln!("{}: {}: {}", "error".red().bold(), file.display(), e),
        }
    }

    if cli.fix && total_applied > 0 {
        let verb = if cli.write { "Applied" } else { "Would apply" };
        println!(
            "{} {} {} in {} {}",
            verb,
            total_applied,
            if total_applied == 1 { "fix" } else { "fixes" },
            total_files,
            if total_files == 1 { "file" } else { "files" },
        );
    }
}

fn print_fixes(result: &collate::LintResult) {
    for diag in &result.diagnostics {
        let Some(fix) = &diag.fix else {
            continue;
        };
        println!(
            "{}:{}:{}: [{}] {} ({})",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column,
            diag.rule_id.cyan(),
            fix.description,
            fix.safety
        );
    }
}

fn list_rules() {
    println!("{}", "Available rules".bold());
    for rule in all_rules() {
        println!("    {} ({})", rule.id().cyan(), rule.category());
        println!("      {}", rule.description());
    }
}

fn handle_init(output_format: &str) {
    let config = Config::default();
    let (name, content) = match output_format {
        "json" => (
            ".collaterc.json",
            serde_json::to_string_pretty(&config).unwrap_or_default(),
        ),
        _ => (
            ".collaterc.yaml",
            serde_yaml::to_string(&config).unwrap_or_default(),
        ),
    };
    if std::path::Path::new(name).exists() {
        eprintln!("{}: {} already exists", "error".red().bold(), name);
        std::process::exit(1);
    }
    match std::fs::write(name, content) {
        Ok(()) => println!("Wrote {}", name),
        Err(e) => {
            eprintln!("{}: failed to write {}: {}", "error".red().bold(), name, e);
            std::process::exit(1);
        }
    }
}
