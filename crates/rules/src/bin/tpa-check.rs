//! tpa-check: screen stroke case files against the thrombolysis protocol.
//!
//! Subcommands:
//! - `evaluate <FILE>`: screen one case document
//! - `batch`: screen every case in a directory and check expected verdicts
//! - `protocol`: print the ordered guard table
//! - `config`: print the effective configuration

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use stroke_core::config::{load_dotenv, Config, IntakeConfig};
use stroke_rules::audit_log::AuditLog;
use stroke_rules::evaluator::{position, protocol};
use stroke_rules::loader::CaseLoader;
use stroke_rules::regression::{screen_case, screen_directory, CaseReport};
use stroke_rules::Screener;

// ── CLI ─────────────────────────────────────────────────────────────

/// Intravenous thrombolysis eligibility checker.
#[derive(Parser, Debug)]
#[command(name = "tpa-check", version, about)]
struct Cli {
    /// Config profile; overrides TPA_PROFILE.
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen a single case file.
    Evaluate {
        /// Path to a YAML or JSON case document.
        file: PathBuf,
        /// Substitute defaults for missing vital signs.
        #[arg(long)]
        defaults: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Screen every case in a directory, checking expected verdicts.
    Batch {
        /// Cases directory (default: TPA_CASES_DIR or data/cases).
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Substitute defaults for missing vital signs.
        #[arg(long)]
        defaults: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the ordered guard table.
    Protocol {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the effective configuration.
    Config {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

// ── Entry point ─────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.profile {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    match cli.command {
        Command::Evaluate {
            file,
            defaults,
            format,
        } => run_evaluate(&config, &file, defaults, format),
        Command::Batch {
            dir,
            defaults,
            format,
        } => {
            let dir = dir.unwrap_or_else(|| config.cases.dir.clone());
            run_batch(&config, dir, defaults, format)
        }
        Command::Protocol { format } => {
            print_protocol(format)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { format } => {
            print_config(&config, format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_screener(config: &Config, force_defaults: bool) -> Screener {
    let intake = IntakeConfig {
        substitute_missing_vitals: config.intake.substitute_missing_vitals || force_defaults,
        ..config.intake.clone()
    };
    let audit = Arc::new(AuditLog::with_max_entries(config.audit.max_entries_per_patient));
    Screener::new(&intake, audit)
}

// ── Subcommands ─────────────────────────────────────────────────────

fn run_evaluate(config: &Config, file: &Path, defaults: bool, format: Format) -> Result<ExitCode> {
    let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
    let case = CaseLoader::new(dir)
        .load_file(file)
        .with_context(|| format!("failed to load case file {}", file.display()))?;

    let screener = build_screener(config, defaults);
    let report = screen_case(&screener, &case);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_case_text(&report),
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_batch(config: &Config, dir: PathBuf, defaults: bool, format: Format) -> Result<ExitCode> {
    let loader = CaseLoader::new(dir.clone());
    let screener = build_screener(config, defaults);
    let report = screen_directory(&loader, &screener)
        .with_context(|| format!("failed to screen cases directory {}", dir.display()))?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => {
            for case in &report.cases {
                print_case_line(case);
            }
            for failure in &report.load_failures {
                println!("LOAD-ERROR  {}  {}", failure.path.display(), failure.error);
            }
            println!();
            if report.is_empty() {
                println!("no case files found in {}", report.dir.display());
            } else {
                println!("{} passed, {} failed", report.passed, report.failed);
            }
        }
    }

    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_protocol(format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let table: Vec<serde_json::Value> = protocol()
                .iter()
                .enumerate()
                .map(|(i, g)| {
                    serde_json::json!({
                        "position": i + 1,
                        "id": g.id,
                        "stage": g.stage.to_string(),
                        "reason": g.reason,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Format::Text => {
            for (i, g) in protocol().iter().enumerate() {
                println!(
                    "{:>2}. {:<24} {:<20} {}",
                    i + 1,
                    g.id.as_str(),
                    g.stage.to_string(),
                    g.reason
                );
            }
        }
    }
    Ok(())
}

fn print_config(config: &Config, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&config.summary())?),
        Format::Text => println!("{}", serde_yaml::to_string(&config.summary())?),
    }
    Ok(())
}

// ── Text rendering ──────────────────────────────────────────────────

fn verdict_label(eligible: bool) -> &'static str {
    if eligible { "ELIGIBLE" } else { "NOT ELIGIBLE" }
}

fn print_case_text(report: &CaseReport) {
    println!("case:       {} (patient {})", report.case_id, report.patient_code);
    if let Some(error) = &report.error {
        println!("error:      {error}");
        return;
    }
    let Some(outcome) = &report.outcome else {
        return;
    };
    println!("verdict:    {}", verdict_label(outcome.verdict.eligible));
    println!("reason:     {}", outcome.verdict.reason);
    if let Some(id) = outcome.triggered_guard {
        let pos = position(id).unwrap_or_default();
        println!("guard:      #{pos} {id}");
    }
    for field in &outcome.substituted_fields {
        println!("defaulted:  {field}");
    }
    for warning in &outcome.warnings {
        println!("warning:    {warning}");
    }
    if let Some(matches) = report.matches_expected {
        println!("expected:   {}", if matches { "match" } else { "MISMATCH" });
    }
    println!("audit id:   {}", outcome.audit_id);
}

fn print_case_line(report: &CaseReport) {
    let status = if report.passed() { "ok  " } else { "FAIL" };
    match (&report.outcome, &report.error) {
        (_, Some(error)) => println!("{status}  {:<28} error: {error}", report.case_id),
        (Some(outcome), None) => {
            let mismatch = if report.matches_expected == Some(false) {
                "  (expected verdict differs)"
            } else {
                ""
            };
            println!(
                "{status}  {:<28} {:<13} {}{mismatch}",
                report.case_id,
                verdict_label(outcome.verdict.eligible),
                outcome.verdict.reason
            );
        }
        (None, None) => {}
    }
}
