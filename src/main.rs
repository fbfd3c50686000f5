mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use oxidized_skill_lint::bundle::{find_skill_dirs, DirectorySiblings, MANIFEST};
use oxidized_skill_lint::finding::ValidationReport;
use oxidized_skill_lint::output::{self, OutputFormat, RenderOptions};
use oxidized_skill_lint::score::Recommendation;
use oxidized_skill_lint::{checks, config, validate};
use std::path::{Path, PathBuf};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            path,
            skills_dir,
            format,
            output: output_path,
            minimal,
            verbose,
            config: config_path,
        } => {
            // Detect collection directories early to give a helpful error rather
            // than a report full of orphaned files and a missing SKILL.md.
            if path.is_dir() && !path.join(MANIFEST).exists() {
                let children = find_skill_dirs(&path).unwrap_or_default();
                if !children.is_empty() {
                    print_collection_hint(&path, &children);
                    std::process::exit(2);
                }
            }

            let config = load_config(config_path.as_deref());
            let siblings = match config.siblings_dir(skills_dir.as_deref()) {
                Some(dir) => DirectorySiblings::new(dir),
                None => {
                    eprintln!("Error: cannot determine home directory; pass --skills-dir");
                    std::process::exit(2);
                }
            };

            let report = validate::run_validation(&path, &config, &siblings).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let options = RenderOptions { minimal, verbose };
            let formatted = output::format_report(&report, &format, options);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.passed() { 0 } else { 1 });
        }

        Commands::ValidateAll {
            path,
            format,
            minimal,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }

            let skill_dirs = find_skill_dirs(&path).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            if skill_dirs.is_empty() {
                eprintln!(
                    "Error: no skill directories found in '{}' (no subdirectory contains a SKILL.md)",
                    path.display()
                );
                std::process::exit(2);
            }

            let config = load_config(config_path.as_deref());
            // Every skill in the collection is compared with the others.
            let siblings = DirectorySiblings::new(&path);
            let options = RenderOptions {
                minimal,
                verbose: false,
            };

            let mut reports: Vec<ValidationReport> = Vec::new();
            for skill_dir in &skill_dirs {
                let report =
                    validate::run_validation(skill_dir, &config, &siblings).unwrap_or_else(|e| {
                        eprintln!("Error: {e}");
                        std::process::exit(2);
                    });
                print!("{}", output::format_report(&report, &format, options));
                reports.push(report);
            }

            if matches!(format, OutputFormat::Pretty) {
                print!("{}", format_collection_summary(&path, &reports));
            }

            let all_passed = reports.iter().all(|r| r.passed());
            std::process::exit(if all_passed { 0 } else { 1 });
        }

        Commands::ListRules => {
            let rules = checks::all_rules();
            println!("{}", "Finding Categories".bold().underline());
            println!();

            let mut current_check = "";
            for rule in &rules {
                if rule.check != current_check {
                    if !current_check.is_empty() {
                        println!();
                    }
                    println!("  {}", rule.check.bold());
                    current_check = rule.check;
                }

                let severity = match rule.severity {
                    "critical" => "CRITICAL".red().bold().to_string(),
                    "major" => "   MAJOR".red().to_string(),
                    "warning" => "    WARN".yellow().bold().to_string(),
                    "info" => "    INFO".blue().to_string(),
                    _ => rule.severity.to_string(),
                };

                println!(
                    "    [{severity}] {id:<26} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} categories", rules.len());
        }

        Commands::Explain { rule_id } => {
            let rules = checks::all_rules();
            match rules.iter().find(|r| r.id == rule_id) {
                Some(rule) => {
                    println!("{}", rule.id.bold());
                    println!();
                    println!("  Check:        {}", rule.check);
                    println!("  Severity:     {}", rule.severity);
                    println!("  Description:  {}", rule.message);
                    println!("  Remediation:  {}", rule.remediation);
                }
                None => {
                    eprintln!("Unknown rule: {rule_id}");
                    eprintln!("Use 'oxidized-skill-lint list-rules' to see all categories.");
                    std::process::exit(2);
                }
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> config::Config {
    config::Config::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

fn print_collection_hint(path: &Path, children: &[PathBuf]) {
    eprintln!(
        "Error: '{}' looks like a skills collection directory, not a single skill.",
        path.display()
    );
    eprintln!();
    eprintln!("To validate all skills at once:");
    eprintln!("  oxidized-skill-lint validate-all {}", path.display());
    eprintln!();
    eprintln!("To validate a specific skill:");
    for child in children {
        eprintln!("  oxidized-skill-lint validate {}", child.display());
    }
}

/// Renders a compact summary table after all individual reports.
fn format_collection_summary(collection_path: &Path, reports: &[ValidationReport]) -> String {
    let mut out = String::new();
    let separator = "─".repeat(58);

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!(
            "  Collection Summary: {}  ({} skills)",
            collection_path.display(),
            reports.len()
        )
        .bold()
        .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    let (mut n_approved, mut n_minor, mut n_major) = (0usize, 0usize, 0usize);

    for report in reports {
        let (icon, status) = match report.recommendation {
            Recommendation::Approve => {
                n_approved += 1;
                ("✓".green().to_string(), "APPROVE".green().bold().to_string())
            }
            Recommendation::NeedsMinorRevision => {
                n_minor += 1;
                ("⚠".yellow().to_string(), "MINOR  ".yellow().bold().to_string())
            }
            Recommendation::NeedsMajorRevision | Recommendation::Error => {
                n_major += 1;
                ("✗".red().to_string(), "MAJOR  ".red().bold().to_string())
            }
        };

        let (critical, major, warnings, _) = report.count_by_severity();
        out.push_str(&format!(
            "  {icon}  {name:<22} {status}  {score}/5  {critical}c {major}m {warnings}w\n",
            name = report.bundle,
            score = report.score,
        ));
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out.push_str(&format!(
        "  Total: {}  {}  {}\n",
        format!("{n_major} need major revision").red().bold(),
        format!("{n_minor} need minor revision").yellow().bold(),
        format!("{n_approved} approved").green().bold(),
    ));

    out
}
