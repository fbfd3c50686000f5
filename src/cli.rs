use clap::{Parser, Subcommand};
use oxidized_skill_lint::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oxidized-skill-lint",
    version,
    about = "Cross-reference and duplication linting for AI agent skills"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a skill directory
    Validate {
        /// Path to the skill directory
        path: PathBuf,

        /// Directory holding sibling skills to compare against
        /// (default: ~/.claude/skills)
        #[arg(long)]
        skills_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// One-line score plus violations and warnings only
        #[arg(long)]
        minimal: bool,

        /// Also show info findings
        #[arg(long, short)]
        verbose: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate every skill in a collection directory against the others
    #[command(name = "validate-all")]
    ValidateAll {
        /// Path to a directory containing multiple skill subdirectories
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// One-line score plus violations and warnings only
        #[arg(long)]
        minimal: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all finding categories with descriptions
    ListRules,

    /// Show full explanation for a finding category
    Explain {
        /// Finding category (e.g., "broken_reference")
        rule_id: String,
    },
}
