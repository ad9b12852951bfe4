use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sleek", about = concat!("sleek v", env!("CARGO_PKG_VERSION"), " - tasks by priority and due date"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./sleek.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file with the initial task list (read only, never written)
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_today)]
    pub today: Option<chrono::NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the grouped task list and exit
    View(ViewArgs),
    /// Run a line-oriented session on stdin
    Shell,
    /// Show or change settings in the config file
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct ViewArgs {
    /// Grouping: priority or due (default: from config)
    #[arg(long)]
    pub sort: Option<String>,
    /// Only show tasks whose text or projects contain this
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Set a value: font-size, compact, sort, log-level
    Set { key: String, value: String },
}

fn parse_today(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", s, e))
}

// ---------------------------------------------------------------------------
// Shell commands (one per input line)
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shell",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Create a task
    Add(ShellAddArgs),
    /// Change fields of a task (only the given flags are applied)
    Edit(ShellEditArgs),
    /// Flip a task between open and completed
    #[command(alias = "done")]
    Toggle { id: String },
    /// Delete a task
    #[command(alias = "delete", alias = "remove")]
    Rm { id: String },
    /// Switch grouping: priority or due
    Sort { mode: String },
    /// Filter by text or project; no argument clears the search
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Print the grouped task list
    #[command(alias = "ls")]
    List,
    /// Show every field of one task
    Show { id: String },
    /// Show or change presentation settings
    Settings(ShellSettingsArgs),
    /// List shell commands
    Help,
    /// End the session
    #[command(alias = "exit", alias = "q")]
    Quit,
}

#[derive(Args, Debug)]
pub struct ShellAddArgs {
    /// Task text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Priority letter A-D
    #[arg(short = 'p', long)]
    pub priority: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(short = 'd', long)]
    pub due: Option<String>,
    /// Projects, e.g. "+Home Work"
    #[arg(short = 't', long)]
    pub projects: Option<String>,
    /// Recurrence such as 1w (stored only)
    #[arg(short = 'r', long)]
    pub recur: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShellEditArgs {
    pub id: String,
    /// New text
    #[arg(long)]
    pub text: Option<String>,
    /// Priority letter A-D, or - to clear
    #[arg(short = 'p', long)]
    pub priority: Option<String>,
    /// Due date YYYY-MM-DD, or - to clear
    #[arg(short = 'd', long)]
    pub due: Option<String>,
    /// Replace projects, e.g. "+Home Work"
    #[arg(short = 't', long)]
    pub projects: Option<String>,
    /// Recurrence, or - to clear
    #[arg(short = 'r', long)]
    pub recur: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShellSettingsArgs {
    /// small, medium, or large
    #[arg(long)]
    pub font_size: Option<String>,
    /// true or false
    #[arg(long)]
    pub compact: Option<String>,
}
