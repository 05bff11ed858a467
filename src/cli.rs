//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ossify",
    version,
    about = "Give some structure to your open-source software projects.",
    long_about = "Evaluate directory layouts against conventions and browse open-source licenses.\n\n\"Give it some bones!\"",
    after_help = "Examples:\n  ossify check Go\n  ossify check -f my-convention.json -d ./project\n  ossify convention list\n  ossify license --keyword permissive",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Settings directory (default: $OSSIFY_CONFIG_DIR or ~/.config/ossify)")]
    pub config_dir: Option<String>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current ossify version.")]
    Version,
    /// Check a directory against convention rules
    #[command(
        about = "Check a directory against convention rules",
        long_about = "Check a directory against one or more convention rules.\n\nThe convention can be given by name (argument or --convention), by JSON file (--file), or --all for every known convention. --file, --convention and --all are mutually exclusive.\n\nExit codes:\n  0 - All required rules pass\n  1 - One or more required rules failed",
        after_help = "Examples:\n  ossify check Go\n  ossify check -c \"Standard Distribution\"\n  ossify check -f my-convention.json\n  ossify check --all --output json"
    )]
    Check {
        /// Convention name (same as --convention)
        name: Option<String>,
        #[arg(long, short = 'c', help = "The name of a convention to check against (e.g. 'Go')")]
        convention: Option<String>,
        #[arg(long, short = 'f', help = "Path to a JSON file describing the convention rules")]
        file: Option<String>,
        #[arg(long, short = 'd', default_value = ".", help = "The directory to check")]
        directory: String,
        #[arg(long, short = 'a', action = clap::ArgAction::SetTrue, help = "Check against all known conventions")]
        all: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Manage file and structure conventions
    Convention {
        #[command(subcommand)]
        cmd: ConventionCmd,
    },
    /// Manage open-source licenses
    #[command(
        about = "Manage open-source licenses",
        long_about = "Show license text or details by id, filter by keyword, or search the catalog. With no options, lists popular licenses.",
        args_conflicts_with_subcommands = true
    )]
    License {
        #[command(subcommand)]
        cmd: Option<LicenseCmd>,
        /// License id (same as --id)
        id_arg: Option<String>,
        #[arg(long, short = 'i', help = "Get details about a single license by ID")]
        id: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Keywords to filter licenses by (e.g. popular, permissive, copyleft)")]
        keyword: Vec<String>,
        #[arg(long, help = "Search term to query across all known license metadata")]
        search: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "With an id, print license details instead of the license text")]
        details: bool,
    },
}

#[derive(Subcommand)]
/// Subcommands for `ossify convention`
pub enum ConventionCmd {
    /// List known conventions
    #[command(about = "List conventions", long_about = "Print built-in and user conventions with their rules.")]
    List,
    /// Add a custom convention from a file or stdin
    #[command(
        about = "Add a custom convention",
        long_about = "Add a convention JSON document to the user convention directory. Reads stdin when no file is given.\n\nValid levels: prohibited, optional, preferred, required\nValid types: directory, file, pattern"
    )]
    Add {
        /// Convention JSON file (stdin when omitted)
        file: Option<String>,
        #[arg(long, short = 'i', help = "Identifier used as the file name (default: convention name)")]
        id: Option<String>,
    },
}

#[derive(Subcommand)]
/// Subcommands for `ossify license`
pub enum LicenseCmd {
    /// List known licenses
    List,
    /// Add a custom license text
    #[command(
        about = "Add a custom license text",
        long_about = "Store a license text template under the configured license path. The id takes precedence over the catalog's published text."
    )]
    Add {
        /// Template file
        template: String,
        #[arg(long, short = 'i', help = "Identifier for the custom license")]
        id: String,
    },
}

/// `--convention` takes precedence over the positional name.
pub fn requested_convention(flag: Option<String>, positional: Option<String>) -> Option<String> {
    flag.filter(|c| !c.is_empty())
        .or(positional.filter(|c| !c.is_empty()))
}
