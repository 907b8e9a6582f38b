use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "testrec")]
#[command(version, about = "Keep track of test runs in a CSV file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file to use (defaults to the configured default-file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data file if it doesn't exist and show a summary
    Init,

    /// Add a test record
    #[command(alias = "n")]
    Add {
        /// System under test (letters, digits, spaces, ()[]-_.)
        system_name: String,

        /// Kind of test (letters and digits only)
        test_type: String,

        /// Failed, Passed, Pending or Success
        #[arg(short, long, default_value = "Pending")]
        result: String,
    },

    /// List test records
    #[command(alias = "ls")]
    List {
        /// Show deleted records instead of active ones
        #[arg(long)]
        deleted: bool,
    },

    /// Show one or more records by ID
    #[command(alias = "v")]
    Show {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Search active records (at least 3 characters)
    Search { term: String },

    /// Change fields of a record; all changes are saved together
    #[command(alias = "e")]
    Update {
        id: String,

        /// New system name
        #[arg(long)]
        name: Option<String>,

        /// New test type
        #[arg(long = "type")]
        test_type: Option<String>,

        /// New result
        #[arg(long)]
        result: Option<String>,
    },

    /// Delete records (they can be recovered)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Recover deleted records
    Recover {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Permanently remove deleted records (all of them if no IDs are given)
    Purge {
        ids: Vec<String>,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List candidate data files in a directory
    Files {
        /// Directory to scan (defaults to the current directory)
        dir: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (default-file, max-records)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
