//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for bookvault using the `clap` crate.
//! Every command that works on a search takes the Vault URL (or just its
//! query string) as input and prints the updated shareable URL, so a search
//! can be refined step by step and pasted back into a browser.
//!
//! # Commands
//!
//! - **search**: edit a search and show a page of results
//! - **tags**: browse the taxonomy
//! - **presets** / **preset**: list or apply curated bundles
//! - **share**: render the social caption for a search
//! - **book**, **library**, **recommendations**, **heart**/**save**/**tbr**:
//!   member views that share the book list shape
//! - **config**: show or change settings
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--verbose` flag for diagnostic logging on stderr
//! - Command aliases (e.g., `s` for `search`)

use crate::api::{InteractionType, LibraryFilter};
use crate::filters::SortKey;
use clap::{Args, Parser, Subcommand};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "bookvault")]
#[command(about = "Search the romance Vault by trope, heat, and safety shields", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log diagnostics to stderr (same as RUST_LOG=debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Edit a search and show one page of results
    #[command(visible_alias = "s")]
    Search(SearchArgs),

    /// List tag categories, or the tags of one category
    Tags {
        /// Category slug (e.g., trope)
        #[arg(short = 'c', long = "category", value_name = "SLUG")]
        category: Option<String>,
    },

    /// List the built-in presets
    Presets {
        /// Mark the preset a Vault URL is showing
        #[arg(value_name = "URL")]
        url: Option<String>,
    },

    /// Apply a preset and show the results
    Preset {
        /// Preset id (e.g., comfort-read)
        #[arg(value_name = "ID")]
        id: String,

        /// Vault URL or query string the preset replaces
        #[arg(value_name = "URL")]
        url: Option<String>,
    },

    /// Print a social caption for a search
    Share {
        /// Vault URL or query string
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Append the hashtag line
        #[arg(long = "hashtags")]
        hashtags: bool,

        /// Also copy the caption to the clipboard
        #[arg(short = 'c', long = "copy")]
        copy: bool,
    },

    /// Show one book
    Book {
        /// Book slug
        #[arg(value_name = "SLUG")]
        slug: String,
    },

    /// List books in your library
    #[command(visible_alias = "lib")]
    Library {
        /// Which shelf to list
        #[arg(short = 'f', long = "filter", value_enum, default_value_t = LibraryFilter::All)]
        filter: LibraryFilter,

        /// Page number
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: u32,
    },

    /// Show personalized recommendations
    #[command(visible_alias = "recs")]
    Recommendations,

    /// Heart a book (or un-heart it with --remove)
    Heart(InteractionArgs),

    /// Save a book (or unsave it with --remove)
    Save(InteractionArgs),

    /// Add a book to your TBR pile (or take it off with --remove)
    Tbr(InteractionArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Interaction kind and arguments for `heart`/`save`/`tbr`
    #[must_use]
    pub const fn interaction(&self) -> Option<(InteractionType, &InteractionArgs)> {
        match self {
            Self::Heart(args) => Some((InteractionType::Heart, args)),
            Self::Save(args) => Some((InteractionType::Save, args)),
            Self::Tbr(args) => Some((InteractionType::Tbr, args)),
            _ => None,
        }
    }
}

/// Search edits, applied in the order listed here
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Vault URL or query string to start from
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Start from an empty search
    #[arg(long = "clear")]
    pub clear: bool,

    /// Replace the free-text query (empty string clears it)
    #[arg(short = 'Q', long = "query", value_name = "TEXT")]
    pub query: Option<String>,

    /// Toggle a must-have tag
    #[arg(short = 'i', long = "include", value_name = "SLUG")]
    pub include: Vec<String>,

    /// Toggle a hard-no tag
    #[arg(short = 'e', long = "exclude", value_name = "SLUG")]
    pub exclude: Vec<String>,

    /// Toggle a safety shield
    #[arg(short = 's', long = "safety", value_name = "SLUG")]
    pub safety: Vec<String>,

    /// Drop a tag from whichever set holds it
    #[arg(short = 'r', long = "remove", value_name = "SLUG")]
    pub remove: Vec<String>,

    /// Only Kindle Unlimited titles
    #[arg(long = "ku", overrides_with = "no_ku")]
    pub ku: bool,

    /// Turn the Kindle Unlimited filter off
    #[arg(long = "no-ku", overrides_with = "ku")]
    pub no_ku: bool,

    /// Only hidden gems
    #[arg(long = "gems", overrides_with = "no_gems")]
    pub gems: bool,

    /// Turn the hidden gems filter off
    #[arg(long = "no-gems", overrides_with = "gems")]
    pub no_gems: bool,

    /// Sort order: newest, grovel, regret_low, heat
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Page number
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: u32,
}

impl SearchArgs {
    /// Requested Kindle Unlimited toggle, if any
    #[must_use]
    pub const fn kindle_unlimited(&self) -> Option<bool> {
        toggle(self.ku, self.no_ku)
    }

    /// Requested hidden gems toggle, if any
    #[must_use]
    pub const fn hidden_gems(&self) -> Option<bool> {
        toggle(self.gems, self.no_gems)
    }
}

const fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Arguments shared by `heart`, `save` and `tbr`
#[derive(Args, Debug, Clone)]
pub struct InteractionArgs {
    /// Book id
    #[arg(value_name = "BOOK_ID")]
    pub book_id: String,

    /// Undo the interaction instead
    #[arg(long = "remove")]
    pub remove: bool,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., page_size)
        #[arg(value_name = "KEY")]
        key: String,

        /// New value
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Print the configuration file location
    Path,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
