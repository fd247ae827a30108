use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "grocer")]
#[command(about = "Compare supermarket prices and build a shareable buy list")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Current list URL; the list is read from its `#list=` fragment
    #[arg(long, global = true, env = "GROCER_URL", value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search store offers for a product
    Search {
        /// Product to search for, e.g. "milk 2L"
        #[arg(required = true)]
        query: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search and add one of the offers to the list
    Add {
        /// Product to search for
        #[arg(required = true)]
        query: Vec<String>,
        /// Offer number from the search results (1-based)
        #[arg(short, long, default_value = "1")]
        pick: usize,
    },
    /// Add an offer given on the command line
    AddOffer {
        /// Offer identifier
        #[arg(long)]
        id: String,
        /// Product name
        #[arg(long)]
        name: String,
        /// Store: Coles, Woolworths, ALDI or IGA
        #[arg(long)]
        store: String,
        /// Current price in AUD
        #[arg(long)]
        price: f64,
        /// Unit label, e.g. "2L"
        #[arg(long, default_value = "")]
        quantity: String,
        /// Discount in AUD already applied to the price
        #[arg(long, default_value = "0")]
        discount: f64,
    },
    /// Remove an item from the list
    #[command(alias = "rm")]
    Remove {
        /// Item ID
        id: String,
    },
    /// Mark an item as taken, or not taken again
    Toggle {
        /// Item ID
        id: String,
    },
    /// Show the list and the total still to pay
    #[command(alias = "ls")]
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy a share link for the list to the clipboard
    Share {
        /// Print the link instead of copying it
        #[arg(long)]
        print: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Origin used for new lists and share links
    SetOrigin {
        /// e.g. https://grocer.example
        url: String,
    },
    /// Gemini model used for searches
    SetModel {
        /// e.g. gemini-2.5-flash
        model: String,
    },
}
