use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for countrysel
#[derive(Debug, Parser)]
#[command(
    name = "countrysel",
    version,
    about = "Fuzzy country picker: search, highlight, remember the last selection"
)]
pub struct CliArgs {
    /// Country list as JSON or JSON.gz (default: the built-in ISO 3166-1 list)
    #[arg(short = 'i', long = "input", global = true, conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Fetch the country list from a URL instead (native or restcountries.com shape)
    #[arg(short = 'u', long = "url", global = true)]
    pub url: Option<String>,

    /// Where the last selection is remembered
    #[arg(short = 's', long = "store", global = true, default_value = ".countrysel.json")]
    pub store: PathBuf,

    /// JSON file with selector settings (debounce_ms, blur_grace_ms, storage_key, search)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Fuzziness override: 0 = exact only, 1 = anything
    #[arg(short = 't', long = "threshold", global = true)]
    pub threshold: Option<f64>,

    /// Disable ANSI colors
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every country in the dataset
    Countries,

    /// Rank countries matching a query
    Search {
        query: String,
        /// Show at most this many results
        #[arg(short = 'n', long = "limit", default_value_t = 10)]
        limit: usize,
    },

    /// Split a label around a query the way the dropdown renders it
    Highlight { text: String, query: String },

    /// Commit a country (by code or exact name) as the remembered selection
    Select { country: String },

    /// Print the remembered selection, if any
    Last,

    /// Drive a selector with scripted events and print what it shows
    ///
    /// Events: type:<text>, key:<ArrowDown|ArrowUp|Enter|Escape>, wait:<ms>,
    /// focus, blur, click:<row>, hover:<row>
    Replay {
        #[arg(required = true)]
        events: Vec<String>,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}
