use clap::{Parser, Subcommand};
use mkvbulk::extractor::Scope;
use mkvbulk::tracks::JoinStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mkvbulk")]
#[command(author, version, about = "Inspect Matroska folders and extract their tracks in bulk")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the tracks, chapters and attachments of every file
    List {
        /// Folder, file inside it, or file:// URL
        folder: Option<String>,

        /// How entries are joined (defaults to the configured style)
        #[arg(short, long, value_enum)]
        join: Option<JoinStyle>,

        /// Keep the <b> markup for default tracks
        #[arg(long)]
        markup: bool,
    },

    /// Show the distinct languages, codecs and track ids of the folder
    Facets {
        folder: Option<String>,
    },

    /// Print the extraction commands without running them
    Plan {
        folder: Option<String>,

        /// What to extract (defaults to the configured scope)
        #[arg(short, long, value_enum)]
        scope: Option<Scope>,
    },

    /// Run the extraction commands
    Extract {
        folder: Option<String>,

        #[arg(short, long, value_enum)]
        scope: Option<Scope>,
    },

    /// Check that mkvmerge and mkvextract are available
    Deps,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
}
