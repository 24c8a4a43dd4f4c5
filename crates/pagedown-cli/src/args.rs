use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pagedown")]
#[command(about = "Convert saved documentation pages to Markdown")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a single saved HTML page
    Convert {
        /// Saved page (.html)
        file: PathBuf,

        /// Original URL of the page, used to name the Markdown file
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        options: ConvertArgs,
    },

    /// Convert every saved page under a directory; sub-directories become
    /// sub-directories of the output
    Collect {
        /// Directory holding saved pages
        dir: PathBuf,

        #[command(flatten)]
        options: ConvertArgs,
    },
}

/// Options shared by every command that converts pages
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Output directory (overrides output.save_path)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Convert only the first element matching this CSS selector
    #[arg(short, long, value_name = "CSS")]
    pub selector: Option<String>,

    /// Merge translation overlays inline instead of stripping them
    #[arg(long)]
    pub include_translations: bool,

    /// Render links as plain text
    #[arg(long)]
    pub no_links: bool,

    /// Configuration file layered over the defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
