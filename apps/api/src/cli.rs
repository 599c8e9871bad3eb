use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "recommender",
    version,
    about = "Assessment recommendation API over a catalog and Gemini"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Regenerate the catalog embedding file
    EmbedCatalog {
        /// Output path; defaults to EMBEDDINGS_PATH
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
