//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Word frequency cards and word cloud for Wikipedia categories
#[derive(Parser, Debug)]
#[command(name = "wiki-cloud", version, about)]
pub struct Args {
    /// Analysis server base URL (overrides settings and WIKI_CLOUD_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Directory for settings and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a category without opening a window and print the top words
    Analyze {
        /// Category name, e.g. "Birds of Europe"
        category: String,

        /// Number of words to print
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_opens_the_window() {
        let args = Args::try_parse_from(["wiki-cloud"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.server.is_none());
    }

    #[test]
    fn analyze_with_defaults() {
        let args = Args::try_parse_from(["wiki-cloud", "analyze", "Birds of Europe"]).unwrap();
        match args.command {
            Some(Command::Analyze { category, top }) => {
                assert_eq!(category, "Birds of Europe");
                assert_eq!(top, 20);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_server_flag_after_subcommand() {
        let args = Args::try_parse_from([
            "wiki-cloud",
            "analyze",
            "Rivers",
            "--top",
            "5",
            "--server",
            "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(args.server.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(args.command, Some(Command::Analyze { top: 5, .. })));
    }

    #[test]
    fn analyze_requires_category() {
        assert!(Args::try_parse_from(["wiki-cloud", "analyze"]).is_err());
    }
}
