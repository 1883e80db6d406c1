//! Reads a page's HTML from stdin and prints the extraction result as JSON.
//!
//! Usage: `extract_stdin [URL] [--selected TEXT] [--max-length N] [--emergency]`
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`) so stdout stays pure JSON.

use std::io::{self, Read};
use std::process;

use clap::Parser;
use page_context::fallback::emergency_extract;
use page_context::{extract, ExtractionOptions, HtmlPage};
use tracing_subscriber::EnvFilter;

/// Extract readable page content from HTML on stdin
#[derive(Parser)]
#[command(name = "extract_stdin", version)]
struct Cli {
    /// Address the page was loaded from; picks the site strategy
    #[arg(default_value = "about:blank")]
    url: String,

    /// Text to report as the user's current selection
    #[arg(long)]
    selected: Option<String>,

    /// Maximum content length in characters
    #[arg(long)]
    max_length: Option<usize>,

    /// Use the emergency fallback instead of site detection
    #[arg(long)]
    emergency: bool,
}

fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        process::exit(1);
    }

    let page = match HtmlPage::from_bytes(&html, &args.url) {
        Ok(page) => page,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    let include_selected = args.selected.is_some();
    let page = match args.selected {
        Some(selection) => page.with_selection(selection),
        None => page,
    };

    let options = ExtractionOptions {
        include_selected,
        max_length: args.max_length,
        ..ExtractionOptions::default()
    };
    let result = if args.emergency {
        emergency_extract(&page, &options)
    } else {
        extract(&page, &options)
    };

    println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_url() {
        let cli = Cli::try_parse_from([
            "extract_stdin",
            "https://mail.google.com/mail/u/0/",
            "--selected",
            "some words",
            "--max-length",
            "400",
            "--emergency",
        ])
        .expect("valid arguments");
        assert_eq!(cli.url, "https://mail.google.com/mail/u/0/");
        assert_eq!(cli.selected.as_deref(), Some("some words"));
        assert_eq!(cli.max_length, Some(400));
        assert!(cli.emergency);
    }

    #[test]
    fn rejects_unknown_flags_and_bad_lengths() {
        assert!(Cli::try_parse_from(["extract_stdin", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["extract_stdin", "--max-length", "many"]).is_err());
        let cli = Cli::try_parse_from(["extract_stdin"]).expect("defaults");
        assert_eq!(cli.url, "about:blank");
    }
}
