use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use treesift::config::Config;
use treesift::document::node::Node;
use treesift::document::parser::parse_json;
use treesift::file::loader::{load_tree_file, load_tree_from_stdin};
use treesift::search::{project_current, project_parent, ProjectFn, Search, SearchOptions};

/// Treesift - find keys and values anywhere in a JSON or YAML document
#[derive(Parser)]
#[command(name = "treesift")]
#[command(version)]
#[command(about = "Recursive key/value search over JSON and YAML documents", long_about = None)]
struct Cli {
    /// Document to search (omit to read from stdin)
    file: Option<String>,

    /// Target as JSON: {"key": value}, {"*": value}, {"key": "*"}, a scalar, or null.
    /// Text that is not valid JSON is used as a string target; text that is
    /// valid JSON (e.g. the pattern `[1]`) is parsed unless --string is given.
    #[arg(short, long)]
    target: String,

    /// Use the target text as a plain string, without JSON parsing
    #[arg(short, long)]
    string: bool,

    /// Treat string parts of the target as regex patterns
    #[arg(short, long)]
    regex: bool,

    /// Do not compare numeric strings as numbers
    #[arg(long)]
    no_numeric: bool,

    /// Keep traversal order instead of sorting by depth
    #[arg(long)]
    no_sort: bool,

    /// Report the container holding each match
    #[arg(short, long)]
    parent: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log filter, e.g. "debug" (overrides RUST_LOG and the config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(cli: &Cli, config: &Config) {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn parse_target(text: &str, force_string: bool) -> Node {
    if force_string {
        return Node::string(text);
    }
    parse_json(text).unwrap_or_else(|_| Node::string(text))
}

/// Config options with the CLI flags applied on top. Flags only ever switch
/// an option away from its default.
fn search_options(cli: &Cli, config: &Config) -> SearchOptions {
    let mut options = config.search_options();
    if cli.regex {
        options = options.regex(true);
    }
    if cli.no_numeric {
        options = options.convert_numeric_strings(false);
    }
    if cli.no_sort {
        options = options.sort_results(false);
    }
    options
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    init_tracing(&cli, &config);

    let root = if let Some(file_path) = &cli.file {
        load_tree_file(file_path)?
    } else if !io::stdin().is_terminal() {
        load_tree_from_stdin()?
    } else {
        anyhow::bail!("No input: pass a file or pipe a document on stdin");
    };

    let options = search_options(&cli, &config);
    let project: ProjectFn = if config.return_parent || cli.parent {
        project_parent
    } else {
        project_current
    };

    let target = parse_target(&cli.target, cli.string);
    let search = Search::new(&root, &target, project, options)?;
    tracing::info!(matches = search.len(), "search finished");

    let output = if config.pretty || cli.pretty {
        serde_json::to_string_pretty(search.matches())
    } else {
        serde_json::to_string(search.matches())
    }
    .context("Failed to serialize results")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    stdout.flush()?;

    Ok(())
}
