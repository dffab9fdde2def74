use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use navto::{Config, NavtoError, SymbolScope};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("NAVTO_BUILD_COMMIT"),
    ")"
);

/// navto: go-to-symbol search across source files.
/// Ranks identifiers as exact, prefix or substring matches of a pattern
/// and reports the scope that encloses each one.
#[derive(Parser)]
#[command(name = "navto", version = VERSION, about)]
struct Cli {
    /// Search pattern (a regular expression).
    query: Option<String>,

    /// Files or directories to search. Defaults to the current directory.
    paths: Vec<PathBuf>,

    /// Maximum number of results for this pattern.
    #[arg(long)]
    max: Option<usize>,

    /// Match case exactly.
    #[arg(long)]
    case_sensitive: bool,

    /// Treat the query as literal text rather than a regular expression.
    #[arg(long)]
    literal: bool,

    /// Only report declared names, not every identifier.
    #[arg(long)]
    declarations: bool,

    /// Only search files matching this glob (repeatable).
    #[arg(long = "glob", value_name = "GLOB")]
    globs: Vec<String>,

    /// Config file. Defaults to .navto.toml in the first path.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Machine-readable JSON output.
    #[arg(long)]
    json: bool,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "navto", &mut io::stdout());
        return;
    }

    init_logging();

    let Some(query) = cli.query.as_deref() else {
        eprintln!("usage: navto <query> [PATHS]... [--max N] [--case-sensitive] [--json]");
        process::exit(3);
    };

    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let config = match load_config(&cli, &paths) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };

    let search_value = if cli.literal {
        regex_syntax::escape(query)
    } else {
        query.to_string()
    };

    let ctx = navto::context_for(&config);
    let items = match navto::navigate_paths(&ctx, &search_value, &paths, &config) {
        Ok(items) => items,
        Err(e) => fail(&e),
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).expect("NavigateToItem is always serializable")
        );
    } else {
        println!("{}", navto::format::format_items(query, &items));
    }
}

/// Config file (explicit or discovered), then CLI overrides.
fn load_config(cli: &Cli, paths: &[PathBuf]) -> Result<Config, NavtoError> {
    let mut config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        let first = paths.first().map_or(Path::new("."), PathBuf::as_path);
        let dir = if first.is_file() {
            first.parent().unwrap_or(Path::new("."))
        } else {
            first
        };
        Config::discover(dir)?
    };

    if let Some(max) = cli.max {
        config.max_results = max;
    }
    if cli.case_sensitive {
        config.case_sensitive = true;
    }
    if cli.declarations {
        config.symbols = SymbolScope::Declarations;
    }
    config.globs.extend(cli.globs.iter().cloned());
    Ok(config)
}

/// Logs go to stderr so stdout stays parseable. `NAVTO_LOG` takes
/// `EnvFilter` directives, e.g. `NAVTO_LOG=navto=debug`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("NAVTO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(e: &NavtoError) -> ! {
    eprintln!("{e}");
    process::exit(e.exit_code());
}
