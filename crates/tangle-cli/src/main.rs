#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tangle_core::config::resolve_config;
use tangle_core::{AnalysisConfig, ErrorCode, TangleConfig};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tangle: cycle and component analysis for directed graphs",
    long_about = "Replay an edge script into a directed graph and analyse it.\n\n\
                  Each script line is `FROM -> TO` (or `FROM TO`) to insert an edge, \
                  `- FROM -> TO` to delete one. `#` starts a comment."
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of discovering `tangle.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Edge script to replay. Reads stdin when omitted.
    #[arg(short, long, global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Walk vertices in name order for reproducible output.
    #[arg(long, global = true)]
    lexical: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn analysis(&self, config: &TangleConfig) -> AnalysisConfig {
        if self.lexical {
            AnalysisConfig::lexical()
        } else {
            config.analysis
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Topologically sort the graph",
        long_about = "Sort the graph with Kahn's algorithm and report whether it is acyclic.\n\
                      Vertices on or behind a cycle are listed as blocked. A cyclic graph \
                      is a normal result and exits 0.",
        after_help = "EXAMPLES:\n    # Sort a graph file\n    tg order --input deps.txt\n\n    # Read the script from stdin\n    printf 'a -> b\\nb -> c\\n' | tg order\n\n    # Emit machine-readable output\n    tg order --input deps.txt --json"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List strongly connected components",
        long_about = "Partition every vertex into strongly connected components (Tarjan).\n\
                      Components are printed sinks first.",
        after_help = "EXAMPLES:\n    # All components\n    tg scc --input deps.txt\n\n    # Reproducible order regardless of edit history\n    tg scc --input deps.txt --lexical"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List cycles",
        long_about = "List components that contain a directed cycle, including self-loops.",
        after_help = "EXAMPLES:\n    # Show cycles\n    tg cycles --input deps.txt\n\n    # Emit machine-readable output\n    tg cycles --input deps.txt --format json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show graph statistics",
        after_help = "EXAMPLES:\n    tg stats --input deps.txt"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Inspection",
        about = "Print the replayed graph",
        long_about = "Print every edge of the replayed graph as `from -> to`.",
        after_help = "EXAMPLES:\n    tg edges --input deps.txt"
    )]
    Edges(cmd::edges::EdgesArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    tg completions bash\n\n    # Generate zsh completions\n    tg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TANGLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "tangle=debug,info"
        } else {
            "tangle=info,warn"
        })
    });

    let format = env::var("TANGLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Everything `main` needs to report a failure: the mode to render in and
/// the error itself.
struct Failure {
    mode: OutputMode,
    error: CliError,
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let early_mode = resolve_output_mode(cli.format, cli.json, None);

    // Completions depend on nothing but the command tree.
    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command).map_err(|err| Failure {
            mode: early_mode,
            error: CliError::from_code(ErrorCode::InternalUnexpected, format!("{err:#}")),
        });
    }

    let cwd = env::current_dir().map_err(|err| Failure {
        mode: early_mode,
        error: CliError::from_code(
            ErrorCode::InternalUnexpected,
            format!("cannot read working directory: {err}"),
        ),
    })?;
    let config = resolve_config(cli.config.as_deref(), &cwd).map_err(|err| Failure {
        mode: early_mode,
        error: CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
    })?;

    let mode = resolve_output_mode(cli.format, cli.json, config.output.format.as_deref());
    let analysis = cli.analysis(&config);
    debug!(?mode, vertex_order = ?analysis.vertex_order, "resolved settings");

    let internal = |err: anyhow::Error| Failure {
        mode,
        error: CliError::from_code(ErrorCode::InternalUnexpected, format!("{err:#}")),
    };

    let graph = input::load_graph(cli.input.as_deref()).map_err(|err| Failure {
        mode,
        error: CliError::from(&err),
    })?;
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let result = match cli.command {
        Commands::Order(ref args) => cmd::order::run_order(args, &graph, analysis, mode),
        Commands::Scc(ref args) => cmd::scc::run_scc(args, &graph, analysis, mode),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, &graph, analysis, mode),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &graph, mode),
        Commands::Edges(ref args) => cmd::edges::run_edges(args, &graph, mode),
        Commands::Completions(_) => Ok(()),
    };
    result.map_err(internal)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure { mode, error }) => {
            if let Err(err) = render_error(mode, &error) {
                eprintln!("error: {} ({err})", error.message);
            }
            ExitCode::FAILURE
        }
    }
}
