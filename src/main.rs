//! bitonic CLI
//!
//! Main entry point for the `bsort` command.

use bitonic::config::Overrides;
use bitonic::io::{format_sequence, parse_sequence, read_input, write_demo, write_output};
use bitonic::launch::{DeviceLimits, plan_with_config};
use bitonic::{Executor, Layout, SortConfig, Sorter};
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "bsort")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort integer sequences with a bitonic sorting network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort integers separated by whitespace or commas
    Sort {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Sorter configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Accept lengths that are not a power of two
        #[arg(long)]
        pad: bool,

        /// Run passes on the parallel executor
        #[arg(long)]
        parallel: bool,

        /// Worker threads (selects the parallel executor)
        #[arg(long, value_name = "N")]
        threads: Option<usize>,

        /// Print sort statistics (JSON) to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Sort the built-in demonstration sequence
    Demo,

    /// Show the launch plan for a sequence length
    Plan {
        /// Sequence length
        #[arg(value_name = "N")]
        len: usize,

        /// Work-group size (config value, or 256, if omitted)
        #[arg(long, value_name = "SIZE")]
        local_size: Option<usize>,

        /// Sorter configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Plan the padded network
        #[arg(long)]
        pad: bool,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information about the sorter
    Info,
}

struct SortArgs<'a> {
    input: Option<&'a Path>,
    output: Option<&'a Path>,
    config: Option<&'a Path>,
    pad: bool,
    parallel: bool,
    threads: Option<usize>,
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose))
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Sort {
            input,
            output,
            config,
            pad,
            parallel,
            threads,
            stats,
        } => sort(SortArgs {
            input: input.as_deref(),
            output: output.as_deref(),
            config: config.as_deref(),
            pad,
            parallel,
            threads,
            stats,
        }),

        Commands::Demo => demo(),

        Commands::Plan {
            len,
            local_size,
            config,
            pad,
            json,
        } => show_plan(len, local_size, config.as_deref(), pad, json),

        Commands::Info => info(),
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug output
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn sort(args: SortArgs<'_>) -> Result<()> {
    let config = load_config(args.config)?.with_overrides(&Overrides {
        pad: args.pad,
        parallel: args.parallel,
        threads: args.threads,
        local_size: None,
    });
    tracing::debug!("Using {:?}", config);

    let sorter = Sorter::new(config)?;

    let source = read_input(args.input)?;
    let mut values = parse_sequence(&source)?;
    tracing::info!("Sorting {} elements from {}", values.len(), source.name);

    let stats = sorter.sort(&mut values)?;
    write_output(args.output, &format_sequence(&values))?;

    if args.stats {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| miette::miette!("Failed to serialize stats: {}", e))?;
        eprintln!("{}", json);
    }

    Ok(())
}

fn demo() -> Result<()> {
    write_demo(&mut std::io::stdout().lock())?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SortConfig> {
    let config = match path {
        Some(path) => SortConfig::load(path)?,
        None => SortConfig::default(),
    };
    Ok(config)
}

fn show_plan(
    len: usize,
    local_size: Option<usize>,
    config: Option<&Path>,
    pad: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?.with_overrides(&Overrides {
        pad,
        local_size,
        ..Overrides::default()
    });
    let layout = config.layout_for(len)?;
    let launches = plan_with_config(len, &config, &DeviceLimits::default())?;

    if json {
        let json = serde_json::to_string_pretty(&launches)
            .map_err(|e| miette::miette!("Failed to serialize plan: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("{:>5} {:>10} {:>10} {:>10} {:>8}", "pass", "k", "j", "global", "local");
    for (index, launch) in launches.iter().enumerate() {
        println!(
            "{:>5} {:>10} {:>10} {:>10} {:>8}",
            index, launch.pass.k, launch.pass.j, launch.config.global_size, launch.config.local_size
        );
    }
    println!(
        "{} launches, {} comparators",
        launches.len(),
        bitonic::network::comparator_count(len, layout)
    );

    Ok(())
}

fn info() -> Result<()> {
    println!("bitonic sorting network");
    println!("Version: {}", bitonic::VERSION);
    println!();
    println!("Layouts:");
    println!("  - {} (power-of-two lengths)", Layout::Alternating);
    println!("  - {} (any length)", Layout::Padded);
    println!();
    println!("Executors:");
    println!("  - {}", Executor::Sequential);
    println!(
        "  - {} ({} worker threads)",
        Executor::Parallel,
        rayon::current_num_threads()
    );

    Ok(())
}
