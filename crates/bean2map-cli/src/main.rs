//! bean2map command-line interface

use bean2map::cli::{coerce, filter, output, resolve};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

/// bean2map command-line tool
#[derive(Parser)]
#[command(name = "bean2map")]
#[command(author, version, about = "Inspect type models and entity maps", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved properties of a type
    Resolve {
        /// Type model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Type to resolve
        type_name: String,
    },

    /// Keep only the entries of a JSON object that a type recognizes
    Filter {
        /// Type model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Type to filter against
        type_name: String,

        /// JSON object to filter
        input: PathBuf,
    },

    /// Coerce a single value to a target type
    Coerce {
        /// Target type (int, Long, boolean, char, Date, ...)
        target: String,

        /// Value as JSON; bare text is read as a string
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .try_init();
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    init_logging(cli.verbose);
    debug!("bean2map {}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Resolve { model, type_name } => resolve::resolve(resolve::ResolveConfig {
            model,
            type_name,
            verbose: cli.verbose,
            output_format: cli.format.clone(),
            output_file: cli.output.clone(),
        }),

        Commands::Filter {
            model,
            type_name,
            input,
        } => filter::filter(filter::FilterConfig {
            model,
            type_name,
            input,
            verbose: cli.verbose,
            output_format: cli.format.clone(),
            output_file: cli.output.clone(),
        }),

        Commands::Coerce { target, value } => coerce::coerce(coerce::CoerceConfig {
            target,
            value,
            output_format: cli.format.clone(),
            output_file: cli.output.clone(),
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
