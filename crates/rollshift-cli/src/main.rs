use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rollshift_cli::PipelineArgs;

mod commands;

#[derive(Parser)]
#[command(name = "rollshift")]
#[command(version, about = "Film negative to positive converter", long_about = None)]
struct Cli {
    /// Log per-stage statistics (same as RUST_LOG=rollshift_core=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a negative image to a positive
    Convert {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file or directory
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Batch process multiple files with shared settings
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Measure the film base on the first frame and reuse it for the roll
        #[arg(long)]
        shared_base: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Estimate the film base of a negative
    AnalyzeBase {
        /// Input file
        input: PathBuf,

        /// Pipeline config file (for the base sample percentage)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Save the base as JSON for use with --base-from
        #[arg(short, long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Write the default pipeline config (~/rollshift/pipeline.yml by default)
    Init {
        /// Destination file
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rollshift_core=debug,rollshift_cli=debug,rollshift=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            out,
            pipeline,
        } => commands::cmd_convert(input, out, pipeline),
        Commands::Batch {
            inputs,
            out,
            threads,
            recursive,
            shared_base,
            pipeline,
        } => commands::cmd_batch(inputs, out, threads, recursive, shared_base, pipeline),
        Commands::AnalyzeBase {
            input,
            config,
            json,
            save,
        } => commands::cmd_analyze(input, config, json, save),
        Commands::Init { path, force } => commands::cmd_init(path, force),
    }
}
