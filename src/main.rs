use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use log::debug;
use commands::inspect::{print_ast, print_tokens};
use commands::repl::repl;
use commands::run::{run_file, run_source};
use config::{load_config, ConfigError};

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "cinter")]
#[command(version, about = "Cinter runs programs written in a small expression language.")]
struct Cli {
    /// Config file (defaults to ./cinter.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise console log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    subcommand: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a source file
    Run {
        path: PathBuf,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run source given on the command line
    Eval {
        source: String,

        #[arg(long)]
        json: bool,
    },
    /// Print the token stream of a file
    Tokens {
        path: PathBuf,
    },
    /// Print the syntax tree of a file
    Ast {
        path: PathBuf,
    },
    /// Interactive session
    Repl,
}

fn exit_code_for(e: &(dyn std::error::Error + 'static)) -> u8 {
    if let Some(language_error) = e.downcast_ref::<cinter_core::Error>() {
        language_error.kind.exit_code() as u8
    } else if e.is::<std::io::Error>() {
        74
    } else if e.is::<ConfigError>() {
        78
    } else {
        1
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;

    let console_level = cinter_logger::verbosity_level(config.logging.console_level()?, cli.verbose);
    let file_level = config.logging.file_level()?;
    let log_dir = cli.log_dir.or(config.logging.directory.clone());
    cinter_logger::init(log_dir, console_level, file_level)?;
    debug!("Command line: {:?}", cli.subcommand);

    match cli.subcommand {
        Commands::Run { path, json } => run_file(&path, json, &config.runtime),
        Commands::Eval { source, json } => run_source(&source, json, &config.runtime),
        Commands::Tokens { path } => print_tokens(&path),
        Commands::Ast { path } => print_ast(&path),
        Commands::Repl => repl(&config.runtime),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            eprintln!("error: {}", e);
            ExitCode::from(exit_code_for(e.as_ref()))
        }
    }
}
