//! quizsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizsmith", version, about = "Assessment auto-grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an answers file against an assessment
    Grade {
        /// Path to the .toml assessment
        #[arg(long)]
        assessment: PathBuf,

        /// Path to the .toml answers file
        #[arg(long)]
        answers: PathBuf,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, html, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate assessment TOML files
    Validate {
        /// Path to assessment file or directory
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Print a saved JSON report
    Show {
        /// Report JSON written by `grade`
        #[arg(long)]
        report: PathBuf,
    },

    /// Create starter config and a sample assessment
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            assessment,
            answers,
            output,
            format,
            config,
        } => commands::grade::execute(assessment, answers, output, format, config),
        Commands::Validate { assessment } => commands::validate::execute(assessment),
        Commands::Show { report } => commands::show::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
