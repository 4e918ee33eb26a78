use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "draftmill")]
#[command(
    version,
    about = "Deterministic technical-article generator with coverage tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and publish the next article
    Generate {
        #[arg(long, help = "Reference material file to ground the article in")]
        context_file: Option<PathBuf>,
        #[arg(long, help = "LLM provider (openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long = "dry-run", help = "Show the selected topic only, don't generate")]
        dry_run: bool,
    },

    /// Show the next topic the scheduler would pick
    Next {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Show coverage status
    Status {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file path
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(mill) = e.downcast_ref::<draftmill::MillError>() {
                eprintln!(
                    "{} {}",
                    console::style(format!("Error [{}]:", mill.taxonomy())).red().bold(),
                    mill
                );
            } else {
                eprintln!("{} {}", console::style("Error:").red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            context_file,
            provider,
            model,
            dry_run,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(draftmill::cli::commands::generate::run(
                draftmill::cli::commands::generate::GenerateOptions {
                    context_file,
                    provider,
                    model,
                    dry_run,
                },
            ))?;
        }
        Commands::Next { format } => {
            draftmill::cli::commands::next::run(&format)?;
        }
        Commands::Status { format } => {
            draftmill::cli::commands::status::run(&format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                draftmill::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                draftmill::cli::commands::config::path()?;
            }
        },
    }

    Ok(())
}
