use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use harlens_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harlens")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for inspecting, summarizing, and replaying HTTP Archive (HAR) captures",
    long_about = "Harlens loads a HAR capture and lets you summarize the recorded traffic, \
                  filter entries, inspect classified response bodies, replay individual \
                  requests against their live origins, and export single entries as \
                  portable JSON documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a capture: totals, timing extremes, distributions
    Summary {
        /// Path to the HAR capture
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Case-insensitive text matched against URL or method
        #[arg(long)]
        search: Option<String>,

        /// Only entries with this HTTP method ("all" passes everything)
        #[arg(long)]
        method: Option<String>,

        /// Only entries in this status class (2xx, 3xx, 4xx, 5xx, other, all)
        #[arg(long)]
        status: Option<String>,
    },

    /// Filter entries into a new capture
    Filter {
        /// Path to the HAR capture
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Case-insensitive text matched against URL or method
        #[arg(long)]
        search: Option<String>,

        /// Only entries with this HTTP method ("all" passes everything)
        #[arg(long)]
        method: Option<String>,

        /// Only entries in this status class (2xx, 3xx, 4xx, 5xx, other, all)
        #[arg(long)]
        status: Option<String>,

        /// Write the filtered capture to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one entry with its classified response body
    Show {
        /// Path to the HAR capture
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Capture-order index of the entry
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Re-issue a captured request against its live origin.
    /// Sends a real request to whatever host the URL names.
    Replay {
        /// Path to the HAR capture
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Capture-order index of the entry
        #[arg(value_name = "INDEX")]
        index: usize,

        /// Override the request URL
        #[arg(long)]
        url: Option<String>,

        /// Override the HTTP method
        #[arg(long)]
        method: Option<String>,

        /// Replace all headers with "Name: value" lines (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Override the request body text
        #[arg(long)]
        body: Option<String>,
    },

    /// Write one entry's request/response/timing as a portable document
    Export {
        /// Path to the HAR capture
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Capture-order index of the entry
        #[arg(value_name = "INDEX")]
        index: usize,

        /// Output path (defaults to a name derived from the request URL)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Summary {
            file,
            search,
            method,
            status,
        } => commands::summary::execute(&file, search, method, status, cli.format),
        Commands::Filter {
            file,
            search,
            method,
            status,
            output,
        } => commands::filter::execute(&file, search, method, status, output),
        Commands::Show { file, index } => commands::show::execute(&file, index, cli.format),
        Commands::Replay {
            file,
            index,
            url,
            method,
            headers,
            body,
        } => commands::replay::execute(&file, index, url, method, headers, body, cli.format),
        Commands::Export {
            file,
            index,
            output,
        } => commands::export::execute(&file, index, output),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("harlens=debug,harlens_cli=debug,harlens_core=debug")
    } else {
        EnvFilter::new("harlens=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
