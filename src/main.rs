//! `framecount` command line entry point.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use framecount::config::ServerConfig;
use framecount::mp3::count_frames;
use framecount::server::{CountResponse, HttpServer, UPLOAD_PATH};

#[derive(Parser)]
#[command(
    name = "framecount",
    version,
    about = "Count MPEG-1 Layer III audio frames without decoding"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the audio frames in an MP3 file
    Count {
        /// Path to the MP3 file
        file: PathBuf,
        /// Print the count as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Serve the counting endpoint over HTTP
    Serve {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Socket address to bind, overrides the config file
        #[arg(long)]
        bind: Option<String>,
        /// Worker thread count, overrides the config file
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> io::Result<()> {
    match cli.command {
        Command::Count { file, json } => {
            let mut reader = BufReader::new(File::open(&file)?);
            let frame_count = count_frames(&mut reader)?;
            if json {
                let body =
                    serde_json::to_string(&CountResponse { frame_count }).map_err(io::Error::other)?;
                println!("{body}");
            } else {
                println!(
                    "{}: {} audio frames",
                    file.display().to_string().bold(),
                    frame_count
                );
            }
            Ok(())
        }
        Command::Serve {
            config,
            bind,
            workers,
        } => {
            let mut settings = match config {
                Some(path) => ServerConfig::load(path)?,
                None => ServerConfig::default(),
            };
            if let Some(bind) = bind {
                settings.bind = bind;
            }
            if let Some(workers) = workers {
                settings.workers = workers;
            }

            let server = HttpServer::bind(&settings.bind)?;
            if let Some(addr) = server.local_addr() {
                println!(
                    "{} http://{addr}{UPLOAD_PATH}",
                    "listening on".green().bold()
                );
            }
            server.run(settings.workers);
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "framecount", &mut io::stdout());
            Ok(())
        }
    }
}
