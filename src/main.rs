//! Mesaza CLI
//!
//! Command-line front end for the pack vote:
//! - List packs and the local vote status
//! - Cast this machine's single vote
//! - Watch the results reveal in the terminal
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use mesaza::ballot::{PackStatus, VOTED_BUTTON_TEXT};
use mesaza::error::{PACKS_LOAD_FAILED, PACKS_RETRY_HINT, RESULTS_LOAD_FAILED};
use mesaza::render::{self, TerminalReveal};
use mesaza::{
    confirm_prompt, logging, pack_label, ApiClient, Ballot, Config, FileVoteStore, FoodPack,
    RevealSequencer, Tally, TokioClock, VoteApi, VoteError,
};

#[derive(Parser)]
#[command(name = "mesaza")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vote for your favourite Mesaza pack")]
#[command(long_about = "Mesaza lets every client cast one vote for a food pack.\nResults are revealed after a short suspense countdown.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/mesaza/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Vote API URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the packs on the ballot
    Packs,

    /// Vote for a pack
    Vote {
        /// Pack number as listed by `packs` (1-based)
        pack: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the results
    Results {
        /// Print the final chart without the countdown
        #[arg(long)]
        no_suspense: bool,
    },

    /// Show the vote recorded on this machine
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Packs => {
            let Session { api, ballot, .. } = Session::open(&cli)?;
            let packs = match api.fetch_foods().await {
                Ok(packs) => packs,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load packs");
                    eprintln!("{}", PACKS_LOAD_FAILED);
                    eprintln!("{}", PACKS_RETRY_HINT);
                    std::process::exit(1);
                }
            };

            let rows = pack_rows(&packs, &ballot);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Csv => print_csv(&rows)?,
                OutputFormat::Table => print_packs(&rows),
            }
        }

        &Commands::Vote { pack, yes } => {
            let Session { api, ballot, .. } = Session::open(&cli)?;
            let packs = match api.fetch_foods().await {
                Ok(packs) => packs,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load packs");
                    eprintln!("{}", PACKS_LOAD_FAILED);
                    std::process::exit(1);
                }
            };

            let index = match pack.checked_sub(1).filter(|i| *i < packs.len()) {
                Some(index) => index,
                None => bail!("No pack {} (there are {} packs)", pack, packs.len()),
            };
            let chosen = &packs[index];

            if let Some(saved) = ballot.saved_vote() {
                let err = VoteError::AlreadyVoted(saved.chapter_id);
                eprintln!("{}", err.user_message());
                std::process::exit(1);
            }

            if !yes && !confirm(&confirm_prompt(index))? {
                println!("Voto cancelado.");
                return Ok(());
            }

            match ballot.cast(&api, &chosen.id).await {
                Ok(_) => println!("{}: {}", VOTED_BUTTON_TEXT, pack_label(index)),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            }
        }

        &Commands::Results { no_suspense } => {
            let Session { config, api, .. } = Session::open(&cli)?;
            let chapters = match api.fetch_totals().await {
                Ok(chapters) => chapters,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load results");
                    eprintln!("{}", RESULTS_LOAD_FAILED);
                    std::process::exit(1);
                }
            };

            let max_bar_px = config.reveal.max_bar_px;
            if cli.format != OutputFormat::Table || no_suspense {
                let tally = Tally::compute(&chapters, max_bar_px);
                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tally)?),
                    OutputFormat::Csv => print_csv(&result_rows(&tally))?,
                    OutputFormat::Table => {
                        for line in render::result_lines(&tally, max_bar_px) {
                            println!("{}", line);
                        }
                    }
                }
                return Ok(());
            }

            let mut sequencer =
                RevealSequencer::new(chapters, config.reveal.clone(), StdRng::from_entropy());
            let mut screen = TerminalReveal::new(io::stdout(), max_bar_px);
            let clock = TokioClock::new();

            let chapters = sequencer.chapters().to_vec();
            let mut draw_error = None;
            let tally = sequencer
                .run(&clock, |frame| {
                    if draw_error.is_none() {
                        draw_error = screen.draw_suspense(&chapters, frame).err();
                    }
                })
                .await;
            if let Some(e) = draw_error {
                return Err(e).context("Failed to draw the countdown");
            }

            screen
                .draw_results(&tally)
                .context("Failed to draw the results")?;
            if sequencer.take_celebration() {
                println!();
                println!("🎊🎊🎊");
            }
        }

        Commands::Status => {
            let Session { ballot, .. } = Session::open(&cli)?;
            match ballot.saved_vote() {
                Some(record) => {
                    let when = chrono::DateTime::from_timestamp_millis(record.ts)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| record.ts.to_string());
                    match cli.format {
                        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                        _ => {
                            println!("{} (pack id {})", VOTED_BUTTON_TEXT, record.chapter_id);
                            println!("  at {}", when);
                            println!("  stored in {:?}", ballot.store().path());
                        }
                    }
                }
                None => {
                    println!("Todavía no votaste.");
                    println!();
                    println!("List the packs with:");
                    println!("  mesaza packs");
                }
            }
        }

        // no config load: writing the template must work even when the
        // current config is broken
        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

/// Everything a networked command needs
struct Session {
    config: Config,
    api: ApiClient,
    ballot: Ballot<FileVoteStore>,
}

impl Session {
    /// Load the config, install logging and build the client and ballot
    fn open(cli: &Cli) -> anyhow::Result<Self> {
        let config = load_config(cli.config.as_deref(), cli.api_url.as_deref())?;

        logging::init(&config.logging);
        tracing::debug!(api = %config.api.base_url, data_dir = ?config.data_dir(), "Starting");

        let api = ApiClient::new(&config.api.base_url)?;
        let ballot = Ballot::new(FileVoteStore::in_dir(config.data_dir()));
        Ok(Self { config, api, ballot })
    }
}

/// An explicit `--config` must load; otherwise the default locations are
/// tried. `--api-url` wins over both.
fn load_config(path: Option<&Path>, api_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(url) = api_url {
        config.api.base_url = url.to_string();
    }
    Ok(config)
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = mesaza::config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdin
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [s/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

#[derive(Debug, Serialize)]
struct PackRow {
    pack: String,
    id: String,
    status: &'static str,
    foods: String,
}

fn status_name(status: PackStatus) -> &'static str {
    match status {
        PackStatus::Open => "open",
        PackStatus::Chosen => "voted",
        PackStatus::Locked => "locked",
    }
}

fn pack_rows<S: mesaza::VoteStore>(packs: &[FoodPack], ballot: &Ballot<S>) -> Vec<PackRow> {
    let saved = ballot.saved_vote();
    packs
        .iter()
        .enumerate()
        .map(|(idx, pack)| PackRow {
            pack: pack_label(idx),
            id: pack.id.to_string(),
            status: status_name(PackStatus::for_saved(saved.as_ref(), &pack.id)),
            foods: pack
                .foods
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn print_packs(rows: &[PackRow]) {
    if rows.is_empty() {
        println!("No packs on the ballot yet.");
        return;
    }

    println!("{:<10} {:<8} {}", "Pack", "Status", "Foods");
    println!("{}", "-".repeat(60));

    for row in rows {
        println!("{:<10} {:<8} {}", row.pack, row.status, row.foods);
    }
}

#[derive(Debug, Serialize)]
struct ResultRow {
    name: String,
    votes: u64,
    percentage: String,
    winner: bool,
}

fn result_rows(tally: &Tally) -> Vec<ResultRow> {
    tally
        .standings
        .iter()
        .enumerate()
        .map(|(idx, standing)| ResultRow {
            name: standing.name.clone(),
            votes: standing.votes,
            percentage: format!("{:.1}", standing.percentage),
            winner: tally.is_winner(idx),
        })
        .collect()
}

fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
