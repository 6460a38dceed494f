use std::{path::PathBuf, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songharvest::{
    cli,
    config::{self, DeliveryShape, Enrichment, HarvestConfig},
    error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Harvest top songs year by year and deliver them
    Harvest(HarvestOptions),

    /// Check the client credentials by requesting a token
    Token(TokenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct HarvestOptions {
    /// Newest year of the range
    #[clap(long, default_value_t = 2014)]
    pub from: i32,

    /// Oldest year of the range (inclusive)
    #[clap(long, default_value_t = 1961)]
    pub to: i32,

    /// Items requested per page
    #[clap(long, default_value_t = 100)]
    pub page_limit: u32,

    /// Pages read per collection; 0 follows cursors until exhausted
    #[clap(long, default_value_t = 1)]
    pub max_pages: u32,

    /// Tracks per delivered batch
    #[clap(long, default_value_t = 10)]
    pub batch_size: usize,

    /// Deliver fixed-size batches or one unit per year
    #[clap(long, value_enum, default_value = "batched")]
    pub delivery: DeliveryShape,

    /// Genre enrichment strategy
    #[clap(long, value_enum, default_value = "per-track")]
    pub enrichment: Enrichment,

    /// Delay between two years in milliseconds
    #[clap(long, default_value_t = 1500)]
    pub delay_ms: u64,

    /// Start over with the newest year after the oldest one, forever
    #[clap(long)]
    pub repeat: bool,

    /// Timeout of a single HTTP request in seconds
    #[clap(long, default_value_t = 30)]
    pub timeout: u64,

    /// Retries for 429/502/503 answers
    #[clap(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Pause before retrying a 502/503 answer in seconds
    #[clap(long, default_value_t = 10)]
    pub retry_pause: u64,

    /// Directory receiving the local copies
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Prefix of the delivered file names
    #[clap(long, default_value = "top_songs")]
    pub kind: String,

    /// Do not deliver payloads identical to an earlier delivery
    #[clap(long)]
    pub skip_unchanged: bool,
}

impl From<HarvestOptions> for HarvestConfig {
    fn from(opt: HarvestOptions) -> Self {
        HarvestConfig {
            year_from: opt.from,
            year_to: opt.to,
            page_limit: opt.page_limit,
            max_pages: (opt.max_pages > 0).then_some(opt.max_pages),
            batch_size: opt.batch_size,
            delivery: opt.delivery,
            enrichment: opt.enrichment,
            delay: Duration::from_millis(opt.delay_ms),
            repeat: opt.repeat,
            request_timeout: Duration::from_secs(opt.timeout),
            max_retries: opt.max_retries,
            retry_pause: Duration::from_secs(opt.retry_pause),
            output_dir: opt.output_dir,
            kind: opt.kind,
            skip_unchanged: opt.skip_unchanged,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    /// Timeout of the token request in seconds
    #[clap(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Harvest(opt) => cli::harvest(opt.into()).await,
        Command::Token(opt) => cli::token(Duration::from_secs(opt.timeout)).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
