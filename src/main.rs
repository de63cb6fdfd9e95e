use anyhow::{bail, Context, Result};
use clap::Parser;
use league_progress::api::client::RiotApiClient;
use league_progress::api::RiotMatchSource;
use league_progress::cache::MatchCache;
use league_progress::config::Config;
use league_progress::display::output::{display_error, display_info, display_progression, display_success};
use league_progress::progression::queue::{parse_queue, queue_label};
use league_progress::progression::ProgressionView;
use league_progress::source::{JsonFileSource, MatchSource};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Cached match windows younger than this are reused without calling the API.
const CACHE_MAX_AGE_MINS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "League Progress")]
#[command(about = "Chart ranked LP progression and win rate across division changes", long_about = None)]
struct Args {
    /// Riot Game Name
    #[arg(required_unless_present = "input")]
    game_name: Option<String>,

    /// Riot Tag (tag line)
    #[arg(required_unless_present = "input")]
    tag_line: Option<String>,

    /// Read match records from a JSON file instead of the Riot API
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Queue to chart: solo, flex, all or a queue id (default: all)
    #[arg(short, long)]
    queue: Option<String>,

    /// Region (default: na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of matches to analyze (default: 20, max: 100)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Skip first N matches (offset from most recent)
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Force refresh from Riot API (ignore cache)
    #[arg(long, conflicts_with = "offline")]
    refresh: bool,

    /// Only use previously cached matches
    #[arg(long)]
    offline: bool,

    /// Write the chart series as JSON to this file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(region) = args.region.clone() {
        config.region = region;
    }
    let queue = args
        .queue
        .as_deref()
        .map(parse_queue)
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(config.default_queue);
    let matches = args.matches.clamp(1, 100);

    let view = ProgressionView::new();
    let ticket = view.request(queue);

    let (player_name, records) = match (&args.input, &args.game_name, &args.tag_line) {
        (Some(path), _, _) => {
            display_info(&format!("Reading matches from {}", path.display()));
            let records = JsonFileSource::new(path)
                .fetch(queue)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), records)
        }
        (None, Some(game_name), Some(tag_line)) => {
            let player_key = format!("{}#{}", game_name, tag_line);
            let cache = MatchCache::load(&config.cache_dir, &player_key, &config.region)?;
            let cache_fresh = !cache.matches.is_empty() && !cache.is_stale(CACHE_MAX_AGE_MINS);

            let records = if args.offline || (cache_fresh && !args.refresh) {
                display_info(&format!("Using cached matches for {}", player_key));
                cache
                    .window(queue, args.offset, matches)
                    .context("no cached matches in this window")?
            } else {
                let api_key = config.require_api_key()?;
                display_info(&format!(
                    "Fetching {} for {} in region {}",
                    queue_label(queue),
                    player_key,
                    config.region
                ));

                let client = RiotApiClient::new(api_key, &config.region);
                let mut source = RiotMatchSource::new(client, game_name, tag_line, config.cache_dir.clone());
                source.count = matches;
                source.offset = args.offset;
                source.refresh = args.refresh;
                source.fetch(queue).context("failed to fetch match history")?
            };
            (player_key, records)
        }
        _ => bail!("either --input or a game name and tag line is required"),
    };

    display_success(&format!("Loaded {} matches", records.len()));

    let output = view
        .apply(ticket, &records)
        .context("progression request was superseded")?;
    display_progression(&output, &player_name);

    if let Some(path) = args.export {
        let json = serde_json::to_string_pretty(&output.series)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        display_success(&format!("Chart series written to {}", path.display()));
    }

    Ok(())
}
