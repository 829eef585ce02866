use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use recap_seed_rust::config::Config;
use recap_seed_rust::fetcher::{self, PlaylistFetcher};
use recap_seed_rust::plan::{seed, PlanData, PlanParser};
use recap_seed_rust::scrape::{self, PageScraper};

#[derive(Parser)]
#[command(name = "recap-seed")]
#[command(about = "Seed-data toolkit for The Bible Recap reading plan")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Playlist identifier override
    #[arg(long)]
    playlist: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the full playlist through yt-dlp and save position -> video data
    Fetch {
        /// Output JSON path override
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scrape raw video ids straight from the playlist page
    Scrape {
        /// Output JSON path override
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Parse a playlist text dump into reading-plan records
    Parse {
        /// Playlist dump file override
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output JSON path override
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print seed-file update snippets from parsed plan data
    Seed {
        /// Parsed plan JSON override
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("recap_seed_rust=info,warn")
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Some(playlist) = cli.playlist {
        config.playlist.playlist_id = playlist;
    }

    config.validate()?;

    match cli.command {
        Commands::Fetch { output } => run_fetch(&config, output).await,
        Commands::Scrape { output } => run_scrape(&config, output).await,
        Commands::Parse { input, output } => run_parse(&config, input, output).await,
        Commands::Seed { input } => run_seed(&config, input).await,
    }
}

/// Fetch the playlist through yt-dlp, merge both strategies, save and
/// preview the result. Never aborts on invocation failures.
async fn run_fetch(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.output.videos_file.clone());

    info!("🚀 Fetching complete playlist (this may take a few minutes)...");
    info!("Playlist: {}", config.playlist.playlist_url());

    let fetcher = PlaylistFetcher::new(&config.playlist, config.fetch.clone());
    let videos = fetcher.fetch_all().await;

    info!("=== RESULTS ===");
    info!("Total videos found: {}", videos.len());

    fetcher::save_videos(&videos, &output)
        .await
        .with_context(|| format!("Failed to save playlist data to {}", output.display()))?;
    info!("💾 Saved to: {}", output.display());

    // Preview for manual verification
    println!("Video IDs (for seed file):");
    print!("{}", fetcher::render_preview(&videos));

    info!("🎉 Found {} videos total", videos.len());
    Ok(())
}

/// Scrape video ids from the playlist page itself. Failures degrade to a
/// hint about the yt-dlp path rather than an abnormal exit.
async fn run_scrape(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.output.video_ids_file.clone());
    let playlist_url = config.playlist.playlist_url();

    info!("🚀 Fetching playlist data...");
    info!("URL: {}", playlist_url);

    let scraper = PageScraper::new(config.scrape.request_timeout_secs);
    match scraper.scrape_video_ids(&playlist_url).await {
        Ok(ids) => {
            info!("Found {} unique video IDs", ids.len());

            print!("{}", scrape::render_snippet(&ids));
            println!("\nCopy the videoIds object above and use it in the seed file.");

            scrape::save_video_ids(&ids, &output)
                .await
                .with_context(|| format!("Failed to save video ids to {}", output.display()))?;
            info!("💾 Also saved to: {}", output.display());
        }
        Err(e) => {
            error!("Error parsing playlist data: {}", e);
            info!("Note: YouTube's HTML structure may have changed.");
            info!("Alternative: use the fetch command, which drives yt-dlp:");
            info!("  yt-dlp --flat-playlist --print id \"{}\"", playlist_url);
        }
    }

    Ok(())
}

/// Parse the playlist text dump into reading-plan records, print the seed
/// snippets, and save the structured data.
async fn run_parse(config: &Config, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or_else(|| config.output.dump_file.clone());
    let output = output.unwrap_or_else(|| config.output.days_file.clone());

    let content = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read playlist dump {}", input.display()))?;

    let parser = PlanParser::new(&config.plan);
    let data = parser.parse_dump(&content);

    print!("{}", seed::render_video_ids(&parser, &data));
    print!("{}", seed::render_readings(&parser, &data)?);

    let json_data = serde_json::to_string_pretty(&data)?;
    tokio::fs::write(&output, json_data)
        .await
        .with_context(|| format!("Failed to save plan data to {}", output.display()))?;

    info!("💾 Saved {} days to {}", data.days.len(), output.display());
    Ok(())
}

/// Re-read parsed plan data and print the seed-file update snippets.
async fn run_seed(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or_else(|| config.output.days_file.clone());

    let content = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read plan data {}", input.display()))?;
    let data: PlanData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse plan data {}", input.display()))?;

    let parser = PlanParser::new(&config.plan);

    print!("{}", seed::render_seed_video_ids(&data));
    print!("{}", seed::render_seed_readings(&parser, &data)?);

    info!("🎉 Generation complete!");
    Ok(())
}
