use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration for the Bible Recap seed toolkit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playlist source settings
    pub playlist: PlaylistConfig,

    /// yt-dlp fetch settings
    pub fetch: FetchConfig,

    /// Playlist page scrape settings
    pub scrape: ScrapeConfig,

    /// Reading-plan parser settings
    pub plan: PlanConfig,

    /// Output file settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// YouTube playlist identifier
    pub playlist_id: String,
}

impl PlaylistConfig {
    /// Full playlist URL handed to yt-dlp and the page scraper
    pub fn playlist_url(&self) -> Url {
        let mut url = Url::parse("https://www.youtube.com/playlist")
            .expect("base playlist URL is valid");
        url.query_pairs_mut().append_pair("list", &self.playlist_id);
        url
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Name of the yt-dlp binary to invoke
    pub ytdlp_binary: String,

    /// Number of videos expected in the playlist
    pub target_count: u32,

    /// Window size for the chunked fallback
    pub chunk_size: u32,

    /// Delay between fallback windows (seconds)
    pub chunk_delay_secs: u64,

    /// Ceiling for the bulk invocation (seconds)
    pub bulk_timeout_secs: u64,

    /// Ceiling for each chunked invocation (seconds)
    pub chunk_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// First day of the extraction window (inclusive)
    pub day_start: u32,

    /// Last day of the extraction window (inclusive)
    pub day_end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Playlist text dump consumed by the parser
    pub dump_file: PathBuf,

    /// Fetched playlist mapping (position -> id/title)
    pub videos_file: PathBuf,

    /// Parsed reading-plan data
    pub days_file: PathBuf,

    /// Scraped raw video id list
    pub video_ids_file: PathBuf,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = [
            "recap-seed.toml",
            "config/recap-seed.toml",
            "~/.config/recap-seed/config.toml",
            "/etc/recap-seed/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        // Fall back to defaults with environment overrides
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(playlist_id) = std::env::var("RECAP_SEED_PLAYLIST_ID") {
            config.playlist.playlist_id = playlist_id;
        }

        if let Ok(binary) = std::env::var("RECAP_SEED_YTDLP") {
            config.fetch.ytdlp_binary = binary;
        }

        if let Ok(target) = std::env::var("RECAP_SEED_TARGET_COUNT") {
            config.fetch.target_count = target.parse().unwrap_or(365);
        }

        if let Ok(dump_file) = std::env::var("RECAP_SEED_DUMP_FILE") {
            config.output.dump_file = PathBuf::from(dump_file);
        }

        if let Ok(day_start) = std::env::var("RECAP_SEED_DAY_START") {
            config.plan.day_start = day_start.parse().unwrap_or(31);
        }

        if let Ok(day_end) = std::env::var("RECAP_SEED_DAY_END") {
            config.plan.day_end = day_end.parse().unwrap_or(91);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playlist.playlist_id.is_empty() {
            return Err(anyhow!("playlist_id must not be empty"));
        }

        if self.fetch.target_count == 0 {
            return Err(anyhow!("target_count must be greater than 0"));
        }

        if self.fetch.chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than 0"));
        }

        if self.fetch.bulk_timeout_secs == 0 || self.fetch.chunk_timeout_secs == 0 {
            return Err(anyhow!("invocation timeouts must be greater than 0"));
        }

        // The reading plan covers one year of daily entries
        if self.plan.day_start == 0 || self.plan.day_start > self.plan.day_end {
            return Err(anyhow!("day window must satisfy 1 <= day_start <= day_end"));
        }

        if self.plan.day_end > 365 {
            return Err(anyhow!("day_end must not exceed 365"));
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Recap Seed Configuration:\n\
            - Playlist: {}\n\
            - Target Count: {}\n\
            - Chunk Size: {}\n\
            - Day Window: {}-{}\n\
            - Dump File: {}\n\
            - Videos File: {}\n\
            - Days File: {}",
            self.playlist.playlist_id,
            self.fetch.target_count,
            self.fetch.chunk_size,
            self.plan.day_start,
            self.plan.day_end,
            self.output.dump_file.display(),
            self.output.videos_file.display(),
            self.output.days_file.display()
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playlist: PlaylistConfig {
                playlist_id: "PLkgWIAVOhHuAVwyG587rctAbAuWFtAv1D".to_string(),
            },
            fetch: FetchConfig {
                ytdlp_binary: "yt-dlp".to_string(),
                target_count: 365,
                chunk_size: 100,
                chunk_delay_secs: 1,
                bulk_timeout_secs: 300,
                chunk_timeout_secs: 60,
            },
            scrape: ScrapeConfig {
                request_timeout_secs: 30,
            },
            plan: PlanConfig {
                day_start: 31,
                day_end: 91,
            },
            output: OutputConfig {
                dump_file: PathBuf::from("playlist-full-data.txt"),
                videos_file: PathBuf::from("playlist-all-videos.json"),
                days_file: PathBuf::from("days-31-91.json"),
                video_ids_file: PathBuf::from("playlist-video-ids.json"),
            },
        }
    }
}

/// Builder for creating custom configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_playlist_id(mut self, playlist_id: &str) -> Self {
        self.config.playlist.playlist_id = playlist_id.to_string();
        self
    }

    pub fn with_target_count(mut self, target_count: u32) -> Self {
        self.config.fetch.target_count = target_count;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.config.fetch.chunk_size = chunk_size;
        self
    }

    pub fn with_day_window(mut self, day_start: u32, day_end: u32) -> Self {
        self.config.plan.day_start = day_start;
        self.config.plan.day_end = day_end;
        self
    }

    pub fn with_dump_file(mut self, dump_file: PathBuf) -> Self {
        self.config.output.dump_file = dump_file;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fetch.target_count, 365);
        assert_eq!(config.fetch.chunk_size, 100);
        assert_eq!(config.plan.day_start, 31);
        assert_eq!(config.plan.day_end, 91);
    }

    #[test]
    fn test_playlist_url() {
        let config = Config::default();
        assert_eq!(
            config.playlist.playlist_url().as_str(),
            "https://www.youtube.com/playlist?list=PLkgWIAVOhHuAVwyG587rctAbAuWFtAv1D"
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_playlist_id("PLtest")
            .with_target_count(10)
            .with_day_window(1, 30)
            .build();

        assert_eq!(config.playlist.playlist_id, "PLtest");
        assert_eq!(config.fetch.target_count, 10);
        assert_eq!(config.plan.day_start, 1);
        assert_eq!(config.plan.day_end, 30);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let inverted = ConfigBuilder::new().with_day_window(91, 31).build();
        assert!(inverted.validate().is_err());

        let overflow = ConfigBuilder::new().with_day_window(31, 400).build();
        assert!(overflow.validate().is_err());
    }
}
