use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::config::{FetchConfig, PlaylistConfig};

/// Playlist entry as reported by yt-dlp, keyed externally by playlist position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoEntry {
    /// YouTube video identifier
    pub id: String,
    /// Video title
    pub title: String,
}

/// Failure modes of a single yt-dlp invocation
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("timed out after {0}s")]
    Timeout(u64),
    #[error("exited with {0}")]
    Exit(std::process::ExitStatus),
}

/// Fetches playlist metadata through the yt-dlp command line tool.
///
/// YouTube lazily loads long playlists, so a single bulk listing can come
/// back short. The fetcher runs a full JSON dump first and then fills any
/// remaining gaps window by window.
pub struct PlaylistFetcher {
    config: FetchConfig,
    playlist_url: String,
}

impl PlaylistFetcher {
    pub fn new(playlist: &PlaylistConfig, config: FetchConfig) -> Self {
        Self {
            playlist_url: playlist.playlist_url().to_string(),
            config,
        }
    }

    /// Fetch the playlist with the bulk strategy, then fill gaps chunk by
    /// chunk. Invocation failures degrade to zero entries for that attempt,
    /// so this always returns a (possibly empty) mapping.
    pub async fn fetch_all(&self) -> BTreeMap<u32, VideoEntry> {
        let mut videos = BTreeMap::new();

        info!("Method 1: yt-dlp JSON output...");
        match self.fetch_bulk().await {
            Ok(entries) => {
                for (index, entry) in entries {
                    videos.insert(index, entry);
                }
                info!("Found {} videos via JSON method", videos.len());
            }
            Err(e) => warn!("JSON method failed: {}", e),
        }

        if (videos.len() as u32) < self.config.target_count {
            info!("Method 2: fetching in chunks...");
            self.fill_gaps_chunked(&mut videos).await;
        }

        videos
    }

    /// Strategy A: one flattened dump of the whole playlist, one JSON
    /// record per stdout line.
    async fn fetch_bulk(&self) -> Result<Vec<(u32, VideoEntry)>, InvokeError> {
        let stdout = self
            .run_ytdlp(
                &[
                    "--flat-playlist",
                    "--dump-json",
                    "--lazy-playlist",
                    "no",
                    &self.playlist_url,
                ],
                self.config.bulk_timeout_secs,
            )
            .await?;

        Ok(parse_json_lines(&stdout))
    }

    /// Strategy B: walk the expected index range in fixed windows, merging
    /// only previously-unseen positions.
    async fn fill_gaps_chunked(&self, videos: &mut BTreeMap<u32, VideoEntry>) {
        let mut start = 1u32;
        while start <= self.config.target_count {
            let end = (start + self.config.chunk_size - 1).min(self.config.target_count);
            info!("  Fetching videos {}-{}...", start, end);

            match self.fetch_chunk(start, end).await {
                Ok(entries) => {
                    for (index, entry) in entries {
                        if !videos.contains_key(&index) {
                            videos.insert(index, entry);
                        }
                    }
                    // Be nice to YouTube's servers
                    sleep(Duration::from_secs(self.config.chunk_delay_secs)).await;
                }
                Err(e) => warn!("  Chunk {}-{} failed: {}", start, end, e),
            }

            start += self.config.chunk_size;
        }
    }

    /// One chunked invocation with start/end bounds and the compact
    /// colon-delimited print format.
    async fn fetch_chunk(&self, start: u32, end: u32) -> Result<Vec<(u32, VideoEntry)>, InvokeError> {
        let start_arg = start.to_string();
        let end_arg = end.to_string();
        let stdout = self
            .run_ytdlp(
                &[
                    "--flat-playlist",
                    "--playlist-start",
                    &start_arg,
                    "--playlist-end",
                    &end_arg,
                    "--print",
                    "%(playlist_index)s:%(id)s:%(title)s",
                    &self.playlist_url,
                ],
                self.config.chunk_timeout_secs,
            )
            .await?;

        Ok(parse_print_lines(&stdout))
    }

    /// Run yt-dlp with the given arguments under a hard ceiling, returning
    /// captured stdout.
    async fn run_ytdlp(&self, args: &[&str], ceiling_secs: u64) -> Result<String, InvokeError> {
        let mut command = tokio::process::Command::new(&self.config.ytdlp_binary);
        command.args(args);

        let output = match timeout(Duration::from_secs(ceiling_secs), command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(InvokeError::Launch {
                    binary: self.config.ytdlp_binary.clone(),
                    source: e,
                })
            }
            Err(_) => return Err(InvokeError::Timeout(ceiling_secs)),
        };

        if !output.status.success() {
            return Err(InvokeError::Exit(output.status));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse `--dump-json` output: each line is an independent JSON record.
/// Malformed lines and entries without a position or id are skipped.
pub fn parse_json_lines(stdout: &str) -> Vec<(u32, VideoEntry)> {
    let mut entries = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let video: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let index = video["playlist_index"].as_u64().unwrap_or(0);
        let id = video["id"].as_str().unwrap_or("");
        if index == 0 || id.is_empty() {
            continue;
        }

        let title = video["title"].as_str().unwrap_or("").to_string();
        entries.push((
            index as u32,
            VideoEntry {
                id: id.to_string(),
                title,
            },
        ));
    }

    entries
}

/// Parse `--print %(playlist_index)s:%(id)s:%(title)s` output: split each
/// line on ':' into at most three fields. Titles may themselves contain
/// colons, so only the first two separators count.
pub fn parse_print_lines(stdout: &str) -> Vec<(u32, VideoEntry)> {
    let mut entries = Vec::new();

    for line in stdout.lines() {
        if !line.contains(':') {
            continue;
        }

        let parts: Vec<&str> = line.splitn(3, ':').collect();
        if parts.len() < 3 {
            continue;
        }

        let index: u32 = match parts[0].parse() {
            Ok(index) => index,
            Err(_) => continue,
        };

        entries.push((
            index,
            VideoEntry {
                id: parts[1].to_string(),
                title: parts[2].to_string(),
            },
        ));
    }

    entries
}

/// Save the merged mapping as a string-keyed JSON object.
pub async fn save_videos(videos: &BTreeMap<u32, VideoEntry>, path: &Path) -> Result<()> {
    let json_data = serde_json::to_string_pretty(videos)?;
    tokio::fs::write(path, json_data).await?;
    Ok(())
}

/// Render the manual-inspection preview: the first 10 entries and, when
/// more exist, the last 5, with titles as trailing comments.
pub fn render_preview(videos: &BTreeMap<u32, VideoEntry>) -> String {
    let mut out = String::new();
    out.push_str("const videoIds = {\n");

    for (index, entry) in videos.iter().take(10) {
        out.push_str(&format!("  {}: '{}',  // {}\n", index, entry.id, entry.title));
    }
    out.push_str("  ...\n");

    if videos.len() > 10 {
        for (index, entry) in videos.iter().skip(videos.len() - 5) {
            out.push_str(&format!("  {}: '{}',  // {}\n", index, entry.id, entry.title));
        }
    }

    out.push_str("};\n");
    out
}
