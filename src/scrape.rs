use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Extracts raw video ids straight from the playlist page HTML.
///
/// YouTube embeds the playlist's initial data in the page source, so every
/// listed video shows up as a `"videoId":"..."` fragment. This only sees
/// the eagerly-loaded portion of long playlists; the yt-dlp fetch is the
/// reliable path.
pub struct PageScraper {
    client: Client,
    video_id_re: Regex,
}

impl PageScraper {
    /// Create a new scraper instance
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            video_id_re: Regex::new(r#""videoId":"([^"]+)""#).unwrap(),
        }
    }

    /// Fetch the playlist page and return unique video ids in first-seen
    /// order.
    pub async fn scrape_video_ids(&self, playlist_url: &Url) -> Result<Vec<String>> {
        let response = self
            .client
            .get(playlist_url.clone())
            .send()
            .await
            .context("Error fetching playlist")?
            .error_for_status()
            .context("Playlist page request rejected")?;

        let body = response
            .text()
            .await
            .context("Error reading playlist page body")?;

        info!("📄 Fetched {} bytes of playlist page data", body.len());
        Ok(self.extract_video_ids(&body))
    }

    /// Pull every embedded video id out of the page data, deduplicated
    /// in first-seen order.
    pub fn extract_video_ids(&self, body: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for captures in self.video_id_re.captures_iter(body) {
            let id = captures[1].to_string();
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }

        ids
    }
}

/// Render the copy-paste snippet numbering ids as days 1..n.
pub fn render_snippet(ids: &[String]) -> String {
    let mut out = String::new();
    out.push_str("const videoIds = {\n");

    for (index, id) in ids.iter().enumerate() {
        out.push_str(&format!("  {}: '{}',\n", index + 1, id));
    }

    out.push_str("};\n");
    out
}

/// Save the raw id list as a JSON array.
pub async fn save_video_ids(ids: &[String], path: &Path) -> Result<()> {
    let json_data = serde_json::to_string_pretty(ids)?;
    tokio::fs::write(path, json_data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_ids_dedupes_in_order() {
        let scraper = PageScraper::new(30);
        let body = r#"{"videoId":"abc"}...{"videoId":"def"}...{"videoId":"abc"}...{"videoId":"ghi"}"#;

        let ids = scraper.extract_video_ids(body);
        assert_eq!(ids, vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_extract_video_ids_empty_page() {
        let scraper = PageScraper::new(30);
        assert!(scraper.extract_video_ids("<html>no embedded data</html>").is_empty());
    }

    #[test]
    fn test_render_snippet_numbers_days() {
        let ids = vec!["abc".to_string(), "def".to_string()];
        let snippet = render_snippet(&ids);

        assert_eq!(snippet, "const videoIds = {\n  1: 'abc',\n  2: 'def',\n};\n");
    }

    #[tokio::test]
    async fn test_save_video_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");
        let ids = vec!["abc".to_string()];

        save_video_ids(&ids, &path).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let value: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(value, ids);
    }
}
