//! Response payloads.
//!
//! The aggregator's formats differ per endpoint and change without notice,
//! so only the common fields are typed and the rest lands in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a `status` field reports success (`true` or `200`).
fn status_ok(status: Option<&Value>) -> bool {
    match status {
        None => true,
        Some(Value::Bool(ok)) => *ok,
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(_) => false,
    }
}

// ============================================================================
// Search
// ============================================================================

/// Results of a search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Upstream status flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    /// Result entries.
    #[serde(default, alias = "data", alias = "results")]
    pub result: Vec<Value>,

    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResults {
    /// Whether upstream reported success.
    pub fn is_ok(&self) -> bool {
        status_ok(self.status.as_ref())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.result.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// String values of `field` across all entries.
    pub fn field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.result
            .iter()
            .filter_map(move |entry| entry.get(field).and_then(Value::as_str))
    }
}

// ============================================================================
// Lyrics
// ============================================================================

/// Lyrics lookup result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricsResult {
    /// Upstream status flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    /// Song title.
    #[serde(default)]
    pub title: Option<String>,

    /// Artist name.
    #[serde(default, alias = "author")]
    pub artist: Option<String>,

    /// Lyrics text.
    #[serde(default, alias = "lirik")]
    pub lyrics: Option<String>,

    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LyricsResult {
    /// Whether upstream reported success and returned any text.
    pub fn is_found(&self) -> bool {
        status_ok(self.status.as_ref()) && self.lyrics.as_deref().is_some_and(|l| !l.is_empty())
    }
}

// ============================================================================
// Media downloads
// ============================================================================

/// Media download result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaResult {
    /// Upstream status flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    /// Caption or title, when present.
    #[serde(default, alias = "caption")]
    pub title: Option<String>,

    /// Download payload: a link, a list of links or an object of links.
    #[serde(default, alias = "data")]
    pub result: Value,

    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaResult {
    /// Whether upstream reported success.
    pub fn is_ok(&self) -> bool {
        status_ok(self.status.as_ref())
    }

    /// Every `http(s)` link found in the payload, in document order.
    pub fn media_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        collect_links(&self.result, &mut urls);
        urls
    }
}

fn collect_links<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_links(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_links(v, out)),
        _ => {}
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_parse() {
        let json = r#"{
            "status": true,
            "creator": "someone",
            "result": [
                {"title": "lofi beats", "url": "https://youtu.be/a"},
                {"title": "rainy jazz", "url": "https://youtu.be/b"}
            ]
        }"#;

        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert!(results.is_ok());
        assert_eq!(results.len(), 2);
        assert_eq!(results.field("title").collect::<Vec<_>>(), ["lofi beats", "rainy jazz"]);
        assert_eq!(results.extra["creator"], "someone");
    }

    #[test]
    fn test_search_results_data_alias() {
        let results: SearchResults =
            serde_json::from_str(r#"{"status": 200, "data": [1, 2, 3]}"#).unwrap();
        assert!(results.is_ok());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_failed_status() {
        let results: SearchResults =
            serde_json::from_str(r#"{"status": false, "message": "limit reached"}"#).unwrap();
        assert!(!results.is_ok());
        assert!(results.is_empty());
        assert_eq!(results.extra["message"], "limit reached");
    }

    #[test]
    fn test_lyrics_found() {
        let found: LyricsResult =
            serde_json::from_str(r#"{"title": "Song", "author": "Band", "lirik": "la la"}"#)
                .unwrap();
        assert_eq!(found.artist.as_deref(), Some("Band"));
        assert!(found.is_found());

        let empty: LyricsResult = serde_json::from_str(r#"{"status": true, "lyrics": ""}"#).unwrap();
        assert!(!empty.is_found());
    }

    #[test]
    fn test_media_urls_walk_payload() {
        let json = r#"{
            "status": true,
            "result": {
                "caption": "clip",
                "video": ["https://cdn.example.com/v.mp4", "not a link"],
                "audio": {"url": "https://cdn.example.com/a.mp3"}
            }
        }"#;

        let media: MediaResult = serde_json::from_str(json).unwrap();
        let urls = media.media_urls();
        assert_eq!(urls.len(), 2);
        assert!(urls.contains(&"https://cdn.example.com/v.mp4"));
        assert!(urls.contains(&"https://cdn.example.com/a.mp3"));
    }

    #[test]
    fn test_media_single_link() {
        let media: MediaResult =
            serde_json::from_str(r#"{"data": "https://cdn.example.com/x.jpg"}"#).unwrap();
        assert_eq!(media.media_urls(), ["https://cdn.example.com/x.jpg"]);
    }
}
