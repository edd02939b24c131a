//! Catalog payload shapes and the flat records rendered into XMLTV

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level catalog envelope; everything of interest sits under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveChannelsResponse {
    pub data: Vec<RawChannel>,
}

/// Channel ids arrive as either a number or a string in the payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChannelId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::Number(n) => write!(f, "{}", n),
            ChannelId::Text(s) => f.write_str(s),
        }
    }
}

/// One channel entry as the catalog sends it. `title`, `channel_number`
/// and `id` are required; a payload missing them fails at decode time,
/// before any output exists.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChannel {
    pub title: String,
    pub channel_number: i64,
    pub id: ChannelId,
    #[serde(default)]
    pub images: Option<RawImages>,
    #[serde(default)]
    pub labels: Option<RawLabels>,
    #[serde(default)]
    pub classification: Option<RawClassification>,
    #[serde(default)]
    pub live_programs: Vec<RawProgram>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImages {
    #[serde(default)]
    pub artwork_negative: Option<String>,
    #[serde(default)]
    pub artwork: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabels {
    #[serde(default)]
    pub languages: Option<Vec<RawLanguage>>,
    #[serde(default)]
    pub tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguage {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub age: Option<i64>,
}

/// One scheduled programme nested under a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProgram {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
}

/// Flat channel record consumed by the renderer.
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    pub name: String,
    pub epg_number: i64,
    pub id: String,
    pub icon: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Minimum viewer age from the catalog classification; carried on the
    /// record but not rendered.
    pub age_rating: Option<i64>,
}

/// Flat programme record; times are absolute instants. `channel_id` comes
/// from the channel the programme was nested under, so it is trusted at
/// render time rather than re-checked.
#[derive(Debug, Clone)]
pub struct ProgramRecord {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub channel_id: String,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_accepts_number_or_string() {
        let n: ChannelId = serde_json::from_str("42").unwrap();
        assert_eq!(n.to_string(), "42");

        let s: ChannelId = serde_json::from_str("\"rakuten-tv-42\"").unwrap();
        assert_eq!(s.to_string(), "rakuten-tv-42");
    }

    #[test]
    fn test_missing_required_key_is_a_decode_error() {
        // No `id` field: the whole envelope must fail to decode.
        let body = r#"{"data":[{"title":"Rakuten TV","channel_number":1}]}"#;
        assert!(serde_json::from_str::<LiveChannelsResponse>(body).is_err());
    }

    #[test]
    fn test_null_nested_objects_decode() {
        let body = r#"{
            "title": "Free Movies",
            "channel_number": 7,
            "id": 7,
            "images": null,
            "labels": null,
            "classification": null,
            "live_programs": []
        }"#;
        let ch: RawChannel = serde_json::from_str(body).unwrap();
        assert!(ch.images.is_none());
        assert!(ch.labels.is_none());
        assert!(ch.classification.is_none());
        assert!(ch.live_programs.is_empty());
    }
}
