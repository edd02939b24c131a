//! Run configuration
//!
//! Everything about a grab is fixed up front: the catalog endpoint, the
//! device/stream profile sent as query parameters, the reference timezone,
//! and the output path. The struct is built once in `main` and handed to
//! each pipeline stage.

use std::path::PathBuf;

use chrono_tz::Tz;

/// What to do when a single channel fails to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FailurePolicy {
    /// First failure aborts the whole run; no output file is written.
    #[default]
    Abort,
    /// Warn on stderr and produce a guide without the failed channel.
    SkipAndWarn,
}

/// Fixed settings for one guide grab.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    /// Reference timezone for the guide window and output timestamps.
    /// The UK flips between GMT and BST, so this cannot be a fixed offset.
    pub timezone: Tz,
    pub classification_id: u32,
    pub device_identifier: String,
    pub audio_quality: String,
    pub hdr_type: String,
    pub video_quality: String,
    pub epg_duration_minutes: u32,
    pub locale: String,
    pub market_code: String,
    /// Single-page fetch; sized to cover the whole lineup.
    pub per_page: u32,
    pub output_path: PathBuf,
    pub failure_policy: FailurePolicy,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://gizmo.rakuten.tv".to_string(),
            timezone: chrono_tz::Europe::London,
            classification_id: 18,
            device_identifier: "web".to_string(),
            audio_quality: "2.0".to_string(),
            hdr_type: "NONE".to_string(),
            video_quality: "FHD".to_string(),
            epg_duration_minutes: 360,
            locale: "en".to_string(),
            market_code: "uk".to_string(),
            per_page: 250,
            output_path: PathBuf::from("epg.xml"),
            failure_policy: FailurePolicy::default(),
            connect_timeout_secs: 30,
            read_timeout_secs: 120,
            user_agent: "rakuten-epg/0.2".to_string(),
        }
    }
}
