//! Rakuten TV catalog client
//!
//! One bounded GET against `/v3/live_channels`. The response envelope is
//! decoded in full; anything other than a 2xx status is a fatal error so
//! the pipeline never writes a guide from a bad fetch.

use std::io::Read;
use std::time::Duration;

use crate::config::Settings;
use crate::models::{LiveChannelsResponse, RawChannel};
use crate::window::{iso8601, GuideWindow};

pub struct CatalogClient {
    agent: ureq::Agent,
    settings: Settings,
}

impl CatalogClient {
    /// Create a configured ureq agent for the catalog host.
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.read_timeout_secs)))
            .timeout_connect(Some(Duration::from_secs(settings.connect_timeout_secs)))
            // Status handling stays explicit below instead of surfacing as
            // a transport error.
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            agent,
            settings: settings.clone(),
        }
    }

    /// Fetch the live-channel listing for the guide window. Single page,
    /// no pagination loop: `per_page` covers the full lineup.
    pub fn live_channels(&self, window: &GuideWindow) -> Result<Vec<RawChannel>, String> {
        let s = &self.settings;
        let url = format!("{}/v3/live_channels", s.base_url);

        let response = self
            .agent
            .get(&url)
            .query("classification_id", &s.classification_id.to_string())
            .query("device_identifier", &s.device_identifier)
            .query("device_stream_audio_quality", &s.audio_quality)
            .query("device_stream_hdr_type", &s.hdr_type)
            .query("device_stream_video_quality", &s.video_quality)
            .query("epg_duration_minutes", &s.epg_duration_minutes.to_string())
            .query("epg_ends_at", &iso8601(window.ends_at()))
            .query("epg_ends_at_timestamp", &window.ends_at().timestamp().to_string())
            .query("epg_starts_at", &iso8601(window.starts_at()))
            .query("epg_starts_at_timestamp", &window.starts_at().timestamp().to_string())
            .query("locale", &s.locale)
            .query("market_code", &s.market_code)
            .query("per_page", &s.per_page.to_string())
            .header("User-Agent", &s.user_agent)
            .call()
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "HTTP{}: could not get info from server",
                status.as_u16()
            ));
        }

        let mut body = Vec::new();
        response
            .into_body()
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| format!("Read failed: {}", e))?;

        let parsed: LiveChannelsResponse = serde_json::from_slice(&body)
            .map_err(|e| format!("Malformed catalog response: {}", e))?;
        Ok(parsed.data)
    }
}
