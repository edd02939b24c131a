//! Record normalization
//!
//! Flattens the nested catalog payload into the channel and programme
//! records the XMLTV renderer consumes. Channels are processed
//! independently: each one yields a `Result`, and the failure policy
//! decides whether one bad channel kills the run or just gets skipped.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::FailurePolicy;
use crate::models::{ChannelRecord, ProgramRecord, RawChannel};

/// Normalized output of one run: flat channel and programme lists.
#[derive(Debug, Clone, Default)]
pub struct Guide {
    pub channels: Vec<ChannelRecord>,
    pub programs: Vec<ProgramRecord>,
}

const STARTS_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";
const ENDS_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn normalize(raw: &[RawChannel], tz: &Tz, policy: FailurePolicy) -> Result<Guide, String> {
    let results: Vec<_> = raw
        .iter()
        .map(|ch| (ch.title.as_str(), normalize_channel(ch, tz)))
        .collect();

    let mut guide = Guide::default();
    for (name, result) in results {
        match result {
            Ok((channel, programs)) => {
                guide.channels.push(channel);
                guide.programs.extend(programs);
            }
            Err(e) => match policy {
                FailurePolicy::Abort => return Err(format!("channel '{}': {}", name, e)),
                FailurePolicy::SkipAndWarn => eprintln!("Skipping channel '{}': {}", name, e),
            },
        }
    }
    Ok(guide)
}

/// Flatten one catalog channel. Every derived optional starts out absent
/// here, so a null `images`/`labels`/`classification` can never inherit a
/// value from an earlier channel.
fn normalize_channel(
    raw: &RawChannel,
    tz: &Tz,
) -> Result<(ChannelRecord, Vec<ProgramRecord>), String> {
    let icon = raw
        .images
        .as_ref()
        .and_then(|i| i.artwork_negative.clone().or_else(|| i.artwork.clone()));
    let language = raw
        .labels
        .as_ref()
        .and_then(|l| l.languages.as_ref())
        .and_then(|langs| langs.first())
        .map(|lang| lang.id.clone());
    let tags = raw
        .labels
        .as_ref()
        .and_then(|l| l.tags.as_ref())
        .map(|tags| tags.iter().map(|t| t.name.clone()).collect::<Vec<_>>());
    let age_rating = raw.classification.as_ref().and_then(|c| c.age);

    let id = raw.id.to_string();
    let channel = ChannelRecord {
        name: raw.title.clone(),
        epg_number: raw.channel_number,
        id: id.clone(),
        icon,
        language: language.clone(),
        tags: tags.clone(),
        age_rating,
    };

    let mut programs = Vec::with_capacity(raw.live_programs.len());
    for item in &raw.live_programs {
        programs.push(ProgramRecord {
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            description: item.description.clone(),
            starts_at: parse_offset_timestamp(&item.starts_at)?,
            ends_at: parse_local_timestamp(&item.ends_at, tz)?,
            channel_id: id.clone(),
            language: language.clone(),
            tags: tags.clone(),
        });
    }

    Ok((channel, programs))
}

/// `starts_at` carries a numeric UTC offset with milliseconds, e.g.
/// `2024-01-15T18:00:00.000+00:00`.
fn parse_offset_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_str(s, STARTS_AT_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("bad starts_at '{}': {}", s, e))
}

/// `ends_at` is parsed with its trailing 6-character offset cut off and
/// the remainder taken as wall-clock time in the reference timezone.
fn parse_local_timestamp(s: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    let trimmed = s
        .len()
        .checked_sub(6)
        .and_then(|end| s.get(..end))
        .ok_or_else(|| format!("bad ends_at '{}': missing offset suffix", s))?;
    let naive = NaiveDateTime::parse_from_str(trimmed, ENDS_AT_FORMAT)
        .map_err(|e| format!("bad ends_at '{}': {}", s, e))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| format!("bad ends_at '{}': nonexistent local time", s))
}
