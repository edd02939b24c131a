//! XMLTV rendering
//!
//! Turns the normalized guide into an indented UTF-8 XMLTV document. The
//! renderer trusts `channel_id` references and does not re-validate them
//! against the channel list.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::models::{ChannelRecord, ProgramRecord};
use crate::normalize::Guide;

const GENERATOR_INFO_NAME: &str = "rakuten-epg";
const GENERATOR_INFO_URL: &str = "https://github.com/dp247/";

/// XMLTV `start`/`stop` attribute format. The numeric offset is rendered
/// from the reference timezone, so it tracks GMT/BST.
const XMLTV_TIME_FORMAT: &str = "%Y%m%d%H%M%S %z";

type XmlWriter = Writer<Vec<u8>>;

/// Render the guide as XMLTV document bytes. An empty guide still yields
/// a well-formed document with a bare `tv` root.
pub fn render(guide: &Guide, tz: &Tz) -> Result<Vec<u8>, String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut tv = BytesStart::new("tv");
    tv.push_attribute(("generator-info-name", GENERATOR_INFO_NAME));
    tv.push_attribute(("generator-info-url", GENERATOR_INFO_URL));
    write(&mut writer, Event::Start(tv))?;

    for channel in &guide.channels {
        write_channel(&mut writer, channel)?;
    }
    for program in &guide.programs {
        write_programme(&mut writer, program, tz)?;
    }

    write(&mut writer, Event::End(BytesEnd::new("tv")))?;
    Ok(writer.into_inner())
}

fn write_channel(writer: &mut XmlWriter, channel: &ChannelRecord) -> Result<(), String> {
    let mut el = BytesStart::new("channel");
    el.push_attribute(("id", channel.id.as_str()));
    write(writer, Event::Start(el))?;

    let lang = display_name_lang(channel.language.as_deref());
    write_text_element(writer, "display-name", &lang, &channel.name)?;

    if let Some(src) = &channel.icon {
        let mut icon = BytesStart::new("icon");
        icon.push_attribute(("src", src.as_str()));
        write(writer, Event::Start(icon))?;
        write(writer, Event::End(BytesEnd::new("icon")))?;
    }

    write(writer, Event::End(BytesEnd::new("channel")))
}

fn write_programme(
    writer: &mut XmlWriter,
    program: &ProgramRecord,
    tz: &Tz,
) -> Result<(), String> {
    let mut el = BytesStart::new("programme");
    el.push_attribute(("channel", program.channel_id.as_str()));
    el.push_attribute(("start", xmltv_time(&program.starts_at, tz).as_str()));
    el.push_attribute(("stop", xmltv_time(&program.ends_at, tz).as_str()));
    write(writer, Event::Start(el))?;

    // Titles are passed through as-is; only sub-title and desc get the
    // control-character treatment.
    write_text_element(writer, "title", "en", &program.title)?;
    if let Some(subtitle) = &program.subtitle {
        write_text_element(writer, "sub-title", "en", &strip_control(subtitle))?;
    }
    if let Some(description) = &program.description {
        write_text_element(writer, "desc", "en", &strip_control(description))?;
    }
    if let Some(tags) = &program.tags {
        for tag in tags {
            write_text_element(writer, "category", "en", tag)?;
        }
    }

    write(writer, Event::End(BytesEnd::new("programme")))
}

fn write_text_element(
    writer: &mut XmlWriter,
    name: &str,
    lang: &str,
    text: &str,
) -> Result<(), String> {
    let mut el = BytesStart::new(name);
    el.push_attribute(("lang", lang));
    write(writer, Event::Start(el))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut XmlWriter, event: Event) -> Result<(), String> {
    writer
        .write_event(event)
        .map_err(|e| format!("XML write failed: {}", e))
}

fn xmltv_time(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format(XMLTV_TIME_FORMAT).to_string()
}

/// Language code for `display-name`: lowercased with the trailing variant
/// character dropped ("ENG" -> "en"). An absent language stays an empty
/// attribute rather than a panic.
fn display_name_lang(language: Option<&str>) -> String {
    let mut code = language.unwrap_or("").to_lowercase();
    code.pop();
    code
}

/// Drop C0/C1 control characters before the text lands inside an element.
fn strip_control(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
#[path = "xmltv_tests.rs"]
mod tests;
