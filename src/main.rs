//! Rakuten TV EPG grabber
//! Pulls the live-channel lineup from the catalog API for the next three
//! days and writes an XMLTV guide to epg.xml.

mod api;
mod config;
mod models;
mod normalize;
mod output;
mod window;
mod xmltv;

use api::CatalogClient;
use config::Settings;
use window::GuideWindow;

fn main() {
    if let Err(e) = run(&Settings::default()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<(), String> {
    let window = GuideWindow::compute(settings.timezone);

    println!("Grabbing data");
    let client = CatalogClient::new(settings);
    let raw = client.live_channels(&window)?;

    println!("\nRetrieved {} channels:", raw.len());
    for channel in &raw {
        println!("{}", channel.title);
    }

    let guide = normalize::normalize(&raw, &settings.timezone, settings.failure_policy)?;
    let bytes = xmltv::render(&guide, &settings.timezone)?;
    output::write_guide(&settings.output_path, &bytes)?;

    println!("Wrote {}", settings.output_path.display());
    Ok(())
}
