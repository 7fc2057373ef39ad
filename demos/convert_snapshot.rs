// demos/convert_snapshot.rs
//
// Converts a pre-rendered DOM snapshot and its HTML source into a JSON deck.
//
//     cargo run --example convert_snapshot -- snapshot.json slides.html deck.json

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use html_deck::{Converter, ConverterConfig, DeckMetadataPlugin, JsonBackend, StaticSurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = args.next().unwrap_or_else(|| "snapshot.json".to_string());
    let html_path = args.next().unwrap_or_else(|| "slides.html".to_string());
    let output_path = args.next().unwrap_or_else(|| "deck.json".to_string());

    let config = match std::env::var("DECK_CONFIG") {
        Ok(path) => ConverterConfig::from_json_file(&path)
            .with_context(|| format!("reading config {path}"))?,
        Err(_) => ConverterConfig::default(),
    };

    log::info!("Loading snapshot from {snapshot_path}...");
    let snapshot = fs::read_to_string(&snapshot_path)
        .with_context(|| format!("reading {snapshot_path}"))?;
    let surface = StaticSurface::from_json_str(&snapshot)?;
    let html =
        fs::read_to_string(&html_path).with_context(|| format!("reading {html_path}"))?;

    let mut converter = Converter::builder()
        .set_config(config)
        .set_surface(Arc::new(surface))
        .set_backend(Arc::new(JsonBackend::pretty()))
        .extension_plugins(vec![Box::new(DeckMetadataPlugin::new())])
        .build()?;
    log::info!("Plugins: {}", converter.plugins().join(", "));

    converter.load(html);
    let presentation = converter.convert().await?;
    log::info!(
        "Converted {} slide(s), {} element(s).",
        presentation.slides.len(),
        presentation.element_count()
    );

    let bytes = converter.export().await?;
    fs::write(&output_path, &bytes).with_context(|| format!("writing {output_path}"))?;
    log::info!("Deck written to {output_path} ({} bytes).", bytes.len());
    Ok(())
}
