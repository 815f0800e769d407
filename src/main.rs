// src/main.rs

use anyhow::Context;
use clap::Parser;
use glyph_strip::rasterizer::context::Hinting;
use glyph_strip::{app, Config, HeadlessFace, PngSink, SplitPolicy};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Render text to PNG strips, one strip per word")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Screen resolution in dots per inch
    #[arg(long)]
    dpi: Option<f32>,

    /// The font size in pts
    #[arg(long)]
    pts: Option<f32>,

    /// The height of the image in pixels (0 = from font metrics)
    #[arg(long)]
    height: Option<u32>,

    /// The width of the image in pixels (0 = from the reference glyph)
    #[arg(long)]
    width: Option<u32>,

    /// Run in light mode
    #[arg(long)]
    light: bool,

    /// Filename of the ttf font
    #[arg(long)]
    fontfile: Option<PathBuf>,

    /// none | full
    #[arg(long)]
    hinting: Option<Hinting>,

    /// words | chars
    #[arg(long)]
    split: Option<SplitPolicy>,

    /// Delay after each strip in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Glyph whose advance sets the default cell width
    #[arg(long)]
    reference_glyph: Option<char>,

    /// Output image path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one numbered file per strip instead of overwriting
    #[arg(long)]
    numbered: bool,

    /// Text to render instead of the built-in poem
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text to render from a file
    #[arg(long, value_name = "FILE")]
    text_file: Option<PathBuf>,

    /// Draw placeholder block glyphs instead of loading a font
    #[arg(long)]
    headless: bool,
}

impl Cli {
    /// Start from the config file (or defaults) and apply every flag given.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(dpi) = self.dpi {
            config.font.dpi = dpi;
        }
        if let Some(pts) = self.pts {
            config.font.pts = pts;
        }
        if let Some(height) = self.height {
            config.image.height = height;
        }
        if let Some(width) = self.width {
            config.image.width = width;
        }
        if self.light {
            config.image.light = true;
        }
        if let Some(file) = &self.fontfile {
            config.font.file = file.clone();
        }
        if let Some(hinting) = self.hinting {
            config.font.hinting = hinting;
        }
        if let Some(split) = self.split {
            config.pipeline.split = split;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.pipeline.pacing_ms = pacing_ms;
        }
        if let Some(reference) = self.reference_glyph {
            config.font.reference_glyph = reference;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.numbered {
            config.output.numbered = true;
        }
        if let Some(text) = &self.text {
            config.text = Some(text.clone());
        }
        if let Some(path) = &self.text_file {
            config.text = Some(read_text_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Read text to render, without the file's trailing line breaks.
fn read_text_file(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file '{}'", path.display()))?;
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting glyph-strip...");

    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to resolve configuration")?;
    info!("Configuration resolved: {:?}", config);

    let mut sink = PngSink::new();
    let result = if cli.headless {
        info!("Headless mode: using placeholder glyphs");
        app::run_with_face(Arc::new(HeadlessFace::default()), &config, &mut sink)
    } else {
        app::run(&config, &mut sink)
    };

    match result {
        Ok(summary) => {
            info!("glyph-strip wrote {} strips.", summary.strips_written);
            Ok(())
        }
        Err(e) => {
            let e = anyhow::Error::new(e).context("Rendering failed");
            error!("{:#}. Root cause: {:?}", e, e.root_cause());
            Err(e)
        }
    }
}
