// src/app.rs

//! Top-level run: resolve the text, load the face, drive the pipeline.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{Pipeline, RunSummary};
use crate::rasterizer::font_face::FontFace;
use crate::rasterizer::truetype_face::TrueTypeFace;
use crate::sink::ImageSink;
use crate::text;
use log::*;
use std::sync::Arc;

/// The configured text, or the built-in poem.
pub fn input_text(config: &Config) -> String {
    config.text.clone().unwrap_or_else(text::jabberwocky)
}

/// Load the configured font file and render with it.
///
/// Font problems surface here, before any stage is spawned and before the
/// sink sees anything.
pub fn run<S: ImageSink + ?Sized>(config: &Config, sink: &mut S) -> Result<RunSummary> {
    config.validate()?;
    let face = TrueTypeFace::from_path(&config.font.file, config.font.pts, config.font.dpi)?;
    run_with_face(Arc::new(face), config, sink)
}

/// Render with an already-loaded face.
pub fn run_with_face<F, S>(face: Arc<F>, config: &Config, sink: &mut S) -> Result<RunSummary>
where
    F: FontFace + ?Sized + 'static,
    S: ImageSink + ?Sized,
{
    let pipeline = Pipeline::new(face, config)?;
    let text = input_text(config);
    info!(
        "App: Rendering {} chars with {}x{} px cells",
        text.chars().count(),
        pipeline.geometry().width,
        pipeline.geometry().height
    );
    pipeline.run(text, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::sink::MemorySink;
    use std::path::PathBuf;

    #[test]
    fn default_text_is_the_poem() {
        assert_eq!(input_text(&Config::default()), text::jabberwocky());
    }

    #[test]
    fn configured_text_wins() {
        let mut config = Config::default();
        config.text = Some("Hi there".to_string());
        assert_eq!(input_text(&config), "Hi there");
    }

    #[test]
    fn unreadable_font_aborts_before_any_output() {
        let mut config = Config::default();
        config.font.file = PathBuf::from("/no/such/font.ttf");
        config.pipeline.pacing_ms = 0;
        let mut sink = MemorySink::new();

        let err = run(&config, &mut sink).unwrap_err();
        assert!(matches!(err, RenderError::FontRead { .. }));
        assert!(sink.is_empty());
    }
}
