//! Scripted editing session
//!
//! Runs a short sequence of edits through the command engine, walks the
//! history back and forth, and optionally writes the final image as PNG.
//!
//! Usage: `pixkit [output.png]`

use std::path::PathBuf;

use anyhow::Context;
use pixkit::{
    edits::{rescale_command, resize_command, ResizeOptions},
    editor_from_config, init_logging, Color, Config, Editor, IntRect, IntSize, BUILD_DATE,
    VERSION,
};
use pixkit_commands::{fill_command, target_rectangle};
use tracing::{info, warn};

fn load_config() -> anyhow::Result<Config> {
    match Config::default_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("failed to load {}", path.display())),
        Err(e) => {
            warn!("Using default settings: {}", e);
            Ok(Config::default())
        }
    }
}

fn report(editor: &Editor, action: &str) {
    info!(
        "{}: undo={:?} redo={:?} size={:?} dirty={}",
        action,
        editor.undo_name(),
        editor.redo_name(),
        editor.document().active_frame().size(),
        editor.is_dirty()
    );
}

fn brush_stroke(editor: &mut Editor, color: Color) {
    editor.open_undo_bundle();
    for i in 0..8 {
        let dab = IntRect::new(4 + i * 4, 8 + i * 2, 6, 6);
        editor.run_command(target_rectangle(fill_command(color), dab));
    }
    editor.close_undo_bundle(Some("Brush Stroke".to_string()));
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("PixKit {} (built {})", VERSION, BUILD_DATE);

    let output = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config()?;
    let bg = config.raster.background;
    let mut editor = editor_from_config(&config, IntSize::new(64, 48))?;
    editor.mark_saved();

    brush_stroke(&mut editor, Color::rgb(200, 30, 30));
    report(&editor, "Painted");

    let grow = ResizeOptions::new(IntRect::new(-8, -8, 80, 64), bg)
        .alt_bg(Color::TRANSPARENT)
        .build()?;
    editor.run_command(Box::new(grow));
    report(&editor, "Resized");

    if editor.apply_dwim().is_some() {
        report(&editor, "Alternate");
    }

    editor.undo();
    report(&editor, "Undone");
    editor.redo();
    report(&editor, "Redone");

    if let Some(crop) = resize_command(IntRect::new(8, 8, 64, 48), bg) {
        editor.run_command(crop);
        report(&editor, "Cropped");
    }

    let thumbnail = IntSize::new(32, 24);
    editor.run_command(rescale_command(thumbnail, config.raster.scale_quality));
    report(&editor, "Rescaled");

    if let Some(path) = output {
        editor
            .document()
            .active_frame()
            .bitmap()
            .as_image()
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        editor.mark_saved();
        info!("Saved {}", path.display());
    }

    Ok(())
}
