//! Font registration for chart text.
//!
//! `plotters` draws text through `ab_glyph`, which needs the font bytes
//! registered under a family name before anything is drawn. Registration is
//! process-wide and happens at most once; the first successful source wins.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};
use tracing::{info, warn};

/// Family name every chart text style refers to.
pub const CHART_FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Make sure a chart font is registered. Returns `false` when no usable
/// font was found, in which case charts must be drawn without text.
pub fn ensure_registered(preferred: Option<&Path>) -> bool {
    *REGISTERED.get_or_init(|| {
        let Some(path) = locate(preferred) else {
            warn!("no TrueType font found; chart will be drawn without labels");
            return false;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read chart font");
                return false;
            }
        };

        // ab_glyph keeps a 'static reference for the rest of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(CHART_FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                info!(path = %path.display(), "registered chart font");
                true
            }
            Err(_) => {
                warn!(path = %path.display(), "chart font is not a valid TrueType font");
                false
            }
        }
    })
}

fn locate(preferred: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = preferred {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "configured chart font not found; trying system fonts");
    }

    SYSTEM_FONT_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}
