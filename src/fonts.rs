//! Font resolution for caption rendering
//!
//! The tool is tuned for the Nexa Extra Bold display face, but the file ships
//! separately and shows up under several spellings in the wild. Resolution
//! tries each spelling in order, then a generic system sans-serif, and
//! finally an embedded 8x8 bitmap font that is always available. Resolution
//! is total: it never fails, it only degrades.

use std::path::Path;

use ab_glyph::FontArc;
use log::{debug, warn};

/// Candidate font files, tried in order. The first three are spellings of
/// the preferred display face.
const FONT_CANDIDATES: &[&str] = &[
    "nexa-extrabold.ttf",
    "NexaExtraBold.ttf",
    "Nexa-ExtraBold.ttf",
    "Arial.ttf",
];

/// How many of [`FONT_CANDIDATES`] count as the preferred face.
const PREFERRED_CANDIDATES: usize = 3;

/// A font usable for caption drawing.
///
/// The builtin variant is an 8x8 bitmap font; it ignores the requested size.
#[derive(Debug, Clone)]
pub enum CaptionFont {
    /// A scalable TrueType face loaded from disk
    Truetype(FontArc),
    /// The embedded fixed-size bitmap fallback
    Builtin,
}

/// The result of font resolution: a drawable font plus enough context for
/// the caller to warn the user about degraded output.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    /// The font to draw with
    pub font: CaptionFont,
    /// Requested pixel size (ignored by the builtin fallback)
    pub size: u32,
    /// Whether the preferred display face was found
    pub preferred: bool,
}

impl ResolvedFont {
    /// True when resolution fell all the way through to the bitmap font.
    pub fn is_builtin(&self) -> bool {
        matches!(self.font, CaptionFont::Builtin)
    }
}

/// Resolve the best available caption font at `size` pixels, searching the
/// working directory for the candidate files.
pub fn resolve(size: u32) -> ResolvedFont {
    resolve_in(Path::new("."), size)
}

/// Resolve the best available caption font at `size` pixels, searching `dir`
/// for the candidate files.
///
/// Never fails: when no candidate loads, the embedded bitmap font is
/// returned and a warning is logged.
pub fn resolve_in(dir: &Path, size: u32) -> ResolvedFont {
    for (idx, name) in FONT_CANDIDATES.iter().enumerate() {
        let path = dir.join(name);
        if let Some(font) = try_load(&path) {
            debug!("Loaded caption font from {}", path.display());
            return ResolvedFont {
                font: CaptionFont::Truetype(font),
                size,
                preferred: idx < PREFERRED_CANDIDATES,
            };
        }
    }

    warn!("No candidate font found; falling back to the builtin bitmap font");
    ResolvedFont {
        font: CaptionFont::Builtin,
        size,
        preferred: false,
    }
}

fn try_load(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("{} exists but is not a usable font: {}", path.display(), e);
            None
        }
    }
}
