//! Postforge
//!
//! A batch post generator: composites a company logo and up to three caption
//! lines onto a shared background image, producing one JPEG per logo or a
//! ZIP archive of the whole batch.
//!
//! # Example
//!
//! ```no_run
//! use postforge::{render, RenderSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let background = image::open("background.jpg")?;
//! let logo = image::open("logo.png")?;
//! let settings = RenderSettings {
//!     font_size: 56,
//!     offset_y: 150,
//!     ..Default::default()
//! };
//!
//! let captions = vec!["Great service".to_string(), "Open daily".to_string()];
//! let post = render(&background, &logo, &captions, &settings);
//! post.save("logo_resultante.jpg")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod batch;
pub mod captions;
pub mod fonts;
pub mod output;
pub mod rendering;

// Re-export the main entry points at the crate root for ergonomic use
pub use batch::{generate_batch, BatchItem, BatchOutcome, RenderedPost};
pub use rendering::compositor::{paste_position, render, render_at};

/// Reference font size the caption anchor was calibrated against.
///
/// The vertical anchor formula embeds this constant; changing it shifts
/// every caption block, so it is kept alongside the settings rather than
/// buried in the text layout code.
pub const BASELINE_FONT_SIZE: u32 = 48;

/// Settings bundle for a single render call
///
/// Immutable per call: the compositor reads it, never writes it, so a single
/// instance can be shared across a whole batch. Defaults mirror the values
/// the tool ships with.
///
/// # Examples
///
/// ```
/// let settings = postforge::RenderSettings::default();
/// assert_eq!(settings.logo_width, 400);
/// assert_eq!(settings.jpeg_quality, 90);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Logo width after resizing, in pixels
    pub logo_width: u32,
    /// Logo height after resizing, in pixels
    pub logo_height: u32,
    /// Horizontal logo offset from center, in pixels (positive moves right)
    pub offset_x: i32,
    /// Vertical logo offset from center, in pixels (positive moves up)
    pub offset_y: i32,
    /// Caption font size in pixels
    pub font_size: u32,
    /// Multiplier on `font_size` giving the caption line pitch
    pub line_spacing: f32,
    /// Whether to resize the background before compositing
    pub resize_background: bool,
    /// Target background width when `resize_background` is set
    pub image_width: u32,
    /// Target background height when `resize_background` is set
    pub image_height: u32,
    /// JPEG encoding quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            logo_width: 400,
            logo_height: 300,
            offset_x: 0,
            offset_y: 120,
            font_size: 48,
            line_spacing: 1.3,
            resize_background: false,
            image_width: 1080,
            image_height: 1080,
            jpeg_quality: 90,
        }
    }
}

/// Decode an input image from disk.
///
/// Thin wrapper mapping decode failures into the crate error type; the
/// compositor itself only ever sees already-decoded images.
pub fn load_image(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|e| Error::DecodeError(format!("{}: {}", path.display(), e)))
}

impl RenderSettings {
    /// Check the bundle for values the compositor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.logo_width == 0 || self.logo_height == 0 {
            return Err(Error::ConfigError(
                "logo dimensions must be nonzero".to_string(),
            ));
        }
        if self.font_size == 0 {
            return Err(Error::ConfigError("font size must be nonzero".to_string()));
        }
        if self.line_spacing <= 0.0 {
            return Err(Error::ConfigError(
                "line spacing factor must be positive".to_string(),
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(Error::ConfigError(format!(
                "jpeg quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.resize_background && (self.image_width == 0 || self.image_height == 0) {
            return Err(Error::ConfigError(
                "target image dimensions must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
