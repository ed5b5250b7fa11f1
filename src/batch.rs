//! Batch orchestration: one rendered post per logo
//!
//! Shares a single background, settings bundle, and resolved font across
//! the whole batch. Items are isolated from each other: a failure on one
//! logo is recorded and skipped instead of discarding its siblings.

use image::DynamicImage;
use log::{info, warn};

use crate::error::{Error, Result};
use crate::fonts::{self, ResolvedFont};
use crate::rendering::compositor;
use crate::{output, RenderSettings};

/// One unit of batch work: a logo plus its already-resolved caption set.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Identifier used for output naming (typically the logo filename stem)
    pub name: String,
    /// The logo image, decoded
    pub logo: DynamicImage,
    /// Captions for this post; only the first three lines are drawn
    pub captions: Vec<String>,
}

/// A finished post, encoded and ready for packaging.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    /// Output filename, `<name>_resultante.jpg`
    pub filename: String,
    /// Encoded JPEG payload
    pub jpeg: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// The result of a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Successfully rendered posts, in input order
    pub posts: Vec<RenderedPost>,
    /// Items that failed, with the reason
    pub failures: Vec<(String, Error)>,
}

impl BatchOutcome {
    /// Bundle every rendered post into the batch archive
    /// ([`output::ARCHIVE_NAME`]).
    pub fn archive(&self) -> Result<Vec<u8>> {
        let entries: Vec<(&str, &[u8])> = self
            .posts
            .iter()
            .map(|p| (p.filename.as_str(), p.jpeg.as_slice()))
            .collect();
        output::write_zip(&entries)
    }
}

/// Render one post per item, resolving the caption font from the working
/// directory.
pub fn generate_batch(
    background: &DynamicImage,
    items: &[BatchItem],
    settings: &RenderSettings,
) -> Result<BatchOutcome> {
    let font = fonts::resolve(settings.font_size);
    generate_batch_with_font(background, items, settings, &font)
}

/// Render one post per item with an already-resolved caption font.
pub fn generate_batch_with_font(
    background: &DynamicImage,
    items: &[BatchItem],
    settings: &RenderSettings,
    font: &ResolvedFont,
) -> Result<BatchOutcome> {
    settings.validate()?;
    if items.is_empty() {
        return Err(Error::ValidationError(
            "at least one logo is required".to_string(),
        ));
    }
    if font.is_builtin() {
        warn!("Preferred font not found; captions will use the builtin bitmap font");
    }

    let mut posts = Vec::with_capacity(items.len());
    let mut failures = Vec::new();

    for item in items {
        let image = compositor::render_at(background, &item.logo, &item.captions, settings, font, None);
        match output::encode_jpeg(&image, settings.jpeg_quality) {
            Ok(jpeg) => {
                info!("Rendered {} ({}x{})", item.name, image.width(), image.height());
                posts.push(RenderedPost {
                    filename: output::post_filename(&item.name),
                    jpeg,
                    width: image.width(),
                    height: image.height(),
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", item.name, e);
                failures.push((item.name.clone(), e));
            }
        }
    }

    Ok(BatchOutcome { posts, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_background(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([220, 220, 220])))
    }

    fn solid_logo(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([30, 60, 90, 255])))
    }

    #[test]
    fn empty_batch_is_a_validation_error() {
        let outcome = generate_batch(&solid_background(100, 100), &[], &RenderSettings::default());
        assert!(matches!(outcome, Err(Error::ValidationError(_))));
    }

    #[test]
    fn batch_preserves_input_order_and_names() {
        let background = solid_background(400, 400);
        let items: Vec<BatchItem> = ["zebra", "apple"]
            .iter()
            .map(|name| BatchItem {
                name: name.to_string(),
                logo: solid_logo(50, 50),
                captions: vec![],
            })
            .collect();
        let settings = RenderSettings {
            logo_width: 40,
            logo_height: 40,
            ..Default::default()
        };

        let outcome = generate_batch(&background, &items, &settings).unwrap();
        assert!(outcome.failures.is_empty());
        let names: Vec<&str> = outcome.posts.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["zebra_resultante.jpg", "apple_resultante.jpg"]);
    }
}
