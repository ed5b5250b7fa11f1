//! The compositor: one background + one logo + captions -> one finished post
//!
//! Inputs are never mutated; every call allocates a fresh output image, so
//! repeated calls with the same inputs are pixel-identical.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::fonts::{self, ResolvedFont};
use crate::rendering::text;
use crate::RenderSettings;

/// Where the logo lands on a `bw` x `bh` background.
///
/// Centered, then shifted by the configured offsets. The vertical offset is
/// inverted: positive `offset_y` moves the logo up.
pub fn paste_position(bw: u32, bh: u32, settings: &RenderSettings) -> (i64, i64) {
    let x = (bw as i64 - settings.logo_width as i64).div_euclid(2) + settings.offset_x as i64;
    let y = (bh as i64 - settings.logo_height as i64).div_euclid(2) - settings.offset_y as i64;
    (x, y)
}

/// Render one post, resolving the caption font from the working directory.
///
/// Convenience wrapper over [`render_at`] with the default paste position.
pub fn render(
    background: &DynamicImage,
    logo: &DynamicImage,
    captions: &[String],
    settings: &RenderSettings,
) -> RgbImage {
    let font = fonts::resolve(settings.font_size);
    render_at(background, logo, captions, settings, &font, None)
}

/// Render one post with an already-resolved font and an optional explicit
/// logo position that bypasses the [`paste_position`] formula.
///
/// Steps: normalize the background copy to RGB, optionally resize it, resize
/// the logo to the configured dimensions (aspect distortion accepted), paste
/// with alpha blending, then draw the caption block.
pub fn render_at(
    background: &DynamicImage,
    logo: &DynamicImage,
    captions: &[String],
    settings: &RenderSettings,
    font: &ResolvedFont,
    position: Option<(i64, i64)>,
) -> RgbImage {
    // Normalize to RGB up front: lossy encoding cannot carry alpha, and the
    // paste must not inherit transparency from the background.
    let mut base = background.to_rgb8();
    if settings.resize_background {
        base = imageops::resize(
            &base,
            settings.image_width,
            settings.image_height,
            FilterType::Lanczos3,
        );
    }

    let logo = imageops::resize(
        &logo.to_rgba8(),
        settings.logo_width,
        settings.logo_height,
        FilterType::Lanczos3,
    );

    let (x, y) = match position {
        Some(p) => p,
        None => paste_position(base.width(), base.height(), settings),
    };

    // Composite in RGBA so the logo's alpha channel acts as the paste mask;
    // a logo without alpha decodes to alpha=255 and pastes opaquely.
    let mut canvas = DynamicImage::ImageRgb8(base).to_rgba8();
    imageops::overlay(&mut canvas, &logo, x, y);
    let mut out = DynamicImage::ImageRgba8(canvas).to_rgb8();

    text::draw_captions(&mut out, captions, font, settings);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_position_matches_formula() {
        let settings = RenderSettings {
            logo_width: 400,
            logo_height: 300,
            offset_x: 0,
            offset_y: 120,
            ..Default::default()
        };
        assert_eq!(paste_position(1080, 1080, &settings), (340, 270));
    }

    #[test]
    fn positive_offset_y_moves_logo_up() {
        let up = RenderSettings {
            offset_y: 50,
            ..Default::default()
        };
        let centered = RenderSettings {
            offset_y: 0,
            ..Default::default()
        };
        let (_, y_up) = paste_position(1000, 1000, &up);
        let (_, y_center) = paste_position(1000, 1000, &centered);
        assert_eq!(y_center - y_up, 50);
    }

    #[test]
    fn odd_remainder_floors_toward_negative_infinity() {
        let settings = RenderSettings {
            logo_width: 3,
            logo_height: 3,
            offset_x: 0,
            offset_y: 0,
            ..Default::default()
        };
        // (2 - 3) / 2 floors to -1, not 0
        assert_eq!(paste_position(2, 2, &settings), (-1, -1));
    }
}
