//! Caption layout and drawing
//!
//! Up to three lines, dash-prefixed, centered horizontally and stacked from
//! a fixed anchor near the bottom edge. Drawing supports both scalable
//! TrueType faces and the builtin 8x8 bitmap fallback.

use ab_glyph::{Font, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

use crate::fonts::{CaptionFont, ResolvedFont};
use crate::{RenderSettings, BASELINE_FONT_SIZE};

/// Maximum caption lines per post; extra entries are silently dropped.
pub const MAX_CAPTION_LINES: usize = 3;

/// Caption ink. No outline, no shadow.
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Calibration constant: distance from the bottom edge to the first caption
/// line at the baseline font size. Tuned visually against the stock
/// background; preserve as-is.
const BOTTOM_ANCHOR: i32 = 250;

/// Glyph advance of the builtin 8x8 bitmap font, in pixels.
const BUILTIN_ADVANCE: u32 = 8;

/// Take the first [`MAX_CAPTION_LINES`] captions and make sure each starts
/// with a dash.
///
/// # Examples
///
/// ```
/// use postforge::rendering::text::prepare_captions;
///
/// let lines = prepare_captions(&["Great service".to_string()]);
/// assert_eq!(lines, vec!["- Great service".to_string()]);
/// ```
pub fn prepare_captions(captions: &[String]) -> Vec<String> {
    captions
        .iter()
        .take(MAX_CAPTION_LINES)
        .map(|c| {
            if c.starts_with('-') {
                c.clone()
            } else {
                format!("- {}", c)
            }
        })
        .collect()
}

/// Pixel distance between the tops of successive caption lines.
pub fn line_pitch(font_size: u32, line_spacing: f32) -> i32 {
    (font_size as f32 * line_spacing).round() as i32
}

/// Top of the first caption line on an image `height` pixels tall.
///
/// The anchor drifts with font size so larger text stays visually balanced
/// against the bottom edge.
pub fn anchor_y(height: u32, font_size: u32) -> i32 {
    let drift = (font_size as i32 - BASELINE_FONT_SIZE as i32).div_euclid(2);
    height as i32 - (BOTTOM_ANCHOR + drift)
}

/// Width in pixels of `text` rendered with `font`.
pub fn line_width(font: &ResolvedFont, text: &str) -> u32 {
    match &font.font {
        CaptionFont::Truetype(face) => {
            let scaled = face.as_scaled(PxScale::from(font.size as f32));
            let width: f32 = text
                .chars()
                .map(|c| scaled.h_advance(scaled.glyph_id(c)))
                .sum();
            width.ceil() as u32
        }
        CaptionFont::Builtin => text.chars().count() as u32 * BUILTIN_ADVANCE,
    }
}

/// Draw the caption block onto `canvas` per `settings`.
///
/// Lines are prepared with [`prepare_captions`], centered horizontally and
/// stacked downward from [`anchor_y`]. Empty caption sets draw nothing.
pub fn draw_captions(
    canvas: &mut RgbImage,
    captions: &[String],
    font: &ResolvedFont,
    settings: &RenderSettings,
) {
    let lines = prepare_captions(captions);
    if lines.is_empty() {
        return;
    }

    let pitch = line_pitch(settings.font_size, settings.line_spacing);
    let y0 = anchor_y(canvas.height(), settings.font_size);

    for (i, line) in lines.iter().enumerate() {
        let width = line_width(font, line);
        let x = (canvas.width() as i32 - width as i32).div_euclid(2);
        let y = y0 + i as i32 * pitch;
        draw_line(canvas, font, x, y, line);
    }
}

/// Draw a single line of text with its top-left corner at `(x, y)`.
fn draw_line(canvas: &mut RgbImage, font: &ResolvedFont, x: i32, y: i32, text: &str) {
    match &font.font {
        CaptionFont::Truetype(face) => draw_truetype_line(canvas, face, font.size, x, y, text),
        CaptionFont::Builtin => draw_builtin_line(canvas, x, y, text),
    }
}

fn draw_truetype_line(
    canvas: &mut RgbImage,
    face: &ab_glyph::FontArc,
    size: u32,
    x: i32,
    y: i32,
    text: &str,
) {
    let scale = PxScale::from(size as f32);
    let scaled = face.as_scaled(scale);

    // `y` is the top of the line; the glyph API positions by baseline.
    let baseline = y as f32 + scaled.ascent();
    let mut cursor = x as f32;

    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

    for c in text.chars() {
        let glyph_id = scaled.glyph_id(c);
        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor, baseline));
        cursor += scaled.h_advance(glyph_id);

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue; // whitespace and glyphless codepoints
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px < 0 || py < 0 || px >= cw || py >= ch {
                return;
            }
            blend_ink(canvas, px as u32, py as u32, coverage);
        });
    }
}

fn draw_builtin_line(canvas: &mut RgbImage, x: i32, y: i32, text: &str) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    let mut cursor = x;

    for c in text.chars() {
        let glyph = BASIC_FONTS
            .get(c)
            .unwrap_or_else(|| BASIC_FONTS.get('?').unwrap());
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let px = cursor + col as i32;
                let py = y + row as i32;
                if px < 0 || py < 0 || px >= cw || py >= ch {
                    continue;
                }
                canvas.put_pixel(px as u32, py as u32, INK);
            }
        }
        cursor += BUILTIN_ADVANCE as i32;
    }
}

/// Blend the ink color over the pixel at `(x, y)` by `coverage` (0.0..=1.0).
fn blend_ink(canvas: &mut RgbImage, x: u32, y: u32, coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    let coverage = coverage.min(1.0);
    let pixel = canvas.get_pixel_mut(x, y);
    for (channel, ink) in pixel.0.iter_mut().zip(INK.0.iter()) {
        let blended = *channel as f32 * (1.0 - coverage) + *ink as f32 * coverage;
        *channel = blended.round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{CaptionFont, ResolvedFont};

    fn builtin_font(size: u32) -> ResolvedFont {
        ResolvedFont {
            font: CaptionFont::Builtin,
            size,
            preferred: false,
        }
    }

    #[test]
    fn captions_get_dash_prefix() {
        let lines = prepare_captions(&["Great service".to_string()]);
        assert_eq!(lines, vec!["- Great service".to_string()]);
    }

    #[test]
    fn already_dashed_captions_are_unchanged() {
        let lines = prepare_captions(&["- Already dashed".to_string()]);
        assert_eq!(lines, vec!["- Already dashed".to_string()]);
    }

    #[test]
    fn captions_are_truncated_to_three() {
        let five: Vec<String> = (1..=5).map(|i| format!("line {}", i)).collect();
        let lines = prepare_captions(&five);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "- line 3");
    }

    #[test]
    fn line_pitch_is_rounded_product() {
        assert_eq!(line_pitch(30, 2.0), 60);
        assert_eq!(line_pitch(48, 1.3), 62); // 62.4 rounds down
    }

    #[test]
    fn anchor_matches_calibration_at_baseline_size() {
        assert_eq!(anchor_y(1080, 48), 1080 - 250);
        // One step above baseline moves the anchor up by half the difference
        assert_eq!(anchor_y(1080, 60), 1080 - 256);
        // Below-baseline sizes floor like the original
        assert_eq!(anchor_y(1080, 47), 1080 - 249);
    }

    #[test]
    fn builtin_width_is_advance_times_chars() {
        let font = builtin_font(48);
        assert_eq!(line_width(&font, "abcd"), 32);
        assert_eq!(line_width(&font, ""), 0);
    }

    #[test]
    fn drawing_on_white_canvas_leaves_ink() {
        let mut canvas = RgbImage::from_pixel(200, 400, image::Rgb([255, 255, 255]));
        let font = builtin_font(8);
        let settings = crate::RenderSettings {
            font_size: 8,
            ..Default::default()
        };
        draw_captions(&mut canvas, &["hi".to_string()], &font, &settings);
        let inked = canvas.pixels().filter(|p| p.0 != [255, 255, 255]).count();
        assert!(inked > 0);
    }

    #[test]
    fn empty_caption_set_draws_nothing() {
        let mut canvas = RgbImage::from_pixel(100, 100, image::Rgb([7, 7, 7]));
        let before = canvas.clone();
        let font = builtin_font(48);
        draw_captions(&mut canvas, &[], &font, &RenderSettings::default());
        assert_eq!(canvas, before);
    }
}
