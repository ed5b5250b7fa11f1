//! Output packaging: JPEG encoding, ZIP assembly, and download links

use std::io::{Cursor, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Filename of the batch archive.
pub const ARCHIVE_NAME: &str = "posts_gerados.zip";

/// Output filename for the post generated from the logo named `stem`.
pub fn post_filename(stem: &str) -> String {
    format!("{}_resultante.jpg", stem)
}

/// Encode a rendered post as JPEG at the given quality (1-100).
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| Error::EncodeError(format!("JPEG encoding failed: {}", e)))?;
    Ok(buffer)
}

/// Bundle named payloads into a deflate-compressed ZIP archive.
pub fn write_zip(entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer
            .start_file(*name, options)
            .map_err(|e| Error::ArchiveError(format!("{}: {}", name, e)))?;
        writer.write_all(bytes)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| Error::ArchiveError(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Base64 data URL for a single encoded post.
pub fn image_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

/// Base64 data URL for a batch archive.
pub fn zip_data_url(zip: &[u8]) -> String {
    format!("data:application/zip;base64,{}", STANDARD.encode(zip))
}

/// An HTML anchor that downloads the linked payload as `filename`.
pub fn download_link(data_url: &str, filename: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" download="{}">{}</a>"#,
        data_url, filename, label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_filename_uses_stem() {
        assert_eq!(post_filename("acme"), "acme_resultante.jpg");
    }

    #[test]
    fn encoded_jpeg_decodes_back_to_same_dimensions() {
        let img = RgbImage::from_pixel(64, 32, image::Rgb([120, 80, 40]));
        let bytes = encode_jpeg(&img, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn zip_roundtrip_preserves_names_and_bytes() {
        let entries: Vec<(&str, &[u8])> =
            vec![("a_resultante.jpg", b"aaaa"), ("b_resultante.jpg", b"bb")];
        let zipped = write_zip(&entries).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(zipped)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut contents = Vec::new();
        std::io::Read::read_to_end(&mut archive.by_name("b_resultante.jpg").unwrap(), &mut contents)
            .unwrap();
        assert_eq!(contents, b"bb");
    }

    #[test]
    fn data_urls_carry_the_right_mime() {
        assert!(image_data_url(b"x").starts_with("data:image/jpeg;base64,"));
        assert!(zip_data_url(b"x").starts_with("data:application/zip;base64,"));
    }

    #[test]
    fn download_link_embeds_filename() {
        let link = download_link("data:image/jpeg;base64,eA==", "acme_resultante.jpg", "Download");
        assert!(link.contains(r#"download="acme_resultante.jpg""#));
        assert!(link.ends_with(">Download</a>"));
    }
}
