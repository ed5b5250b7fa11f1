use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use postforge::{captions, fonts, output, BatchItem, RenderSettings};

/// Batch social-media post generator: composites each logo onto a shared
/// background with up to three caption lines, producing one JPEG per logo
/// or a ZIP of the whole batch.
#[derive(Parser, Debug)]
#[command(name = "postforge", version, about)]
struct Cli {
    /// Background image (JPEG or PNG)
    background: PathBuf,

    /// Logo images (PNG with transparency expected)
    #[arg(required = true)]
    logos: Vec<PathBuf>,

    /// Caption line shared by every post; repeat up to three times
    #[arg(short, long)]
    caption: Vec<String>,

    /// Per-logo caption overrides, one "<name>: <c1> | <c2> | <c3>" per line
    #[arg(long, value_name = "FILE")]
    captions_file: Option<PathBuf>,

    /// Settings bundle as JSON; individual flags below override its fields
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Logo width after resizing, in pixels
    #[arg(long)]
    logo_width: Option<u32>,

    /// Logo height after resizing, in pixels
    #[arg(long)]
    logo_height: Option<u32>,

    /// Horizontal logo offset from center (positive moves right)
    #[arg(long)]
    offset_x: Option<i32>,

    /// Vertical logo offset from center (positive moves up)
    #[arg(long)]
    offset_y: Option<i32>,

    /// Caption font size in pixels
    #[arg(long)]
    font_size: Option<u32>,

    /// Line spacing factor (multiplier on font size)
    #[arg(long)]
    line_spacing: Option<f32>,

    /// Resize the background to WIDTHxHEIGHT before compositing
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    resize: Option<String>,

    /// JPEG quality, 1-100
    #[arg(long)]
    quality: Option<u8>,

    /// Directory searched for caption font files (default: working directory)
    #[arg(long, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write an HTML page with embedded base64 download links
    #[arg(long)]
    html: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // The background is the one input with no degraded mode: stop before
    // doing any work if it is missing.
    if !cli.background.exists() {
        bail!("background image not found: {}", cli.background.display());
    }
    let background = postforge::load_image(&cli.background).context("failed to load background")?;

    let settings = build_settings(&cli)?;
    settings
        .validate()
        .context("invalid settings")?;

    let overrides = match &cli.captions_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read captions file {}", path.display()))?;
            captions::parse_overrides(&text)
        }
        None => captions::CaptionTable::new(),
    };

    if cli.caption.is_empty() && overrides.is_empty() {
        bail!("at least one caption is required (use --caption or --captions-file)");
    }

    let items = load_items(&cli, &overrides)?;
    if items.is_empty() {
        bail!("none of the logo images could be decoded");
    }

    let font_dir = cli.font_dir.as_deref().unwrap_or(Path::new("."));
    let font = fonts::resolve_in(font_dir, settings.font_size);
    if !font.preferred {
        warn!("Nexa Extra Bold not found; captions will use a substitute font");
    }

    let outcome = postforge::batch::generate_batch_with_font(&background, &items, &settings, &font)?;
    if outcome.posts.is_empty() {
        bail!("no posts were generated");
    }
    for (name, err) in &outcome.failures {
        warn!("{} failed: {}", name, err);
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    if outcome.posts.len() == 1 {
        let post = &outcome.posts[0];
        let path = cli.out_dir.join(&post.filename);
        fs::write(&path, &post.jpeg)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        if cli.html {
            let link = output::download_link(
                &output::image_data_url(&post.jpeg),
                &post.filename,
                "Download image",
            );
            write_links_page(&cli.out_dir, &link)?;
        }
    } else {
        let archive = outcome.archive()?;
        let path = cli.out_dir.join(output::ARCHIVE_NAME);
        fs::write(&path, &archive)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            "Wrote {} ({} posts)",
            path.display(),
            outcome.posts.len()
        );
        if cli.html {
            let link = output::download_link(
                &output::zip_data_url(&archive),
                output::ARCHIVE_NAME,
                "Download all images (ZIP)",
            );
            write_links_page(&cli.out_dir, &link)?;
        }
    }

    if !outcome.failures.is_empty() {
        warn!(
            "{} of {} logos failed; see messages above",
            outcome.failures.len(),
            items.len()
        );
    }

    Ok(())
}

/// Merge the optional JSON settings file with per-flag overrides.
fn build_settings(cli: &Cli) -> Result<RenderSettings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse settings file {}", path.display()))?
        }
        None => RenderSettings::default(),
    };

    if let Some(v) = cli.logo_width {
        settings.logo_width = v;
    }
    if let Some(v) = cli.logo_height {
        settings.logo_height = v;
    }
    if let Some(v) = cli.offset_x {
        settings.offset_x = v;
    }
    if let Some(v) = cli.offset_y {
        settings.offset_y = v;
    }
    if let Some(v) = cli.font_size {
        settings.font_size = v;
    }
    if let Some(v) = cli.line_spacing {
        settings.line_spacing = v;
    }
    if let Some(v) = cli.quality {
        settings.jpeg_quality = v;
    }
    if let Some(spec) = &cli.resize {
        let (w, h) = parse_dimensions(spec)?;
        settings.resize_background = true;
        settings.image_width = w;
        settings.image_height = h;
    }

    Ok(settings)
}

fn parse_dimensions(spec: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = spec.split_once('x') else {
        bail!("expected WIDTHxHEIGHT, got '{}'", spec);
    };
    let width = w.trim().parse().with_context(|| format!("bad width '{}'", w))?;
    let height = h.trim().parse().with_context(|| format!("bad height '{}'", h))?;
    Ok((width, height))
}

/// Decode each logo and pair it with its caption set. Logos that fail to
/// decode are skipped with a warning so the rest of the batch survives.
fn load_items(cli: &Cli, overrides: &captions::CaptionTable) -> Result<Vec<BatchItem>> {
    let mut items = Vec::with_capacity(cli.logos.len());
    for (index, path) in cli.logos.iter().enumerate() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("logo{}", index + 1));

        let logo = match postforge::load_image(path) {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping logo: {}", e);
                continue;
            }
        };

        let caption_set =
            captions::resolve_captions(overrides, &stem, index, &cli.caption).to_vec();
        items.push(BatchItem {
            name: stem,
            logo,
            captions: caption_set,
        });
    }
    Ok(items)
}
