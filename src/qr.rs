use csscolorparser::Color;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_BOX_SIZE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 4;
pub const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Could not encode data as a QR code: {0}")]
    Encode(#[from] QrError),

    #[error("Could not create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Could not write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Error correction tier, in ascending order of redundancy.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    /// Recovers about 7% of the symbol
    #[value(alias = "l")]
    Low,

    /// Recovers about 15% of the symbol
    #[default]
    #[value(alias = "m")]
    Medium,

    /// Recovers about 25% of the symbol
    #[value(alias = "q")]
    Quartile,

    /// Recovers about 30% of the symbol
    #[value(alias = "h")]
    High,
}

impl From<Level> for EcLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => EcLevel::L,
            Level::Medium => EcLevel::M,
            Level::Quartile => EcLevel::Q,
            Level::High => EcLevel::H,
        }
    }
}

// Everything needed to produce one image. Start from `Request::new` and
// override the rendering parameters as needed.
#[derive(Debug, Clone)]
pub struct Request {
    pub data: String,
    pub output_path: PathBuf,
    pub box_size: u32,
    pub border: u32,
    pub level: Level,
    pub fill_color: Color,
    pub back_color: Color,
}

impl Request {
    pub fn new(data: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Request {
            data: data.into(),
            output_path: output_path.into(),
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            level: Level::default(),
            fill_color: Color::new(0.0, 0.0, 0.0, 1.0),
            back_color: Color::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    pub fn box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }
}

/// Renders the request and saves it to its (normalized) output path,
/// returning the path that was actually written.
///
/// The image format follows the file extension. Missing parent directories
/// are created first.
pub fn generate(request: &Request) -> Result<PathBuf, Error> {
    validate(request)?;
    if request.output_path.as_os_str().is_empty() {
        return Err(Error::InvalidInput("output path must not be empty"));
    }

    let path = normalize_path(&request.output_path);
    if path != request.output_path {
        tracing::info!(
            "no extension on {}, defaulting to .{DEFAULT_EXTENSION}",
            request.output_path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        tracing::debug!("creating output directory {}", parent.display());
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let image = render(request)?;
    image.save(&path)?;

    tracing::info!("saved QR code to {}", path.display());
    Ok(path)
}

// Appends the default extension to paths that have none. A trailing dot
// counts as no extension, and is kept as written.
pub fn normalize_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => {
            let mut normalized = path.as_os_str().to_owned();
            normalized.push(".");
            normalized.push(DEFAULT_EXTENSION);
            PathBuf::from(normalized)
        }
    }
}

/// Encodes the request data and rasterizes it without touching the
/// filesystem.
///
/// Each module is `box_size` pixels square and the symbol is surrounded by
/// `border` modules of background. The image is RGB unless one of the
/// colors is translucent.
pub fn render(request: &Request) -> Result<DynamicImage, Error> {
    validate(request)?;

    tracing::debug!(
        level = ?request.level,
        box_size = request.box_size,
        border = request.border,
        "encoding {} bytes",
        request.data.len()
    );
    let code = QrCode::with_error_correction_level(&request.data, request.level.into())?;

    let fill = Rgba(request.fill_color.to_rgba8());
    let back = Rgba(request.back_color.to_rgba8());

    // Size everything up front; the renderer and the canvas both assume the
    // pixel dimensions fit.
    let too_large = || Error::InvalidInput("image dimensions are too large");
    let symbol_side = u32::try_from(code.width())
        .ok()
        .and_then(|modules| modules.checked_mul(request.box_size))
        .ok_or_else(too_large)?;
    // The encoder's own quiet zone is fixed at four modules, so the border
    // is painted separately.
    let offset = request
        .border
        .checked_mul(request.box_size)
        .ok_or_else(too_large)?;
    let side = offset
        .checked_mul(2)
        .and_then(|margin| margin.checked_add(symbol_side))
        .ok_or_else(too_large)?;
    usize::try_from(side)
        .ok()
        .and_then(|side| side.checked_mul(side))
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(too_large)?;

    let symbol = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(request.box_size, request.box_size)
        .dark_color(fill)
        .light_color(back)
        .build();

    let mut canvas = RgbaImage::from_pixel(side, side, back);
    imageops::replace(&mut canvas, &symbol, offset.into(), offset.into());

    let canvas = DynamicImage::ImageRgba8(canvas);
    if fill[3] == u8::MAX && back[3] == u8::MAX {
        Ok(DynamicImage::ImageRgb8(canvas.into_rgb8()))
    } else {
        Ok(canvas)
    }
}

// Renders the symbol with half-block characters, two module rows per line.
// Colors are inverted so the symbol scans from a dark terminal.
pub fn render_text(data: &str, level: Level, quiet_zone: bool) -> Result<String, Error> {
    if data.trim().is_empty() {
        return Err(Error::InvalidInput("data to encode must not be empty"));
    }

    let code = QrCode::with_error_correction_level(data, level.into())?;

    Ok(code
        .render::<Dense1x2>()
        .quiet_zone(quiet_zone)
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build())
}

fn validate(request: &Request) -> Result<(), Error> {
    if request.data.trim().is_empty() {
        return Err(Error::InvalidInput("data to encode must not be empty"));
    }

    if request.box_size == 0 {
        return Err(Error::InvalidInput("box size must be at least 1"));
    }

    Ok(())
}
