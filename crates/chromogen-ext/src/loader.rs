//! Image file decoding into in-memory servers.

use std::path::Path;

use chromogen_core::{MemoryImageServer, Raster, RasterError};
use image::DynamicImage;

/// Decode an image file and expose it as a [`MemoryImageServer`].
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, TIFF, ...).
/// 8- and 16-bit images keep their depth and band count; float images are
/// quantized to 16-bit.
pub fn load_image(path: &Path) -> Result<MemoryImageServer, LoadError> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => LoadError::Io(io),
        other => LoadError::Decode(other),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raster = to_raster(img)?;
    tracing::info!(
        "loaded {} ({}x{}, {} bands, {})",
        name,
        raster.width(),
        raster.height(),
        raster.bands(),
        raster.bit_depth()
    );
    Ok(MemoryImageServer::new(name, raster))
}

/// Convert a decoded image to a raster, keeping its native layout where
/// possible.
pub fn to_raster(img: DynamicImage) -> Result<Raster, RasterError> {
    let (width, height) = (img.width(), img.height());
    let bands = u32::from(img.color().channel_count());

    match img {
        DynamicImage::ImageLuma8(buf) => Raster::from_u8(width, height, bands, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => Raster::from_u8(width, height, bands, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => Raster::from_u8(width, height, bands, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => Raster::from_u8(width, height, bands, buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => Raster::from_u16(width, height, bands, buf.into_raw()),
        DynamicImage::ImageLumaA16(buf) => Raster::from_u16(width, height, bands, buf.into_raw()),
        DynamicImage::ImageRgb16(buf) => Raster::from_u16(width, height, bands, buf.into_raw()),
        DynamicImage::ImageRgba16(buf) => Raster::from_u16(width, height, bands, buf.into_raw()),
        other if other.color().has_alpha() => Raster::from_u16(width, height, 4, other.into_rgba16().into_raw()),
        other => Raster::from_u16(width, height, 3, other.into_rgb16().into_raw()),
    }
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid raster: {0}")]
    Raster(#[from] RasterError),
}
