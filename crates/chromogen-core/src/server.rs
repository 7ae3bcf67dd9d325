//! The tiled image server abstraction.
//!
//! An [`ImageServer`] serves rectangular pixel regions of a (possibly very
//! large) image on demand. Tiling, caching and pyramid handling are the
//! implementor's business; callers only see [`read_region`](ImageServer::read_region).

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::raster::{BitDepth, Raster};
use crate::region::RegionRequest;

/// Static description of the image a server provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Display name.
    pub name: String,
    /// Full-resolution width in pixels.
    pub width: u32,
    /// Full-resolution height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub bands: u32,
    /// Sample depth of every band.
    pub bit_depth: BitDepth,
    /// Downsample factor per resolution level. Level 0 is always `1.0`.
    pub levels: Vec<f64>,
    /// Number of z-planes.
    pub size_z: u32,
    /// Number of timepoints.
    pub size_t: u32,
    /// Preferred tile width.
    pub tile_width: u32,
    /// Preferred tile height.
    pub tile_height: u32,
}

impl ImageMetadata {
    /// Single-level, single-plane metadata with the whole image as one tile.
    pub fn new(name: impl Into<String>, width: u32, height: u32, bands: u32, bit_depth: BitDepth) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            bands,
            bit_depth,
            levels: vec![1.0],
            size_z: 1,
            size_t: 1,
            tile_width: width,
            tile_height: height,
        }
    }

    pub fn with_tile_size(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }
}

/// Serializable recipe for rebuilding a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerBuilder {
    /// Decode the image file at `path`.
    File { path: PathBuf },
    /// An in-memory image registered under `name`.
    Memory { name: String },
}

/// Returned by servers that cannot be reconstructed from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{server_type} does not support server builders")]
pub struct BuilderUnsupported {
    pub server_type: String,
}

/// A source of image regions.
///
/// Implementations must tolerate concurrent `read_region` calls; each call
/// hands back a buffer the caller owns outright.
pub trait ImageServer: Send + Sync {
    /// Identity string, unique per image source.
    fn path(&self) -> String;

    /// Human-readable description of the server kind.
    fn server_type(&self) -> String;

    fn metadata(&self) -> &ImageMetadata;

    /// Read the pixels for `request`.
    ///
    /// `Ok(None)` means there is no data at the requested coordinates, which
    /// is not an error.
    fn read_region(&self, request: &RegionRequest) -> io::Result<Option<Raster>>;

    /// Descriptor that can rebuild this server, if it has one.
    fn builder(&self) -> Result<ServerBuilder, BuilderUnsupported>;

    /// Cache key for tiles from this server.
    fn id(&self) -> String {
        self.path()
    }
}

impl<S: ImageServer + ?Sized> ImageServer for Arc<S> {
    fn path(&self) -> String {
        (**self).path()
    }

    fn server_type(&self) -> String {
        (**self).server_type()
    }

    fn metadata(&self) -> &ImageMetadata {
        (**self).metadata()
    }

    fn read_region(&self, request: &RegionRequest) -> io::Result<Option<Raster>> {
        (**self).read_region(request)
    }

    fn builder(&self) -> Result<ServerBuilder, BuilderUnsupported> {
        (**self).builder()
    }

    fn id(&self) -> String {
        (**self).id()
    }
}
