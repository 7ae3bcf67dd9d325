//! A server backed by a single full-resolution raster held in memory.

use std::io;

use crate::raster::Raster;
use crate::region::RegionRequest;
use crate::server::{BuilderUnsupported, ImageMetadata, ImageServer, ServerBuilder};

const TILE_SIZE: u32 = 256;

/// Serves regions by cropping an in-memory raster.
///
/// Only level 0 of a single z-plane and timepoint exists; requests for
/// anything else, or for regions entirely outside the image, yield `Ok(None)`.
#[derive(Debug, Clone)]
pub struct MemoryImageServer {
    name: String,
    raster: Raster,
    metadata: ImageMetadata,
}

impl MemoryImageServer {
    pub fn new(name: impl Into<String>, raster: Raster) -> Self {
        let name = name.into();
        let metadata = ImageMetadata::new(
            name.clone(),
            raster.width(),
            raster.height(),
            raster.bands(),
            raster.bit_depth(),
        )
        .with_tile_size(TILE_SIZE.min(raster.width()), TILE_SIZE.min(raster.height()));
        Self {
            name,
            raster,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

impl ImageServer for MemoryImageServer {
    fn path(&self) -> String {
        format!("memory://{}", self.name)
    }

    fn server_type(&self) -> String {
        "In-memory image".to_string()
    }

    fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    fn read_region(&self, request: &RegionRequest) -> io::Result<Option<Raster>> {
        if request.level != 0 || request.z != 0 || request.t != 0 {
            return Ok(None);
        }
        let (x, y, w, h) = request.bounds();
        Ok(self.raster.crop(x, y, w, h))
    }

    fn builder(&self) -> Result<ServerBuilder, BuilderUnsupported> {
        Ok(ServerBuilder::Memory {
            name: self.name.clone(),
        })
    }
}
