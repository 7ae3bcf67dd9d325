//! Chromogen Core — domain layer for tiled image transforms.
//!
//! This crate contains the pixel raster, region requests, the tiled image
//! server abstraction, and the sublinear intensity transform applied while
//! tiles stream through a decorating server. No file I/O or preference
//! handling lives here.

pub mod error;
pub mod memory;
pub mod raster;
pub mod region;
pub mod server;
pub mod transform;

// Re-exports for convenience.
pub use error::RasterError;
pub use memory::MemoryImageServer;
pub use raster::{BitDepth, Raster, SampleData};
pub use region::RegionRequest;
pub use server::{BuilderUnsupported, ImageMetadata, ImageServer, ServerBuilder};
pub use transform::server::{SUBLINEAR_SUFFIX, SublinearServer};
pub use transform::sublinear::SublinearTransform;
