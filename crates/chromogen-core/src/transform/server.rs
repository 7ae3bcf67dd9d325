//! Server decorator that applies [`SublinearTransform`] to every tile read.

use std::io;
use std::sync::Arc;

use crate::raster::{BitDepth, Raster};
use crate::region::RegionRequest;
use crate::server::{BuilderUnsupported, ImageMetadata, ImageServer, ServerBuilder};
use crate::transform::sublinear::SublinearTransform;

/// Appended to the wrapped server's path and type.
pub const SUBLINEAR_SUFFIX: &str = " [sublinear transform]";

/// Wraps another [`ImageServer`] and remaps the samples of every region it
/// returns.
///
/// Everything except `read_region`, the identity strings and `builder` is
/// forwarded untouched. The decorator keeps no per-call state: each read
/// fetches a fresh buffer from the wrapped server and transforms it in place.
pub struct SublinearServer<S: ImageServer + ?Sized> {
    wrapped: Arc<S>,
    transform: SublinearTransform,
    depth: BitDepth,
}

impl<S: ImageServer + ?Sized> SublinearServer<S> {
    /// Wrap `server`, choosing the transform from its declared bit depth.
    pub fn new(server: Arc<S>) -> Self {
        let transform = SublinearTransform::for_depth(server.metadata().bit_depth);
        Self::with_transform(server, transform)
    }

    pub fn with_transform(server: Arc<S>, transform: SublinearTransform) -> Self {
        tracing::debug!(
            "wrapping {} with sublinear transform (max {}, scale {})",
            server.path(),
            transform.max_value,
            transform.scale
        );
        let depth = server.metadata().bit_depth;
        Self {
            wrapped: server,
            transform,
            depth,
        }
    }

    pub fn wrapped(&self) -> &Arc<S> {
        &self.wrapped
    }

    pub fn transform(&self) -> SublinearTransform {
        self.transform
    }
}

impl<S: ImageServer + ?Sized> ImageServer for SublinearServer<S> {
    fn path(&self) -> String {
        self.wrapped.path() + SUBLINEAR_SUFFIX
    }

    fn server_type(&self) -> String {
        self.wrapped.server_type() + SUBLINEAR_SUFFIX
    }

    fn metadata(&self) -> &ImageMetadata {
        self.wrapped.metadata()
    }

    fn read_region(&self, request: &RegionRequest) -> io::Result<Option<Raster>> {
        let Some(mut raster) = self.wrapped.read_region(request)? else {
            return Ok(None);
        };

        // A tile whose depth disagrees with the metadata gets its own
        // ceiling, so samples can never wrap.
        let transform = if raster.bit_depth() == self.depth {
            self.transform
        } else {
            SublinearTransform::for_depth(raster.bit_depth())
        };
        transform.apply_to_raster(&mut raster);

        tracing::trace!(
            "transformed {}x{}x{} region at ({}, {})",
            raster.width(),
            raster.height(),
            raster.bands(),
            request.x,
            request.y
        );
        Ok(Some(raster))
    }

    fn builder(&self) -> Result<ServerBuilder, BuilderUnsupported> {
        Err(BuilderUnsupported {
            server_type: self.server_type(),
        })
    }
}
