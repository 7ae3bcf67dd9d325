//! Region requests — the key used to ask a server for pixels.

use serde::{Deserialize, Serialize};

/// Identifies a rectangular area of one plane of an image at a given
/// resolution level.
///
/// Coordinates are expressed in full-resolution (level 0) pixels. Servers
/// treat the request as an opaque key; nothing in this crate mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionRequest {
    /// Identity of the server the request targets.
    pub path: String,
    /// Left edge in level-0 pixels.
    pub x: u32,
    /// Top edge in level-0 pixels.
    pub y: u32,
    /// Width in level-0 pixels.
    pub width: u32,
    /// Height in level-0 pixels.
    pub height: u32,
    /// Resolution level (0 = full resolution).
    pub level: usize,
    /// Z-plane index.
    pub z: u32,
    /// Timepoint index.
    pub t: u32,
}

impl RegionRequest {
    /// Request a region at level 0 on the first z-plane and timepoint.
    pub fn new(path: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            x,
            y,
            width,
            height,
            level: 0,
            z: 0,
            t: 0,
        }
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn with_z(mut self, z: u32) -> Self {
        self.z = z;
        self
    }

    pub fn with_t(mut self, t: u32) -> Self {
        self.t = t;
        self
    }

    /// Bounding box as `(x, y, width, height)`.
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// True when the request covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_first_level_and_plane() {
        let request = RegionRequest::new("slide", 10, 20, 256, 128);
        assert_eq!(request.bounds(), (10, 20, 256, 128));
        assert_eq!((request.level, request.z, request.t), (0, 0, 0));
    }

    #[test]
    fn test_builders_set_plane_coordinates() {
        let request = RegionRequest::new("slide", 0, 0, 1, 1)
            .with_level(2)
            .with_z(3)
            .with_t(4);
        assert_eq!((request.level, request.z, request.t), (2, 3, 4));
    }

    #[test]
    fn test_zero_sized_request_is_empty() {
        assert!(RegionRequest::new("slide", 0, 0, 0, 10).is_empty());
        assert!(RegionRequest::new("slide", 0, 0, 10, 0).is_empty());
        assert!(!RegionRequest::new("slide", 0, 0, 1, 1).is_empty());
    }
}
