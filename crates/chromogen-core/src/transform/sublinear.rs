//! Square-root intensity remapping.

use serde::{Deserialize, Serialize};

use crate::raster::{BitDepth, Raster};

/// Sublinear (square-root law) remapping of integer samples.
///
/// ```text
/// out = min(max_value, floor(sqrt(in) × scale))
/// ```
///
/// With `scale = sqrt(max_value + 1)` the top of the input range lands on
/// the top of the output range, so dark values are lifted while the full
/// range is preserved. The mapping only depends on the sample value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SublinearTransform {
    /// Saturation ceiling for transformed samples.
    pub max_value: u32,
    /// Multiplier applied after the square root.
    pub scale: f64,
}

impl SublinearTransform {
    /// Transform matched to a sample depth: 16-bit gives `scale = 256`,
    /// 8-bit gives `scale = 16`.
    pub fn for_depth(depth: BitDepth) -> Self {
        Self {
            max_value: depth.max_value(),
            scale: f64::from(depth.max_value() + 1).sqrt(),
        }
    }

    /// Remap a single sample.
    #[inline]
    pub fn apply(&self, value: u32) -> u32 {
        let mapped = (f64::from(value).sqrt() * self.scale).floor();
        if mapped >= f64::from(self.max_value) {
            self.max_value
        } else {
            mapped as u32
        }
    }

    /// Remap every sample of every band in place.
    pub fn apply_to_raster(&self, raster: &mut Raster) {
        raster.map_samples_in_place(|v| self.apply(v));
    }
}

impl Default for SublinearTransform {
    /// The 16-bit transform.
    fn default() -> Self {
        Self::for_depth(BitDepth::U16)
    }
}
