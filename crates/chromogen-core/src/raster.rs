//! Pixel buffers returned by region reads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::RasterError;

/// Supported integer sample depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
}

impl BitDepth {
    /// Number of bits per sample.
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
        }
    }

    /// Largest representable sample value.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = RasterError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::U8),
            16 => Ok(Self::U16),
            other => Err(RasterError::UnsupportedBitDepth(other)),
        }
    }
}

/// Interleaved sample storage, `bands` values per pixel in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleData {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl SampleData {
    fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    fn depth(&self) -> BitDepth {
        match self {
            Self::U8(_) => BitDepth::U8,
            Self::U16(_) => BitDepth::U16,
        }
    }
}

/// A 2D grid of pixels with one integer sample per band.
///
/// Samples are always in `[0, bit_depth().max_value()]`; writes saturate
/// rather than wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    bands: u32,
    data: SampleData,
}

impl Raster {
    /// Zero-filled raster.
    ///
    /// # Panics
    /// Panics if `bands` is zero.
    pub fn new(width: u32, height: u32, bands: u32, depth: BitDepth) -> Self {
        assert!(bands > 0, "raster must have at least one band");
        let len = width as usize * height as usize * bands as usize;
        let data = match depth {
            BitDepth::U8 => SampleData::U8(vec![0; len]),
            BitDepth::U16 => SampleData::U16(vec![0; len]),
        };
        Self {
            width,
            height,
            bands,
            data,
        }
    }

    pub fn from_u8(width: u32, height: u32, bands: u32, samples: Vec<u8>) -> Result<Self, RasterError> {
        Self::from_data(width, height, bands, SampleData::U8(samples))
    }

    pub fn from_u16(width: u32, height: u32, bands: u32, samples: Vec<u16>) -> Result<Self, RasterError> {
        Self::from_data(width, height, bands, SampleData::U16(samples))
    }

    /// Wrap existing interleaved samples, validating the length against the
    /// dimensions.
    pub fn from_data(width: u32, height: u32, bands: u32, data: SampleData) -> Result<Self, RasterError> {
        if bands == 0 {
            return Err(RasterError::ZeroBands);
        }
        let expected = width as usize * height as usize * bands as usize;
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bands,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bands(&self) -> u32 {
        self.bands
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.data.depth()
    }

    pub fn samples(&self) -> &SampleData {
        &self.data
    }

    fn index(&self, x: u32, y: u32, band: u32) -> usize {
        assert!(
            x < self.width && y < self.height && band < self.bands,
            "sample ({x}, {y}, {band}) out of bounds for {}x{}x{} raster",
            self.width,
            self.height,
            self.bands
        );
        (y as usize * self.width as usize + x as usize) * self.bands as usize + band as usize
    }

    /// Read one sample.
    ///
    /// # Panics
    /// Panics if `x`, `y` or `band` is out of range.
    pub fn sample(&self, x: u32, y: u32, band: u32) -> u32 {
        let i = self.index(x, y, band);
        match &self.data {
            SampleData::U8(v) => u32::from(v[i]),
            SampleData::U16(v) => u32::from(v[i]),
        }
    }

    /// Write one sample, saturating at the bit depth's maximum.
    ///
    /// # Panics
    /// Panics if `x`, `y` or `band` is out of range.
    pub fn set_sample(&mut self, x: u32, y: u32, band: u32, value: u32) {
        let i = self.index(x, y, band);
        let value = value.min(self.bit_depth().max_value());
        match &mut self.data {
            SampleData::U8(v) => v[i] = value as u8,
            SampleData::U16(v) => v[i] = value as u16,
        }
    }

    /// Replace every sample `v` with `f(v)`, saturating at the maximum.
    ///
    /// Every band of every pixel goes through the same function; position
    /// and channel are not visible to `f`.
    pub fn map_samples_in_place(&mut self, f: impl Fn(u32) -> u32) {
        let max = self.bit_depth().max_value();
        match &mut self.data {
            SampleData::U8(v) => {
                for s in v.iter_mut() {
                    *s = f(u32::from(*s)).min(max) as u8;
                }
            }
            SampleData::U16(v) => {
                for s in v.iter_mut() {
                    *s = f(u32::from(*s)).min(max) as u16;
                }
            }
        }
    }

    /// Copy the sub-rectangle `(x, y, width, height)`, clipped to this
    /// raster. Returns `None` if nothing of it lies inside.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Raster> {
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);
        if x >= x1 || y >= y1 {
            return None;
        }

        let bands = self.bands as usize;
        let row_start = x as usize * bands;
        let row_end = x1 as usize * bands;
        let stride = self.width as usize * bands;
        let rows = y as usize..y1 as usize;

        let data = match &self.data {
            SampleData::U8(v) => SampleData::U8(copy_rows(v, stride, row_start, row_end, rows)),
            SampleData::U16(v) => SampleData::U16(copy_rows(v, stride, row_start, row_end, rows)),
        };

        Some(Raster {
            width: x1 - x,
            height: y1 - y,
            bands: self.bands,
            data,
        })
    }
}

fn copy_rows<T: Copy>(src: &[T], stride: usize, start: usize, end: usize, rows: Range<usize>) -> Vec<T> {
    let mut out = Vec::with_capacity(rows.len() * (end - start));
    for r in rows {
        out.extend_from_slice(&src[r * stride + start..r * stride + end]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_u16(width: u32, height: u32, bands: u32) -> Raster {
        let len = (width * height * bands) as usize;
        let samples = (0..len).map(|i| i as u16).collect();
        Raster::from_u16(width, height, bands, samples).unwrap()
    }

    #[test]
    fn test_bit_depth_limits() {
        assert_eq!(BitDepth::U8.max_value(), 255);
        assert_eq!(BitDepth::U16.max_value(), 65535);
        assert_eq!(BitDepth::U16.to_string(), "16-bit");
    }

    #[test]
    fn test_bit_depth_rejects_unsupported() {
        assert_eq!(BitDepth::try_from(16), Ok(BitDepth::U16));
        assert_eq!(BitDepth::try_from(12), Err(RasterError::UnsupportedBitDepth(12)));
    }

    #[test]
    fn test_from_data_validates_length() {
        let err = Raster::from_u8(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(err, RasterError::LengthMismatch { expected: 12, actual: 11 });
        assert_eq!(Raster::from_u8(2, 2, 0, vec![]).unwrap_err(), RasterError::ZeroBands);
    }

    #[test]
    #[should_panic(expected = "at least one band")]
    fn test_new_rejects_zero_bands() {
        Raster::new(2, 2, 0, BitDepth::U16);
    }

    #[test]
    fn test_samples_are_interleaved() {
        let raster = ramp_u16(3, 2, 2);
        // pixel (1, 1) starts at (1 * 3 + 1) * 2 = 8
        assert_eq!(raster.sample(1, 1, 0), 8);
        assert_eq!(raster.sample(1, 1, 1), 9);
    }

    #[test]
    fn test_set_sample_saturates() {
        let mut raster = Raster::new(1, 1, 1, BitDepth::U8);
        raster.set_sample(0, 0, 0, 1000);
        assert_eq!(raster.sample(0, 0, 0), 255);
    }

    #[test]
    #[should_panic]
    fn test_sample_out_of_bounds_panics() {
        let raster = Raster::new(2, 2, 1, BitDepth::U8);
        raster.sample(2, 0, 0);
    }

    #[test]
    fn test_map_samples_saturates() {
        let mut raster = Raster::from_u8(2, 1, 1, vec![10, 200]).unwrap();
        raster.map_samples_in_place(|v| v * 2);
        assert_eq!(raster.samples(), &SampleData::U8(vec![20, 255]));
    }

    #[test]
    fn test_crop_clips_to_bounds() {
        let raster = ramp_u16(4, 4, 1);
        let cropped = raster.crop(2, 3, 10, 10).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (2, 1));
        assert_eq!(cropped.samples(), &SampleData::U16(vec![14, 15]));
    }

    #[test]
    fn test_crop_outside_is_none() {
        let raster = ramp_u16(4, 4, 1);
        assert!(raster.crop(4, 0, 2, 2).is_none());
        assert!(raster.crop(0, 0, 0, 2).is_none());
    }
}
