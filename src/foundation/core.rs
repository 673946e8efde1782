use crate::foundation::error::{FormwaveError, FormwaveResult};

/// Zero-based index of a frame within a sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size, rejecting zero-area rasters.
    pub fn new(width: u32, height: u32) -> FormwaveResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Reject zero-area rasters.
    pub fn validate(self) -> FormwaveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FormwaveError::configuration(format!(
                "image size must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Map an integer pixel to normalized coordinates centred on the raster.
    ///
    /// Pixel `0` maps to `-1`; the centre pixel `w/2` maps to `0`.
    pub fn normalize(self, px: u32, py: u32) -> Coord {
        let hw = f64::from(self.width) / 2.0;
        let hh = f64::from(self.height) / 2.0;
        Coord {
            x: (f64::from(px) - hw) / hw,
            y: (f64::from(py) - hh) / hh,
        }
    }
}

/// A point in normalized render space, nominally `[-1, 1]²`.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Coord {
    /// Construct a coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
