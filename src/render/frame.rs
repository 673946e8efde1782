use crate::foundation::core::Size;
use crate::foundation::error::{FormwaveError, FormwaveResult};

/// One 8-bit grayscale channel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One byte per pixel, tightly packed.
    pub data: Vec<u8>,
}

impl ChannelBuffer {
    /// Wrap raw bytes, checking the length against `size`.
    pub fn from_raw(size: Size, data: Vec<u8>) -> FormwaveResult<Self> {
        let buf = Self {
            width: size.width,
            height: size.height,
            data,
        };
        buf.validate()?;
        Ok(buf)
    }

    /// Reject empty sizes and data whose length does not match the dimensions.
    pub fn validate(&self) -> FormwaveResult<()> {
        let size = self.size();
        size.validate()?;
        if self.data.len() != size.pixel_count() {
            return Err(FormwaveError::configuration(format!(
                "channel buffer has {} bytes, expected {} for {}x{}",
                self.data.len(),
                size.pixel_count(),
                size.width,
                size.height
            )));
        }
        Ok(())
    }

    /// Dimensions.
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Intensity at `(x, y)`.
    ///
    /// Panics when `(x, y)` lies outside a buffer that passed [`ChannelBuffer::validate`].
    pub fn get_pixel(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Copy into an [`image::GrayImage`].
    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width, self.height, |x, y| {
            image::Luma([self.get_pixel(x, y)])
        })
    }
}

/// A composited RGB8 frame with optional provenance text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Human-readable description of how the frame was generated.
    pub comment: Option<String>,
}

impl FrameRgb {
    /// An all-black frame.
    pub fn black(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.pixel_count() * 3],
            comment: None,
        }
    }

    /// Wrap raw RGB8 bytes, checking the length against `size`.
    pub fn from_raw(size: Size, data: Vec<u8>) -> FormwaveResult<Self> {
        let frame = Self {
            width: size.width,
            height: size.height,
            data,
            comment: None,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Reject empty sizes and data whose length does not match the dimensions.
    pub fn validate(&self) -> FormwaveResult<()> {
        let size = self.size();
        size.validate()?;
        if self.data.len() != size.pixel_count() * 3 {
            return Err(FormwaveError::configuration(format!(
                "rgb frame has {} bytes, expected {} for {}x{}",
                self.data.len(),
                size.pixel_count() * 3,
                size.width,
                size.height
            )));
        }
        Ok(())
    }

    /// Convert a decoded image of any color type to RGB8.
    pub fn from_image(img: &image::DynamicImage) -> FormwaveResult<Self> {
        let rgb = img.to_rgb8();
        let size = Size::new(rgb.width(), rgb.height())?;
        Self::from_raw(size, rgb.into_raw())
    }

    /// Attach provenance text.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Dimensions.
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB triple at `(x, y)`.
    ///
    /// Panics when `(x, y)` lies outside a frame that passed [`FrameRgb::validate`].
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Copy into an [`image::RgbImage`]. The comment is not carried.
    pub fn to_rgb_image(&self) -> FormwaveResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| FormwaveError::render("rgb frame length does not match its size"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
