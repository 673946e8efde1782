use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::error::FormwaveError;
use crate::foundation::math::{clamp_u8, mul_div255_u8};

/// Interpretation of a set of channel buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Colorspace {
    /// Single luminance channel.
    L,
    /// Red, green, blue.
    Rgb,
    /// Hue, saturation, value.
    Hsv,
    /// Full-range JPEG YCbCr.
    YCbCr,
    /// Cyan, magenta, yellow, key.
    Cmyk,
}

impl Colorspace {
    /// Colorspaces with more than one channel.
    pub const MULTICHANNEL: [Self; 4] = [Self::Rgb, Self::Hsv, Self::YCbCr, Self::Cmyk];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::Rgb => "RGB",
            Self::Hsv => "HSV",
            Self::YCbCr => "YCbCr",
            Self::Cmyk => "CMYK",
        }
    }

    /// Number of channel buffers this colorspace composes.
    pub fn channel_count(self) -> usize {
        match self {
            Self::L => 1,
            Self::Rgb | Self::Hsv | Self::YCbCr => 3,
            Self::Cmyk => 4,
        }
    }

    /// Uniform over [`Colorspace::MULTICHANNEL`].
    pub fn random_multichannel<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::MULTICHANNEL.choose(rng).unwrap_or(&Self::Rgb)
    }

    /// Convert one pixel, given as `channel_count()` samples, to RGB8.
    #[inline]
    pub fn to_rgb(self, px: &[u8]) -> [u8; 3] {
        match self {
            Self::L => [px[0], px[0], px[0]],
            Self::Rgb => [px[0], px[1], px[2]],
            Self::Hsv => hsv_to_rgb(px[0], px[1], px[2]),
            Self::YCbCr => ycbcr_to_rgb(px[0], px[1], px[2]),
            Self::Cmyk => cmyk_to_rgb(px[0], px[1], px[2], px[3]),
        }
    }
}

impl FromStr for Colorspace {
    type Err = FormwaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" => Ok(Self::L),
            "rgb" => Ok(Self::Rgb),
            "hsv" => Ok(Self::Hsv),
            "ycbcr" => Ok(Self::YCbCr),
            "cmyk" => Ok(Self::Cmyk),
            _ => Err(FormwaveError::configuration(format!(
                "unknown colorspace '{s}' (expected L, RGB, HSV, YCbCr or CMYK)"
            ))),
        }
    }
}

impl TryFrom<String> for Colorspace {
    type Error = FormwaveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Colorspace> for String {
    fn from(c: Colorspace) -> Self {
        c.name().to_owned()
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All three components scaled to `[0, 255]`; hue wraps at 255.
fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    if s == 0 {
        return [v, v, v];
    }
    let h = f64::from(h) * 6.0 / 255.0;
    let s = f64::from(s) / 255.0;
    let v = f64::from(v) / 255.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_u8(r), to_u8(g), to_u8(b)]
}

fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = f64::from(y);
    let cb = f64::from(cb) - 128.0;
    let cr = f64::from(cr) - 128.0;
    [
        clamp_u8((y + 1.402 * cr).round()),
        clamp_u8((y - 0.344_136 * cb - 0.714_136 * cr).round()),
        clamp_u8((y + 1.772 * cb).round()),
    ]
}

fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> [u8; 3] {
    let nk = 255 - k;
    [
        mul_div255_u8(255 - c, nk),
        mul_div255_u8(255 - m, nk),
        mul_div255_u8(255 - y, nk),
    ]
}

#[inline]
fn to_u8(unit: f64) -> u8 {
    clamp_u8((unit * 255.0).round())
}

#[cfg(test)]
#[path = "../../tests/unit/render/colorspace.rs"]
mod tests;
