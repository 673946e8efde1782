//! Log-polar "form constant" remapping with wrap-around bilinear sampling.
//!
//! Destination pixels are addressed in polar form around the image centre. Log-radius maps to
//! the source `x` axis and angle maps to the source `y` axis, so horizontal source structure
//! becomes concentric rings and vertical structure becomes spokes or spirals.

use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::foundation::core::Size;
use crate::foundation::error::FormwaveResult;
use crate::foundation::math::{clamp_u8, floor_mod};
use crate::render::frame::FrameRgb;

/// The four neighbours of a continuous sample position and their blend weights.
///
/// Neighbours are ordered `(x0,y0)`, `(x1,y0)`, `(x0,y1)`, `(x1,y1)` where `x1 = x0 + 1` and
/// `y1 = y0 + 1`, each wrapped to the raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BilinearSample {
    /// Pixel coordinates of the neighbours.
    pub neighbors: [(u32, u32); 4],
    /// Non-negative weights summing to 1.
    pub weights: [f64; 4],
}

impl BilinearSample {
    /// Whether the position fell exactly on `neighbors[0]`.
    pub fn is_exact(&self) -> bool {
        self.weights[0] == 1.0
    }
}

/// Locate `(u, v)` on a raster of `size`, wrapping both axes.
///
/// Each neighbour is weighted by the distance from the fractional position to the opposite cell
/// corner, then the weights are normalized. An exact integer position yields weight 1 on
/// `neighbors[0]`.
pub fn bilinear_sample(size: Size, u: f64, v: f64) -> BilinearSample {
    let u = floor_mod(u, f64::from(size.width));
    let v = floor_mod(v, f64::from(size.height));
    let (xi, yi) = (u.floor(), v.floor());
    let (xf, yf) = (u - xi, v - yi);

    let x0 = (xi as u32) % size.width;
    let y0 = (yi as u32) % size.height;
    let x1 = (x0 + 1) % size.width;
    let y1 = (y0 + 1) % size.height;
    let neighbors = [(x0, y0), (x1, y0), (x0, y1), (x1, y1)];

    if xf == 0.0 && yf == 0.0 {
        return BilinearSample {
            neighbors,
            weights: [1.0, 0.0, 0.0, 0.0],
        };
    }

    let dist = [
        (1.0 - xf).hypot(1.0 - yf),
        xf.hypot(1.0 - yf),
        (1.0 - xf).hypot(yf),
        xf.hypot(yf),
    ];
    let total: f64 = dist.iter().sum();
    BilinearSample {
        neighbors,
        weights: dist.map(|d| d / total),
    }
}

/// Sample `frame` at a continuous position with wrap-around.
pub fn sample_rgb(frame: &FrameRgb, u: f64, v: f64) -> [u8; 3] {
    let s = bilinear_sample(frame.size(), u, v);
    if s.is_exact() {
        let (x, y) = s.neighbors[0];
        return frame.get_pixel(x, y);
    }
    let mut acc = [0.0f64; 3];
    for (&(x, y), &w) in s.neighbors.iter().zip(&s.weights) {
        let px = frame.get_pixel(x, y);
        for (a, c) in acc.iter_mut().zip(px) {
            *a += f64::from(c) * w;
        }
    }
    acc.map(|a| clamp_u8(a.round()))
}

/// Source position `(u, v)` sampled for destination pixel `(dx, dy)`.
pub fn log_polar_source(size: Size, dx: u32, dy: u32) -> (f64, f64) {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let cx = f64::from(dx) - w / 2.0;
    let cy = f64::from(dy) - h / 2.0;
    let r = cx.hypot(cy);
    let mut phi = cy.atan2(cx);
    if phi < 0.0 {
        phi += TAU;
    }
    let r_max = w.hypot(h) / 2.0;
    ((r.ln_1p() / r_max.ln_1p()) * w, (phi / TAU) * h)
}

/// Resample `source` through log-polar coordinates. Output has the same size; the comment is
/// carried over unchanged.
///
/// Fails when `source` does not pass [`FrameRgb::validate`].
#[tracing::instrument(skip(source), fields(width = source.width, height = source.height))]
pub fn remap_log_polar(source: &FrameRgb) -> FormwaveResult<FrameRgb> {
    source.validate()?;
    let size = source.size();
    let width = size.width as usize;
    let mut data = vec![0u8; size.pixel_count() * 3];

    data.par_chunks_mut((width * 3).max(1))
        .enumerate()
        .for_each(|(dy, row)| {
            for (dx, out) in row.chunks_exact_mut(3).enumerate() {
                let (u, v) = log_polar_source(size, dx as u32, dy as u32);
                out.copy_from_slice(&sample_rgb(source, u, v));
            }
        });

    Ok(FrameRgb {
        width: size.width,
        height: size.height,
        data,
        comment: source.comment.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/log_polar.rs"]
mod tests;
