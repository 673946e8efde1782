/// Floored modulo with the result folded into `[0, m)`.
///
/// `rem_euclid` can round up to exactly `m` for tiny negative inputs; that case maps to `0`.
#[inline]
pub(crate) fn floor_mod(a: f64, m: f64) -> f64 {
    let r = a.rem_euclid(m);
    if r >= m { 0.0 } else { r }
}

/// Wrap a phase into `[0, 1)`.
#[inline]
pub(crate) fn wrap_unit(p: f64) -> f64 {
    floor_mod(p, 1.0)
}

/// Triangle wave with period 1 and range `[-1, 1]`.
#[inline]
pub(crate) fn triangle(t: f64) -> f64 {
    2.0 * (t - (t + 0.5).floor()).abs() - 1.0
}

/// Sawtooth wave with period 1 and range `[-1, 1)`.
#[inline]
pub(crate) fn sawtooth(t: f64) -> f64 {
    2.0 * (t - (t + 0.5).floor())
}

/// Map a unit-range sample to an 8-bit intensity.
#[inline]
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    clamp_u8((v.clamp(-1.0, 1.0) * 127.5 + 127.5).round())
}

/// Clamp an already-rounded channel value into `[0, 255]`.
#[inline]
pub(crate) fn clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

pub(crate) fn mul_div255_u8(x: u8, y: u8) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
