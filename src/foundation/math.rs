//! Scalar helpers shared by the compositor and the ingestion path.

/// Guard added to both sides of the min-max ratio so uniform images do not divide by zero.
pub const EPS: f64 = 1e-17;

/// Map an 8-bit sample to `[0, 1]`.
#[inline]
pub fn u8_to_unit(v: u8) -> f64 {
    f64::from(v) / 255.0
}

/// Map a `[0, 1]` sample back to 8 bits, rounding to nearest and clamping out-of-range values.
#[inline]
pub fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Min-max normalize `values` in place as `(x - min + EPS) / (max - min + EPS)`.
///
/// A uniform buffer maps to all ones. Empty buffers are left untouched.
pub fn minmax_normalize_in_place(values: &mut [f64]) {
    let Some((min, max)) = min_max(values) else {
        return;
    };
    let denom = max - min + EPS;
    for v in values.iter_mut() {
        *v = (*v - min + EPS) / denom;
    }
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
