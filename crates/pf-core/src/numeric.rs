use crate::{PfError, PfResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> PfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> PfResult<Real> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(PfError::NotPositive { what, value: v });
    }
    Ok(v)
}

/// Round to a fixed number of decimal places for presentation.
///
/// Halfway cases round away from zero. Non-finite input is returned unchanged.
pub fn round_to(v: Real, decimals: u32) -> Real {
    if !v.is_finite() {
        return v;
    }
    let scale = 10_f64.powi(decimals as i32);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / scale
}
