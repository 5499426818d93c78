use crate::HnError;

/// Floating point type used throughout the network model
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
}

/// `x·|x|`, the sign-preserving square used by every quadratic loss law.
#[inline]
pub fn signed_square(x: Real) -> Real {
    x * x.abs()
}
