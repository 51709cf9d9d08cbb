use crate::PcError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Integrals at or below this magnitude carry no information.
pub const VSMALL: Real = 1e-99;

/// Threshold below which an interface gradient is treated as absent.
pub const SMALL: Real = 1e-12;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PcError::NonFinite { what, value: v })
    }
}

/// Limit a volume fraction to [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_unit(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// 1 for `x >= 0`, 0 otherwise.
#[inline]
pub fn pos0(x: Real) -> Real {
    if x >= 0.0 { 1.0 } else { 0.0 }
}

/// 1 for `x < 0`, 0 otherwise.
#[inline]
pub fn neg(x: Real) -> Real {
    if x < 0.0 { 1.0 } else { 0.0 }
}

/// Ratio `num / den` unless `|den|` is at or below [`VSMALL`], in which case
/// `fallback`.
///
/// Returns the value and whether the fallback was taken.
#[inline]
pub fn guarded_ratio(num: Real, den: Real, fallback: Real) -> (Real, bool) {
    if den.abs() > VSMALL {
        (num / den, false)
    } else {
        (fallback, true)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamp_unit_stays_in_range(v in -1.0e6f64..1.0e6) {
            let c = clamp_unit(v);
            prop_assert!((0.0..=1.0).contains(&c));
        }

        #[test]
        fn clamp_unit_is_identity_inside(v in 0.0f64..=1.0) {
            prop_assert_eq!(clamp_unit(v), v);
        }
    }
}
