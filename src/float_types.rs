//! Scalar type selection and the degeneracy tolerance

#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Lengths below this count as zero when a normal or frame axis is normalized.
///
/// Face normals here come from cross products of unit-scale edges, so the
/// noise floor sits a few ulps above `Real::EPSILON`: about `1e-7` for `f32`
/// and `2e-16` for `f64`. The defaults leave a margin above that while still
/// accepting slivers well below any modelling scale.
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-6
    }
    #[cfg(feature = "f64")]
    {
        1e-12
    }
}

/// Current degeneracy tolerance.
///
/// Fixed on first use: a value from [`set_tolerance`] if it ran earlier,
/// otherwise `HANDLEBODY_TOLERANCE` as seen at compile time, otherwise the
/// precision default. Never smaller than `Real::EPSILON`.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("HANDLEBODY_TOLERANCE")
            .and_then(|raw| Real::from_str(raw).ok())
            .map_or_else(default_tolerance, |value| value.max(Real::EPSILON))
    })
}

/// Pin the tolerance before the first call to [`tolerance`]. Later calls have no effect.
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tolerance_sits_between_epsilon_and_default_scale() {
        let t = tolerance();
        assert!(t >= Real::EPSILON);
        assert!(t <= 1e-4);
        // The value is fixed once read
        set_tolerance(0.5);
        assert_eq!(tolerance(), t);
    }
}
