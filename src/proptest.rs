//! Strategies for property-based testing with `proptest`.
use ::proptest::prelude::*;
use nalgebra::{Matrix2, Matrix3};

/// Strategy for symmetric 2x2 strain-rate tensors.
///
/// Entries are kept within a physically plausible range (yr⁻¹) so that
/// powers of the effective strain rate stay well away from overflow.
pub fn symmetric_strain_rate_2d() -> impl Strategy<Value = Matrix2<f64>> {
    let range = -1.0..1.0;
    [range.clone(), range.clone(), range.clone()]
        .prop_map(|[e_xx, e_xy, e_yy]| Matrix2::new(e_xx, e_xy, e_xy, e_yy))
}

/// Strategy for symmetric 3x3 strain-rate tensors.
pub fn symmetric_strain_rate_3d() -> impl Strategy<Value = Matrix3<f64>> {
    let range = -1.0..1.0;
    [
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
    ]
    .prop_map(|[e_xx, e_yy, e_zz, e_xy, e_xz, e_yz]| {
        Matrix3::new(e_xx, e_xy, e_xz, e_xy, e_yy, e_yz, e_xz, e_yz, e_zz)
    })
}

/// Strategy for glacial temperatures spanning both branches of the
/// Arrhenius law, K.
pub fn glacial_temperature() -> impl Strategy<Value = f64> {
    183.15..283.15
}

/// Strategy for positive fluidities, MPa⁻ⁿ yr⁻¹.
pub fn fluidity() -> impl Strategy<Value = f64> {
    1.0e-2..1.0e3
}
