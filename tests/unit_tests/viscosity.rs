use crate::unit_tests::{ice_parameters, unregularized_glen_law, velocity_gradient_2d};
use glacier_rheology::nalgebra::{matrix, vector, Matrix2};
use glacier_rheology::proptest::{fluidity, symmetric_strain_rate_2d, symmetric_strain_rate_3d};
use glacier_rheology::{
    effective_strain_rate, strain_rate, GlenLaw, IceFlowParameters, ViscousMaterial,
};
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use proptest::prelude::*;

#[test]
fn strain_rate_is_symmetric_part_of_gradient() {
    let eps = strain_rate(&velocity_gradient_2d());
    assert_matrix_eq!(eps, matrix![0.3, 0.075; 0.075, 0.5], comp = float);
    assert_matrix_eq!(eps, eps.transpose(), comp = exact);
}

#[test]
fn effective_strain_rate_2d_reference() {
    let eps = strain_rate(&velocity_gradient_2d());
    assert_scalar_eq!(
        effective_strain_rate(&eps),
        0.7040063920164362,
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn pure_shear_closed_form() {
    // eps = [[0, g], [g, 0]] has zero trace, so eps_e = g and M = 2 mu eps
    let gamma = 0.1;
    let eps = matrix![0.0, gamma; gamma, 0.0];
    let law = unregularized_glen_law();

    assert_scalar_eq!(effective_strain_rate(&eps), gamma, comp = float);

    let mu = law.viscosity_coefficient(gamma, 1.0);
    assert_scalar_eq!(mu, 2.3207944168063896, comp = abs, tol = 1e-12);

    let m = law.membrane_stress(&eps, 1.0);
    assert_matrix_eq!(m, eps * (2.0 * mu), comp = abs, tol = 1e-14);
    assert_scalar_eq!(m[(0, 1)], 0.464158883361278, comp = abs, tol = 1e-12);
}

#[test]
fn membrane_stress_2d_reference() {
    let law = unregularized_glen_law();
    let eps = strain_rate(&velocity_gradient_2d());

    let mu = law.viscosity_coefficient(effective_strain_rate(&eps), 50.0);
    assert_scalar_eq!(mu, 0.17149926693130346, comp = abs, tol = 1e-13);

    let m = law.membrane_stress(&eps, 50.0);
    let expected = matrix![0.37729838724886766, 0.025724890039695518;
                           0.025724890039695518, 0.445898094021389];
    assert_matrix_eq!(m, expected, comp = abs, tol = 1e-13);
}

#[test]
fn membrane_stress_3d_reference() {
    let law = unregularized_glen_law();
    let eps = matrix![0.1, 0.1, -0.05;
                      0.1, 0.4, 0.0;
                      -0.05, 0.0, 0.25];

    assert_scalar_eq!(
        effective_strain_rate(&eps),
        0.6403124237432849,
        comp = abs,
        tol = 1e-14
    );

    let m = law.membrane_stress(&eps, 2.0);
    let expected = matrix![0.9081292028737609, 0.10683872974985423, -0.0534193648749271;
                           0.10683872974985423, 1.2286453921233234, 0.0;
                           -0.0534193648749271, 0.0, 1.0683872974985422];
    assert_matrix_eq!(m, expected, comp = abs, tol = 1e-12);
}

#[test]
fn fluidity_scaling_law() {
    // Scaling A by 8 scales mu by 8^(-1/3) = 1/2
    let law = unregularized_glen_law();
    let eps_e = 0.7040063920164362;
    let mu = law.viscosity_coefficient(eps_e, 50.0);
    let mu_scaled = law.viscosity_coefficient(eps_e, 400.0);
    assert_scalar_eq!(mu_scaled, 0.5 * mu, comp = abs, tol = 1e-14);
}

#[test]
fn zero_strain_rate_is_finite_with_tolerance() {
    let law = GlenLaw::new(3.0, 1e-10).unwrap();
    let eps = Matrix2::zeros();

    let eps_e = law.regularized_effective_strain_rate(&eps);
    assert_scalar_eq!(eps_e, 1e-10, comp = float);

    let mu = law.viscosity_coefficient(eps_e, 1.0);
    assert!(mu.is_finite());

    let m = law.membrane_stress(&eps, 1.0);
    assert!(m.iter().all(|x| x.is_finite()));
    assert_matrix_eq!(m, Matrix2::zeros(), comp = exact);

    let parameters = IceFlowParameters {
        thickness: 100.0,
        fluidity: 1.0,
    };
    // Residual energy at rest is O(delta^{(n+1)/n})
    let psi = law.compute_energy_density(&Matrix2::zeros(), &parameters);
    assert!(psi >= 0.0 && psi < 1e-11);

    let p = law.compute_stress_tensor(&Matrix2::zeros(), &parameters);
    assert_matrix_eq!(p, Matrix2::zeros(), comp = exact);

    let c = law.compute_stress_contraction(
        &Matrix2::zeros(),
        &vector![1.0, 0.0],
        &vector![0.0, 1.0],
        &parameters,
    );
    assert!(c.iter().all(|x| x.is_finite()));
}

#[test]
fn zero_strain_rate_diverges_without_tolerance() {
    let law = unregularized_glen_law();
    assert!(law.viscosity_coefficient(0.0, 1.0).is_infinite());
}

#[test]
fn energy_density_matches_contracted_stress() {
    // psi = n/(n+1) h (M : eps) for delta = 0
    let law = unregularized_glen_law();
    let gradient = velocity_gradient_2d();
    let parameters = ice_parameters();

    let eps = strain_rate(&gradient);
    let m = law.membrane_stress(&eps, parameters.fluidity);
    let n = law.glen_exponent();
    let reference = n / (n + 1.0) * parameters.thickness * m.dot(&eps);

    let psi = law.compute_energy_density(&gradient, &parameters);
    assert_scalar_eq!(psi, reference, comp = abs, tol = 1e-12);
    assert_scalar_eq!(psi, 25.499797251848182, comp = abs, tol = 1e-10);
}

#[test]
fn construction_rejects_bad_configuration() {
    assert!(GlenLaw::new(1.0, 1e-10).is_err());
    assert!(GlenLaw::new(0.5, 1e-10).is_err());
    assert!(GlenLaw::new(3.0, -1.0).is_err());
    assert!(GlenLaw::new(3.0, 0.0).is_ok());

    let law = GlenLaw::<f64>::default();
    assert_eq!(law.glen_exponent(), 3.0);
    assert_eq!(law.strain_rate_tolerance(), 1e-10);
}

proptest! {
    #[test]
    fn membrane_stress_is_symmetric_2d(eps in symmetric_strain_rate_2d(), a in fluidity()) {
        let law = GlenLaw::default();
        let m = law.membrane_stress(&eps, a);
        prop_assert_eq!(m, m.transpose());
    }

    #[test]
    fn membrane_stress_is_symmetric_3d(eps in symmetric_strain_rate_3d(), a in fluidity()) {
        let law = GlenLaw::default();
        let m = law.membrane_stress(&eps, a);
        prop_assert_eq!(m, m.transpose());
    }

    #[test]
    fn scaling_fluidity_by_eight_halves_viscosity(eps in symmetric_strain_rate_2d(), a in fluidity()) {
        let law = GlenLaw::default();
        let eps_e = law.regularized_effective_strain_rate(&eps);
        let mu = law.viscosity_coefficient(eps_e, a);
        let mu_scaled = law.viscosity_coefficient(eps_e, 8.0 * a);
        prop_assert!((mu_scaled - 0.5 * mu).abs() <= 1e-12 * mu.abs());
    }
}
