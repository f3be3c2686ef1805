//! The temperature-dependent rate factor of Glen's flow law.
//!
//! The strain rate $\dot\varepsilon$ of ice under a stress $\tau$ is
//! $\dot\varepsilon = A(T) \tau^n$, where the rate factor (or fluidity)
//! follows the Arrhenius law
//! $$
//! A(T) = A_0 \exp(-Q / RT)
//! $$
//! with the prefactor $A_0$ and activation energy $Q$ selected per element
//! by comparing $T$ against the transition temperature: temperatures
//! strictly below it take the cold branch, all others the warm branch.
//!
//! Both branches together partition the whole temperature axis, but the
//! resulting function is discontinuous at the transition temperature.
use crate::constants;
use crate::Real;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Coefficients of the two-branch Arrhenius law.
///
/// These are immutable configuration, bound once when a model is set up.
/// [`Default`] yields the standard calibration from [`constants`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrheniusParameters<T> {
    /// Temperature separating the cold and warm branches, K.
    pub transition_temperature: T,
    /// Prefactor of the cold branch, MPa⁻ⁿ yr⁻¹.
    pub cold_prefactor: T,
    /// Prefactor of the warm branch, MPa⁻ⁿ yr⁻¹.
    pub warm_prefactor: T,
    /// Activation energy of the cold branch, kJ/mol.
    pub cold_activation_energy: T,
    /// Activation energy of the warm branch, kJ/mol.
    pub warm_activation_energy: T,
    /// Ideal gas constant, kJ mol⁻¹ K⁻¹.
    pub ideal_gas_constant: T,
}

impl<T> Default for ArrheniusParameters<T>
where
    T: Real,
{
    fn default() -> Self {
        let constant = |c: f64| T::from_f64(c).expect("constant must fit in T");
        Self {
            transition_temperature: constant(constants::TRANSITION_TEMPERATURE),
            cold_prefactor: constant(constants::COLD_PREFACTOR),
            warm_prefactor: constant(constants::WARM_PREFACTOR),
            cold_activation_energy: constant(constants::COLD_ACTIVATION_ENERGY),
            warm_activation_energy: constant(constants::WARM_ACTIVATION_ENERGY),
            ideal_gas_constant: constant(constants::IDEAL_GAS_CONSTANT),
        }
    }
}

impl<T> ArrheniusParameters<T>
where
    T: Real,
{
    /// The branch coefficients $(A_0, Q)$ selected by the given temperature.
    ///
    /// Temperatures strictly below the transition temperature select the
    /// cold branch, all others the warm branch.
    pub fn branch_coefficients(&self, temperature: T) -> (T, T) {
        if temperature < self.transition_temperature {
            (self.cold_prefactor, self.cold_activation_energy)
        } else {
            (self.warm_prefactor, self.warm_activation_energy)
        }
    }
}

/// Compute the rate factor $A(T) = A_0 \exp(-Q/RT)$ for a single temperature.
///
/// No validity range is enforced: a non-physical temperature ($T \leq 0$)
/// produces whatever the division and exponential produce, which may be zero,
/// infinite or NaN. The function is a pure mapping with no side effects.
pub fn rate_factor<T>(temperature: T, parameters: &ArrheniusParameters<T>) -> T
where
    T: Real,
{
    let (a0, q) = parameters.branch_coefficients(temperature);
    a0 * (-q / (parameters.ideal_gas_constant * temperature)).exp()
}

/// Evaluate the rate factor elementwise over a temperature field.
///
/// Every element is the scalar [`rate_factor`] of the corresponding input
/// element, so the bulk and scalar forms cannot disagree.
pub fn rate_factor_field<T>(temperatures: &[T], parameters: &ArrheniusParameters<T>) -> Vec<T>
where
    T: Real,
{
    temperatures
        .iter()
        .map(|&t| rate_factor(t, parameters))
        .collect()
}

/// Parallel version of [`rate_factor_field`].
///
/// Elements are independent, so no evaluation order is guaranteed; the
/// result is nevertheless elementwise identical to the serial form.
pub fn par_rate_factor_field<T>(temperatures: &[T], parameters: &ArrheniusParameters<T>) -> Vec<T>
where
    T: Real + Send + Sync,
{
    temperatures
        .par_iter()
        .map(|&t| rate_factor(t, parameters))
        .collect()
}
