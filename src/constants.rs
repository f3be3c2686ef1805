//! Physical constants for glacier ice rheology.
//!
//! Units follow the conventions of the glaciological literature: temperatures
//! in Kelvin, activation energies in kJ/mol, rate factors in
//! MPa⁻ⁿ yr⁻¹ with n the Glen flow-law exponent. The Arrhenius prefactors
//! are stored in these working units; the factor `YEAR * 1.0e18` converts
//! the tabulated Pa⁻³ s⁻¹ values.

/// Seconds per Julian year.
pub const YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Ideal gas constant, kJ mol⁻¹ K⁻¹.
pub const IDEAL_GAS_CONSTANT: f64 = 8.3144621e-3;

/// Glen flow-law exponent.
pub const GLEN_FLOW_LAW_EXPONENT: f64 = 3.0;

/// Temperature separating the cold and warm branches of the Arrhenius law, K.
pub const TRANSITION_TEMPERATURE: f64 = 263.15;

/// Arrhenius prefactor of the cold branch, MPa⁻³ yr⁻¹ (3.985e-13 Pa⁻³ s⁻¹).
pub const COLD_PREFACTOR: f64 = 3.985e-13 * YEAR * 1.0e18;

/// Arrhenius prefactor of the warm branch, MPa⁻³ yr⁻¹ (1.916e3 Pa⁻³ s⁻¹).
pub const WARM_PREFACTOR: f64 = 1.916e3 * YEAR * 1.0e18;

/// Activation energy of the cold branch, kJ/mol.
pub const COLD_ACTIVATION_ENERGY: f64 = 60.0;

/// Activation energy of the warm branch, kJ/mol.
pub const WARM_ACTIVATION_ENERGY: f64 = 139.0;
