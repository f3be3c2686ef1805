//! Constitutive models and viscous energy operators for depth-averaged glacier flow.
//!
//! This crate provides the pointwise ingredients of the viscous part of the
//! ice-flow action functional: the temperature-dependent rate factor of
//! Glen's flow law ([`rate_factor`]), the strain-rate tensor
//! ([`viscosity::strain_rate`]), the nonlinear membrane stress tensor and the
//! scalar viscous energy density ([`viscosity::GlenLaw`]). A finite-element
//! host integrates the energy density over its domain and differentiates it
//! for Newton-type nonlinear solves; the analytic first and second
//! derivatives are exposed through the elliptic operator interface in
//! [`operators`].
//!
//! Mesh topology, quadrature, global assembly and linear/nonlinear solver
//! machinery are the host framework's responsibility.
use nalgebra::{DimMin, DimName, RealField};

pub mod allocators;
pub mod constants;
pub mod operators;
pub mod rate_factor;
pub mod viscosity;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use operators::ViscousEnergyOperator;
pub use rate_factor::{par_rate_factor_field, rate_factor, rate_factor_field, ArrheniusParameters};
pub use viscosity::{effective_strain_rate, strain_rate, GlenLaw, IceFlowParameters, ViscousMaterial};

pub extern crate nalgebra;

/// A real scalar type.
///
/// Trait alias for `RealField + Copy`, the scalar bound used by all
/// numerical routines in this crate.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// A small, fixed-size dimension.
///
/// Trait alias for the dimension bounds required by the tensor-valued
/// routines in this crate.
pub trait SmallDim: DimName + DimMin<Self, Output = Self> {}

impl<D> SmallDim for D where D: DimName + DimMin<Self, Output = Self> {}

/// Symmetry of the bilinear form induced by an elliptic contraction.
///
/// An assembler may exploit [`Symmetry::Symmetric`] to fill only one
/// triangle of the system matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symmetry {
    Symmetric,
    NonSymmetric,
}
