//! The elliptic operator interface consumed by finite-element assembly.
//!
//! A host framework evaluates these traits at quadrature points: the energy
//! for values of the action functional, the elliptic term for residual
//! (weak-form) assembly and the contraction for tangent (Jacobian) assembly
//! in Newton-type solves. [`ViscousEnergyOperator`] adapts any
//! [`ViscousMaterial`] to this interface.
use crate::allocators::{BiDimAllocator, SmallDimAllocator};
use crate::viscosity::ViscousMaterial;
use crate::{Real, SmallDim, Symmetry};
use nalgebra::{DMatrixViewMut, DVectorView, DefaultAllocator, DimName, OMatrix, OVector, Scalar};

/// Basic properties of a pointwise operator.
pub trait Operator<T, GeometryDim>
where
    T: Scalar,
    GeometryDim: SmallDim,
{
    /// The dimension of the solution variable the operator acts on.
    type SolutionDim: SmallDim;

    /// The parameters associated with the operator.
    ///
    /// Typically pointwise material data, paired with individual quadrature
    /// points during numerical integration.
    type Parameters: Clone + Default + 'static;
}

/// An operator whose action derives from a scalar energy density.
pub trait EllipticEnergy<T, GeometryDim>: Operator<T, GeometryDim>
where
    T: Real,
    GeometryDim: SmallDim,
    DefaultAllocator: BiDimAllocator<T, GeometryDim, Self::SolutionDim>,
{
    /// Compute the energy density $\psi = \psi(\nabla u)$.
    fn compute_energy(
        &self,
        gradient: &OMatrix<T, GeometryDim, Self::SolutionDim>,
        parameters: &Self::Parameters,
    ) -> T;
}

/// The weak-form term $g = \partial \psi / \partial \nabla u$ of an elliptic
/// operator.
pub trait EllipticOperator<T, GeometryDim>: Operator<T, GeometryDim>
where
    T: Real,
    GeometryDim: SmallDim,
    DefaultAllocator: BiDimAllocator<T, GeometryDim, Self::SolutionDim>,
{
    fn compute_elliptic_operator(
        &self,
        gradient: &OMatrix<T, GeometryDim, Self::SolutionDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, GeometryDim, Self::SolutionDim>;
}

/// The contraction of the derivative of an elliptic operator with vector
/// pairs, used for tangent-matrix assembly.
pub trait EllipticContraction<T, GeometryDim>: Operator<T, GeometryDim>
where
    T: Real,
    GeometryDim: SmallDim,
    DefaultAllocator: BiDimAllocator<T, GeometryDim, Self::SolutionDim>,
{
    /// Compute the contraction
    /// $$
    /// \mathcal{C}_g(\nabla u, a, b)
    ///     = a_k \frac{\partial g_{ik}}{\partial (\nabla u)_{jm}} b_m
    ///       \\, e_i \otimes e_j.
    /// $$
    fn contract(
        &self,
        gradient: &OMatrix<T, GeometryDim, Self::SolutionDim>,
        a: &OVector<T, GeometryDim>,
        b: &OVector<T, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, Self::SolutionDim, Self::SolutionDim>;

    /// Symmetry of the bilinear form $(a, b) \mapsto \mathcal{C}_g(\nabla u, a, b)$.
    fn symmetry(&self) -> Symmetry {
        Symmetry::NonSymmetric
    }

    /// Compute contractions for several vectors at once, scaled by `alpha`,
    /// and add the results to `output`.
    ///
    /// `a` and `b` hold `M` respectively `N` stacked vectors of dimension
    /// `GeometryDim`. `output` is an `(s * M) x (s * N)` matrix of
    /// `s x s` blocks with `s = SolutionDim`; block `(I, J)` receives
    /// `alpha * contract(gradient, a_I, b_J)`.
    fn accumulate_contractions_into(
        &self,
        mut output: DMatrixViewMut<T>,
        alpha: T,
        gradient: &OMatrix<T, GeometryDim, Self::SolutionDim>,
        a: DVectorView<T>,
        b: DVectorView<T>,
        parameters: &Self::Parameters,
    ) {
        let d = GeometryDim::dim();
        let s = Self::SolutionDim::dim();
        assert!(a.len() % d == 0, "Dimension of a must be divisible by GeometryDim");
        assert!(b.len() % d == 0, "Dimension of b must be divisible by GeometryDim");
        let num_a = a.len() / d;
        let num_b = b.len() / d;
        assert_eq!(
            output.nrows(),
            s * num_a,
            "Number of rows in output matrix is not consistent with a"
        );
        assert_eq!(
            output.ncols(),
            s * num_b,
            "Number of columns in output matrix is not consistent with b"
        );
        let s_times_s = (Self::SolutionDim::name(), Self::SolutionDim::name());

        // Column-by-column, since the output matrix is column-major.
        for j in 0..num_b {
            let b_j = b.rows_generic(d * j, GeometryDim::name()).clone_owned();
            for i in 0..num_a {
                let a_i = a.rows_generic(d * i, GeometryDim::name()).clone_owned();
                let contraction = self.contract(gradient, &a_i, &b_j, parameters) * alpha;
                let mut c_ij = output.generic_view_mut((s * i, s * j), s_times_s);
                c_ij += contraction;
            }
        }
    }
}

/// Adapts a [`ViscousMaterial`] to the elliptic operator interface, for use
/// with the assembly operations of a finite-element host.
///
/// The host picks the constitutive law when the model is constructed; any
/// implementor of [`ViscousMaterial`] with the same parameter contract can
/// be substituted without changes to the assembly loop.
pub struct ViscousEnergyOperator<'a, Material>(&'a Material);

impl<'a, Material> ViscousEnergyOperator<'a, Material> {
    pub fn new(material: &'a Material) -> Self {
        Self(material)
    }
}

impl<'a, T, GeometryDim, Material> Operator<T, GeometryDim> for ViscousEnergyOperator<'a, Material>
where
    T: Real,
    GeometryDim: SmallDim,
    Material: ViscousMaterial<T, GeometryDim>,
    DefaultAllocator: SmallDimAllocator<T, GeometryDim>,
{
    type SolutionDim = GeometryDim;
    type Parameters = Material::Parameters;
}

impl<'a, T, GeometryDim, Material> EllipticEnergy<T, GeometryDim> for ViscousEnergyOperator<'a, Material>
where
    T: Real,
    GeometryDim: SmallDim,
    Material: ViscousMaterial<T, GeometryDim>,
    DefaultAllocator: SmallDimAllocator<T, GeometryDim>,
{
    fn compute_energy(
        &self,
        gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> T {
        self.0.compute_energy_density(gradient, parameters)
    }
}

impl<'a, T, GeometryDim, Material> EllipticOperator<T, GeometryDim> for ViscousEnergyOperator<'a, Material>
where
    T: Real,
    GeometryDim: SmallDim,
    Material: ViscousMaterial<T, GeometryDim>,
    DefaultAllocator: SmallDimAllocator<T, GeometryDim>,
{
    // The material is a function of the velocity gradient itself and its
    // stress tensor is symmetric, so either gradient convention of the host
    // maps to the same term.
    fn compute_elliptic_operator(
        &self,
        gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, GeometryDim, GeometryDim> {
        self.0.compute_stress_tensor(gradient, parameters)
    }
}

impl<'a, T, GeometryDim, Material> EllipticContraction<T, GeometryDim> for ViscousEnergyOperator<'a, Material>
where
    T: Real,
    GeometryDim: SmallDim,
    Material: ViscousMaterial<T, GeometryDim>,
    DefaultAllocator: SmallDimAllocator<T, GeometryDim>,
{
    fn contract(
        &self,
        gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        a: &OVector<T, GeometryDim>,
        b: &OVector<T, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, GeometryDim, GeometryDim> {
        self.0.compute_stress_contraction(gradient, a, b, parameters)
    }

    fn symmetry(&self) -> Symmetry {
        Symmetry::Symmetric
    }
}
