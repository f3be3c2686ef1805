//! Glen's flow-law viscosity and the viscous part of the ice-flow action.
//!
//! For a velocity field $u$ with strain rate $\dot\varepsilon = \mathrm{sym}(\nabla u)$
//! and fluidity $A$, the membrane (depth-integrated) stress tensor is
//! $$
//! M(\dot\varepsilon, A) = 2\mu \\, (\dot\varepsilon + \operatorname{tr}(\dot\varepsilon) I),
//! \qquad
//! \mu = \tfrac{1}{2} A^{-1/n} \dot\varepsilon_e^{1/n - 1},
//! $$
//! where $\dot\varepsilon_e$ is the effective strain rate and $n$ the Glen
//! exponent. The viscous part of the action for depth-averaged flow models is
//! $$
//! E(u) = \frac{n}{n+1} \int_\Omega h \\, M(\dot\varepsilon, A) : \dot\varepsilon \\, dx,
//! $$
//! with $h$ the ice thickness; [`GlenLaw`] computes its pointwise integrand
//! together with the analytic first and second derivatives with respect to
//! the velocity gradient that a Newton-type host solver needs.
use crate::allocators::SmallDimAllocator;
use crate::{constants, Real, SmallDim};
use eyre::ensure;
use nalgebra::{DefaultAllocator, DimName, OMatrix, OVector};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Default strain-rate regularization $\delta$, yr⁻¹.
///
/// Several orders of magnitude below glaciologically observed effective
/// strain rates (1e-3 to 1 yr⁻¹), so the perturbation is invisible for any
/// physical velocity field while keeping the stress finite at rest.
pub const DEFAULT_STRAIN_RATE_TOLERANCE: f64 = 1.0e-10;

/// Compute the strain-rate tensor $\dot\varepsilon(u) = \mathrm{sym}(\nabla u)$
/// from a velocity gradient.
pub fn strain_rate<T, D>(velocity_gradient: &OMatrix<T, D, D>) -> OMatrix<T, D, D>
where
    T: Real,
    D: DimName,
    DefaultAllocator: SmallDimAllocator<T, D>,
{
    velocity_gradient.symmetric_part()
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
fn effective_strain_rate_squared<T, D>(strain_rate: &OMatrix<T, D, D>) -> T
where
    T: Real,
    D: DimName,
    DefaultAllocator: SmallDimAllocator<T, D>,
{
    let tr = strain_rate.trace();
    (strain_rate.dot(strain_rate) + tr * tr) / 2.0
}

/// Compute the effective strain rate
/// $\dot\varepsilon_e = \sqrt{(\dot\varepsilon : \dot\varepsilon + \operatorname{tr}^2 \dot\varepsilon) / 2}$.
pub fn effective_strain_rate<T, D>(strain_rate: &OMatrix<T, D, D>) -> T
where
    T: Real,
    D: DimName,
    DefaultAllocator: SmallDimAllocator<T, D>,
{
    effective_strain_rate_squared(strain_rate).sqrt()
}

/// Pointwise fields entering the depth-averaged viscous energy.
///
/// Intended to be paired with data associated with individual quadrature
/// points during numerical integration by the host framework. The fluidity
/// may come from [`rate_factor`](crate::rate_factor) or be supplied directly
/// by the caller, e.g. from an inversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceFlowParameters<T> {
    /// Ice thickness $h$.
    pub thickness: T,
    /// Fluidity (rate factor) $A$, MPa⁻ⁿ yr⁻¹.
    pub fluidity: T,
}

impl<T> Default for IceFlowParameters<T>
where
    T: Real,
{
    /// Unit thickness and unit fluidity, a neutral scaling of the flow law.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            thickness: 1.0,
            fluidity: 1.0,
        }
    }
}

/// Glen's power-law rheology for membrane stresses.
///
/// The viscosity coefficient $\mu \propto \dot\varepsilon_e^{1/n - 1}$
/// diverges at $\dot\varepsilon_e = 0$ for $n > 1$. The law therefore
/// carries a strain-rate tolerance $\delta$ and evaluates all power terms at
/// the regularized effective strain rate
/// $\dot\varepsilon_\delta = \sqrt{\dot\varepsilon_e^2 + \delta^2}$,
/// in the energy density as well as in the stress, so that the analytic
/// derivative chain (energy → stress → contraction) remains exact
/// everywhere, including at zero strain rate. With $\delta = 0$ the
/// unregularized law is recovered.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlenLaw<T> {
    glen_exponent: T,
    strain_rate_tolerance: T,
}

impl<T> Default for GlenLaw<T>
where
    T: Real,
{
    /// The physical default: $n = 3$ and
    /// $\delta$ = [`DEFAULT_STRAIN_RATE_TOLERANCE`].
    fn default() -> Self {
        let constant = |c: f64| T::from_f64(c).expect("constant must fit in T");
        Self {
            glen_exponent: constant(constants::GLEN_FLOW_LAW_EXPONENT),
            strain_rate_tolerance: constant(DEFAULT_STRAIN_RATE_TOLERANCE),
        }
    }
}

impl<T> GlenLaw<T>
where
    T: Real,
{
    /// Create a flow law with the given exponent $n$ and strain-rate
    /// tolerance $\delta$.
    ///
    /// Requires $n > 1$ and $\delta \geq 0$. A zero tolerance reproduces the
    /// unregularized law, whose stress is singular at zero strain rate; this
    /// is permitted but logged as a warning.
    pub fn new(glen_exponent: T, strain_rate_tolerance: T) -> eyre::Result<Self> {
        ensure!(
            glen_exponent > T::one(),
            "Glen exponent must be greater than one"
        );
        ensure!(
            strain_rate_tolerance >= T::zero(),
            "strain rate tolerance must be non-negative"
        );
        if strain_rate_tolerance == T::zero() {
            log::warn!("zero strain rate tolerance: membrane stress is singular at zero strain rate");
        }
        Ok(Self {
            glen_exponent,
            strain_rate_tolerance,
        })
    }

    pub fn glen_exponent(&self) -> T {
        self.glen_exponent
    }

    pub fn strain_rate_tolerance(&self) -> T {
        self.strain_rate_tolerance
    }

    /// The regularized effective strain rate
    /// $\dot\varepsilon_\delta = \sqrt{\dot\varepsilon_e^2 + \delta^2}$.
    pub fn regularized_effective_strain_rate<D>(&self, strain_rate: &OMatrix<T, D, D>) -> T
    where
        D: DimName,
        DefaultAllocator: SmallDimAllocator<T, D>,
    {
        let delta = self.strain_rate_tolerance;
        (effective_strain_rate_squared(strain_rate) + delta * delta).sqrt()
    }

    /// The nonlinear viscosity coefficient
    /// $\mu = \tfrac{1}{2} A^{-1/n} \dot\varepsilon_e^{1/n - 1}$.
    ///
    /// `effective_strain_rate` is usually the regularized value; passing a
    /// raw zero yields an infinite coefficient for $n > 1$. Also usable on
    /// its own for Picard iterations or an initial guess viscosity built
    /// from a reference strain rate.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn viscosity_coefficient(&self, effective_strain_rate: T, fluidity: T) -> T {
        let n = self.glen_exponent;
        0.5 * fluidity.powf(-1.0 / n) * effective_strain_rate.powf(1.0 / n - 1.0)
    }

    /// The membrane stress tensor
    /// $M = 2\mu (\dot\varepsilon + \operatorname{tr}(\dot\varepsilon) I)$.
    ///
    /// Symmetric by construction for symmetric input.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn membrane_stress<D>(&self, strain_rate: &OMatrix<T, D, D>, fluidity: T) -> OMatrix<T, D, D>
    where
        D: DimName,
        DefaultAllocator: SmallDimAllocator<T, D>,
    {
        let eps_e = self.regularized_effective_strain_rate(strain_rate);
        let mu = self.viscosity_coefficient(eps_e, fluidity);
        (strain_rate + OMatrix::<T, D, D>::identity() * strain_rate.trace()) * (2.0 * mu)
    }
}

/// A pointwise viscous constitutive model for depth-averaged ice flow.
///
/// Implementors map the velocity gradient $\nabla u$ and pointwise
/// parameters (thickness, a rheological field) to the scalar energy density
/// of the viscous action, its first derivative with respect to the velocity
/// gradient (the depth-integrated stress) and its second derivative (the
/// stress contraction). Hosts that accept any implementor of this trait can
/// swap in an alternative rheological parameterization without touching
/// their assembly loop; see [`ViscousEnergyOperator`](crate::operators::ViscousEnergyOperator).
pub trait ViscousMaterial<T, GeometryDim>
where
    T: Real,
    GeometryDim: SmallDim,
    DefaultAllocator: SmallDimAllocator<T, GeometryDim>,
{
    type Parameters: Clone + Default + 'static;

    /// Compute the energy density $\psi = \psi(\nabla u)$ of the viscous
    /// action.
    fn compute_energy_density(
        &self,
        velocity_gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> T;

    /// Compute the depth-integrated stress tensor
    /// $P = \partial \psi / \partial \nabla u$.
    fn compute_stress_tensor(
        &self,
        velocity_gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, GeometryDim, GeometryDim>;

    /// Compute the stress contraction operator
    /// $$
    /// \mathcal{C}_P(\nabla u, a, b)
    ///     = a_k \frac{\partial P_{ik}}{\partial (\nabla u)_{jm}} b_m
    ///       \\, e_i \otimes e_j.
    /// $$
    fn compute_stress_contraction(
        &self,
        velocity_gradient: &OMatrix<T, GeometryDim, GeometryDim>,
        a: &OVector<T, GeometryDim>,
        b: &OVector<T, GeometryDim>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, GeometryDim, GeometryDim>;
}

/// For the Glen law the energy density evaluates to
/// $$
/// \psi = \frac{2n}{n+1} \\, h \\, A^{-1/n} \dot\varepsilon_\delta^{(n+1)/n},
/// $$
/// which for $\delta = 0$ equals
/// $\frac{n}{n+1} h \\, M(\dot\varepsilon, A) : \dot\varepsilon$, the
/// integrand of the depth-averaged viscous action. Its gradient with respect
/// to the velocity gradient is exactly $h M$, and the contraction below is
/// the exact second derivative, so the three methods stay mutually
/// consistent for every $\delta$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
impl<T, D> ViscousMaterial<T, D> for GlenLaw<T>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: SmallDimAllocator<T, D>,
{
    type Parameters = IceFlowParameters<T>;

    fn compute_energy_density(
        &self,
        velocity_gradient: &OMatrix<T, D, D>,
        parameters: &Self::Parameters,
    ) -> T {
        let n = self.glen_exponent;
        let eps = strain_rate(velocity_gradient);
        let eps_e = self.regularized_effective_strain_rate(&eps);
        2.0 * n / (n + 1.0)
            * parameters.thickness
            * parameters.fluidity.powf(-1.0 / n)
            * eps_e.powf((n + 1.0) / n)
    }

    fn compute_stress_tensor(
        &self,
        velocity_gradient: &OMatrix<T, D, D>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, D, D> {
        let eps = strain_rate(velocity_gradient);
        self.membrane_stress(&eps, parameters.fluidity) * parameters.thickness
    }

    fn compute_stress_contraction(
        &self,
        velocity_gradient: &OMatrix<T, D, D>,
        a: &OVector<T, D>,
        b: &OVector<T, D>,
        parameters: &Self::Parameters,
    ) -> OMatrix<T, D, D> {
        let n = self.glen_exponent;
        let k = 1.0 / n - 1.0;
        let eps = strain_rate(velocity_gradient);
        let s = &eps + OMatrix::<T, D, D>::identity() * eps.trace();
        let eps_e = self.regularized_effective_strain_rate(&eps);

        // dM = A^{-1/n} [k eps_e^{k-1} d(eps_e) S + eps_e^k dS], contracted
        // with a and b in the index convention of the trait documentation.
        let sa = &s * a;
        let sb = &s * b;
        let rank_one = sa * sb.transpose() * (0.5 * k * eps_e.powf(k - 2.0));
        let isotropic = (OMatrix::<T, D, D>::identity() * (0.5 * a.dot(b))
            + b * a.transpose() * 0.5
            + a * b.transpose())
            * eps_e.powf(k);

        (rank_one + isotropic) * (parameters.thickness * parameters.fluidity.powf(-1.0 / n))
    }
}
