//! Conductance computation
//!
//! Every regime follows the same pipeline:
//!
//! 1. gather conduit geometry for the target throats ([`ConduitGeometry`])
//! 2. resolve the phase properties the regime reads ([`PropertyResolver`])
//! 3. evaluate the regime formula per segment, or per direction for the
//!    convective regimes
//!
//! Conduit regimes then combine the three segment conductances in series,
//! scaled by the conduit shape factors:
//!
//! $$
//! G = \left(\frac{1}{g_t S_t} + \frac{1}{g_1 S_1} + \frac{1}{g_2 S_2}\right)^{-1}
//! $$
//!
//! Zero-length segments get $g = \infty$ and drop out of the sum.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DVector;
//! use pnm_rs::conductance::{compute_conductance, ConduitKeys, ConduitRegime, PropertyKeys};
//! use pnm_rs::network::{Network, Phase};
//!
//! let mut network = Network::new(2, vec![[0, 1]]).unwrap();
//! network.set("pore.area", 1.0).unwrap();
//! network.set("throat.area", 1.0).unwrap();
//! for key in ConduitKeys::default().length_keys() {
//!     network.set(&key, 1.0).unwrap();
//! }
//!
//! let mut phase = Phase::new("water", &network);
//! phase.set("pore.diffusivity", 1.0).unwrap();
//! phase.set("throat.diffusivity", 1.0).unwrap();
//!
//! let regime = ConduitRegime::diffusion(&PropertyKeys::default());
//! let g = compute_conductance(&network, &phase, &ConduitKeys::default(), &regime, &[0]).unwrap();
//! assert!((g[0] - 1.0 / 3.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use crate::conductance::constants::{
    FARADAY, GAS_CONSTANT, POISEUILLE_FACTOR, TAYLOR_ARIS_FACTOR, VISCOSITY_MAX, VISCOSITY_MIN,
};
use crate::conductance::geometry::{ConduitGeometry, Segment};
use crate::conductance::keys::{expect_element, ConduitKeys, PropertyPair};
use crate::conductance::properties::{PropertyResolver, SegmentValues};
use crate::conductance::regime::{ConduitRegime, ConvectiveRegime, TransportRegime};
use crate::conductance::scheme::DiscretizationScheme;
use crate::error::ConductanceResult;
use crate::execution::map_elements;
use crate::network::{Element, Network, Phase, PropertyData};

// =================================================================================================
// Outputs
// =================================================================================================

/// Result of a regime evaluation, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum Conductance {
    /// One conductance per target throat
    Conduit(DVector<f64>),

    /// `n × 2` weights; column 0 for flow from pore 1 to pore 2, column 1 for
    /// the reverse direction
    Directional(DMatrix<f64>),
}

impl Conductance {
    /// Number of target throats
    pub fn len(&self) -> usize {
        match self {
            Conductance::Conduit(g) => g.len(),
            Conductance::Directional(w) => w.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_conduit(&self) -> Option<&DVector<f64>> {
        match self {
            Conductance::Conduit(g) => Some(g),
            Conductance::Directional(_) => None,
        }
    }

    pub fn as_directional(&self) -> Option<&DMatrix<f64>> {
        match self {
            Conductance::Directional(w) => Some(w),
            Conductance::Conduit(_) => None,
        }
    }
}

impl From<Conductance> for PropertyData {
    fn from(conductance: Conductance) -> Self {
        match conductance {
            Conductance::Conduit(g) => PropertyData::Vector(g),
            Conductance::Directional(w) => PropertyData::Matrix(w),
        }
    }
}

/// Conduit conductance plus regime by-products
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitEvaluation {
    pub conductance: DVector<f64>,

    /// Clamped apparent viscosity of the throat segment (power-law regime
    /// only); `NaN` where the throat segment has zero length
    pub throat_viscosity: Option<DVector<f64>>,
}

// =================================================================================================
// Entry points
// =================================================================================================

/// Conductance of each target conduit under a conduit regime
///
/// # Errors
///
/// - `ThroatOutOfRange` if a target throat does not exist
/// - `PropertyNotFound` if a geometry array or a property the regime reads is
///   absent (at both resolutions for paired properties)
pub fn compute_conductance(
    network: &Network,
    phase: &Phase,
    keys: &ConduitKeys,
    regime: &ConduitRegime,
    throats: &[usize],
) -> ConductanceResult<DVector<f64>> {
    Ok(evaluate_conduit(network, phase, keys, regime, throats)?.conductance)
}

/// Like [`compute_conductance`], also returning the power-law throat viscosity
pub fn evaluate_conduit(
    network: &Network,
    phase: &Phase,
    keys: &ConduitKeys,
    regime: &ConduitRegime,
    throats: &[usize],
) -> ConductanceResult<ConduitEvaluation> {
    let geometry = ConduitGeometry::resolve(network, keys, throats)?;
    let resolver = PropertyResolver::new(network, phase);
    log::debug!(
        "computing '{}' conductance of {} conduit(s)",
        regime.transport_type(),
        geometry.len()
    );

    let mut throat_viscosity = None;
    let segments = match regime {
        ConduitRegime::Ionic => {
            let conductance = ionic(&geometry);
            return Ok(ConduitEvaluation {
                conductance,
                throat_viscosity,
            });
        }
        ConduitRegime::Flow { diffusivity } => {
            let d = resolver.segment_values(diffusivity, &geometry)?;
            segment_conductances(&geometry, |s, i, a, l| {
                a * a / (POISEUILLE_FACTOR * value(&d, s, i) * l)
            })
        }
        ConduitRegime::FlowPowerLaw {
            consistency,
            flow_index,
            pore_pressure,
        } => {
            expect_element(pore_pressure, Element::Pore)?;
            let pressure = match phase.get(pore_pressure) {
                Some(pressure) => pressure,
                None => {
                    log::debug!("'{pore_pressure}' not stored, power-law viscosity uses zero pressure");
                    DVector::zeros(network.np())
                }
            };
            let c = resolver.segment_values(consistency, &geometry)?;
            let n = resolver.segment_values(flow_index, &geometry)?;
            let mu = apparent_viscosity(&geometry, &pressure, &c, &n);
            let g = segment_conductances(&geometry, |s, i, a, l| {
                a * a / (POISEUILLE_FACTOR * l * mu[s.index()][i])
            });
            let [_, mu_t, _] = mu;
            throat_viscosity = Some(mu_t);
            g
        }
        ConduitRegime::Diffusion { diffusivity } => {
            let d = resolver.segment_values(diffusivity, &geometry)?;
            segment_conductances(&geometry, |s, i, a, l| value(&d, s, i) * a / l)
        }
        ConduitRegime::TaylorArisDiffusion {
            diffusivity,
            pore_pressure,
            throat_hydraulic_conductance,
        } => {
            let d = resolver.segment_values(diffusivity, &geometry)?;
            let q = advective_flux(&resolver, &geometry, pore_pressure, throat_hydraulic_conductance)?;
            segment_conductances(&geometry, |s, i, a, l| {
                let d = value(&d, s, i);
                let pe = (q[i] / a) * (4.0 * a / PI).sqrt() / d;
                d * (1.0 + pe * pe / TAYLOR_ARIS_FACTOR) * a / l
            })
        }
    };

    let sf = resolver.shape_factors(keys, &geometry);
    Ok(ConduitEvaluation {
        conductance: combine_series(&segments, &sf),
        throat_viscosity,
    })
}

/// Directional advection-diffusion weights of each target conduit
///
/// Row `i` holds the weights of `throats[i]`: column 0 evaluates the scheme at
/// flux $Q$, column 1 at $-Q$.
///
/// # Errors
///
/// - `ThroatOutOfRange` if a target throat does not exist
/// - `PropertyNotFound` if a property the regime reads is absent
pub fn compute_directional_weights(
    network: &Network,
    phase: &Phase,
    keys: &ConduitKeys,
    regime: &ConvectiveRegime,
    throats: &[usize],
) -> ConductanceResult<DMatrix<f64>> {
    let geometry = ConduitGeometry::resolve(network, keys, throats)?;
    let resolver = PropertyResolver::new(network, phase);
    let convection = regime.convection();
    log::debug!(
        "computing '{}' weights of {} conduit(s) with '{}' scheme",
        regime.transport_type(),
        geometry.len(),
        convection.scheme
    );

    let q = advective_flux(
        &resolver,
        &geometry,
        &convection.pore_pressure,
        &convection.throat_hydraulic_conductance,
    )?;
    let gd = resolver.throat_only(&convection.throat_diffusive_conductance, &geometry)?;

    let flux = match regime {
        ConvectiveRegime::Dispersion(_) => q,
        ConvectiveRegime::AdDifMig {
            diffusivity,
            temperature,
            pore_potential,
            throat_valence,
            ..
        } => {
            let migration = migration_flux(
                &resolver,
                &geometry,
                diffusivity,
                temperature,
                pore_potential,
                throat_valence,
            )?;
            q - migration
        }
    };

    Ok(directional_weights(convection.scheme, &flux, &gd))
}

/// Evaluate any regime
pub fn compute(
    network: &Network,
    phase: &Phase,
    keys: &ConduitKeys,
    regime: &TransportRegime,
    throats: &[usize],
) -> ConductanceResult<Conductance> {
    match regime {
        TransportRegime::Conduit(regime) => {
            compute_conductance(network, phase, keys, regime, throats).map(Conductance::Conduit)
        }
        TransportRegime::Convective(regime) => {
            compute_directional_weights(network, phase, keys, regime, throats)
                .map(Conductance::Directional)
        }
    }
}

// =================================================================================================
// Kernels
// =================================================================================================

fn value(values: &SegmentValues, segment: Segment, i: usize) -> f64 {
    values.as_array()[segment.index()][i]
}

/// Evaluate `kernel(segment, i, area, length)` on every open segment
///
/// Zero-length segments get an infinite conductance.
fn segment_conductances<F>(geometry: &ConduitGeometry, kernel: F) -> [DVector<f64>; 3]
where
    F: Fn(Segment, usize, f64, f64) -> f64 + Sync + Send,
{
    Segment::ALL.map(|segment| {
        let area = geometry.area(segment);
        let length = geometry.length(segment);
        map_elements(geometry.len(), |i| {
            if geometry.is_open(segment, i) {
                kernel(segment, i, area[i], length[i])
            } else {
                f64::INFINITY
            }
        })
    })
}

/// Series combination of `[g1, gt, g2]` scaled by shape factors
fn combine_series(g: &[DVector<f64>; 3], sf: &SegmentValues) -> DVector<f64> {
    let [g1, gt, g2] = g;
    map_elements(g1.len(), |i| {
        1.0 / (1.0 / (gt[i] * sf.throat[i]) + 1.0 / (g1[i] * sf.pore1[i]) + 1.0 / (g2[i] * sf.pore2[i]))
    })
}

/// $L / (A_1 L_1 + A_t L_t + A_2 L_2)$
///
/// Zero-length segments contribute nothing to the denominator; a conduit with
/// no length at all has infinite conductance.
fn ionic(geometry: &ConduitGeometry) -> DVector<f64> {
    let total = geometry.total_length();
    let areas = Segment::ALL.map(|s| geometry.area(s));
    let lengths = Segment::ALL.map(|s| geometry.length(s));
    map_elements(geometry.len(), |i| {
        if total[i] == 0.0 {
            return f64::INFINITY;
        }
        let weighted: f64 = (0..3)
            .filter(|&k| lengths[k][i] != 0.0)
            .map(|k| areas[k][i] * lengths[k][i])
            .sum();
        total[i] / weighted
    })
}

/// Clamped apparent viscosity of a power-law fluid on each segment
///
/// $$
/// \mu = \frac{\Delta P^{1-1/n} C^{1/n}}{\frac{4n}{3n+1}\left(\frac{2L}{\sqrt{A/\pi}}\right)^{1-1/n}}
/// $$
///
/// Pressure drops are taken between each pore and the throat mid-point
/// $(P_1 + P_2)/2$, and across the whole conduit for the throat segment.
fn apparent_viscosity(
    geometry: &ConduitGeometry,
    pressure: &DVector<f64>,
    consistency: &SegmentValues,
    flow_index: &SegmentValues,
) -> [DVector<f64>; 3] {
    let [p1, p2] = geometry.at_pores(pressure);

    let mu = Segment::ALL.map(|segment| {
        let area = geometry.area(segment);
        let length = geometry.length(segment);
        map_elements(geometry.len(), |i| {
            if !geometry.is_open(segment, i) {
                return f64::NAN;
            }
            let pt = 0.5 * (p1[i] + p2[i]);
            let dp = match segment {
                Segment::Pore1 => (p1[i] - pt).abs(),
                Segment::Throat => (p2[i] - p1[i]).abs(),
                Segment::Pore2 => (p2[i] - pt).abs(),
            };
            let c = value(consistency, segment, i);
            let n = value(flow_index, segment, i);
            let exponent = 1.0 - 1.0 / n;

            let numerator = dp.powf(exponent) * c.powf(1.0 / n);
            let denominator =
                (4.0 * n / (3.0 * n + 1.0)) * (2.0 * length[i] / (area[i] / PI).sqrt()).powf(exponent);
            (numerator / denominator).clamp(VISCOSITY_MIN, VISCOSITY_MAX)
        })
    });

    let clamped = mu
        .iter()
        .flat_map(|m| m.iter())
        .filter(|&&v| v == VISCOSITY_MIN || v == VISCOSITY_MAX)
        .count();
    if clamped > 0 {
        log::debug!("{clamped} apparent viscosity value(s) clamped to [{VISCOSITY_MIN:e}, {VISCOSITY_MAX:e}]");
    }
    mu
}

/// Volumetric flux $Q = -g_h (P_2 - P_1)$ through each conduit
fn advective_flux(
    resolver: &PropertyResolver<'_>,
    geometry: &ConduitGeometry,
    pore_pressure: &str,
    throat_hydraulic_conductance: &str,
) -> ConductanceResult<DVector<f64>> {
    let pressure = resolver.pore_only(pore_pressure)?;
    let gh = resolver.throat_only(throat_hydraulic_conductance, geometry)?;
    Ok(-gh.component_mul(&geometry.difference(&pressure)))
}

/// Electromigration flux $\frac{z F D S}{R T} \frac{V_2 - V_1}{L}$ through each conduit
fn migration_flux(
    resolver: &PropertyResolver<'_>,
    geometry: &ConduitGeometry,
    diffusivity: &PropertyPair,
    temperature: &PropertyPair,
    pore_potential: &str,
    throat_valence: &str,
) -> ConductanceResult<DVector<f64>> {
    let d = resolver.throat_values(diffusivity, geometry)?;
    let t = resolver.throat_values(temperature, geometry)?;
    let z = resolver.throat_only(throat_valence, geometry)?;
    let dv = geometry.difference(&resolver.pore_only(pore_potential)?);
    let s = geometry.mean_cross_section();
    let l = geometry.total_length();

    Ok(map_elements(geometry.len(), |i| {
        z[i] * FARADAY * d[i] * s[i] / (GAS_CONSTANT * t[i]) * (dv[i] / l[i])
    }))
}

fn directional_weights(scheme: DiscretizationScheme, flux: &DVector<f64>, gd: &DVector<f64>) -> DMatrix<f64> {
    let forward = map_elements(flux.len(), |i| scheme.weight(flux[i], gd[i]));
    let backward = map_elements(flux.len(), |i| scheme.weight(-flux[i], gd[i]));
    DMatrix::from_columns(&[forward, backward])
}
