//! Phase property resolution
//!
//! Regime formulas need physical properties at a specific resolution: throat
//! values for the throat segment, pore values for the two half-pore segments.
//! A phase may store a property at one resolution only; the resolver then
//! interpolates it from the other one.
//!
//! ```text
//! requested pore.D ── stored? ──yes──► Found
//!                        │
//!                        no ── throat.D stored? ──yes──► Interpolated
//!                                     │
//!                                     no ──► Missing ──► PropertyNotFound
//! ```

use nalgebra::DVector;

use crate::conductance::geometry::ConduitGeometry;
use crate::conductance::keys::{expect_element, ConduitKeys, PropertyPair};
use crate::error::{ConductanceError, ConductanceResult};
use crate::network::{Element, Network, Phase};

/// Outcome of a property lookup at one resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Stored at the requested resolution
    Found(DVector<f64>),

    /// Interpolated from the complementary resolution
    Interpolated(DVector<f64>),

    /// Absent at both resolutions
    Missing,
}

impl Resolved {
    /// Values, or `PropertyNotFound` naming `name`
    pub fn into_result(self, name: &str) -> ConductanceResult<DVector<f64>> {
        match self {
            Resolved::Found(values) | Resolved::Interpolated(values) => Ok(values),
            Resolved::Missing => Err(ConductanceError::property_not_found(name)),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }
}

/// Property values on the three segments of each conduit
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentValues {
    pub pore1: DVector<f64>,
    pub throat: DVector<f64>,
    pub pore2: DVector<f64>,
}

impl SegmentValues {
    /// Same value on every segment of `count` conduits
    pub fn uniform(count: usize, value: f64) -> Self {
        let values = DVector::from_element(count, value);
        Self {
            pore1: values.clone(),
            throat: values.clone(),
            pore2: values,
        }
    }

    /// Values in `[pore1, throat, pore2]` order
    pub fn as_array(&self) -> [&DVector<f64>; 3] {
        [&self.pore1, &self.throat, &self.pore2]
    }
}

/// Read-only view resolving phase properties against a network
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'a> {
    network: &'a Network,
    phase: &'a Phase,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(network: &'a Network, phase: &'a Phase) -> Self {
        Self { network, phase }
    }

    /// Full-length array of a property at `element` resolution
    ///
    /// Returns [`Resolved::Missing`] rather than an error when neither
    /// resolution is stored; callers decide whether that is fatal.
    pub fn resolve(&self, pair: &PropertyPair, element: Element) -> ConductanceResult<Resolved> {
        pair.validate()?;
        let direct = pair.at(element);
        if let Some(values) = self.phase.get(direct) {
            return Ok(Resolved::Found(values));
        }

        let source = pair.at(element.complement());
        if !self.phase.contains(source) {
            return Ok(Resolved::Missing);
        }

        log::debug!(
            "phase '{}': '{direct}' not stored, interpolating from '{source}'",
            self.phase.name()
        );
        Ok(Resolved::Interpolated(self.phase.interpolate(self.network, source)?))
    }

    /// Full-length array of a property at `element` resolution
    ///
    /// # Errors
    ///
    /// `PropertyNotFound` naming the requested resolution if the property is
    /// stored at neither.
    pub fn require(&self, pair: &PropertyPair, element: Element) -> ConductanceResult<DVector<f64>> {
        self.resolve(pair, element)?.into_result(pair.at(element))
    }

    /// Values of a paired property on the segments of each conduit
    ///
    /// The throat segment reads the throat resolution, the two half-pore
    /// segments read the pore resolution.
    pub fn segment_values(
        &self,
        pair: &PropertyPair,
        geometry: &ConduitGeometry,
    ) -> ConductanceResult<SegmentValues> {
        let throat = geometry.at_throats(&self.require(pair, Element::Throat)?);
        let [pore1, pore2] = geometry.at_pores(&self.require(pair, Element::Pore)?);
        Ok(SegmentValues {
            pore1,
            throat,
            pore2,
        })
    }

    /// Throat-resolution values of a paired property at each conduit
    pub fn throat_values(
        &self,
        pair: &PropertyPair,
        geometry: &ConduitGeometry,
    ) -> ConductanceResult<DVector<f64>> {
        Ok(geometry.at_throats(&self.require(pair, Element::Throat)?))
    }

    /// Single-resolution property at each conduit's throat
    ///
    /// # Errors
    ///
    /// - `InvalidPropertyName` if `name` is not a throat property
    /// - `PropertyNotFound` if `name` is not stored; no interpolation is tried
    pub fn throat_only(&self, name: &str, geometry: &ConduitGeometry) -> ConductanceResult<DVector<f64>> {
        expect_element(name, Element::Throat)?;
        Ok(geometry.at_throats(&self.phase.require(name)?))
    }

    /// Single-resolution pore property, full length
    pub fn pore_only(&self, name: &str) -> ConductanceResult<DVector<f64>> {
        expect_element(name, Element::Pore)?;
        self.phase.require(name)
    }

    /// Conduit shape factors, or `1.0` on every segment if any of the three
    /// arrays is absent
    pub fn shape_factors(&self, keys: &ConduitKeys, geometry: &ConduitGeometry) -> SegmentValues {
        let [k1, kt, k2] = keys.shape_factor_keys();
        match (self.phase.get(&k1), self.phase.get(&kt), self.phase.get(&k2)) {
            (Some(sf1), Some(sft), Some(sf2)) => SegmentValues {
                pore1: geometry.at_throats(&sf1),
                throat: geometry.at_throats(&sft),
                pore2: geometry.at_throats(&sf2),
            },
            _ => {
                log::debug!(
                    "phase '{}': no '{}.*' arrays, using unit shape factors",
                    self.phase.name(),
                    keys.conduit_shape_factors
                );
                SegmentValues::uniform(geometry.len(), 1.0)
            }
        }
    }
}
