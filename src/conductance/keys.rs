//! Property key configuration
//!
//! Conductance models never hard-code where their inputs live: every array
//! is looked up by a property name supplied by the caller. The defaults
//! follow the usual pore-network naming (`pore.diffusivity`,
//! `throat.hydraulic_conductance`, ...), and any of them can be overridden.
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::conductance::PropertyKeys;
//!
//! let keys = PropertyKeys::default()
//!     .with_diffusivity("pore.thermal_conductivity", "throat.thermal_conductivity");
//! assert!(keys.validate().is_ok());
//! ```

use crate::error::{ConductanceError, ConductanceResult};
use crate::network::Element;

// =================================================================================================
// PropertyPair: one physical property at both resolutions
// =================================================================================================

/// Pore and throat names of the same physical property
///
/// Either may be absent from the phase; the missing one is interpolated from
/// the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPair {
    pub pore: String,
    pub throat: String,
}

impl PropertyPair {
    pub fn new(pore: impl Into<String>, throat: impl Into<String>) -> Self {
        Self {
            pore: pore.into(),
            throat: throat.into(),
        }
    }

    /// Name at a resolution
    pub fn at(&self, element: Element) -> &str {
        match element {
            Element::Pore => &self.pore,
            Element::Throat => &self.throat,
        }
    }

    /// Check that each name carries the right prefix
    pub fn validate(&self) -> ConductanceResult<()> {
        expect_element(&self.pore, Element::Pore)?;
        expect_element(&self.throat, Element::Throat)
    }
}

/// `InvalidPropertyName` unless `name` is stored at `element` resolution
pub(crate) fn expect_element(name: &str, element: Element) -> ConductanceResult<()> {
    if Element::of(name)? == element {
        Ok(())
    } else {
        Err(ConductanceError::InvalidPropertyName(name.to_string()))
    }
}

// =================================================================================================
// ConduitKeys: geometry shared by every regime
// =================================================================================================

/// Names of the conduit geometry arrays
///
/// `conduit_lengths` and `conduit_shape_factors` are prefixes: the three
/// segment arrays are `<prefix>.pore1`, `<prefix>.throat` and `<prefix>.pore2`.
/// Areas and lengths are read from the network, shape factors from the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConduitKeys {
    /// Pore cross-sectional area (`pore.*`)
    pub pore_area: String,

    /// Throat cross-sectional area (`throat.*`)
    pub throat_area: String,

    /// Prefix of the three segment length arrays (`throat.*`)
    pub conduit_lengths: String,

    /// Prefix of the three segment shape factor arrays (`throat.*`)
    pub conduit_shape_factors: String,
}

impl Default for ConduitKeys {
    fn default() -> Self {
        Self {
            pore_area: "pore.area".to_string(),
            throat_area: "throat.area".to_string(),
            conduit_lengths: "throat.conduit_lengths".to_string(),
            conduit_shape_factors: "throat.conduit_shape_factors".to_string(),
        }
    }
}

impl ConduitKeys {
    /// Names of the three segment arrays of a conduit prefix
    pub fn segments(prefix: &str) -> [String; 3] {
        [
            format!("{prefix}.pore1"),
            format!("{prefix}.throat"),
            format!("{prefix}.pore2"),
        ]
    }

    pub fn length_keys(&self) -> [String; 3] {
        Self::segments(&self.conduit_lengths)
    }

    pub fn shape_factor_keys(&self) -> [String; 3] {
        Self::segments(&self.conduit_shape_factors)
    }

    pub fn validate(&self) -> ConductanceResult<()> {
        expect_element(&self.pore_area, Element::Pore)?;
        expect_element(&self.throat_area, Element::Throat)?;
        expect_element(&self.conduit_lengths, Element::Throat)?;
        expect_element(&self.conduit_shape_factors, Element::Throat)
    }
}

// =================================================================================================
// PropertyKeys: every input a regime can ask for
// =================================================================================================

/// Names of every phase property a transport regime can read
///
/// Regimes built with [`TransportRegime::from_tag`](crate::conductance::TransportRegime::from_tag)
/// copy the names they need out of this configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKeys {
    /// Geometry
    pub conduit: ConduitKeys,

    /// Diffusivity, or the flow resistance factor in the `flow` regime
    pub diffusivity: PropertyPair,

    /// Power-law consistency index $C$
    pub consistency: PropertyPair,

    /// Power-law flow index $n$
    pub flow_index: PropertyPair,

    pub temperature: PropertyPair,

    pub pore_pressure: String,

    /// Electric potential
    pub pore_potential: String,

    pub throat_valence: String,

    pub throat_hydraulic_conductance: String,

    pub throat_diffusive_conductance: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            conduit: ConduitKeys::default(),
            diffusivity: PropertyPair::new("pore.diffusivity", "throat.diffusivity"),
            consistency: PropertyPair::new("pore.consistency", "throat.consistency"),
            flow_index: PropertyPair::new("pore.flow_index", "throat.flow_index"),
            temperature: PropertyPair::new("pore.temperature", "throat.temperature"),
            pore_pressure: "pore.pressure".to_string(),
            pore_potential: "pore.potential".to_string(),
            throat_valence: "throat.valence".to_string(),
            throat_hydraulic_conductance: "throat.hydraulic_conductance".to_string(),
            throat_diffusive_conductance: "throat.diffusive_conductance".to_string(),
        }
    }
}

impl PropertyKeys {
    pub fn with_conduit(mut self, conduit: ConduitKeys) -> Self {
        self.conduit = conduit;
        self
    }

    pub fn with_diffusivity(mut self, pore: impl Into<String>, throat: impl Into<String>) -> Self {
        self.diffusivity = PropertyPair::new(pore, throat);
        self
    }

    pub fn with_consistency(mut self, pore: impl Into<String>, throat: impl Into<String>) -> Self {
        self.consistency = PropertyPair::new(pore, throat);
        self
    }

    pub fn with_flow_index(mut self, pore: impl Into<String>, throat: impl Into<String>) -> Self {
        self.flow_index = PropertyPair::new(pore, throat);
        self
    }

    pub fn with_temperature(mut self, pore: impl Into<String>, throat: impl Into<String>) -> Self {
        self.temperature = PropertyPair::new(pore, throat);
        self
    }

    pub fn with_pore_pressure(mut self, name: impl Into<String>) -> Self {
        self.pore_pressure = name.into();
        self
    }

    pub fn with_pore_potential(mut self, name: impl Into<String>) -> Self {
        self.pore_potential = name.into();
        self
    }

    pub fn with_throat_valence(mut self, name: impl Into<String>) -> Self {
        self.throat_valence = name.into();
        self
    }

    pub fn with_hydraulic_conductance(mut self, name: impl Into<String>) -> Self {
        self.throat_hydraulic_conductance = name.into();
        self
    }

    pub fn with_diffusive_conductance(mut self, name: impl Into<String>) -> Self {
        self.throat_diffusive_conductance = name.into();
        self
    }

    /// Check every name against its expected resolution
    pub fn validate(&self) -> ConductanceResult<()> {
        self.conduit.validate()?;
        for pair in [&self.diffusivity, &self.consistency, &self.flow_index, &self.temperature] {
            pair.validate()?;
        }
        expect_element(&self.pore_pressure, Element::Pore)?;
        expect_element(&self.pore_potential, Element::Pore)?;
        expect_element(&self.throat_valence, Element::Throat)?;
        expect_element(&self.throat_hydraulic_conductance, Element::Throat)?;
        expect_element(&self.throat_diffusive_conductance, Element::Throat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PropertyKeys::default().validate().is_ok());
        assert!(ConduitKeys::default().validate().is_ok());
    }

    #[test]
    fn test_segment_names() {
        let keys = ConduitKeys::default();
        assert_eq!(
            keys.length_keys(),
            [
                "throat.conduit_lengths.pore1".to_string(),
                "throat.conduit_lengths.throat".to_string(),
                "throat.conduit_lengths.pore2".to_string(),
            ]
        );
        assert_eq!(keys.shape_factor_keys()[1], "throat.conduit_shape_factors.throat");
    }

    #[test]
    fn test_swapped_resolution_is_rejected() {
        let keys = PropertyKeys::default().with_pore_pressure("throat.pressure");
        assert_eq!(
            keys.validate().unwrap_err(),
            ConductanceError::InvalidPropertyName("throat.pressure".to_string())
        );

        let pair = PropertyPair::new("throat.diffusivity", "pore.diffusivity");
        assert!(pair.validate().is_err());
    }

    #[test]
    fn test_missing_prefix_is_rejected() {
        let keys = PropertyKeys::default().with_diffusive_conductance("gd");
        assert_eq!(
            keys.validate().unwrap_err(),
            ConductanceError::InvalidPropertyName("gd".to_string())
        );
    }

    #[test]
    fn test_pair_lookup() {
        let pair = PropertyPair::new("pore.a", "throat.a");
        assert_eq!(pair.at(Element::Pore), "pore.a");
        assert_eq!(pair.at(Element::Throat), "throat.a");
    }
}
