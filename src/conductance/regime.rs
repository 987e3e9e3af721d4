//! Transport regimes
//!
//! # Design
//!
//! A regime is a closed set of variants, each carrying exactly the property
//! names its formula reads. Regimes are split by output shape:
//!
//! - [`ConduitRegime`]: one conductance per conduit (series combination of
//!   the three segments)
//! - [`ConvectiveRegime`]: an `n × 2` matrix of directional advection-diffusion
//!   weights
//!
//! [`TransportRegime`] wraps both for callers that pick the regime from a
//! string tag at run time ([`TransportRegime::from_tag`]).

use std::fmt;
use std::str::FromStr;

use crate::conductance::keys::{PropertyKeys, PropertyPair};
use crate::conductance::scheme::DiscretizationScheme;
use crate::error::{ConductanceError, ConductanceResult};

// =================================================================================================
// TransportType: string tags
// =================================================================================================

/// Regime tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Ionic,
    Flow,
    FlowPowerLaw,
    Diffusion,
    TaylorArisDiffusion,
    Dispersion,
    AdDifMig,
}

impl TransportType {
    pub const ALL: [TransportType; 7] = [
        TransportType::Ionic,
        TransportType::Flow,
        TransportType::FlowPowerLaw,
        TransportType::Diffusion,
        TransportType::TaylorArisDiffusion,
        TransportType::Dispersion,
        TransportType::AdDifMig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Ionic => "ionic",
            TransportType::Flow => "flow",
            TransportType::FlowPowerLaw => "flow_power_law",
            TransportType::Diffusion => "diffusion",
            TransportType::TaylorArisDiffusion => "taylor_aris_diffusion",
            TransportType::Dispersion => "dispersion",
            TransportType::AdDifMig => "ad_dif_mig",
        }
    }

    /// Whether the regime produces directional weights
    pub fn is_directional(&self) -> bool {
        matches!(self, TransportType::Dispersion | TransportType::AdDifMig)
    }
}

impl FromStr for TransportType {
    type Err = ConductanceError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| ConductanceError::UnsupportedRegime(tag.to_string()))
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =================================================================================================
// Conduit regimes
// =================================================================================================

/// Regimes producing one conductance per conduit
#[derive(Debug, Clone, PartialEq)]
pub enum ConduitRegime {
    /// Purely geometric resistance in series; reads no phase property
    Ionic,

    /// Hagen-Poiseuille: $g = A^2 / (8\pi D L)$
    ///
    /// `diffusivity` plays the role of a flow resistance factor here.
    Flow { diffusivity: PropertyPair },

    /// Power-law (non-Newtonian) fluid with pressure-dependent apparent viscosity
    FlowPowerLaw {
        consistency: PropertyPair,
        flow_index: PropertyPair,
        pore_pressure: String,
    },

    /// Fickian diffusion: $g = D A / L$
    Diffusion { diffusivity: PropertyPair },

    /// Diffusion enhanced by Taylor-Aris dispersion
    TaylorArisDiffusion {
        diffusivity: PropertyPair,
        pore_pressure: String,
        throat_hydraulic_conductance: String,
    },
}

impl ConduitRegime {
    pub fn transport_type(&self) -> TransportType {
        match self {
            ConduitRegime::Ionic => TransportType::Ionic,
            ConduitRegime::Flow { .. } => TransportType::Flow,
            ConduitRegime::FlowPowerLaw { .. } => TransportType::FlowPowerLaw,
            ConduitRegime::Diffusion { .. } => TransportType::Diffusion,
            ConduitRegime::TaylorArisDiffusion { .. } => TransportType::TaylorArisDiffusion,
        }
    }

    pub fn flow(keys: &PropertyKeys) -> Self {
        ConduitRegime::Flow {
            diffusivity: keys.diffusivity.clone(),
        }
    }

    pub fn flow_power_law(keys: &PropertyKeys) -> Self {
        ConduitRegime::FlowPowerLaw {
            consistency: keys.consistency.clone(),
            flow_index: keys.flow_index.clone(),
            pore_pressure: keys.pore_pressure.clone(),
        }
    }

    pub fn diffusion(keys: &PropertyKeys) -> Self {
        ConduitRegime::Diffusion {
            diffusivity: keys.diffusivity.clone(),
        }
    }

    pub fn taylor_aris_diffusion(keys: &PropertyKeys) -> Self {
        ConduitRegime::TaylorArisDiffusion {
            diffusivity: keys.diffusivity.clone(),
            pore_pressure: keys.pore_pressure.clone(),
            throat_hydraulic_conductance: keys.throat_hydraulic_conductance.clone(),
        }
    }
}

// =================================================================================================
// Convective regimes
// =================================================================================================

/// Inputs shared by the convective regimes
#[derive(Debug, Clone, PartialEq)]
pub struct Convection {
    pub pore_pressure: String,
    pub throat_hydraulic_conductance: String,
    pub throat_diffusive_conductance: String,
    pub scheme: DiscretizationScheme,
}

impl Convection {
    pub fn new(keys: &PropertyKeys, scheme: DiscretizationScheme) -> Self {
        Self {
            pore_pressure: keys.pore_pressure.clone(),
            throat_hydraulic_conductance: keys.throat_hydraulic_conductance.clone(),
            throat_diffusive_conductance: keys.throat_diffusive_conductance.clone(),
            scheme,
        }
    }
}

/// Regimes producing directional advection-diffusion weights
#[derive(Debug, Clone, PartialEq)]
pub enum ConvectiveRegime {
    /// Advection-diffusion
    Dispersion(Convection),

    /// Advection-diffusion-migration of a charged species
    AdDifMig {
        convection: Convection,
        diffusivity: PropertyPair,
        temperature: PropertyPair,
        pore_potential: String,
        throat_valence: String,
    },
}

impl ConvectiveRegime {
    pub fn transport_type(&self) -> TransportType {
        match self {
            ConvectiveRegime::Dispersion(_) => TransportType::Dispersion,
            ConvectiveRegime::AdDifMig { .. } => TransportType::AdDifMig,
        }
    }

    pub fn convection(&self) -> &Convection {
        match self {
            ConvectiveRegime::Dispersion(convection) => convection,
            ConvectiveRegime::AdDifMig { convection, .. } => convection,
        }
    }

    pub fn dispersion(keys: &PropertyKeys, scheme: DiscretizationScheme) -> Self {
        ConvectiveRegime::Dispersion(Convection::new(keys, scheme))
    }

    pub fn ad_dif_mig(keys: &PropertyKeys, scheme: DiscretizationScheme) -> Self {
        ConvectiveRegime::AdDifMig {
            convection: Convection::new(keys, scheme),
            diffusivity: keys.diffusivity.clone(),
            temperature: keys.temperature.clone(),
            pore_potential: keys.pore_potential.clone(),
            throat_valence: keys.throat_valence.clone(),
        }
    }
}

// =================================================================================================
// TransportRegime
// =================================================================================================

/// Any regime, tagged by output shape
#[derive(Debug, Clone, PartialEq)]
pub enum TransportRegime {
    Conduit(ConduitRegime),
    Convective(ConvectiveRegime),
}

impl TransportRegime {
    /// Build a regime from its string tag
    ///
    /// `scheme` is required by `dispersion` and `ad_dif_mig` and ignored by
    /// the other regimes.
    ///
    /// # Errors
    ///
    /// - `UnsupportedRegime` for an unknown tag
    /// - `MissingParameter("s_scheme")` for a convective tag without scheme
    /// - `UnsupportedScheme` for an unknown scheme tag
    ///
    /// # Example
    ///
    /// ```rust
    /// use pnm_rs::conductance::{PropertyKeys, TransportRegime};
    ///
    /// let keys = PropertyKeys::default();
    /// let regime = TransportRegime::from_tag("dispersion", &keys, Some("powerlaw")).unwrap();
    /// assert!(regime.is_directional());
    ///
    /// assert!(TransportRegime::from_tag("bogus", &keys, None).is_err());
    /// ```
    pub fn from_tag(tag: &str, keys: &PropertyKeys, scheme: Option<&str>) -> ConductanceResult<Self> {
        let transport_type: TransportType = tag.parse()?;

        if let (false, Some(scheme)) = (transport_type.is_directional(), scheme) {
            log::debug!("scheme '{scheme}' ignored by non-convective regime '{transport_type}'");
        }

        let regime: TransportRegime = match transport_type {
            TransportType::Ionic => ConduitRegime::Ionic.into(),
            TransportType::Flow => ConduitRegime::flow(keys).into(),
            TransportType::FlowPowerLaw => ConduitRegime::flow_power_law(keys).into(),
            TransportType::Diffusion => ConduitRegime::diffusion(keys).into(),
            TransportType::TaylorArisDiffusion => ConduitRegime::taylor_aris_diffusion(keys).into(),
            TransportType::Dispersion => {
                ConvectiveRegime::dispersion(keys, parse_scheme(scheme)?).into()
            }
            TransportType::AdDifMig => {
                ConvectiveRegime::ad_dif_mig(keys, parse_scheme(scheme)?).into()
            }
        };
        Ok(regime)
    }

    pub fn transport_type(&self) -> TransportType {
        match self {
            TransportRegime::Conduit(regime) => regime.transport_type(),
            TransportRegime::Convective(regime) => regime.transport_type(),
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, TransportRegime::Convective(_))
    }
}

fn parse_scheme(scheme: Option<&str>) -> ConductanceResult<DiscretizationScheme> {
    scheme
        .ok_or(ConductanceError::MissingParameter("s_scheme"))?
        .parse()
}

impl From<ConduitRegime> for TransportRegime {
    fn from(regime: ConduitRegime) -> Self {
        TransportRegime::Conduit(regime)
    }
}

impl From<ConvectiveRegime> for TransportRegime {
    fn from(regime: ConvectiveRegime) -> Self {
        TransportRegime::Convective(regime)
    }
}
