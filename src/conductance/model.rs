//! Pore-scale models
//!
//! A pore-scale model computes one or more phase properties from the network
//! and the current phase state. [`Phase::apply_model`](crate::network::Phase::apply_model)
//! runs a model and stores its outputs, so models can be chained: a hydraulic
//! conductance model feeds the dispersion model that reads
//! `throat.hydraulic_conductance`.
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::conductance::{ConduitKeys, GenericConductance, PropertyKeys, TransportRegime};
//! use pnm_rs::network::{Network, Phase};
//!
//! let mut network = Network::new(2, vec![[0, 1]]).unwrap();
//! network.set("pore.area", 1.0).unwrap();
//! network.set("throat.area", 1.0).unwrap();
//! for key in ConduitKeys::default().length_keys() {
//!     network.set(&key, 1.0).unwrap();
//! }
//!
//! let mut phase = Phase::new("air", &network);
//! phase.set("pore.diffusivity", 2.0e-5).unwrap();
//!
//! let regime = TransportRegime::from_tag("diffusion", &PropertyKeys::default(), None).unwrap();
//! let model = GenericConductance::new("throat.diffusive_conductance", regime);
//! phase.apply_model(&network, &model).unwrap();
//!
//! assert!(phase.contains("throat.diffusive_conductance"));
//! ```

use crate::conductance::engine::{compute_directional_weights, evaluate_conduit};
use crate::conductance::keys::ConduitKeys;
use crate::conductance::regime::TransportRegime;
use crate::error::{ConductanceError, ConductanceResult};
use crate::network::{Element, Network, Phase, PropertyData};

/// Property written by power-law conductance models
pub const THROAT_VISCOSITY_EFF: &str = "throat.viscosity_eff";

// =================================================================================================
// Model output
// =================================================================================================

/// Arrays produced by one model run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelOutput {
    /// Throats the outputs are aligned with; `None` means every throat
    pub throats: Option<Vec<usize>>,

    /// `(property name, values)` in storage order
    pub properties: Vec<(String, PropertyData)>,
}

impl ModelOutput {
    pub fn new(throats: Option<Vec<usize>>) -> Self {
        Self {
            throats,
            properties: Vec::new(),
        }
    }

    /// Append an output array
    pub fn with(mut self, name: impl Into<String>, data: impl Into<PropertyData>) -> Self {
        self.properties.push((name.into(), data.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyData> {
        self.properties
            .iter()
            .find(|(propname, _)| propname == name)
            .map(|(_, data)| data)
    }

    /// Number of output arrays
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

// =================================================================================================
// Pore-scale model trait
// =================================================================================================

/// Trait for pore-scale models
///
/// # Responsibility
///
/// Computes property arrays from a network and a phase. Does NOT store them:
/// the phase does that in [`Phase::apply_model`].
pub trait PoreScaleModel: Send + Sync {
    /// Name of the model (used in logs)
    fn name(&self) -> &str;

    /// Main property the model writes
    fn propname(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Compute the model outputs
    fn regenerate(&self, network: &Network, phase: &Phase) -> ConductanceResult<ModelOutput>;
}

// =================================================================================================
// Generic conductance
// =================================================================================================

/// Conductance model for any transport regime
///
/// Writes `propname` (a vector for conduit regimes, an `Nt × 2` matrix for
/// convective ones). The power-law regime also writes
/// [`THROAT_VISCOSITY_EFF`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenericConductance {
    propname: String,
    regime: TransportRegime,
    conduit: ConduitKeys,

    /// Target throats (`None` = every throat)
    throats: Option<Vec<usize>>,

    description: Option<String>,
}

impl GenericConductance {
    pub fn new(propname: impl Into<String>, regime: TransportRegime) -> Self {
        Self {
            propname: propname.into(),
            regime,
            conduit: ConduitKeys::default(),
            throats: None,
            description: None,
        }
    }

    /// Restrict the model to a subset of throats
    pub fn with_throats(mut self, throats: Vec<usize>) -> Self {
        self.throats = Some(throats);
        self
    }

    pub fn with_conduit_keys(mut self, conduit: ConduitKeys) -> Self {
        self.conduit = conduit;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn regime(&self) -> &TransportRegime {
        &self.regime
    }

    pub fn throats(&self) -> Option<&[usize]> {
        self.throats.as_deref()
    }

    /// Check that the output is a throat property and the geometry names are
    /// well formed
    pub fn validate(&self) -> ConductanceResult<()> {
        if Element::of(&self.propname)? != Element::Throat {
            return Err(ConductanceError::InvalidPropertyName(self.propname.clone()));
        }
        self.conduit.validate()
    }
}

impl PoreScaleModel for GenericConductance {
    fn name(&self) -> &str {
        self.regime.transport_type().as_str()
    }

    fn propname(&self) -> &str {
        &self.propname
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn regenerate(&self, network: &Network, phase: &Phase) -> ConductanceResult<ModelOutput> {
        self.validate()?;
        let targets = match &self.throats {
            Some(throats) => throats.clone(),
            None => network.all_throats(),
        };
        let output = ModelOutput::new(self.throats.clone());

        match &self.regime {
            TransportRegime::Conduit(regime) => {
                let evaluation = evaluate_conduit(network, phase, &self.conduit, regime, &targets)?;
                let output = output.with(self.propname.as_str(), evaluation.conductance);
                Ok(match evaluation.throat_viscosity {
                    Some(mu) => output.with(THROAT_VISCOSITY_EFF, mu),
                    None => output,
                })
            }
            TransportRegime::Convective(regime) => {
                let weights = compute_directional_weights(network, phase, &self.conduit, regime, &targets)?;
                Ok(output.with(self.propname.as_str(), weights))
            }
        }
    }
}
