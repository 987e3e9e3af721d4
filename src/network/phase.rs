//! Phase: physical properties of a fluid or material
//!
//! A phase stores thermophysical properties (diffusivity, viscosity,
//! temperature, ...) and the results of pore-scale models (conductances) at
//! pore or throat resolution. A property may be defined at only one
//! resolution; [`Phase::interpolate`] estimates it at the other one.

use nalgebra::DVector;

use crate::conductance::model::PoreScaleModel;
use crate::error::{ConductanceError, ConductanceResult};
use crate::network::{Element, Network, PropertyData, PropertyStore};

/// Phase property store bound to a network's dimensions
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::{Network, Phase};
///
/// let network = Network::new(3, vec![[0, 1], [1, 2]]).unwrap();
/// let mut water = Phase::new("water", &network);
/// water.set("pore.temperature", 298.0).unwrap();
///
/// // Throat temperature estimated from the two pores of each throat
/// let t = water.interpolate(&network, "pore.temperature").unwrap();
/// assert_eq!(t.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Phase {
    name: String,
    store: PropertyStore,
}

impl Phase {
    /// Create an empty phase sized for `network`
    pub fn new(name: impl Into<String>, network: &Network) -> Self {
        Self {
            name: name.into(),
            store: PropertyStore::new(network.np(), network.nt()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a property
    pub fn set(&mut self, name: &str, data: impl Into<PropertyData>) -> ConductanceResult<()> {
        self.store.set(name, data)
    }

    /// Per-element values of a property, if stored
    pub fn get(&self, name: &str) -> Option<DVector<f64>> {
        self.store.vector(name)
    }

    /// Raw stored data (including matrices)
    pub fn get_data(&self, name: &str) -> Option<&PropertyData> {
        self.store.get(name)
    }

    /// Per-element values or `PropertyNotFound`
    pub fn require(&self, name: &str) -> ConductanceResult<DVector<f64>> {
        self.store.require(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Estimate a property at the complementary resolution
    ///
    /// - `pore.*` → throat values: mean of the two pores of each throat
    /// - `throat.*` → pore values: mean over the incident throats of each
    ///   pore; pores without throats get `NaN`
    ///
    /// # Errors
    ///
    /// `PropertyNotFound` if `propname` is not stored, `InvalidPropertyName`
    /// if it has no resolution prefix.
    pub fn interpolate(&self, network: &Network, propname: &str) -> ConductanceResult<DVector<f64>> {
        let element = Element::of(propname)?;
        let values = self.require(propname)?;

        let interpolated = match element {
            Element::Pore => DVector::from_fn(network.nt(), |t, _| {
                let [p1, p2] = network.throat_conns(t);
                0.5 * (values[p1] + values[p2])
            }),
            Element::Throat => DVector::from_fn(network.np(), |p, _| {
                let throats = network.throats_of_pore(p);
                if throats.is_empty() {
                    f64::NAN
                } else {
                    throats.iter().map(|&t| values[t]).sum::<f64>() / throats.len() as f64
                }
            }),
        };

        Ok(interpolated)
    }

    /// Run a pore-scale model and store its outputs
    ///
    /// Outputs covering a subset of throats are scattered into full-length
    /// arrays; untargeted entries of a new array are `NaN`.
    pub fn apply_model(
        &mut self,
        network: &Network,
        model: &dyn PoreScaleModel,
    ) -> ConductanceResult<()> {
        let output = model.regenerate(network, self)?;
        log::debug!(
            "phase '{}': storing {} output(s) of model '{}'",
            self.name,
            output.len(),
            model.name()
        );

        for (propname, data) in output.properties {
            match (&output.throats, data) {
                (Some(throats), PropertyData::Vector(values)) => {
                    self.store.set_subset(&propname, throats, &values)?;
                }
                (Some(throats), PropertyData::Matrix(values)) => {
                    if throats.len() != network.nt() || throats.iter().enumerate().any(|(i, &t)| i != t) {
                        return Err(ConductanceError::size_mismatch(
                            propname,
                            network.nt(),
                            throats.len(),
                        ));
                    }
                    self.store.set(&propname, values)?;
                }
                (_, data) => self.store.set(&propname, data)?,
            }
        }
        Ok(())
    }
}
