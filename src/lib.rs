//! pnm-rs: Pore Network Transport Conductances
//!
//! Computes per-conduit transport conductances on a pore network: the
//! coefficients a linear transport solver needs to model flow, diffusion,
//! dispersion and electromigration through a porous medium.
//!
//! # Architecture
//!
//! pnm-rs is built on two core principles:
//!
//! 1. **Separation of Data and Physics**
//!    - The network and phase hold named arrays (what is known)
//!    - Conductance regimes turn them into coefficients (what is computed)
//!
//! 2. **Closed, Typed Regimes**
//!    - Each regime carries only the property names it reads
//!    - Convective regimes produce directional weights through a separate
//!      function, so output shapes cannot be confused
//!
//! # Quick Start
//!
//! ```rust
//! use pnm_rs::prelude::*;
//! use nalgebra::DVector;
//!
//! # fn main() -> Result<(), ConductanceError> {
//! // 1. Network: 3 pores in a row
//! let mut network = Network::new(3, vec![[0, 1], [1, 2]])?;
//! network.set("pore.area", 1.0e-12)?;
//! network.set("throat.area", 2.5e-13)?;
//! for key in ConduitKeys::default().length_keys() {
//!     network.set(&key, 1.0e-6)?;
//! }
//!
//! // 2. Phase: water with a pressure gradient
//! let mut phase = Phase::new("water", &network);
//! phase.set("pore.viscosity", 1.0e-3)?;
//! phase.set("pore.diffusivity", 2.0e-9)?;
//! phase.set("pore.pressure", DVector::from_vec(vec![2.0, 1.0, 0.0]))?;
//!
//! // 3. Hydraulic and diffusive conductances, then dispersion weights
//! let keys = PropertyKeys::default();
//! let hydraulic = GenericConductance::new(
//!     "throat.hydraulic_conductance",
//!     ConduitRegime::flow(&keys.clone().with_diffusivity("pore.viscosity", "throat.viscosity")).into(),
//! );
//! let diffusive = GenericConductance::new(
//!     "throat.diffusive_conductance",
//!     TransportRegime::from_tag("diffusion", &keys, None)?,
//! );
//! let dispersion = GenericConductance::new(
//!     "throat.ad_dif_conductance",
//!     TransportRegime::from_tag("dispersion", &keys, Some("powerlaw"))?,
//! );
//! for model in [&hydraulic, &diffusive, &dispersion] {
//!     phase.apply_model(&network, model)?;
//! }
//!
//! assert!(phase.contains("throat.ad_dif_conductance"));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`network`]: Network, phase and property storage
//! - [`conductance`]: Regimes, schemes and the conductance engine
//! - [`error`]: Error type shared by every fallible operation
//! - [`execution`]: Parallel execution threshold

pub mod conductance;
pub mod error;
pub mod execution;
pub mod network;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pnm_rs::prelude::*;
    //! ```
    pub use crate::conductance::{
        compute, compute_conductance, compute_directional_weights, Conductance, ConduitKeys,
        ConduitRegime, ConvectiveRegime, DiscretizationScheme, GenericConductance, PoreScaleModel,
        PropertyKeys, TransportRegime,
    };
    pub use crate::error::{ConductanceError, ConductanceResult};
    pub use crate::network::{Network, Phase, PropertyData};
}
