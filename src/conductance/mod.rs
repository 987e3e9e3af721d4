//! Transport conductances
//!
//! This module turns network geometry and phase properties into the
//! coefficients a linear transport solver assembles:
//!
//! - **Regimes** ([`TransportRegime`]): what physics a conduit carries
//!   (ionic, flow, power-law flow, diffusion, Taylor-Aris diffusion,
//!   dispersion, advection-diffusion-migration)
//! - **Keys** ([`PropertyKeys`], [`ConduitKeys`]): where each input lives
//! - **Engine** ([`compute_conductance`], [`compute_directional_weights`],
//!   [`compute`]): geometry and property resolution plus the regime formulas
//! - **Schemes** ([`DiscretizationScheme`]): advection-diffusion weighting
//! - **Models** ([`GenericConductance`]): the engine as a pore-scale model
//!   that stores its result on a phase
//!
//! # Output shapes
//!
//! Conduit regimes yield one conductance per throat. The two convective
//! regimes (`dispersion`, `ad_dif_mig`) yield an `n × 2` matrix of
//! directional weights. The shapes go through separate functions, and
//! [`Conductance`] tags them when the regime is only known at run time.

pub mod constants;
pub mod engine;
pub mod geometry;
pub mod keys;
pub mod model;
pub mod properties;
pub mod regime;
pub mod scheme;

pub use engine::{
    compute, compute_conductance, compute_directional_weights, evaluate_conduit, Conductance,
    ConduitEvaluation,
};
pub use geometry::{ConduitGeometry, Segment};
pub use keys::{ConduitKeys, PropertyKeys, PropertyPair};
pub use model::{GenericConductance, ModelOutput, PoreScaleModel, THROAT_VISCOSITY_EFF};
pub use properties::{PropertyResolver, Resolved, SegmentValues};
pub use regime::{ConduitRegime, Convection, ConvectiveRegime, TransportRegime, TransportType};
pub use scheme::DiscretizationScheme;
