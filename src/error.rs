//! Error types
//!
//! Every fallible operation in the crate returns [`ConductanceResult`]. A
//! failure aborts the whole call: no partial conductance array is ever
//! returned.

use thiserror::Error;

/// Result type used throughout the crate
pub type ConductanceResult<T> = Result<T, ConductanceError>;

/// Conductance computation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConductanceError {
    /// Property absent at its own resolution and not interpolatable
    #[error("property '{name}' not found (no direct values and no interpolation source)")]
    PropertyNotFound { name: String },

    /// Unknown transport type tag
    #[error(
        "unsupported transport type '{0}': expected one of flow, flow_power_law, diffusion, \
         taylor_aris_diffusion, dispersion, ad_dif_mig or ionic"
    )]
    UnsupportedRegime(String),

    /// Unknown discretization scheme tag
    #[error(
        "unsupported discretization scheme '{0}': expected one of upwind, hybrid, powerlaw \
         or exponential"
    )]
    UnsupportedScheme(String),

    /// A required caller parameter was not supplied
    #[error("missing parameter '{0}'")]
    MissingParameter(&'static str),

    /// Target throat does not exist in the network
    #[error("throat {throat} out of range (network has {nt} throats)")]
    ThroatOutOfRange { throat: usize, nt: usize },

    /// Throat connected to a pore that does not exist
    #[error("throat {throat} references pore {pore} (network has {np} pores)")]
    InvalidConnection { throat: usize, pore: usize, np: usize },

    /// Throat connecting a pore to itself
    #[error("throat {throat} connects pore {pore} to itself")]
    SelfLoop { throat: usize, pore: usize },

    /// Property array whose length does not match its resolution
    #[error("property '{name}' has {actual} entries, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Property name without a `pore.` or `throat.` prefix
    #[error("invalid property name '{0}': must start with 'pore.' or 'throat.'")]
    InvalidPropertyName(String),
}

impl ConductanceError {
    pub fn property_not_found(name: impl Into<String>) -> Self {
        Self::PropertyNotFound { name: name.into() }
    }

    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }
}
