//! Advection-diffusion discretization schemes
//!
//! A scheme turns the signed convective flux $Q$ through a throat and its
//! diffusive conductance $g_d$ into the coefficient $w$ that couples the
//! upstream pore to the downstream one in the transport matrix.
//!
//! With $Pe = Q / g_d$:
//!
//! | scheme        | weight                                                   |
//! |---------------|----------------------------------------------------------|
//! | `upwind`      | $g_d + \max(0, -Q)$                                      |
//! | `hybrid`      | $\max(0, \max(-Q, g_d - Q/2))$                           |
//! | `powerlaw`    | $g_d \max(0, (1 - 0.1\lvert Pe\rvert)^5) + \max(0, -Q)$  |
//! | `exponential` | $-Q / (1 - e^{Pe})$                                      |
//!
//! $Pe$ is first pushed away from zero to [`PECLET_FLOOR`] (sign preserved,
//! exact zero becomes positive) and $Q$ recomputed as $Pe \cdot g_d$.

use std::fmt;
use std::str::FromStr;

use crate::conductance::constants::PECLET_FLOOR;
use crate::error::ConductanceError;

/// Discretization scheme for convective regimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscretizationScheme {
    Upwind,
    Hybrid,
    PowerLaw,
    Exponential,
}

impl DiscretizationScheme {
    /// All schemes, in tag order
    pub const ALL: [DiscretizationScheme; 4] = [
        DiscretizationScheme::Upwind,
        DiscretizationScheme::Hybrid,
        DiscretizationScheme::PowerLaw,
        DiscretizationScheme::Exponential,
    ];

    /// Tag used at the string boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscretizationScheme::Upwind => "upwind",
            DiscretizationScheme::Hybrid => "hybrid",
            DiscretizationScheme::PowerLaw => "powerlaw",
            DiscretizationScheme::Exponential => "exponential",
        }
    }

    /// Weight for flux `q` through a throat of diffusive conductance `gd`
    ///
    /// # Example
    ///
    /// ```rust
    /// use pnm_rs::conductance::DiscretizationScheme;
    ///
    /// // No flux: pure diffusion
    /// assert_eq!(DiscretizationScheme::Upwind.weight(0.0, 2.0), 2.0);
    /// ```
    pub fn weight(&self, q: f64, gd: f64) -> f64 {
        let pe = floor_peclet(q / gd);
        let q = pe * gd;

        match self {
            DiscretizationScheme::Upwind => gd + (-q).max(0.0),
            DiscretizationScheme::Hybrid => (-q).max(gd - q / 2.0).max(0.0),
            DiscretizationScheme::PowerLaw => {
                gd * (1.0 - 0.1 * pe.abs()).powi(5).max(0.0) + (-q).max(0.0)
            }
            // -Q / (1 - e^Pe) == Q / (e^Pe - 1)
            DiscretizationScheme::Exponential => q / pe.exp_m1(),
        }
    }
}

/// Push a Péclet number away from zero, keeping its sign
///
/// Values in `[0, floor)` become `floor`, values in `(-floor, 0)` become
/// `-floor`; `-0.0` counts as zero and becomes `floor`.
pub fn floor_peclet(pe: f64) -> f64 {
    if (0.0..PECLET_FLOOR).contains(&pe) {
        PECLET_FLOOR
    } else if pe < 0.0 && pe > -PECLET_FLOOR {
        -PECLET_FLOOR
    } else {
        pe
    }
}

impl FromStr for DiscretizationScheme {
    type Err = ConductanceError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == tag)
            .ok_or_else(|| ConductanceError::UnsupportedScheme(tag.to_string()))
    }
}

impl fmt::Display for DiscretizationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
