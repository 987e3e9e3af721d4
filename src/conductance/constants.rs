//! Physical and numerical constants used by the regime formulas

/// Faraday constant $F$ **\[C/mol\]**
pub const FARADAY: f64 = 96485.3329;

/// Molar gas constant $R$ **\[J/(mol·K)\]**
pub const GAS_CONSTANT: f64 = 8.3145;

/// Lower bound of the power-law apparent viscosity **\[Pa·s\]**
pub const VISCOSITY_MIN: f64 = 1e-8;

/// Upper bound of the power-law apparent viscosity **\[Pa·s\]**
pub const VISCOSITY_MAX: f64 = 1e4;

/// Smallest Péclet magnitude fed to a discretization scheme
///
/// Keeps the exponential scheme finite at zero flux.
pub const PECLET_FLOOR: f64 = 1e-10;

/// Taylor-Aris dispersion coefficient for a cylindrical tube: $D_{eff} = D (1 + Pe^2/192)$
pub const TAYLOR_ARIS_FACTOR: f64 = 192.0;

/// Hagen-Poiseuille prefactor $8\pi$ for a cylindrical conduit
pub const POISEUILLE_FACTOR: f64 = 8.0 * std::f64::consts::PI;
