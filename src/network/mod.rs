//! Pore network data model
//!
//! This module provides the inputs the conductance models read:
//!
//! - **Network**: pores, throats and their connectivity, plus geometric
//!   properties (areas, conduit lengths)
//! - **Phase**: physical properties of the fluid or material occupying the
//!   network, with interpolation between pore and throat resolution
//! - **PropertyStore / PropertyData**: named arrays at pore or throat
//!   resolution
//!
//! # Naming
//!
//! A property name starts with `pore.` or `throat.`, which fixes how many
//! entries it holds (`Np` or `Nt`). Conduit-segment arrays use three
//! throat-indexed names with the suffixes `.pore1`, `.throat` and `.pore2`.
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::network::{Network, Phase};
//!
//! let mut network = Network::new(2, vec![[0, 1]]).unwrap();
//! network.set("pore.area", 1.0).unwrap();
//!
//! let mut phase = Phase::new("water", &network);
//! phase.set("pore.diffusivity", 2.0e-9).unwrap();
//! assert!(phase.get("throat.diffusivity").is_none());
//! ```

pub mod data;
pub mod phase;
pub mod store;
pub mod topology;

pub use data::PropertyData;
pub use phase::Phase;
pub use store::{Element, PropertyStore};
pub use topology::Network;
