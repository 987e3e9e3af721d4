//! Network topology and geometry
//!
//! A [`Network`] is the immutable graph the conductance models read: `Np`
//! pores, `Nt` throats, the ordered pore pair of every throat, and the
//! geometric properties (areas, conduit lengths) stored per element.

use nalgebra::DVector;

use crate::error::{ConductanceError, ConductanceResult};
use crate::network::{PropertyData, PropertyStore};

/// Pore network
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::Network;
///
/// // Three pores in a row: 0 - 1 - 2
/// let network = Network::new(3, vec![[0, 1], [1, 2]]).unwrap();
/// assert_eq!(network.nt(), 2);
/// assert_eq!(network.throats_of_pore(1), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    /// Throat connectivity `[pore1, pore2]`
    conns: Vec<[usize; 2]>,

    /// Incident throats of every pore, in throat order
    pore_throats: Vec<Vec<usize>>,

    /// Geometric properties
    store: PropertyStore,
}

impl Network {
    /// Create a network from its pore count and throat connections
    ///
    /// # Errors
    ///
    /// - `InvalidConnection` if a throat references a pore `>= np`
    /// - `SelfLoop` if a throat connects a pore to itself
    pub fn new(np: usize, conns: Vec<[usize; 2]>) -> ConductanceResult<Self> {
        let mut pore_throats = vec![Vec::new(); np];

        for (throat, &[p1, p2]) in conns.iter().enumerate() {
            for pore in [p1, p2] {
                if pore >= np {
                    return Err(ConductanceError::InvalidConnection { throat, pore, np });
                }
            }
            if p1 == p2 {
                return Err(ConductanceError::SelfLoop { throat, pore: p1 });
            }
            pore_throats[p1].push(throat);
            pore_throats[p2].push(throat);
        }

        let store = PropertyStore::new(np, conns.len());

        Ok(Self {
            conns,
            pore_throats,
            store,
        })
    }

    /// Number of pores
    pub fn np(&self) -> usize {
        self.pore_throats.len()
    }

    /// Number of throats
    pub fn nt(&self) -> usize {
        self.conns.len()
    }

    /// Pores of one throat
    pub fn throat_conns(&self, throat: usize) -> [usize; 2] {
        self.conns[throat]
    }

    /// Throats incident to a pore
    pub fn throats_of_pore(&self, pore: usize) -> &[usize] {
        &self.pore_throats[pore]
    }

    /// All throat indices, in order
    pub fn all_throats(&self) -> Vec<usize> {
        (0..self.nt()).collect()
    }

    /// Check that every target throat exists
    pub fn check_throats(&self, throats: &[usize]) -> ConductanceResult<()> {
        let nt = self.nt();
        match throats.iter().find(|&&t| t >= nt) {
            Some(&throat) => Err(ConductanceError::ThroatOutOfRange { throat, nt }),
            None => Ok(()),
        }
    }

    /// Set a geometric property
    pub fn set(&mut self, name: &str, data: impl Into<PropertyData>) -> ConductanceResult<()> {
        self.store.set(name, data)
    }

    /// Geometric property store
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Per-element values of a geometric property or `PropertyNotFound`
    pub fn require(&self, name: &str) -> ConductanceResult<DVector<f64>> {
        self.store.require(name)
    }
}
