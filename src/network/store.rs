//! Named property storage
//!
//! Properties are keyed by dotted names whose prefix fixes their resolution:
//! `pore.diameter` holds one entry per pore, `throat.area` one per throat.
//! Conduit length and shape factor arrays use a three-part suffix
//! (`throat.conduit_lengths.pore1`, `.throat`, `.pore2`) and stay
//! throat-indexed.

use std::collections::HashMap;
use std::fmt;

use nalgebra::DVector;

use crate::error::{ConductanceError, ConductanceResult};
use crate::network::PropertyData;

// =================================================================================================
// Element (resolution of a property)
// =================================================================================================

/// Network element a property is defined on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Pore,
    Throat,
}

impl Element {
    /// Resolution of a property name, from its prefix
    pub fn of(name: &str) -> ConductanceResult<Self> {
        if name.starts_with("pore.") {
            Ok(Element::Pore)
        } else if name.starts_with("throat.") {
            Ok(Element::Throat)
        } else {
            Err(ConductanceError::InvalidPropertyName(name.to_string()))
        }
    }

    /// The other resolution
    pub fn complement(self) -> Self {
        match self {
            Element::Pore => Element::Throat,
            Element::Throat => Element::Pore,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Element::Pore => "pore",
            Element::Throat => "throat",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// =================================================================================================
// Property store
// =================================================================================================

/// Dictionary of named properties sized for `Np` pores and `Nt` throats
///
/// The store validates lengths on insertion, so every stored vector or matrix
/// has exactly one entry (row) per element of its resolution.
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::{PropertyStore, PropertyData};
///
/// let mut store = PropertyStore::new(3, 2);
/// store.set("pore.temperature", PropertyData::from_scalar(298.0)).unwrap();
/// assert_eq!(store.vector("pore.temperature").unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyStore {
    np: usize,
    nt: usize,
    properties: HashMap<String, PropertyData>,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new(np: usize, nt: usize) -> Self {
        Self {
            np,
            nt,
            properties: HashMap::new(),
        }
    }

    /// Number of entries expected at a resolution
    pub fn count(&self, element: Element) -> usize {
        match element {
            Element::Pore => self.np,
            Element::Throat => self.nt,
        }
    }

    /// Set a property, checking its name and length
    pub fn set(&mut self, name: &str, data: impl Into<PropertyData>) -> ConductanceResult<()> {
        let data = data.into();
        let expected = self.count(Element::of(name)?);
        if !data.fits(expected) {
            return Err(ConductanceError::size_mismatch(name, expected, data.len()));
        }
        self.properties.insert(name.to_string(), data);
        Ok(())
    }

    /// Write `values` at `indices` of a full-resolution vector property
    ///
    /// An existing vector is updated in place; otherwise (absent, scalar or
    /// matrix) a new vector filled with `NaN` is created first.
    pub fn set_subset(
        &mut self,
        name: &str,
        indices: &[usize],
        values: &DVector<f64>,
    ) -> ConductanceResult<()> {
        let expected = self.count(Element::of(name)?);
        if indices.len() != values.len() {
            return Err(ConductanceError::size_mismatch(name, indices.len(), values.len()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= expected) {
            return Err(ConductanceError::size_mismatch(name, expected, bad + 1));
        }

        let mut full = match self.properties.get(name) {
            Some(PropertyData::Vector(existing)) => existing.clone(),
            _ => DVector::from_element(expected, f64::NAN),
        };
        for (&i, &v) in indices.iter().zip(values.iter()) {
            full[i] = v;
        }
        self.properties.insert(name.to_string(), PropertyData::Vector(full));
        Ok(())
    }

    /// Get raw property data
    pub fn get(&self, name: &str) -> Option<&PropertyData> {
        self.properties.get(name)
    }

    /// Whether a property is stored
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Per-element values of a property, broadcasting scalars
    ///
    /// Returns `None` when the property is absent, when the name has no valid
    /// prefix, or when the stored data is a matrix.
    pub fn vector(&self, name: &str) -> Option<DVector<f64>> {
        let element = Element::of(name).ok()?;
        self.get(name)?.expand(self.count(element))
    }

    /// Per-element values or `PropertyNotFound`
    pub fn require(&self, name: &str) -> ConductanceResult<DVector<f64>> {
        self.vector(name)
            .ok_or_else(|| ConductanceError::property_not_found(name))
    }

    /// Stored property names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Stored property names at one resolution, sorted
    pub fn keys_for(&self, element: Element) -> Vec<&str> {
        self.keys()
            .into_iter()
            .filter(|k| Element::of(k).ok() == Some(element))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
