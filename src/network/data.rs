//! Property data types
//!
//! This module provides the container for a single named property: a uniform
//! value shared by every element, one value per element, or one row per
//! element (e.g. directional weights).

use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Property data container
///
/// # Storage Types
///
/// - **Scalar**: uniform value, broadcast to every pore or throat
/// - **Vector**: one value per element
/// - **Matrix**: one row per element (e.g. `Nt × 2` directional weights)
///
/// # Examples
///
/// ```rust
/// use pnm_rs::network::PropertyData;
///
/// let uniform = PropertyData::from_scalar(1.0);
/// assert_eq!(uniform.expand(3).unwrap().len(), 3);
///
/// let diameters = PropertyData::from_vec(vec![1e-5, 2e-5]);
/// assert_eq!(diameters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    /// Uniform value
    ///
    /// Use for: constant fluid properties (temperature, viscosity)
    Scalar(f64),

    /// One value per element
    Vector(DVector<f64>),

    /// One row per element
    Matrix(DMatrix<f64>),
}

impl PropertyData {

    // ======================================= constructors =======================================

    /// Create from scalar
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create from vector
    pub fn from_vec(vector: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(vector))
    }

    /// Create from DMatrix
    pub fn from_matrix(matrix: DMatrix<f64>) -> Self {
        Self::Matrix(matrix)
    }

    /// Create uniform vector
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    // ========================================== Queries ==========================================

    /// Check data is scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check data is a vector
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Check data is a matrix
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// Number of elements the data is laid out for
    ///
    /// Scalars report 1, matrices report their row count.
    pub fn len(&self) -> usize {
        match self {
            PropertyData::Scalar(_) => 1,
            PropertyData::Vector(v) => v.len(),
            PropertyData::Matrix(m) => m.nrows(),
        }
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyData::Scalar(_) => false,
            _ => self.len() == 0,
        }
    }

    /// Whether the data can be stored for `count` elements
    pub fn fits(&self, count: usize) -> bool {
        match self {
            PropertyData::Scalar(_) => true,
            _ => self.len() == count,
        }
    }

    // ======================================== Extractions ========================================

    /// Try to extract as a DMatrix
    pub fn try_as_matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            PropertyData::Matrix(value) => Some(value),
            _ => None,
        }
    }

    /// Per-element values for `count` elements
    ///
    /// Scalars are broadcast, vectors are returned as-is when their length
    /// matches. Matrices have no per-element scalar and return `None`.
    pub fn expand(&self, count: usize) -> Option<DVector<f64>> {
        match self {
            PropertyData::Scalar(value) => Some(DVector::from_element(count, *value)),
            PropertyData::Vector(value) if value.len() == count => Some(value.clone()),
            _ => None,
        }
    }
}

impl From<DVector<f64>> for PropertyData {
    fn from(vector: DVector<f64>) -> Self {
        Self::Vector(vector)
    }
}

impl From<DMatrix<f64>> for PropertyData {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<f64> for PropertyData {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

// ======================== Display ============================

impl fmt::Display for PropertyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyData::Scalar(value) => write!(f, "Scalar ({})", value),
            PropertyData::Vector(value) => write!(f, "Vector [{}]", value.len()),
            PropertyData::Matrix(value) => write!(f, "Matrix [{} * {}]", value.nrows(), value.ncols()),
        }
    }
}

// ==================== Tests ====================
