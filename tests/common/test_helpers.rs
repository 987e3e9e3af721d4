//! Helper functions for integration tests

use nalgebra::DVector;

/// Relative error between computed and expected values
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-300 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}

/// Assert that two vectors agree element-wise within a relative tolerance
pub fn assert_vectors_close(a: &DVector<f64>, b: &DVector<f64>, tolerance: f64, message: &str) {
    assert_eq!(a.len(), b.len(), "{}: dimension mismatch", message);
    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        let error = relative_error(x, y);
        assert!(
            error < tolerance,
            "{}: element {} differs ({} vs {}, relative error {})",
            message, i, x, y, error
        );
    }
}
