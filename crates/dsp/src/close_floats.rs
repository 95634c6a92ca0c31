//! Threshold-based floating point asserts for the tests.
//!
//! Thresholds here are intentionally looser than epsilon: FFT round trips accumulate error proportional to the log of
//! the size.
use num::complex::Complex64;

#[track_caller]
pub(crate) fn close_floats64(a: f64, b: f64, threshold: f64) {
    let diff = (a - b).abs();
    assert!(
        diff < threshold,
        "{} vs {}, difference {} is greater than threshold {}",
        a,
        b,
        diff,
        threshold
    );
}

/// Compare two complex slices elementwise by the modulus of the difference.
#[track_caller]
pub(crate) fn close_complex_slices(got: &[Complex64], expected: &[Complex64], threshold: f64) {
    assert_eq!(got.len(), expected.len());
    for (i, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        let diff = (g - e).norm();
        assert!(
            diff < threshold,
            "Index {}: {} vs {}, difference {} is greater than threshold {}",
            i,
            g,
            e,
            diff,
            threshold
        );
    }
}
