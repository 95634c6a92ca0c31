use num::complex::Complex64;

/// Number of non-redundant bins in the spectrum of a real signal of length `n`.
pub const fn unique_bins(n: usize) -> usize {
    n / 2 + 1
}

/// Write the magnitude response of a size-`n` spectrum to `out`.
///
/// `input` must be the forward transform of a real signal, so only the first `n / 2 + 1` bins are looked at: the rest
/// are conjugates of those.  `out` must be exactly [unique_bins]`(n)` long.
#[track_caller]
pub fn magnitude_response(n: usize, input: &[Complex64], out: &mut [f64]) {
    let m = unique_bins(n);
    assert_eq!(input.len(), n, "Spectrum must be {} bins, got {}", n, input.len());
    assert_eq!(out.len(), m, "Output must be {} bins, got {}", m, out.len());

    for (o, i) in out.iter_mut().zip(input[..m].iter()) {
        *o = i.norm();
    }
}

/// Linear interpolation from `a` to `b` by `f`.
#[inline(always)]
pub fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + f * (b - a)
}
