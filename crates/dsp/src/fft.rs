//! Forward and inverse transform adapters over a complex FFT engine.
//!
//! The engine itself is abstracted behind [FftEngine] so that the rest of the pipeline only ever sees in-place,
//! same-length, unnormalized transforms.  [RustFftEngine] is the engine used in practice.  The free functions
//! [fft_forward] and [fft_inverse] are what callers should use: they check the declared size against the buffer and
//! apply the `1/n` scaling which makes the pair an identity.
use num::complex::Complex64;
use rustfft::FftPlanner;

/// An in-place complex FFT.
///
/// Implementations must accept any buffer length and must not normalize in either direction.
pub trait FftEngine {
    fn forward(&mut self, buffer: &mut [Complex64]);
    fn inverse(&mut self, buffer: &mut [Complex64]);
}

/// An [FftEngine] backed by rustfft.
///
/// Plans are cached by the planner, so reusing one engine across many same-sized transforms only pays for planning
/// once.
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct RustFftEngine {
    #[derivative(Debug = "ignore")]
    planner: FftPlanner<f64>,
    scratch: Vec<Complex64>,
}

impl Default for RustFftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFftEngine {
    pub fn new() -> RustFftEngine {
        RustFftEngine {
            planner: FftPlanner::new(),
            scratch: vec![],
        }
    }

    fn grow_scratch(&mut self, len: usize) {
        if self.scratch.len() < len {
            self.scratch.resize(len, Complex64::new(0.0, 0.0));
        }
    }
}

impl FftEngine for RustFftEngine {
    fn forward(&mut self, buffer: &mut [Complex64]) {
        let fft = self.planner.plan_fft_forward(buffer.len());
        let needed = fft.get_inplace_scratch_len();
        self.grow_scratch(needed);
        fft.process_with_scratch(buffer, &mut self.scratch[..needed]);
    }

    fn inverse(&mut self, buffer: &mut [Complex64]) {
        let fft = self.planner.plan_fft_inverse(buffer.len());
        let needed = fft.get_inplace_scratch_len();
        self.grow_scratch(needed);
        fft.process_with_scratch(buffer, &mut self.scratch[..needed]);
    }
}

/// Forward transform of `inout`, which must be exactly `n` elements long.
///
/// No normalization is applied.
#[track_caller]
pub fn fft_forward<E: FftEngine + ?Sized>(engine: &mut E, n: usize, inout: &mut [Complex64]) {
    assert_eq!(
        inout.len(),
        n,
        "Transform size {} does not match the buffer length {}",
        n,
        inout.len()
    );
    engine.forward(inout);
}

/// Inverse transform of `inout`, which must be exactly `n` elements long, scaled by `1/n`.
///
/// Following [fft_forward] with this function gives back the original buffer, up to rounding.
#[track_caller]
pub fn fft_inverse<E: FftEngine + ?Sized>(engine: &mut E, n: usize, inout: &mut [Complex64]) {
    assert_eq!(
        inout.len(),
        n,
        "Transform size {} does not match the buffer length {}",
        n,
        inout.len()
    );
    engine.inverse(inout);

    let scale = 1.0 / n as f64;
    for x in inout.iter_mut() {
        *x *= scale;
    }
}
