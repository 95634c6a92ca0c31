//! Spectral primitives for HRIR processing: FFT adapters, magnitude responses, interpolation, and impulse
//! resampling.
#[cfg(test)]
mod close_floats;
pub mod fft;
pub mod resampling;
mod spectrum;

pub use fft::{fft_forward, fft_inverse, FftEngine, RustFftEngine};
pub use num::complex::Complex64;
pub use resampling::{ImpulseResampler, ResamplingError};
pub use spectrum::*;
