//! Sample rate conversion of fixed-length impulse responses.
//!
//! Rubato does the actual work.  Impulse responses are short and must stay aligned in time, so we push the whole
//! response through, keep feeding zeros until the resampler has produced its delayed output, then cut the delay back
//! off.  When the rates match, nothing is created and processing is a no-op.
use rubato::{FftFixedIn, Resampler as RubatoResampler};

#[derive(Debug, thiserror::Error)]
pub enum ResamplingError {
    #[error("Failed to create Rubato resampler: {0}")]
    RubatoError(#[from] rubato::ResamplerConstructionError),
    #[error("Failed to process samples: {0}")]
    ProcessError(#[from] rubato::ResampleError),
    #[error("Impulse length must be greater than 0")]
    EmptyImpulse,
}

/// Resamples impulse responses of a fixed length from one rate to another, in place.
///
/// The response keeps its length: content past the end at the new rate is dropped, and if the response got shorter
/// the tail is zero.
pub struct ImpulseResampler {
    source_rate: u32,
    target_rate: u32,
    points: usize,
    resampler: Option<ResamplerState>,
}

struct ResamplerState {
    resampler: FftFixedIn<f64>,
    /// Output accumulated across calls, including the resampler's leading delay.
    collected: Vec<f64>,
}

impl ImpulseResampler {
    pub fn new(
        source_rate: u32,
        target_rate: u32,
        points: usize,
    ) -> Result<Self, ResamplingError> {
        if points == 0 {
            return Err(ResamplingError::EmptyImpulse);
        }

        let resampler = if source_rate != target_rate {
            Some(ResamplerState::new(source_rate, target_rate, points)?)
        } else {
            None
        };

        Ok(Self {
            source_rate,
            target_rate,
            points,
            resampler,
        })
    }

    pub fn source_rate(&self) -> u32 {
        self.source_rate
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Check if resampling is active.
    pub fn is_resampling(&self) -> bool {
        self.resampler.is_some()
    }

    /// Resample one impulse response in place.
    ///
    /// `impulse` must be exactly as long as the `points` this resampler was created with.
    #[track_caller]
    pub fn process(&mut self, impulse: &mut [f64]) -> Result<(), ResamplingError> {
        assert_eq!(
            impulse.len(),
            self.points,
            "Impulse length {} does not match the configured length {}",
            impulse.len(),
            self.points
        );

        let Some(state) = &mut self.resampler else {
            return Ok(());
        };

        state.process(impulse, self.source_rate, self.target_rate)
    }
}

impl ResamplerState {
    fn new(source_rate: u32, target_rate: u32, points: usize) -> Result<Self, ResamplingError> {
        let resampler =
            FftFixedIn::<f64>::new(source_rate as usize, target_rate as usize, points, 1, 1)?;
        log::debug!(
            "Created impulse resampler {} -> {} for {} points, delay {}",
            source_rate,
            target_rate,
            points,
            resampler.output_delay()
        );

        Ok(Self {
            resampler,
            collected: vec![],
        })
    }

    fn process(
        &mut self,
        impulse: &mut [f64],
        source_rate: u32,
        target_rate: u32,
    ) -> Result<(), ResamplingError> {
        let points = impulse.len();
        self.resampler.reset();
        self.collected.clear();

        let delay = self.resampler.output_delay();
        let needed = delay + points;

        let input = [&impulse[..]];
        let first = self.resampler.process(&input[..], None)?;
        self.collected.extend_from_slice(&first[0]);

        // The output rate is at least a third of the input rate for any pair of rates we accept, and the resampler
        // holds back at most one FFT block of input, so this many zero-filled calls always drains it.
        let max_calls = (3 * needed + source_rate as usize + target_rate as usize) / points + 2;
        let mut calls = 0;
        while self.collected.len() < needed && calls < max_calls {
            let out = self
                .resampler
                .process_partial(None::<&[Vec<f64>]>, None)?;
            self.collected.extend_from_slice(&out[0]);
            calls += 1;
        }

        impulse.fill(0.0);
        let available = self.collected.len().saturating_sub(delay).min(points);
        if available > 0 {
            impulse[..available].copy_from_slice(&self.collected[delay..delay + available]);
        }

        Ok(())
    }
}
