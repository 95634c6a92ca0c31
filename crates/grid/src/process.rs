//! Passes over every impulse response of a grid.
use mhr_dsp::{fft_forward, magnitude_response, Complex64, FftEngine, ImpulseResampler};

use crate::model::HrirData;
use crate::policy::ValidationPolicy;

/// Replace every impulse response with its magnitude response.
///
/// Each slot's first [HrirData::ir_points] samples are zero-padded to [HrirData::fft_size] and transformed; the
/// resulting `fft_size / 2 + 1` magnitudes fill the slot.
pub fn compute_magnitude_responses<E: FftEngine + ?Sized>(data: &mut HrirData, engine: &mut E) {
    let n = data.fft_size();
    let points = data.ir_points();
    let mut work = vec![Complex64::new(0.0, 0.0); n];

    let mut slots = 0usize;
    for slot in data.slots_mut() {
        for (w, s) in work.iter_mut().zip(slot[..points].iter()) {
            *w = Complex64::new(*s, 0.0);
        }
        work[points..].fill(Complex64::new(0.0, 0.0));

        fft_forward(engine, n, &mut work[..]);
        magnitude_response(n, &work, slot);
        slots += 1;
    }

    log::debug!("Computed magnitude responses for {} slots at fft size {}", slots, n);
}

/// Convert every impulse response to `rate`.
///
/// Responses keep their length.  Delays are in seconds and so are unaffected.  On error the grid is left exactly as it
/// was.
pub fn resample_hrirs(
    data: &mut HrirData,
    rate: u32,
    policy: &ValidationPolicy,
) -> crate::Result<()> {
    policy.check_rate(rate)?;

    let points = data.ir_points();
    let source_rate = data.ir_rate();
    let mut resampler = ImpulseResampler::new(source_rate, rate, points)?;
    if !resampler.is_resampling() {
        return Ok(());
    }

    convert_slots(data, rate, |slot| Ok(resampler.process(&mut slot[..points])?))?;

    log::debug!("Resampled HRIRs from {} to {}", source_rate, rate);
    Ok(())
}

/// Run `convert` over a copy of every slot, then commit the copy and the new rate together.
fn convert_slots(
    data: &mut HrirData,
    rate: u32,
    mut convert: impl FnMut(&mut [f64]) -> crate::Result<()>,
) -> crate::Result<()> {
    let mut converted = data.hrirs().to_vec();
    for slot in converted.chunks_exact_mut(data.ir_size()) {
        convert(slot)?;
    }

    data.hrirs = converted;
    data.set_ir_rate(rate);
    Ok(())
}
