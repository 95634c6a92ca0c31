//! This example builds a two-field stereo grid, fills it with synthetic measurements, and prints a summary of the
//! magnitude responses.
//!
//! Usage: `RUST_LOG=debug cargo run --example prepare_grid -- [target_rate]`
use std::f64::consts::PI;

use anyhow::Result;

use mhr_dsp::RustFftEngine;
use mhr_grid::process::{compute_magnitude_responses, resample_hrirs};
use mhr_grid::*;

/// Speed of sound in meters per second, for the synthetic interaural delays.
const SPEED_OF_SOUND: f64 = 343.3;

fn main() -> Result<()> {
    env_logger::init();

    let args = std::env::args().collect::<Vec<_>>();
    let target_rate = args
        .get(1)
        .map(|x| x.parse::<u32>())
        .transpose()?
        .unwrap_or(48000);

    let format = HrirFormatBuilder::default()
        .rate(44100)
        .channel_type(ChannelType::Stereo)
        .points(128)
        .radius(0.09)
        .build()?;
    let radius = format.radius;

    // A coarse layout: rings get denser toward the horizon.
    let ring = vec![1, 6, 12, 18, 24, 18, 12, 6, 1];
    let layout = [
        FieldLayout::new(0.5, ring.clone()),
        FieldLayout::new(1.5, ring),
    ];
    let mut data = GridBuilder::new(format).build(&layout)?;

    // A real loader would read measurements here.  Instead, put a decaying impulse at a delay which depends on which
    // side of the head the direction is on.
    let rate = data.ir_rate() as f64;
    for fi in 0..data.fields().len() {
        let field = data.fields()[fi].clone();
        let evs = data.elevations(&field).to_vec();
        for (ei, ev) in evs.iter().enumerate() {
            for ai in 0..ev.azimuth_count() {
                let dir = data
                    .direction_mut(fi, ei, ai)
                    .expect("Iterating over the grid's own directions");
                let lateral = dir.azimuth.sin() * ev.elevation().cos();
                let itd = radius * (lateral + lateral.asin()) / SPEED_OF_SOUND;
                *dir.delays = [0.5 * itd.max(0.0), 0.5 * (-itd).max(0.0)];

                for (i, s) in dir.left.iter_mut().take(32).enumerate() {
                    *s = (-(i as f64) / 4.0).exp() * (2.0 * PI * i as f64 * 0.1).cos();
                }
                if let Some(right) = dir.right {
                    for (i, s) in right.iter_mut().take(32).enumerate() {
                        *s = 0.5 * (-(i as f64) / 6.0).exp();
                    }
                }
            }
        }
    }
    log::info!("Filled {} directions at {} HZ", data.ir_count(), rate);

    resample_hrirs(&mut data, target_rate, &ValidationPolicy::default())?;
    compute_magnitude_responses(&mut data, &mut RustFftEngine::new());

    for field in data.fields() {
        let peak = data
            .elevations(field)
            .iter()
            .flat_map(|ev| data.azimuths(ev).iter())
            .flat_map(|az| data.ir(az.left_ir()).iter().copied())
            .fold(0.0f64, f64::max);
        println!(
            "Field at {:.2} m: {} elevations, first elevation index {}, peak left magnitude {:.3}",
            field.distance(),
            field.elevation_count(),
            field.ev_start(),
            peak
        );
    }
    println!(
        "{} directions, {} slots of {} bins at {} HZ",
        data.ir_count(),
        data.slot_count(),
        data.ir_size(),
        data.ir_rate()
    );

    Ok(())
}
