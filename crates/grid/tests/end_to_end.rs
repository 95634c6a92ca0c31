//! Build a grid, fill it the way a loader would, and run it through the processing passes.
use std::collections::HashSet;

use mhr_dsp::RustFftEngine;
use mhr_grid::process::{compute_magnitude_responses, resample_hrirs};
use mhr_grid::*;

fn layout() -> Vec<FieldLayout> {
    vec![FieldLayout::new(1.0, vec![1, 4, 8, 4, 1])]
}

#[test]
fn test_single_field_mono() {
    let _ = env_logger::builder().is_test(true).try_init();

    let data = prepare_hrir_data(&HrirFormat::default(), ChannelMode::AllowStereo, &layout())
        .expect("Layout is valid");

    assert_eq!(data.fields().len(), 1);
    assert_eq!(data.elevations(&data.fields()[0]).len(), 5);
    assert_eq!(data.ir_count(), 18);
    assert_eq!(data.slot_count(), 18);

    let indices = data
        .all_azimuths()
        .iter()
        .map(|a| a.index())
        .collect::<HashSet<_>>();
    assert_eq!(indices.len(), 18);
    assert!(indices.iter().all(|i| *i < 18));
}

#[test]
fn test_single_field_stereo() {
    let _ = env_logger::builder().is_test(true).try_init();

    let format = HrirFormatBuilder::default()
        .channel_type(ChannelType::Stereo)
        .points(64)
        .build()
        .unwrap();
    let data = prepare_hrir_data(&format, ChannelMode::AllowStereo, &layout()).unwrap();

    assert_eq!(data.ir_count(), 18);
    assert_eq!(data.slot_count(), 36);

    let slots = data
        .all_azimuths()
        .iter()
        .flat_map(|a| [Some(a.left_ir()), a.right_ir()])
        .flatten()
        .collect::<HashSet<_>>();
    assert_eq!(slots.len(), 36);
}

#[test]
fn test_load_and_analyze() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let format = HrirFormatBuilder::default()
        .rate(44100)
        .channel_type(ChannelType::Stereo)
        .points(32)
        .build()?;
    let mut data = GridBuilder::new(format).build(&layout())?;

    // Stand in for a loader: every direction gets a delayed unit impulse, the right ear one sample later.
    let counts = data
        .elevations(&data.fields()[0])
        .iter()
        .map(|e| e.azimuth_count())
        .collect::<Vec<_>>();
    for (ei, count) in counts.into_iter().enumerate() {
        for ai in 0..count {
            let dir = data
                .direction_mut(0, ei, ai)
                .expect("Direction is in the grid");
            dir.left[2] = 1.0;
            dir.right.expect("Grid is stereo")[3] = 1.0;
            *dir.delays = [0.0005, 0.0006];
        }
    }

    resample_hrirs(&mut data, 48000, &ValidationPolicy::default())?;
    assert_eq!(data.ir_rate(), 48000);

    compute_magnitude_responses(&mut data, &mut RustFftEngine::new());
    assert!(data.hrirs().iter().all(|x| x.is_finite() && *x >= 0.0));

    // Delays survive both passes untouched.
    assert!(data
        .all_azimuths()
        .iter()
        .all(|a| a.delays() == [0.0005, 0.0006]));
    Ok(())
}

#[test]
fn test_rejection_leaves_nothing() {
    let err = prepare_hrir_data(
        &HrirFormat::default(),
        ChannelMode::AllowStereo,
        &[FieldLayout::new(1.0, vec![1, 4, 256, 4, 1])],
    )
    .unwrap_err();

    assert!(err.is_azimuth_count());
    let wrapped: Error = err.into();
    assert!(wrapped.is_validation());
}
