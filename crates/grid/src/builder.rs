//! Validate a measurement layout and lay out an [HrirData] for it.
//!
//! The layout is checked in full before anything is allocated, in this order, stopping at the first failure.  A policy
//! which admits empty elevation rings or fields without both poles is refused before any of it.
//!
//! 1. The number of fields.
//! 2. Each field's distance, and that distances strictly increase from field to field.
//! 3. Each field's elevation count.
//! 4. Each elevation's azimuth count.
//! 5. The format's sample rate, impulse length, and head radius.
//!
//! Only then are the three backing vectors allocated, once, at their exact final sizes, and the grid linked up.
//! Elevations are spread evenly from straight down to straight up, and azimuths evenly around the circle starting at
//! 0.  Directions are numbered in field, then elevation, then azimuth order.
use std::f64::consts::{PI, TAU};

use crate::format::{ChannelMode, ChannelType, HrirFormat};
use crate::model::*;
use crate::policy::{ValidationError, ValidationPolicy};

/// The measurement layout of one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLayout {
    /// Source distance in meters.
    pub distance: f64,

    /// The azimuth count of each elevation, from the lowest elevation to the highest.  The length of this is the
    /// field's elevation count.
    pub azimuth_counts: Vec<usize>,
}

impl FieldLayout {
    pub fn new(distance: f64, azimuth_counts: Vec<usize>) -> FieldLayout {
        FieldLayout {
            distance,
            azimuth_counts,
        }
    }

    pub fn elevation_count(&self) -> usize {
        self.azimuth_counts.len()
    }

    /// Build layouts from parallel arrays: distances, an elevation count per field, and azimuth counts per field.
    ///
    /// Each entry of `az_counts` may be longer than the matching elevation count, in which case the extra entries are
    /// ignored; this is the shape loaders with fixed-size tables produce.
    pub fn from_counts(
        distances: &[f64],
        ev_counts: &[usize],
        az_counts: &[Vec<usize>],
    ) -> Result<Vec<FieldLayout>, ValidationError> {
        if ev_counts.len() != distances.len() {
            return Err(ValidationError::LayoutShape {
                what: "elevation counts",
                expected: distances.len(),
                got: ev_counts.len(),
            });
        }
        if az_counts.len() != distances.len() {
            return Err(ValidationError::LayoutShape {
                what: "azimuth count lists",
                expected: distances.len(),
                got: az_counts.len(),
            });
        }

        distances
            .iter()
            .zip(ev_counts.iter())
            .zip(az_counts.iter())
            .map(|((&distance, &ev_count), azs)| {
                if azs.len() < ev_count {
                    return Err(ValidationError::LayoutShape {
                        what: "azimuth counts of a field",
                        expected: ev_count,
                        got: azs.len(),
                    });
                }
                Ok(FieldLayout::new(distance, azs[..ev_count].to_vec()))
            })
            .collect()
    }
}

/// Builds [HrirData] from a format and a layout.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    format: HrirFormat,
    mode: ChannelMode,
    policy: ValidationPolicy,
}

/// The transform size for impulse responses of the given length.
///
/// Twice the length, so that a response can be zero-padded and analyzed without circular aliasing, rounded up to a
/// power of two.
pub fn fft_size_for(points: usize) -> usize {
    (points * 2).next_power_of_two()
}

impl GridBuilder {
    pub fn new(format: HrirFormat) -> GridBuilder {
        GridBuilder {
            format,
            mode: ChannelMode::default(),
            policy: ValidationPolicy::default(),
        }
    }

    #[must_use]
    pub fn channel_mode(mut self, mode: ChannelMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check a layout without building anything.
    pub fn validate(&self, layout: &[FieldLayout]) -> Result<(), ValidationError> {
        let policy = &self.policy;

        policy.check_policy()?;
        policy.check_field_count(layout.len())?;

        let mut previous: Option<f64> = None;
        for (fi, field) in layout.iter().enumerate() {
            policy.check_distance(fi, field.distance)?;
            if let Some(previous) = previous {
                if field.distance <= previous {
                    return Err(ValidationError::DistanceOrder {
                        field: fi,
                        distance: field.distance,
                        previous,
                    });
                }
            }
            previous = Some(field.distance);
        }

        for (fi, field) in layout.iter().enumerate() {
            policy.check_elevation_count(fi, field.elevation_count())?;
        }

        for (fi, field) in layout.iter().enumerate() {
            for (ei, count) in field.azimuth_counts.iter().copied().enumerate() {
                policy.check_azimuth_count(fi, ei, count)?;
            }
        }

        policy.check_rate(self.format.rate)?;
        policy.check_points(self.format.points)?;
        policy.check_radius(self.format.radius)?;

        Ok(())
    }

    /// Validate the layout and, if it passes, build a fully linked grid with zeroed samples and delays.
    pub fn build(&self, layout: &[FieldLayout]) -> Result<HrirData, ValidationError> {
        self.validate(layout)?;

        let channel_type = self.format.channel_type.resolve(self.mode);
        if self.format.channel_type.is_stereo() && channel_type.is_mono() {
            log::warn!("Stereo measurements are being reduced to mono; right ear data will be ignored");
        }
        let channels = channel_type.channel_count();

        let ev_total: usize = layout.iter().map(|f| f.elevation_count()).sum();
        let az_total: usize = layout
            .iter()
            .flat_map(|f| f.azimuth_counts.iter())
            .sum();

        let points = self.format.points;
        let fft_size = fft_size_for(points);
        let ir_size = fft_size / 2 + 1;
        let ir_count = az_total;

        let hrirs = vec![0.0; channels * ir_count * ir_size];
        let mut evs = Vec::with_capacity(ev_total);
        let mut azs = Vec::with_capacity(az_total);
        let mut fields = Vec::with_capacity(layout.len());

        for field in layout.iter() {
            let ev_start = evs.len();
            let ev_count = field.elevation_count();

            for (ei, az_count) in field.azimuth_counts.iter().copied().enumerate() {
                let az_start = azs.len();

                for ai in 0..az_count {
                    let index = azs.len();
                    let right = match channel_type {
                        ChannelType::Mono => None,
                        ChannelType::Stereo => Some(IrRef::new((ir_count + index) * ir_size)),
                    };
                    azs.push(HrirAz {
                        azimuth: TAU * ai as f64 / az_count as f64,
                        index,
                        delays: [0.0; 2],
                        left: IrRef::new(index * ir_size),
                        right,
                    });
                }

                evs.push(HrirEv {
                    elevation: -PI / 2.0 + PI * ei as f64 / (ev_count - 1) as f64,
                    azimuths: ArenaRange::new(az_start, az_count),
                });
            }

            fields.push(HrirField {
                distance: field.distance,
                ev_start,
                elevations: ArenaRange::new(ev_start, ev_count),
            });
        }

        debug_assert_eq!(evs.len(), ev_total);
        debug_assert_eq!(azs.len(), az_total);

        log::debug!(
            "Built HRIR grid: {} fields, {} elevations, {} directions, {} channel(s), fft size {}, slot size {}",
            fields.len(),
            ev_total,
            ir_count,
            channels,
            fft_size,
            ir_size
        );

        Ok(HrirData {
            ir_rate: self.format.rate,
            sample_type: self.format.sample_type,
            channel_type,
            ir_points: points,
            fft_size,
            ir_size,
            radius: self.format.radius,
            ir_count,
            hrirs,
            evs,
            azs,
            fields,
        })
    }
}

/// Build a grid with the default policy.
pub fn prepare_hrir_data(
    format: &HrirFormat,
    mode: ChannelMode,
    layout: &[FieldLayout],
) -> Result<HrirData, ValidationError> {
    GridBuilder::new(format.clone())
        .channel_mode(mode)
        .build(layout)
}
