//! Finding the measured directions around an arbitrary direction.
use std::f64::consts::{PI, TAU};

use mhr_dsp::lerp;

use crate::model::HrirData;

/// Two neighboring azimuths on one elevation ring, and how far between them a direction lies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AzimuthSpan {
    pub a0: usize,
    /// Wraps to 0 after the last azimuth.
    pub a1: usize,
    /// In `0.0..1.0`; 0 is exactly on `a0`.
    pub factor: f64,
}

/// Two neighboring elevations of one field, and how far between them a direction lies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElevationSpan {
    pub e0: usize,
    /// Clamped to the top elevation; never wraps.
    pub e1: usize,
    pub factor: f64,
}

impl HrirData {
    /// Locate `azimuth` (radians, any value; it is wrapped onto the circle) on an elevation ring.
    pub fn azimuth_span(&self, field: usize, elevation: usize, azimuth: f64) -> Option<AzimuthSpan> {
        let count = self.elevation(field, elevation)?.azimuth_count();
        if count == 0 {
            return None;
        }

        let f = azimuth.rem_euclid(TAU) * count as f64 / TAU;
        let whole = f.floor();
        // rem_euclid can return exactly TAU for tiny negative inputs, hence the modulo.
        let a0 = whole as usize % count;

        Some(AzimuthSpan {
            a0,
            a1: (a0 + 1) % count,
            factor: f - whole,
        })
    }

    /// Locate `elevation` (radians, clamped to straight down..straight up) within a field.
    pub fn elevation_span(&self, field: usize, elevation: f64) -> Option<ElevationSpan> {
        let top = self.field(field)?.elevation_count().checked_sub(1)?;

        let f = ((elevation + PI / 2.0) * top as f64 / PI).clamp(0.0, top as f64);
        let whole = f.floor();
        let e0 = whole as usize;

        Some(ElevationSpan {
            e0,
            e1: (e0 + 1).min(top),
            factor: f - whole,
        })
    }

    /// The delay of one ear channel at `azimuth` on an elevation ring, interpolated between the two nearest measured
    /// directions.
    pub fn blend_delay(
        &self,
        field: usize,
        elevation: usize,
        azimuth: f64,
        channel: usize,
    ) -> Option<f64> {
        if channel >= self.channel_count() {
            return None;
        }

        let span = self.azimuth_span(field, elevation, azimuth)?;
        let d0 = self.azimuth(field, elevation, span.a0)?.delays()[channel];
        let d1 = self.azimuth(field, elevation, span.a1)?.delays()[channel];
        Some(lerp(d0, d1, span.factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builder::{FieldLayout, GridBuilder};
    use crate::format::HrirFormat;
    use crate::model::ArenaRange;

    fn grid() -> HrirData {
        GridBuilder::new(HrirFormat::default())
            .build(&[FieldLayout::new(1.0, vec![1, 4, 8, 4, 1])])
            .unwrap()
    }

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
    }

    #[test]
    fn test_azimuth_span() {
        let data = grid();

        let s = data.azimuth_span(0, 1, PI / 4.0).unwrap();
        assert_eq!((s.a0, s.a1), (0, 1));
        close(s.factor, 0.5);

        // Past the last azimuth wraps back to the first.
        let s = data.azimuth_span(0, 1, 7.0 * PI / 4.0).unwrap();
        assert_eq!((s.a0, s.a1), (3, 0));
        close(s.factor, 0.5);

        // Negative angles are the same as their positive equivalents.
        let s = data.azimuth_span(0, 2, -PI / 8.0).unwrap();
        assert_eq!((s.a0, s.a1), (7, 0));
        close(s.factor, 0.5);

        let s = data.azimuth_span(0, 0, 1.0).unwrap();
        assert_eq!((s.a0, s.a1), (0, 0));

        assert!(data.azimuth_span(0, 5, 0.0).is_none());
        assert!(data.azimuth_span(1, 0, 0.0).is_none());
    }

    #[test]
    fn test_elevation_span() {
        let data = grid();

        let s = data.elevation_span(0, -PI / 2.0).unwrap();
        assert_eq!((s.e0, s.e1), (0, 1));
        close(s.factor, 0.0);

        let s = data.elevation_span(0, PI / 8.0).unwrap();
        assert_eq!((s.e0, s.e1), (2, 3));
        close(s.factor, 0.5);

        let s = data.elevation_span(0, PI).unwrap();
        assert_eq!((s.e0, s.e1), (4, 4));
        close(s.factor, 0.0);
    }

    #[test]
    fn test_empty_entries_have_no_span() {
        let mut data = grid();
        data.evs[1].azimuths = ArenaRange::new(data.evs[1].azimuths.start(), 0);
        assert!(data.elevation(0, 1).is_some());
        assert!(data.azimuth_span(0, 1, 0.5).is_none());
        assert!(data.blend_delay(0, 1, 0.5, 0).is_none());
        assert!(data.azimuth_span(0, 2, 0.5).is_some());

        let mut data = grid();
        data.fields[0].elevations = ArenaRange::new(0, 0);
        assert!(data.field(0).is_some());
        assert!(data.elevation_span(0, 0.0).is_none());
    }

    #[test]
    fn test_blend_delay() {
        let mut data = grid();
        *data.direction_mut(0, 1, 0).unwrap().delays = [0.001, 0.0];
        *data.direction_mut(0, 1, 1).unwrap().delays = [0.003, 0.0];

        close(data.blend_delay(0, 1, PI / 4.0, 0).unwrap(), 0.002);
        close(data.blend_delay(0, 1, 0.0, 0).unwrap(), 0.001);
        assert!(data.blend_delay(0, 1, 0.0, 1).is_none());
    }
}
