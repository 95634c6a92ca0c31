//! Numeric bounds a measurement grid must satisfy, and the errors produced when it doesn't.
use std::ops::RangeInclusive;

/// Why a grid or format was rejected.
///
/// Every variant carries the offending value and the bounds it was checked against, so that a loader can report
/// something actionable without knowing the policy that was in effect.
#[derive(Clone, Debug, PartialEq, thiserror::Error, derive_more::IsVariant)]
pub enum ValidationError {
    #[error("Field count {count} is outside {min}..={max}")]
    FieldCount { count: usize, min: usize, max: usize },

    #[error("Field {field}: distance {distance} m is outside {min}..={max}")]
    DistanceRange {
        field: usize,
        distance: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "Field {field}: distance {distance} m must be greater than the previous field's distance of {previous} m"
    )]
    DistanceOrder {
        field: usize,
        distance: f64,
        previous: f64,
    },

    #[error("Field {field}: elevation count {count} is outside {min}..={max}")]
    ElevationCount {
        field: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Field {field}, elevation {elevation}: azimuth count {count} is outside {min}..={max}")]
    AzimuthCount {
        field: usize,
        elevation: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Sample rate {rate} is outside {min}..={max}")]
    SampleRate { rate: u32, min: u32, max: u32 },

    #[error("Impulse length {points} is outside {min}..={max}")]
    Points {
        points: usize,
        min: usize,
        max: usize,
    },

    #[error("Head radius {radius} m is outside {min}..={max}")]
    Radius { radius: f64, min: f64, max: f64 },

    #[error("Policy allows {what} down to {min}, but grids need at least {required}")]
    Policy {
        what: &'static str,
        min: usize,
        required: usize,
    },

    #[error("Expected {expected} entries for {what}, but got {got}")]
    LayoutShape {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

/// The bounds enforced when building a grid.
///
/// [Default] gives the bounds of the HRTF data set format.  Tighter policies are useful for tests and for loaders
/// which know more about their input; looser ones will produce data sets that other tools may refuse.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationPolicy {
    pub field_count: RangeInclusive<usize>,
    pub elevation_count: RangeInclusive<usize>,
    pub azimuth_count: RangeInclusive<usize>,

    /// Source distance in meters.
    pub distance: RangeInclusive<f64>,

    /// Sample rate in HZ, both for measurements and as a resampling target.
    pub rate: RangeInclusive<u32>,

    /// Impulse response length in samples.
    pub points: RangeInclusive<usize>,

    /// Head radius in meters.
    pub radius: RangeInclusive<f64>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            field_count: 1..=16,
            elevation_count: 5..=181,
            azimuth_count: 1..=255,
            distance: 0.05..=2.50,
            rate: 32000..=96000,
            points: 16..=8192,
            radius: 0.05..=0.15,
        }
    }
}

impl ValidationPolicy {
    /// Check that the policy itself only admits grids which can be built and searched.
    ///
    /// Every elevation ring needs an azimuth, and every field needs a bottom and a top elevation.
    pub fn check_policy(&self) -> Result<(), ValidationError> {
        let lower_limits = [
            ("field count", *self.field_count.start(), 1),
            ("elevation count", *self.elevation_count.start(), 2),
            ("azimuth count", *self.azimuth_count.start(), 1),
        ];

        for (what, min, required) in lower_limits {
            if min < required {
                return Err(ValidationError::Policy {
                    what,
                    min,
                    required,
                });
            }
        }

        Ok(())
    }

    pub fn check_field_count(&self, count: usize) -> Result<(), ValidationError> {
        if self.field_count.contains(&count) {
            return Ok(());
        }

        Err(ValidationError::FieldCount {
            count,
            min: *self.field_count.start(),
            max: *self.field_count.end(),
        })
    }

    /// Also rejects NaN, since NaN is never contained in a range.
    pub fn check_distance(&self, field: usize, distance: f64) -> Result<(), ValidationError> {
        if self.distance.contains(&distance) {
            return Ok(());
        }

        Err(ValidationError::DistanceRange {
            field,
            distance,
            min: *self.distance.start(),
            max: *self.distance.end(),
        })
    }

    pub fn check_elevation_count(&self, field: usize, count: usize) -> Result<(), ValidationError> {
        if self.elevation_count.contains(&count) {
            return Ok(());
        }

        Err(ValidationError::ElevationCount {
            field,
            count,
            min: *self.elevation_count.start(),
            max: *self.elevation_count.end(),
        })
    }

    pub fn check_azimuth_count(
        &self,
        field: usize,
        elevation: usize,
        count: usize,
    ) -> Result<(), ValidationError> {
        if self.azimuth_count.contains(&count) {
            return Ok(());
        }

        Err(ValidationError::AzimuthCount {
            field,
            elevation,
            count,
            min: *self.azimuth_count.start(),
            max: *self.azimuth_count.end(),
        })
    }

    pub fn check_rate(&self, rate: u32) -> Result<(), ValidationError> {
        if self.rate.contains(&rate) {
            return Ok(());
        }

        Err(ValidationError::SampleRate {
            rate,
            min: *self.rate.start(),
            max: *self.rate.end(),
        })
    }

    pub fn check_points(&self, points: usize) -> Result<(), ValidationError> {
        if self.points.contains(&points) {
            return Ok(());
        }

        Err(ValidationError::Points {
            points,
            min: *self.points.start(),
            max: *self.points.end(),
        })
    }

    pub fn check_radius(&self, radius: f64) -> Result<(), ValidationError> {
        if self.radius.contains(&radius) {
            return Ok(());
        }

        Err(ValidationError::Radius {
            radius,
            min: *self.radius.start(),
            max: *self.radius.end(),
        })
    }
}
