//! The directional grid: fields of elevations of azimuths, over flat backing storage.
//!
//! [HrirData] owns four flat vectors: impulse response samples, elevations, azimuths, and fields.  Nothing else owns
//! anything.  Fields and elevations refer to their children by [ArenaRange], and azimuths refer to their impulse
//! responses by [IrRef].  These are plain offsets, meaningful only against the [HrirData] which produced them.
//!
//! All structure is fixed when the grid is built.  Afterward, the only things which may change are sample values,
//! delays, and the sample rate; there is no way to resize storage or move a range through this API, so every range
//! handed out stays valid for as long as the grid exists.
use std::ops::Range;

use crate::format::{ChannelType, SampleType};

/// A contiguous run of entries in one of the grid's backing vectors.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ArenaRange {
    start: usize,
    len: usize,
}

impl ArenaRange {
    pub(crate) fn new(start: usize, len: usize) -> ArenaRange {
        ArenaRange { start, len }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last entry.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Where an impulse response slot begins in the sample storage.
///
/// Slots are always [HrirData::ir_size] samples long.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct IrRef {
    offset: usize,
}

impl IrRef {
    pub(crate) fn new(offset: usize) -> IrRef {
        IrRef { offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// One measured direction.
#[derive(Clone, Debug, PartialEq)]
pub struct HrirAz {
    pub(crate) azimuth: f64,
    pub(crate) index: usize,
    pub(crate) delays: [f64; 2],
    pub(crate) left: IrRef,
    pub(crate) right: Option<IrRef>,
}

impl HrirAz {
    /// Azimuth in radians, increasing from 0 around the full circle.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Global index of this direction, unique across the whole grid and in `0..ir_count`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Propagation delays in seconds, left then right.  The right delay is unused for mono data.
    pub fn delays(&self) -> [f64; 2] {
        self.delays
    }

    /// The impulse response for the given ear channel: 0 is left (or mono), 1 is right.
    pub fn ir(&self, channel: usize) -> Option<IrRef> {
        match channel {
            0 => Some(self.left),
            1 => self.right,
            _ => None,
        }
    }

    pub fn left_ir(&self) -> IrRef {
        self.left
    }

    /// `None` for mono data.
    pub fn right_ir(&self) -> Option<IrRef> {
        self.right
    }
}

/// One ring of directions at a fixed elevation.
#[derive(Clone, Debug, PartialEq)]
pub struct HrirEv {
    pub(crate) elevation: f64,
    pub(crate) azimuths: ArenaRange,
}

impl HrirEv {
    /// Elevation in radians, from -pi/2 straight down to pi/2 straight up.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// This elevation's azimuths within [HrirData::all_azimuths].
    pub fn azimuth_range(&self) -> ArenaRange {
        self.azimuths
    }

    pub fn azimuth_count(&self) -> usize {
        self.azimuths.len()
    }
}

/// A shell of measurements at one source distance.
#[derive(Clone, Debug, PartialEq)]
pub struct HrirField {
    pub(crate) distance: f64,
    pub(crate) ev_start: usize,
    pub(crate) elevations: ArenaRange,
}

impl HrirField {
    /// Distance in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Global index of this field's first elevation, counting elevations of all earlier fields.
    pub fn ev_start(&self) -> usize {
        self.ev_start
    }

    /// This field's elevations within [HrirData::all_elevations].
    pub fn elevation_range(&self) -> ArenaRange {
        self.elevations
    }

    pub fn elevation_count(&self) -> usize {
        self.elevations.len()
    }
}

/// Mutable access to a single direction, as handed to a measurement loader.
///
/// Only samples and delays are reachable from here, so a loader can't disturb the grid's structure.
#[derive(Debug)]
pub struct DirectionMut<'a> {
    pub azimuth: f64,
    pub index: usize,
    pub delays: &'a mut [f64; 2],

    /// The full slot, [HrirData::ir_size] long.  Measurements go in the first [HrirData::ir_points] samples.
    pub left: &'a mut [f64],

    /// `None` for mono data.
    pub right: Option<&'a mut [f64]>,
}

/// The HRIR data set: format, derived sizes, and the grid over its storage.
#[derive(Clone, Debug, PartialEq)]
pub struct HrirData {
    pub(crate) ir_rate: u32,
    pub(crate) sample_type: SampleType,
    pub(crate) channel_type: ChannelType,
    pub(crate) ir_points: usize,
    pub(crate) fft_size: usize,
    pub(crate) ir_size: usize,
    pub(crate) radius: f64,
    pub(crate) ir_count: usize,

    pub(crate) hrirs: Vec<f64>,
    pub(crate) evs: Vec<HrirEv>,
    pub(crate) azs: Vec<HrirAz>,

    pub(crate) fields: Vec<HrirField>,
}

impl HrirData {
    pub fn ir_rate(&self) -> u32 {
        self.ir_rate
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn channel_count(&self) -> usize {
        self.channel_type.channel_count()
    }

    /// Length of a measured impulse response in samples.
    pub fn ir_points(&self) -> usize {
        self.ir_points
    }

    /// Transform size used to analyze impulse responses: the smallest power of two at least twice [Self::ir_points].
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Length of every impulse response slot: `fft_size / 2 + 1`, enough for a magnitude response.
    pub fn ir_size(&self) -> usize {
        self.ir_size
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of directions.  For stereo data there are twice this many slots.
    pub fn ir_count(&self) -> usize {
        self.ir_count
    }

    /// Number of impulse response slots, across all channels.
    pub fn slot_count(&self) -> usize {
        self.ir_count * self.channel_count()
    }

    pub fn fields(&self) -> &[HrirField] {
        &self.fields[..]
    }

    pub fn field(&self, field: usize) -> Option<&HrirField> {
        self.fields.get(field)
    }

    pub fn elevations(&self, field: &HrirField) -> &[HrirEv] {
        &self.evs[field.elevations.as_range()]
    }

    pub fn azimuths(&self, elevation: &HrirEv) -> &[HrirAz] {
        &self.azs[elevation.azimuths.as_range()]
    }

    /// Every elevation of every field, in field order.
    pub fn all_elevations(&self) -> &[HrirEv] {
        &self.evs[..]
    }

    /// Every azimuth of every elevation, in field then elevation order.
    pub fn all_azimuths(&self) -> &[HrirAz] {
        &self.azs[..]
    }

    /// The flat sample storage: `channel_count * ir_count` slots of [Self::ir_size] samples.
    pub fn hrirs(&self) -> &[f64] {
        &self.hrirs[..]
    }

    pub fn elevation(&self, field: usize, elevation: usize) -> Option<&HrirEv> {
        let f = self.fields.get(field)?;
        self.elevations(f).get(elevation)
    }

    pub fn azimuth(&self, field: usize, elevation: usize, azimuth: usize) -> Option<&HrirAz> {
        let ev = self.elevation(field, elevation)?;
        self.azimuths(ev).get(azimuth)
    }

    /// Position of a direction in [Self::all_azimuths].
    fn azimuth_position(&self, field: usize, elevation: usize, azimuth: usize) -> Option<usize> {
        let ev = self.elevation(field, elevation)?;
        if azimuth >= ev.azimuths.len() {
            return None;
        }
        Some(ev.azimuths.start() + azimuth)
    }

    pub fn ir(&self, ir: IrRef) -> &[f64] {
        &self.hrirs[ir.offset..ir.offset + self.ir_size]
    }

    pub fn ir_mut(&mut self, ir: IrRef) -> &mut [f64] {
        let size = self.ir_size;
        &mut self.hrirs[ir.offset..ir.offset + size]
    }

    /// Get mutable access to one direction's delays and samples.
    pub fn direction_mut(
        &mut self,
        field: usize,
        elevation: usize,
        azimuth: usize,
    ) -> Option<DirectionMut<'_>> {
        let pos = self.azimuth_position(field, elevation, azimuth)?;
        let size = self.ir_size;
        let az = &mut self.azs[pos];

        let left_off = az.left.offset;
        let (left, right) = match az.right {
            None => (&mut self.hrirs[left_off..left_off + size], None),
            Some(r) => {
                // Right slots all come after every left slot.
                let (lo, hi) = self.hrirs.split_at_mut(r.offset);
                (&mut lo[left_off..left_off + size], Some(&mut hi[..size]))
            }
        };

        Some(DirectionMut {
            azimuth: az.azimuth,
            index: az.index,
            delays: &mut az.delays,
            left,
            right,
        })
    }

    /// Iterate over every impulse response slot, left channel slots first.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        self.hrirs.chunks_exact_mut(self.ir_size)
    }

    pub(crate) fn set_ir_rate(&mut self, rate: u32) {
        self.ir_rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builder::{FieldLayout, GridBuilder};
    use crate::format::{ChannelMode, HrirFormat};

    fn stereo_grid() -> HrirData {
        let format = HrirFormat {
            rate: 48000,
            channel_type: ChannelType::Stereo,
            points: 16,
            ..Default::default()
        };
        GridBuilder::new(format)
            .build(&[FieldLayout::new(1.0, vec![1, 2, 3, 2, 1])])
            .unwrap()
    }

    #[test]
    fn test_arena_range() {
        let r = ArenaRange::new(3, 4);
        assert_eq!(r.end(), 7);
        assert_eq!(r.as_range(), 3..7);
        assert!(!r.is_empty());
        assert!(ArenaRange::new(9, 0).is_empty());
    }

    #[test]
    fn test_direction_mut_writes_own_slots() {
        let mut data = stereo_grid();
        let size = data.ir_size();
        let count = data.ir_count();

        {
            let dir = data.direction_mut(0, 2, 1).unwrap();
            assert_eq!(dir.index, 4);
            assert_eq!(dir.left.len(), size);
            dir.left[0] = 1.0;
            dir.right.unwrap()[0] = 2.0;
            dir.delays[0] = 0.25;
            dir.delays[1] = 0.5;
        }

        let az = data.azimuth(0, 2, 1).unwrap().clone();
        assert_eq!(az.delays(), [0.25, 0.5]);
        assert_eq!(data.ir(az.left_ir())[0], 1.0);
        assert_eq!(data.ir(az.right_ir().unwrap())[0], 2.0);
        assert_eq!(data.hrirs()[4 * size], 1.0);
        assert_eq!(data.hrirs()[(count + 4) * size], 2.0);

        let nonzero = data.hrirs().iter().filter(|x| **x != 0.0).count();
        assert_eq!(nonzero, 2);
    }

    #[test]
    fn test_out_of_range_directions() {
        let mut data = stereo_grid();
        assert!(data.direction_mut(1, 0, 0).is_none());
        assert!(data.direction_mut(0, 5, 0).is_none());
        assert!(data.direction_mut(0, 0, 1).is_none());
        assert!(data.azimuth(0, 2, 3).is_none());
        assert!(data.azimuth(0, 2, 2).is_some());
    }

    #[test]
    fn test_mono_has_no_right_slot() {
        let format = HrirFormat {
            channel_type: ChannelType::Stereo,
            points: 16,
            ..Default::default()
        };
        let mut data = GridBuilder::new(format)
            .channel_mode(ChannelMode::ForceMono)
            .build(&[FieldLayout::new(1.0, vec![1, 1, 1, 1, 1])])
            .unwrap();

        assert_eq!(data.channel_count(), 1);
        assert!(data.direction_mut(0, 0, 0).unwrap().right.is_none());
        assert!(data.all_azimuths().iter().all(|a| a.ir(1).is_none()));
        assert_eq!(data.slots_mut().count(), 5);
    }

    #[test]
    fn test_slots_cover_storage() {
        let mut data = stereo_grid();
        let slots = data.slot_count();
        let size = data.ir_size();
        for (i, slot) in data.slots_mut().enumerate() {
            slot[0] = i as f64;
        }

        assert_eq!(data.hrirs().len(), slots * size);
        for az in data.all_azimuths() {
            assert_eq!(data.ir(az.left_ir())[0], az.index() as f64);
            assert_eq!(
                data.ir(az.right_ir().unwrap())[0],
                (data.ir_count() + az.index()) as f64
            );
        }
    }
}
