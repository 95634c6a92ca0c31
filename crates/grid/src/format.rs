/// How samples are encoded when the data set is eventually written out.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, derive_more::IsVariant)]
pub enum SampleType {
    S16,

    #[default]
    S24,
}

impl SampleType {
    pub fn bits(&self) -> u32 {
        match self {
            SampleType::S16 => 16,
            SampleType::S24 => 24,
        }
    }
}

/// The channel layout of a data set: one response per direction, or one per ear.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, derive_more::IsVariant)]
pub enum ChannelType {
    #[default]
    Mono,
    Stereo,
}

/// Whether a stereo measurement set may stay stereo.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, derive_more::IsVariant)]
pub enum ChannelMode {
    #[default]
    AllowStereo,
    ForceMono,
}

impl ChannelType {
    pub fn channel_count(&self) -> usize {
        match self {
            ChannelType::Mono => 1,
            ChannelType::Stereo => 2,
        }
    }

    /// The layout a data set ends up with when measured as `self` and processed under `mode`.
    pub fn resolve(self, mode: ChannelMode) -> ChannelType {
        match mode {
            ChannelMode::AllowStereo => self,
            ChannelMode::ForceMono => ChannelType::Mono,
        }
    }
}

/// Global properties of a measurement set, as read from its definition.
///
/// Build with [HrirFormatBuilder]; every field has a default, so only the ones a definition states need setting.
#[derive(Clone, Debug, PartialEq, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct HrirFormat {
    /// Sample rate of the measurements in HZ.
    #[builder(default = "44100")]
    pub rate: u32,

    #[builder(default)]
    pub sample_type: SampleType,

    #[builder(default)]
    pub channel_type: ChannelType,

    /// Length of each measured impulse response, in samples.
    #[builder(default = "256")]
    pub points: usize,

    /// Head radius in meters.
    #[builder(default = "0.09")]
    pub radius: f64,
}

impl Default for HrirFormat {
    fn default() -> Self {
        HrirFormatBuilder::default()
            .build()
            .expect("Every field has a default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        use ChannelMode::*;
        use ChannelType::*;

        assert_eq!(Stereo.resolve(AllowStereo), Stereo);
        assert_eq!(Stereo.resolve(ForceMono), Mono);
        assert_eq!(Mono.resolve(AllowStereo), Mono);
        assert_eq!(Mono.resolve(ForceMono), Mono);
    }

    #[test]
    fn test_builder_defaults() {
        let format = HrirFormatBuilder::default()
            .rate(48000)
            .channel_type(ChannelType::Stereo)
            .build()
            .unwrap();

        assert_eq!(format.rate, 48000);
        assert_eq!(format.channel_type, ChannelType::Stereo);
        assert_eq!(format.sample_type, SampleType::S24);
        assert_eq!(format.points, 256);
        assert_eq!(
            format,
            HrirFormat {
                rate: 48000,
                channel_type: ChannelType::Stereo,
                ..Default::default()
            }
        );
        assert_eq!(format.sample_type.bits(), 24);
    }
}
