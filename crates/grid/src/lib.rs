//! The directional HRIR grid and its validated construction.
//!
//! Measurements are organized as fields (source distances), each holding a set of elevations, each holding a ring of
//! azimuths.  [GridBuilder] validates a layout against a [ValidationPolicy] and produces an [HrirData] with zeroed
//! samples; a loader then fills samples and delays in through [HrirData::direction_mut], and the passes in [process]
//! prepare the responses for the rest of the pipeline.
mod builder;
mod error;
mod format;
mod lookup;
mod model;
mod policy;
pub mod process;

pub use builder::{fft_size_for, prepare_hrir_data, FieldLayout, GridBuilder};
pub use error::{Error, Result};
pub use format::*;
pub use lookup::{AzimuthSpan, ElevationSpan};
pub use model::*;
pub use policy::{ValidationError, ValidationPolicy};
