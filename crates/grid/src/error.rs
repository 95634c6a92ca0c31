use mhr_dsp::ResamplingError;

use crate::policy::ValidationError;

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "Validation error: {}", _0)]
    Validation(ValidationError),

    #[display(fmt = "Resampling error: {}", _0)]
    Resampling(ResamplingError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(Validation, ValidationError);
conv!(Resampling, ResamplingError);

impl Error {
    /// Was a layout, format, or rate outside the bounds of the [crate::ValidationPolicy] in effect?
    pub fn is_validation(&self) -> bool {
        self.payload.is_validation()
    }

    pub fn is_resampling(&self) -> bool {
        self.payload.is_resampling()
    }

    /// The validation failure behind this error, if that's what it is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match &self.payload {
            ErrorPayload::Validation(e) => Some(e),
            ErrorPayload::Resampling(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
