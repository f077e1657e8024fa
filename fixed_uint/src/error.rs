use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Division and/or modulus by zero is forbidden.")]
    DivideByZero,

    #[error("floor_log2 is undefined for zero")]
    LogOfZero,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Value is too large for a {bits}-bit unsigned integer")]
    TooLarge { bits: u32 },

    #[error("Negative value {0} cannot be converted to an unsigned integer")]
    Negative(i128),

    #[error("Unknown 128-bit backend: {0}")]
    UnknownBackend(String),

    #[error("Failed to write division trace: {0}")]
    Trace(#[from] fmt::Error),
}

impl Error {
    /// `true` for failures caused by a zero operand where one is not allowed.
    pub fn is_domain(&self) -> bool {
        matches!(self, Error::DivideByZero | Error::LogOfZero)
    }

    /// `true` for text (or byte length) that matches no accepted shape.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Error::InvalidFormat(_))
    }

    /// `true` for well-formed input whose value does not fit the target width.
    pub fn is_too_large(&self) -> bool {
        matches!(self, Error::TooLarge { .. })
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidFormat(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
