use thiserror::Error;


/// An error returned when parsing an integer from text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIntegerError {
    #[error("cannot parse integer from empty string")]
    Empty,

    #[error("invalid digit found in string")]
    InvalidDigit,

    #[error("number too large to fit in target type")]
    PosOverflow,

    #[error("number too small to fit in target type")]
    NegOverflow,
}

/// An error returned by a fallible conversion into or out of a wide integer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("out of range integral type conversion attempted")]
    OutOfRange,

    #[error("floating point value has a fractional part")]
    NotIntegral,

    #[error("floating point value is not finite")]
    NotFinite,
}
