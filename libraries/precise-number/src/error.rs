use num_derive::FromPrimitive;
use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

/// Errors returned by the number codec
#[derive(Clone, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum NumberError {
    /// The input is not a non-negative base-10 decimal numeral
    #[error("Invalid decimal string")]
    InvalidDecimalString,

    /// A raw value must contain exactly four 64-bit words
    #[error("Invalid word count")]
    InvalidWordCount,

    /// Scaled value does not fit in 256 bits
    #[error("Math overflow")]
    MathOverflow,
}

impl From<NumberError> for ProgramError {
    fn from(e: NumberError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for NumberError {
    fn type_of() -> &'static str {
        "Number Error"
    }
}
