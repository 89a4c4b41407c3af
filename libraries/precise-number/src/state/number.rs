use crate::math::Decimal;
use solana_program::program_error::ProgramError;
use anchor_lang::{AnchorSerialize, AnchorDeserialize};
use borsh::io::{self, Write, Read};
use std::fmt;
use std::str::FromStr;

/// Scaled value exactly as it sits in an account field, four u64 words
/// in little endian order
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberRaw {
    pub val: [u64; 4],
}

impl NumberRaw {
    pub const LEN: usize = 4 * 8;
}

impl AnchorSerialize for NumberRaw {
    fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // Serialize each of the four u64 words in little-endian byte order
        for word in self.val.iter() {
            writer.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }
}

impl AnchorDeserialize for NumberRaw {
    fn deserialize(buf: &mut &[u8]) -> io::Result<Self> {
        let mut val = [0u64; 4];
        for word in val.iter_mut() {
            let mut word_bytes = [0u8; 8];
            buf.read_exact(&mut word_bytes)?;
            *word = u64::from_le_bytes(word_bytes);
        }
        Ok(NumberRaw { val })
    }

    fn deserialize_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut val = [0u64; 4];
        for word in val.iter_mut() {
            let mut word_bytes = [0u8; 8];
            reader.read_exact(&mut word_bytes)?;
            *word = u64::from_le_bytes(word_bytes);
        }
        Ok(NumberRaw { val })
    }
}

impl From<NumberRaw> for Decimal {
    fn from(raw: NumberRaw) -> Self {
        Decimal::from(raw.val)
    }
}

impl From<Decimal> for NumberRaw {
    fn from(value: Decimal) -> Self {
        NumberRaw {
            val: value.to_words(),
        }
    }
}

/// A scaled value paired with its decimal string rendering.
///
/// Reward indices and earned unit accumulators come out of account
/// fields as [`NumberRaw`] and are displayed as decimal strings; this
/// keeps both forms together so a value can be echoed back into an
/// instruction payload without re-encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreciseNumber {
    raw: NumberRaw,
    value_str: String,
}

impl PreciseNumber {
    /// Encode a decimal string. The string is kept verbatim for display.
    pub fn from_decimal_str(value_str: &str) -> Result<Self, ProgramError> {
        let value = Decimal::from_str(value_str)?;
        Ok(Self {
            raw: value.into(),
            value_str: value_str.to_string(),
        })
    }

    /// Decode words read out of an account field. Errors unless exactly
    /// four words are given.
    pub fn from_raw(words: &[u64]) -> Result<Self, ProgramError> {
        let value = Decimal::from_word_slice(words)?;
        Ok(Self {
            raw: value.into(),
            value_str: value.to_string(),
        })
    }

    /// Decimal string rendering of the value
    pub fn value_str(&self) -> &str {
        &self.value_str
    }

    /// The wire form, ready to serialize into an instruction payload
    pub fn raw(&self) -> NumberRaw {
        self.raw
    }

    /// Words of the scaled value, least significant first
    pub fn words(&self) -> [u64; 4] {
        self.raw.val
    }
}

impl fmt::Display for PreciseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_str)
    }
}
