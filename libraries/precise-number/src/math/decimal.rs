//! Math for preserving precision of reward indices and earned unit
//! accumulators which grow by fractional amounts over time.
//!
//! Decimals are internally scaled by 10^12 to preserve precision up to
//! 12 decimal places. The underlying representation is a u256 of four
//! 64-bit words in little endian order, which is exactly the layout of
//! the scaled fields stored in on-chain accounts.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]

use crate::{error::NumberError, math::common::*};
use solana_program::program_error::ProgramError;
use anchor_lang::{AnchorSerialize, AnchorDeserialize};
use borsh::io::{self, Write, Read};
use std::{convert::TryFrom, fmt, str::FromStr};
use uint::construct_uint;

// U256 with 256 bits consisting of 4 x 64-bit words
construct_uint! {
    pub struct U256(4);
}

/// Large decimal values, precise to 12 digits
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Decimal(pub U256);

impl Decimal {
    /// One
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    fn half_wad() -> U256 {
        U256::from(HALF_WAD)
    }

    /// Create scaled decimal from percent value
    pub fn from_percent(percent: u8) -> Self {
        Self(U256::from(percent as u64 * PERCENT_SCALER))
    }

    /// Create scaled decimal from bps value
    pub fn from_bps(bps: u64) -> Self {
        Self::from(bps).try_div(10_000).unwrap()
    }

    /// Create scaled decimal from a numerator and denominator
    pub fn from_ratio(num: u128, den: u128) -> Result<Self, ProgramError> {
        Self::from(num).try_div(Self::from(den))
    }

    /// Return raw scaled value if it fits within u128
    #[allow(clippy::wrong_self_convention)]
    pub fn to_scaled_val(&self) -> Result<u128, ProgramError> {
        Ok(u128::try_from(self.0).map_err(|_| NumberError::MathOverflow)?)
    }

    /// Create decimal from scaled value
    pub fn from_scaled_val(scaled_val: u128) -> Self {
        Self(U256::from(scaled_val))
    }

    /// Words of the scaled value, least significant first. This is the
    /// shape account fields of this type are stored in.
    pub fn to_words(&self) -> [u64; 4] {
        (self.0).0
    }

    /// Build from words read out of an account field. Errors unless
    /// exactly four words are given.
    pub fn from_word_slice(words: &[u64]) -> Result<Self, ProgramError> {
        let words: [u64; 4] = words
            .try_into()
            .map_err(|_| NumberError::InvalidWordCount)?;
        Ok(Self::from(words))
    }

    /// Build from a 32 byte little endian account buffer
    pub fn from_bytes_le(slice: &[u8]) -> Self {
        Self(U256::from_little_endian(slice))
    }

    /// Round scaled decimal to u64
    pub fn try_round_u64(&self) -> Result<u64, ProgramError> {
        let rounded_val = Self::half_wad()
            .checked_add(self.0)
            .ok_or(NumberError::MathOverflow)?
            .checked_div(Self::wad())
            .ok_or(NumberError::MathOverflow)?;
        Ok(u64::try_from(rounded_val).map_err(|_| NumberError::MathOverflow)?)
    }

    /// Ceiling scaled decimal to u64
    pub fn try_ceil_u64(&self) -> Result<u64, ProgramError> {
        let ceil_val = Self::wad()
            .checked_sub(U256::from(1u64))
            .ok_or(NumberError::MathOverflow)?
            .checked_add(self.0)
            .ok_or(NumberError::MathOverflow)?
            .checked_div(Self::wad())
            .ok_or(NumberError::MathOverflow)?;
        Ok(u64::try_from(ceil_val).map_err(|_| NumberError::MathOverflow)?)
    }

    /// Floor scaled decimal to u64
    pub fn try_floor_u64(&self) -> Result<u64, ProgramError> {
        let floor_val = self
            .0
            .checked_div(Self::wad())
            .ok_or(NumberError::MathOverflow)?;
        Ok(u64::try_from(floor_val).map_err(|_| NumberError::MathOverflow)?)
    }
}

impl FromStr for Decimal {
    type Err = ProgramError;

    /// Parse a non-negative base-10 decimal string into a scaled value.
    ///
    /// At most one decimal point, ASCII digits only, no sign and no
    /// exponent. Surrounding whitespace is trimmed. Fractional digits
    /// past the 12th are dropped, rounding half up on the first one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::InvalidDecimalString.into());
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(NumberError::InvalidDecimalString.into());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(NumberError::InvalidDecimalString.into());
        }

        let mut value = U256::zero();
        for b in int_part.bytes() {
            value = value
                .checked_mul(U256::from(10u64))
                .ok_or(NumberError::MathOverflow)?
                .checked_add(U256::from((b - b'0') as u64))
                .ok_or(NumberError::MathOverflow)?;
        }
        value = value
            .checked_mul(Self::wad())
            .ok_or(NumberError::MathOverflow)?;

        let mut frac = 0u64;
        for b in frac_part.bytes().take(SCALE) {
            frac = frac * 10 + (b - b'0') as u64;
        }
        if frac_part.len() < SCALE {
            frac *= 10u64.pow((SCALE - frac_part.len()) as u32);
        }
        // The first dropped digit decides rounding; values are unsigned,
        // so nearest and half up coincide.
        if let Some(&b) = frac_part.as_bytes().get(SCALE) {
            if b >= b'5' {
                frac += 1;
            }
        }
        value = value
            .checked_add(U256::from(frac))
            .ok_or(NumberError::MathOverflow)?;

        Ok(Self(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            scaled_val.insert_str(0, &vec!["0"; SCALE - scaled_val.len()].join(""));
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(scaled_val.trim_end_matches('0').trim_end_matches('.'))
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<u64> for Decimal {
    fn from(val: u64) -> Self {
        Self(Self::wad() * U256::from(val))
    }
}

impl From<u128> for Decimal {
    fn from(val: u128) -> Self {
        Self(Self::wad() * U256::from(val))
    }
}

impl From<[u64; 4]> for Decimal {
    fn from(words: [u64; 4]) -> Self {
        Self(U256(words))
    }
}

impl TryAdd for Decimal {
    fn try_add(self, rhs: Self) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_add(rhs.0)
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

impl TrySub for Decimal {
    fn try_sub(self, rhs: Self) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_sub(rhs.0)
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

impl SaturatingSub for Decimal {
    fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl TryDiv<u64> for Decimal {
    fn try_div(self, rhs: u64) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_div(U256::from(rhs))
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

impl TryDiv<Decimal> for Decimal {
    fn try_div(self, rhs: Self) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_mul(Self::wad())
                .ok_or(NumberError::MathOverflow)?
                .checked_div(rhs.0)
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

impl TryMul<u64> for Decimal {
    fn try_mul(self, rhs: u64) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_mul(U256::from(rhs))
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

impl TryMul<Decimal> for Decimal {
    fn try_mul(self, rhs: Self) -> Result<Self, ProgramError> {
        Ok(Self(
            self.0
                .checked_mul(rhs.0)
                .ok_or(NumberError::MathOverflow)?
                .checked_div(Self::wad())
                .ok_or(NumberError::MathOverflow)?,
        ))
    }
}

/// Implementing AnchorSerialize for Decimal
impl AnchorSerialize for Decimal {
    fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // Serialize each of the four underlying u64 words in little-endian byte order
        for word in self.0.0.iter() {
            writer.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Implementing AnchorDeserialize for Decimal
impl AnchorDeserialize for Decimal {
    fn deserialize(buf: &mut &[u8]) -> io::Result<Self> {
        let mut words = [0u64; 4];
        for word in words.iter_mut() {
            let mut word_bytes = [0u8; 8];
            buf.read_exact(&mut word_bytes)?;
            *word = u64::from_le_bytes(word_bytes);
        }
        Ok(Decimal(U256(words)))
    }

    fn deserialize_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut words = [0u64; 4];
        for word in words.iter_mut() {
            let mut word_bytes = [0u8; 8];
            reader.read_exact(&mut word_bytes)?;
            *word = u64::from_le_bytes(word_bytes);
        }
        Ok(Decimal(U256(words)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero() {
        let d = Decimal::from_str("0").unwrap();
        assert_eq!(d.to_words(), [0, 0, 0, 0]);
        assert_eq!(d, Decimal::zero());
        assert_eq!(d.to_string(), "0");
    }

    #[test]
    fn test_one() {
        let d = Decimal::from_str("1").unwrap();
        assert_eq!(d.to_words(), [WAD, 0, 0, 0]);
        assert_eq!(d, Decimal::one());
        assert_eq!(d.to_string(), "1");
    }

    #[test]
    fn test_multiple_words() {
        let val = "1000000000";
        let d = Decimal::from_str(val).unwrap();
        let words = d.to_words();
        let joined = words[0] as u128 + ((words[1] as u128) << 64);
        assert_eq!(joined, 1_000_000_000u128 * WAD as u128);
        assert_eq!(words[2], 0);
        assert_eq!(words[3], 0);

        // Check that it goes back to the original value
        assert_eq!(d.to_string(), val);
    }

    #[test]
    fn test_smallest_fraction() {
        let d = Decimal::from_str("0.000000000001").unwrap();
        assert_eq!(d.to_words(), [1, 0, 0, 0]);
        assert_eq!(d.to_string(), "0.000000000001");
    }

    #[test]
    fn test_fraction_is_scaled_up() {
        let d = Decimal::from_str("1.5").unwrap();
        assert_eq!(d.to_words(), [1_500_000_000_000, 0, 0, 0]);
        assert_eq!(d.to_string(), "1.5");

        // Trailing zeros in the input collapse to the canonical rendering
        let d = Decimal::from_str("1.50").unwrap();
        assert_eq!(d.to_string(), "1.5");
    }

    #[test]
    fn test_rounds_on_thirteenth_digit() {
        let d = Decimal::from_str("0.0000000000005").unwrap();
        assert_eq!(d.to_words(), [1, 0, 0, 0]);

        let d = Decimal::from_str("0.0000000000004999").unwrap();
        assert_eq!(d, Decimal::zero());

        // Carry out of the fraction and into the integer part
        let d = Decimal::from_str("1.9999999999995").unwrap();
        assert_eq!(d.to_string(), "2");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let d = Decimal::from_str(" 1 ").unwrap();
        assert_eq!(d, Decimal::one());
    }

    #[test]
    fn test_invalid_input() {
        for bad in ["not-a-number", "", ".", "1.2.3", "-1", "+1", "1e5", "1 000"] {
            assert_eq!(
                Decimal::from_str(bad).unwrap_err(),
                NumberError::InvalidDecimalString.into(),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        // 10^66 scaled by 10^12 does not fit in 256 bits
        let big = format!("1{}", "0".repeat(66));
        assert_eq!(
            Decimal::from_str(&big).unwrap_err(),
            NumberError::MathOverflow.into()
        );
    }

    #[test]
    fn test_max_value_round_trip() {
        let words = [u64::MAX; 4];
        let d = Decimal::from(words);
        let back = Decimal::from_str(&d.to_string()).unwrap();
        assert_eq!(back.to_words(), words);
    }

    #[test]
    fn test_word_slice() {
        let d = Decimal::from_word_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(d.to_words(), [1, 2, 3, 4]);

        assert_eq!(
            Decimal::from_word_slice(&[1, 2, 3]).unwrap_err(),
            NumberError::InvalidWordCount.into()
        );
    }

    #[test]
    fn test_scaled_val() {
        let d = Decimal::from(5u64);
        assert_eq!(d.to_scaled_val().unwrap(), 5 * WAD as u128);
        assert_eq!(Decimal::from_scaled_val(5 * WAD as u128), d);
        assert_eq!(d.to_string(), "5");
    }

    #[test]
    fn test_round_floor_ceil() {
        let d = Decimal::from_str("2.5").unwrap();
        assert_eq!(d.try_round_u64().unwrap(), 3);
        assert_eq!(d.try_floor_u64().unwrap(), 2);
        assert_eq!(d.try_ceil_u64().unwrap(), 3);

        let d = Decimal::from_str("2.4").unwrap();
        assert_eq!(d.try_round_u64().unwrap(), 2);
    }

    #[test]
    fn test_add() {
        let num1 = Decimal::from(100u64);
        let num2 = Decimal::from(200u64);
        let ans = Decimal::from(300u64);
        assert_eq!(num1.try_add(num2).unwrap(), ans);
    }

    #[test]
    fn test_sub() {
        let num1 = Decimal::from(100u64);
        let num2 = Decimal::from(200u64);
        let ans = Decimal::from(100u64);
        assert_eq!(num2.try_sub(num1).unwrap(), ans);
        assert_eq!(
            num1.try_sub(num2).unwrap_err(),
            NumberError::MathOverflow.into()
        );
        assert_eq!(num1.saturating_sub(num2), Decimal::zero());
    }

    #[test]
    fn test_mul() {
        let num1 = Decimal::from(100u64);
        let num2 = Decimal::from(200u64);
        let ans = Decimal::from(20_000u64);
        assert_eq!(num1.try_mul(num2).unwrap(), ans);
        assert_eq!(num1.try_mul(200u64).unwrap(), ans);
    }

    #[test]
    fn test_div() {
        let num1 = Decimal::from(100u64);
        let num2 = Decimal::from(20u64);
        let ans = Decimal::from(5u64);
        assert_eq!(num1.try_div(num2).unwrap(), ans);
        assert_eq!(num1.try_div(20u64).unwrap(), ans);
        assert_eq!(
            num1.try_div(Decimal::zero()).unwrap_err(),
            NumberError::MathOverflow.into()
        );
    }

    #[test]
    fn test_from_ratio() {
        let d = Decimal::from_ratio(1, 2).unwrap();
        assert!(d > Decimal::zero());
        assert!(d < Decimal::one());
        assert_eq!(d, Decimal::from_str("0.5").unwrap());
    }

    #[test]
    fn test_from_percent_and_bps() {
        assert_eq!(Decimal::from_percent(50).to_string(), "0.5");
        assert_eq!(Decimal::from_bps(1).to_string(), "0.0001");
    }

    #[test]
    fn test_borsh_round_trip() {
        let d = Decimal::from_str("123.000000456").unwrap();
        let mut buf = Vec::new();
        d.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 32);
        let back = Decimal::deserialize(&mut buf.as_slice()).unwrap();
        assert_eq!(back, d);
    }

    proptest! {
        #[test]
        fn words_round_trip(words in any::<[u64; 4]>()) {
            let s = Decimal::from(words).to_string();
            let parsed = Decimal::from_str(&s).unwrap();
            prop_assert_eq!(parsed.to_words(), words);
        }

        #[test]
        fn scaling_matches_u128(int in any::<u64>(), frac in 0u64..WAD) {
            let s = format!("{}.{:012}", int, frac);
            let parsed = Decimal::from_str(&s).unwrap();
            let expected = int as u128 * WAD as u128 + frac as u128;
            prop_assert_eq!(parsed.to_scaled_val().unwrap(), expected);
        }
    }
}
