use solana_program::program_error::ProgramError;

/// Scale of precision
pub const SCALE: usize = 12;

/// Identity (WAD) with 12 decimal places
pub const WAD: u64 = 1_000_000_000_000;

/// Half of identity
pub const HALF_WAD: u64 = 500_000_000_000;

/// Scale for percentages (e.g., 100% = 1_000_000_000_000)
pub const PERCENT_SCALER: u64 = 10_000_000_000;

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    fn try_add(self, rhs: Self) -> Result<Self, ProgramError>;
}

/// Try to subtract, return an error on underflow
pub trait TrySub: Sized {
    fn try_sub(self, rhs: Self) -> Result<Self, ProgramError>;
}

/// Try to divide, return an error on overflow or division by zero
pub trait TryDiv<RHS>: Sized {
    fn try_div(self, rhs: RHS) -> Result<Self, ProgramError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS>: Sized {
    fn try_mul(self, rhs: RHS) -> Result<Self, ProgramError>;
}

/// Subtract, saturating at zero
pub trait SaturatingSub: Sized {
    fn saturating_sub(self, rhs: Self) -> Self;
}
