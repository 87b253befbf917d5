// src/core/classifier.rs
use crate::core::types::Numeral;
use crate::errors::ConfigError;
use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// Default base: one class per day of the week.
pub const DAYS_OF_THE_WEEK: u32 = 7;

/// A validated equivalence base. Holding one means the base is positive,
/// so classification itself can't fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Modulus(NonZeroU32);

impl Modulus {
    pub fn new(base: i64) -> Result<Self, ConfigError> {
        u32::try_from(base)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ConfigError::InvalidBase { base })
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// `value mod base`, always in `[0, base)`.
    pub fn classify(self, value: &Numeral) -> u32 {
        // below a u32 base the remainder has at most one digit; zero has none
        let remainder = value.as_biguint() % BigUint::from(self.get());
        remainder.iter_u32_digits().next().unwrap_or(0)
    }
}

const DEFAULT_BASE: NonZeroU32 = match NonZeroU32::new(DAYS_OF_THE_WEEK) {
    Some(base) => base,
    None => panic!("default base must be non-zero"),
};

impl Default for Modulus {
    fn default() -> Self {
        Self(DEFAULT_BASE)
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One-shot form of `Modulus::new(base)?.classify(value)`.
pub fn classify(value: impl Into<Numeral>, base: i64) -> Result<u32, ConfigError> {
    Ok(Modulus::new(base)?.classify(&value.into()))
}
