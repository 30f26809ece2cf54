//! Helper methods for [`Coin`] and [`DecCoin`].
//!
//! Provides constructors for common Terra denominations, parsing of the
//! `"1000uluna"` / `"0.015uluna"` string form the CLI and config files use,
//! and `Display` back to that form.

use crate::types::{Coin, DecCoin};
use std::fmt;
use std::str::FromStr;

/// 1 LUNA = 10^6 uluna. All native Terra denoms use the same micro scale.
const MICRO_PER_WHOLE: u128 = 1_000_000;

/// Failure to parse a `"<amount><denom>"` coin string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCoinError {
    #[error("empty coin string")]
    Empty,
    #[error("invalid amount in {0:?}")]
    InvalidAmount(String),
    #[error("missing denomination in {0:?}")]
    MissingDenom(String),
}

fn split_amount_denom(input: &str) -> Result<(&str, &str), ParseCoinError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCoinError::Empty);
    }
    let denom_start = input
        .find(|c: char| c != '.' && !c.is_ascii_digit())
        .ok_or_else(|| ParseCoinError::MissingDenom(input.to_string()))?;
    if denom_start == 0 {
        return Err(ParseCoinError::InvalidAmount(input.to_string()));
    }
    Ok(input.split_at(denom_start))
}

// ---------------------------------------------------------------------------
// Coin helpers
// ---------------------------------------------------------------------------

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// A LUNA amount in micro units.
    pub fn uluna(amount: u128) -> Self {
        Self::new("uluna", amount)
    }

    /// A TerraUSD amount in micro units.
    pub fn uusd(amount: u128) -> Self {
        Self::new("uusd", amount)
    }

    /// Create a [`Coin`] from a whole-unit amount (multiplied by 10^6).
    pub fn from_whole(denom: impl Into<String>, whole: u64) -> Self {
        Self::new(denom, u128::from(whole) * MICRO_PER_WHOLE)
    }

    /// Approximate value in whole units as `f64` (useful for display).
    pub fn as_whole_f64(&self) -> f64 {
        self.amount as f64 / MICRO_PER_WHOLE as f64
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = ParseCoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(s)?;
        let amount = amount
            .parse()
            .map_err(|_| ParseCoinError::InvalidAmount(s.to_string()))?;
        Ok(Self::new(denom, amount))
    }
}

// ---------------------------------------------------------------------------
// DecCoin helpers
// ---------------------------------------------------------------------------

impl DecCoin {
    /// The amount is stored as given; it must be a plain decimal such as
    /// `"0.015"`.
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = ParseCoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(s)?;
        // Validate the decimal without normalizing it.
        if amount.parse::<f64>().is_err() || amount.ends_with('.') {
            return Err(ParseCoinError::InvalidAmount(s.to_string()));
        }
        Ok(Self::new(denom, amount))
    }
}

/// Parse a comma-separated gas-price list such as `"0.015uluna,0.15uusd"`.
pub fn parse_dec_coins(input: &str) -> Result<Vec<DecCoin>, ParseCoinError> {
    input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
