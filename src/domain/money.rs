//! Exact monetary amounts as used by the Search Ads API.
//!
//! The API sends budgets and bids as `{"amount": "100.12", "currency": "USD"}`.
//! Amounts are converted to an integer count of minor units ([`Cents`]) straight
//! from the string digits, never through a floating point value. The only
//! floating point step is [`Cents::scale`].

use crate::utils::error::{AsaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of implied decimal places in a [`Cents`] value.
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Fixed-point amount: an integer count of minor units with two implied decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(value: i64) -> Self {
        Cents(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Multiplies by `factor` and truncates toward zero.
    ///
    /// NaN yields zero and out-of-range results saturate at `i64::MIN`/`i64::MAX`
    /// (the semantics of an `f64 as i64` cast).
    pub fn scale(self, factor: f64) -> Cents {
        Cents((self.0 as f64 * factor) as i64)
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Cents(value)
    }
}

impl From<Cents> for i64 {
    fn from(value: Cents) -> Self {
        value.0
    }
}

impl FromStr for Cents {
    type Err = AsaError;

    /// Strict parse of `-?digits[.digits]`.
    ///
    /// Up to two fractional digits are padded to minor units (`"100.1"` is
    /// `10010`); extra fractional digits are truncated toward zero.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| AsaError::InvalidAmount {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("only digits and a single decimal point are allowed"));
        }

        // 負數直接往負方向累加，i64::MIN 才能解析回來
        let push_digit = |acc: i64, digit: i64| {
            acc.checked_mul(10).and_then(|a| {
                if negative {
                    a.checked_sub(digit)
                } else {
                    a.checked_add(digit)
                }
            })
        };

        let kept = &fraction[..fraction.len().min(MINOR_UNIT_DIGITS as usize)];
        let mut minor = 0i64;
        for b in whole.bytes().chain(kept.bytes()) {
            minor = push_digit(minor, i64::from(b - b'0'))
                .ok_or_else(|| invalid("amount out of range"))?;
        }
        for _ in kept.len()..MINOR_UNIT_DIGITS as usize {
            minor = push_digit(minor, 0).ok_or_else(|| invalid("amount out of range"))?;
        }

        Ok(Cents(minor))
    }
}

impl fmt::Display for Cents {
    /// `0` renders as `"0"`, under one unit as `"0.05"`, otherwise the point
    /// goes before the last two digits (`"100.12"`). Negative values get a
    /// leading `-` in front of the rendered absolute value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }

        let digits = self.0.unsigned_abs().to_string();
        if digits.len() <= MINOR_UNIT_DIGITS as usize {
            write!(f, "0.{:0>2}", digits)
        } else {
            let (whole, fraction) = digits.split_at(digits.len() - MINOR_UNIT_DIGITS as usize);
            write!(f, "{}.{}", whole, fraction)
        }
    }
}

/// Parses an amount, falling back to zero when it is malformed.
///
/// Amounts come from the Search Ads API and are trusted to be well formed.
/// Every lenient conversion in the crate goes through here; swap the body for
/// `amount.parse::<Cents>()` propagation to make them strict.
pub fn cents_or_zero(amount: &str) -> i64 {
    match amount.parse::<Cents>() {
        Ok(cents) => cents.value(),
        Err(e) => {
            tracing::debug!("Treating malformed amount as zero: {}", e);
            0
        }
    }
}

/// A currency amount as exchanged with the API. The currency code is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
}

impl Money {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }

    /// Builds a value from a count of minor units.
    pub fn with_cents(cents: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Cents::new(cents).to_string(),
            currency: currency.into(),
        }
    }

    /// The whole amount in cents; malformed amounts count as zero.
    pub fn amount_cents(&self) -> i64 {
        cents_or_zero(&self.amount)
    }

    /// The whole amount in cents, failing on malformed amounts.
    pub fn try_amount_cents(&self) -> Result<i64> {
        self.amount.parse::<Cents>().map(Cents::value)
    }

    /// Scales the amount by `factor`, truncating toward zero. Currency is kept.
    pub fn scale(&self, factor: f64) -> Money {
        let scaled = Cents::new(self.amount_cents()).scale(factor);
        Money::with_cents(scaled.value(), self.currency.clone())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
