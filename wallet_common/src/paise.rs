use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";
pub const PAISE_PER_RUPEE: i64 = 100;

//--------------------------------------        Paise        ---------------------------------------------------------
/// An amount of Indian rupees, held in paise (1/100th of a rupee).
///
/// This is also the unit the payment gateway uses for order amounts, so values can be passed through unchanged.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Parses a rupee amount, e.g. `"500"`, `"12.5"` or `"0.05"`, into paise. Amounts with more than two decimal
/// places, signs or other characters are rejected.
impl FromStr for Paise {
    type Err = PaiseConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || PaiseConversionError(format!("'{s}' is not a valid rupee amount"));
        let (rupees, fraction) = s.split_once('.').unwrap_or((s, ""));
        if rupees.is_empty() && fraction.is_empty() {
            return Err(err());
        }
        let all_digits = |v: &str| v.chars().all(|c| c.is_ascii_digit());
        if !all_digits(rupees) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(err());
        }
        let rupees = if rupees.is_empty() { 0 } else { rupees.parse::<i64>().map_err(|_| err())? };
        let paise = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| err())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| err())?,
        };
        rupees.checked_mul(PAISE_PER_RUPEE).and_then(|v| v.checked_add(paise)).map(Self).ok_or_else(err)
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_rupee = PAISE_PER_RUPEE.unsigned_abs();
        write!(f, "{sign}₹{}.{:02}", abs / per_rupee, abs % per_rupee)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The amount in rupees, e.g. `12.5` for 1250 paise. Only for presentation; never do arithmetic on the result.
    pub fn to_rupees(&self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
    }
}
