use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Upper bound on a rental duration, about 114 000 years
const MAX_WHOLE_HOURS: u32 = 1_000_000_000;

/// A rental duration in hours, always finite, non-negative and at most
/// [`Hours::MAX`]
///
/// Construction never fails: anything that is not a usable non-negative
/// number becomes zero hours, so a bad input produces a zero cost instead
/// of an error. Durations above the cap are clamped to it, which keeps
/// `rate * hours` inside `Decimal` range for any realistic rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Hours(Decimal);

impl Hours {
    pub const ZERO: Hours = Hours(Decimal::ZERO);
    pub const MAX: Hours = Hours(Decimal::from_parts(MAX_WHOLE_HOURS, 0, 0, false, 0));

    pub fn new(value: Decimal) -> Self {
        if value.is_sign_negative() {
            Self::ZERO
        } else if value > Self::MAX.0 {
            debug!("Clamping {} hours to {}", value, Self::MAX);
            Self::MAX
        } else {
            Self(value.normalize())
        }
    }

    /// Parse user input leniently
    ///
    /// Leading whitespace is skipped and the longest numeric prefix is used,
    /// so `"10h"` is ten hours. Exponents are accepted (`"1.5e2"`).
    pub fn parse(input: &str) -> Self {
        match parse_numeric_prefix(input.trim()) {
            Some(value) => Self::new(value),
            None => {
                debug!("Treating unparseable hours input {:?} as zero", input);
                Self::ZERO
            }
        }
    }

    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return Self::ZERO;
        }
        if value > f64::from(MAX_WHOLE_HOURS) {
            return Self::MAX;
        }
        Decimal::from_f64(value).map(Self::new).unwrap_or(Self::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for Hours {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl From<&String> for Hours {
    fn from(input: &String) -> Self {
        Self::parse(input)
    }
}

impl From<f64> for Hours {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u32> for Hours {
    fn from(value: u32) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl From<Decimal> for Hours {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

/// Extract `[+-]digits[.digits][e[+-]digits]` from the start of `input`
fn parse_numeric_prefix(input: &str) -> Option<Decimal> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &input[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &input[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mantissa = format!(
        "{}{}{}{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "" } else { "." },
        frac_part
    );
    let mut value = match Decimal::from_str(&mantissa) {
        Ok(value) => value,
        // Integer part wider than Decimal; clamped later by Hours::new
        Err(_) if int_part.trim_start_matches('0').len() > 28 => saturated(negative),
        Err(_) => return None,
    };

    // An exponent only counts when at least one digit follows it
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let digits_start = exp_pos;
        while exp_pos < bytes.len() && bytes[exp_pos].is_ascii_digit() {
            exp_pos += 1;
        }
        if exp_pos > digits_start {
            let exponent: u32 = input[digits_start..exp_pos].parse().unwrap_or(u32::MAX);
            value = apply_exponent(value, exponent, exp_negative);
        }
    }

    Some(value)
}

/// Scale by `10^exponent`, saturating at the `Decimal` bounds
fn apply_exponent(mut value: Decimal, exponent: u32, negative: bool) -> Decimal {
    for _ in 0..exponent {
        if value.is_zero() {
            break;
        }
        if negative {
            value = value.checked_div(Decimal::TEN).unwrap_or(Decimal::ZERO);
        } else {
            match value.checked_mul(Decimal::TEN) {
                Some(scaled) => value = scaled,
                None => return saturated(value.is_sign_negative()),
            }
        }
    }
    value
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}
