//! Conversion between smallest units and decimal coin strings.
//!
//! Amounts are always `u64` smallest units on the wire and in the cache. The
//! display form is a decimal string with up to eight fractional digits, parsed
//! without going through floating point.

use crate::error::TypesError;
use crate::params::{UNITS_PER_COIN, UNIT_DECIMALS};

/// Format smallest units as a decimal coin string, trimming trailing zeros.
pub fn format_units(units: u64) -> String {
    let whole = units / UNITS_PER_COIN;
    let frac = units % UNITS_PER_COIN;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = UNIT_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a decimal coin string (e.g. `"12.5"`) into smallest units.
pub fn parse_units(s: &str) -> Result<u64, TypesError> {
    let invalid = || TypesError::InvalidAmount(s.to_string());
    let s = s.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > UNIT_DECIMALS
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac_units: u64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = UNIT_DECIMALS);
        padded.parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(UNITS_PER_COIN)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(invalid)
}
