use super::*;

use crate::wide::div_wide;
use core::str::FromStr;

/// The error returned when [`Fix256::from_str`] cannot consume the whole
/// input as one number.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseFixError;

impl core::fmt::Display for ParseFixError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str("invalid fixed-point literal")
  }
}

impl core::error::Error for ParseFixError {}

impl Fix256 {
  /// Parse a number from the start of `s`, returning the value and the
  /// number of bytes consumed (zero when no number is present, in which
  /// case the value is zero).
  ///
  /// The accepted shape is optional whitespace, an optional sign, an
  /// optional `0x`/`0X` prefix selecting base 16, integer digits, and an
  /// optional decimal point with fractional digits. Parsing stops at the
  /// first byte that does not fit.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let (v, used) = Fix256::parse_prefix("-2.5 apples");
  /// assert_eq!(v, Fix256::from_f64(-2.5));
  /// assert_eq!(used, 4);
  ///
  /// let (v, used) = Fix256::parse_prefix("0x1.8");
  /// assert_eq!(v, Fix256::from_f64(1.5));
  /// assert_eq!(used, 5);
  /// ```
  pub fn parse_prefix(s: &str) -> (Self, usize) {
    Self::parse_prefix_with(s, b'.')
  }

  /// As [`parse_prefix`](Self::parse_prefix) with a caller-chosen decimal
  /// point byte, the counterpart of [`FormatOpts::decimal_point`].
  pub fn parse_prefix_with(s: &str, decimal_point: u8) -> (Self, usize) {
    let b = s.as_bytes();
    let mut i = 0;

    while i < b.len() && matches!(b[i], b' ' | b'\t' | b'\r' | b'\n' | 0x0b) {
      i += 1;
    }

    let mut negative = false;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
      negative = b[i] == b'-';
      i += 1;
    }

    let mut base = 10u32;
    let mut any_digits = false;
    if i + 1 < b.len() && b[i] == b'0' && (b[i + 1] == b'x' || b[i + 1] == b'X') {
      base = 16;
      // The leading zero already counts as a digit.
      any_digits = true;
      i += 2;
    }

    let digit = |c: u8| -> Option<u128> {
      match c {
        b'0'..=b'9' => Some((c - b'0') as u128),
        b'a'..=b'f' if base == 16 => Some((c - b'a' + 10) as u128),
        b'A'..=b'F' if base == 16 => Some((c - b'A' + 10) as u128),
        _ => None,
      }
    };

    // Integer part: plain multiply-accumulate into the high half, wrapping
    // like the arithmetic does.
    let mut hi: u128 = 0;
    while i < b.len() {
      match digit(b[i]) {
        Some(d) => {
          hi = hi.wrapping_mul(base as u128).wrapping_add(d);
          any_digits = true;
          i += 1;
        }
        None => break,
      }
    }

    // Fraction: scan forward to the last digit, then fold right to left.
    // Each step divides the digit-prefixed fraction by the base through the
    // wide kernel, with a half-base bias so the overall conversion rounds
    // to nearest. That bias is what makes a 39-place decimal rendering
    // parse back to the exact original bits, and it is inert for the exact
    // hex expansions (every hex step divides evenly).
    let mut lo: u128 = 0;
    if i < b.len() && b[i] == decimal_point {
      i += 1;
      let start = i;
      while i < b.len() && digit(b[i]).is_some() {
        i += 1;
      }
      any_digits |= i > start;

      for &c in b[start..i].iter().rev() {
        let d = digit(c).unwrap_or(0);
        let (biased, carry) = lo.overflowing_add(base as u128 / 2);
        let head = d + carry as u128;
        lo = if head >= base as u128 {
          // The rounded fraction would reach 1.0; clamp to just below.
          u128::MAX
        } else {
          div_wide(head, biased, base as u128).0
        };
      }
    }

    if !any_digits {
      return (Self::ZERO, 0);
    }
    let v = Self { lo, hi };
    (if negative { -v } else { v }, i)
  }
}

impl FromStr for Fix256 {
  type Err = ParseFixError;

  /// Parses with [`parse_prefix`](Self::parse_prefix) and requires the
  /// whole string to be consumed.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let v: Fix256 = "12.25".parse().unwrap();
  /// assert_eq!(v, Fix256::from_f64(12.25));
  /// assert!("12.25x".parse::<Fix256>().is_err());
  /// ```
  fn from_str(s: &str) -> Result<Self, ParseFixError> {
    match Self::parse_prefix(s) {
      (v, used) if used == s.len() && used > 0 => Ok(v),
      _ => Err(ParseFixError),
    }
  }
}
