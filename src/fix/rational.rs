//! This module contains functions translating a [`Fix256`] to and from
//! arbitrary-precision malachite numbers, for the purposes of _testing_.
//! This lets every kernel be checked against exact reference arithmetic:
//!
//!   - integer(a + b) = wrap(integer(a) + integer(b))
//!   - integer(a · b) = wrap(sign · ((|a|·|b| + 2¹²⁷) >> 128))
//!   - rational(ONE) = 1
//!   - etc.

use super::*;

use malachite::base::num::arithmetic::traits::ModPowerOf2;
use malachite::base::num::arithmetic::traits::PowerOf2;
use malachite::base::num::arithmetic::traits::UnsignedAbs;
use malachite::rational::Rational;
use malachite::{Integer, Natural};

/// The raw 256-bit pattern as a signed integer; the denoted value is this
/// over 2¹²⁸.
pub(crate) fn to_integer(v: Fix256) -> Integer {
  (Integer::from(v.hi as i128) << 128u64) + Integer::from(v.lo)
}

/// The denoted value as an exact rational.
pub(crate) fn to_rational(v: Fix256) -> Rational {
  Rational::from(to_integer(v)) / Rational::power_of_2(128i64)
}

/// The magnitude of the raw pattern, matching what [`Fix256::abs`] presents
/// to the unsigned kernels (2²⁵⁵ for `MIN`).
pub(crate) fn magnitude(v: Fix256) -> Natural {
  to_integer(v).unsigned_abs()
}

/// Wrap an arbitrary integer into the 256-bit two's-complement pattern, the
/// reference for every wrapping operation.
pub(crate) fn from_integer_wrapped(n: Integer) -> Fix256 {
  let bits: Natural = n.mod_power_of_2(256);
  let lo: Natural = (&bits).mod_power_of_2(128);
  let hi: Natural = bits >> 128u64;
  Fix256 {
    lo: u128::try_from(&lo).unwrap(),
    hi: u128::try_from(&hi).unwrap(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn constants_translate() {
    assert_eq!(to_integer(Fix256::ZERO), Integer::from(0));
    assert_eq!(to_integer(Fix256::ONE), Integer::power_of_2(128u64));
    assert_eq!(to_integer(Fix256::MIN_POSITIVE), Integer::from(1));
    assert_eq!(to_integer(Fix256::MIN), -Integer::power_of_2(255u64));
    assert_eq!(to_integer(Fix256::MAX), Integer::power_of_2(255u64) - Integer::from(1));
  }

  #[test]
  fn wrapping_inverts_translation() {
    for v in Fix256::cases_interesting() {
      assert_eq!(from_integer_wrapped(to_integer(v)), v, "{v:?}");
    }
  }

  #[test]
  fn wrapping_reduces_modulo_2_256() {
    let span = Integer::power_of_2(256u64);
    assert_eq!(from_integer_wrapped(Integer::from(-1)), !Fix256::ZERO);
    assert_eq!(from_integer_wrapped(span.clone()), Fix256::ZERO);
    assert_eq!(from_integer_wrapped(span + Integer::from(1)), Fix256::MIN_POSITIVE);
  }

  #[test]
  fn magnitudes() {
    assert_eq!(magnitude(Fix256::from(-3i64)), Natural::from(3u32) << 128u64);
    assert_eq!(magnitude(Fix256::MIN), Natural::power_of_2(255u64));
  }
}
