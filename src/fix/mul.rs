use super::*;

use crate::wide::mul_wide;

impl Fix256 {
  /// Fixed-point multiplication, rounded to nearest at the last place and
  /// wrapping on overflow.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let half = Fix256::from_parts(1 << 127, 0);
  /// assert_eq!(half * half, Fix256::from_parts(1 << 126, 0)); // 0.25
  /// assert_eq!(Fix256::from(-3i64) * Fix256::from(4i64), Fix256::from(-12i64));
  /// ```
  pub fn mul(self, rhs: Self) -> Self {
    // Work in sign-magnitude: the product of the magnitudes, then the sign.
    let negative = self.is_negative() != rhs.is_negative();
    let a = self.abs();
    let b = rhs.abs();

    // The full product of two 256-bit magnitudes is 512 bits:
    //
    //   a·b = aH·bH·2²⁵⁶ + (aH·bL + aL·bH)·2¹²⁸ + aL·bL
    //
    // The fixed-point result is that product shifted right 128 bits (both
    // operands carry 128 fraction bits, the result keeps 128), rounded to
    // nearest by adding bit 127 of the discarded low part, and truncated to
    // its low 256 bits. After the shift only the low 128 bits of aH·bH
    // survive the truncation, so that partial is computed with a plain
    // wrapping multiply.
    let (ll_hi, ll_lo) = mul_wide(a.lo, b.lo);
    let (lh_hi, lh_lo) = mul_wide(a.lo, b.hi);
    let (hl_hi, hl_lo) = mul_wide(a.hi, b.lo);
    let hh_lo = a.hi.wrapping_mul(b.hi);

    let round = ll_lo >> 127;
    let (lo, c0) = ll_hi.overflowing_add(round);
    let (lo, c1) = lo.overflowing_add(lh_lo);
    let (lo, c2) = lo.overflowing_add(hl_lo);
    let hi = lh_hi
      .wrapping_add(hl_hi)
      .wrapping_add(hh_lo)
      .wrapping_add(c0 as u128 + c1 as u128 + c2 as u128);

    let product = Self { lo, hi };
    if negative {
      -product
    } else {
      product
    }
  }
}

mk_ops!{Mul, MulAssign, mul, mul_assign}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fix::rational::{from_integer_wrapped, magnitude, to_integer};
  use malachite::Integer;
  use proptest::prelude::*;

  /// Reference multiply: product of the raw magnitudes, +2¹²⁷ then shift
  /// (round to nearest, ties up), sign, wrap to 256 bits.
  fn reference(a: Fix256, b: Fix256) -> Fix256 {
    let negative = a.is_negative() != b.is_negative();
    let mag = (Integer::from(magnitude(a)) * Integer::from(magnitude(b)) + (Integer::from(1) << 127u64)) >> 128u64;
    from_integer_wrapped(if negative { -mag } else { mag })
  }

  #[test]
  fn identities() {
    let v = Fix256::from_f64(1234.5678);
    assert_eq!(v * Fix256::ONE, v);
    assert_eq!(Fix256::ONE * v, v);
    assert_eq!(v * Fix256::ZERO, Fix256::ZERO);
    assert_eq!(v * -Fix256::ONE, -v);
  }

  #[test]
  fn small_products() {
    assert_eq!(Fix256::from(6i64) * Fix256::from(7i64), Fix256::from(42i64));
    assert_eq!(Fix256::from(-6i64) * Fix256::from(7i64), Fix256::from(-42i64));
    assert_eq!(Fix256::from(-6i64) * Fix256::from(-7i64), Fix256::from(42i64));
    assert_eq!(Fix256::from_f64(2.5) * Fix256::from(4i64), Fix256::from(10i64));
  }

  #[test]
  fn rounds_the_discarded_half_ulp_up() {
    // 0.5 · 2⁻¹²⁸ = 2⁻¹²⁹ exactly, which rounds up to one ulp.
    let half = Fix256::from_parts(1 << 127, 0);
    assert_eq!(half * Fix256::MIN_POSITIVE, Fix256::MIN_POSITIVE);
    // 2⁻¹²⁸ · 2⁻¹²⁸ = 2⁻²⁵⁶ rounds down to zero.
    assert_eq!(Fix256::MIN_POSITIVE * Fix256::MIN_POSITIVE, Fix256::ZERO);
  }

  #[test]
  fn integer_overflow_wraps() {
    // 2⁶⁴ · 2⁶⁴ = 2¹²⁸, whose integer bits all fall off the top.
    let big = Fix256::from_parts(0, 1 << 64);
    assert_eq!(big * big, Fix256::ZERO);
    assert_eq!(Fix256::MIN * Fix256::MIN, reference(Fix256::MIN, Fix256::MIN));
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn matches_reference(a in Fix256::cases_mixed(), b in Fix256::cases_mixed()) {
      prop_assert_eq!(a * b, reference(a, b));
    }

    #[test]
    fn commutative(a in Fix256::cases_proptest(), b in Fix256::cases_proptest()) {
      prop_assert_eq!(a * b, b * a);
    }

    #[test]
    fn negation_distributes(a in Fix256::cases_mixed(), b in Fix256::cases_mixed()) {
      prop_assert_eq!(from_integer_wrapped(-to_integer(a * b)), (-a) * b);
    }
  }
}
