use super::super::*;

/// 2¹²⁷ and 2¹²⁸ as doubles (both exact).
const TWO_POW_127: f64 = 170141183460469231731687303715884105728.0;
const TWO_POW_128: f64 = 340282366920938463463374607431768211456.0;

impl Fix256 {
  /// Convert a double, saturating outside `±2¹²⁷` and mapping NaN to zero.
  /// Every finite in-range double converts exactly: the 128 fraction bits
  /// comfortably cover the 52 of an `f64`.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// assert_eq!(Fix256::from_f64(-2.125).to_f64(), -2.125);
  /// assert_eq!(Fix256::from_f64(f64::INFINITY), Fix256::MAX);
  /// ```
  pub fn from_f64(v: f64) -> Self {
    if v.is_nan() {
      return Self::ZERO;
    }
    if v < -TWO_POW_127 {
      return Self::MIN;
    }
    if v >= TWO_POW_127 {
      return Self::MAX;
    }

    let negative = v < 0.0;
    let v = if negative { -v } else { v };

    // Split into integer and fractional parts; the fraction scales to the
    // low half exactly (a double's mantissa shifts, it never rounds here).
    let int = v as u128;
    let frac = (v - int as f64) * TWO_POW_128;
    let out = Self { lo: frac as u128, hi: int };
    if negative {
      -out
    } else {
      out
    }
  }

  /// Convert to the nearest double. Precision is the double's, not ours:
  /// anything beyond 53 significant bits rounds.
  pub fn to_f64(self) -> f64 {
    let negative = self.is_negative();
    let m = self.abs();
    // The magnitude's halves read as plain unsigned, so MIN comes out as
    // exactly 2¹²⁷ here and -2¹²⁷ after the sign.
    let d = m.hi as f64 + m.lo as f64 / TWO_POW_128;
    if negative {
      -d
    } else {
      d
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  /// The double round-trip table: conversions are exact, so formatting the
  /// fixed-point value at 18 places must agree with formatting the double.
  #[test]
  fn round_trips_doubles_exactly() {
    let mut buf = [0u8; 128];
    for d in [
      -2.125,
      0.25,
      -0.25,
      -2.5,
      2.118018798719000910681,
      2.918018798719000910681,
      2.518018798719000910681,
      -2.118018798719000910681,
      -2.918018798719000910681,
      0.9999,
      5.3,
      1.0 / 18446744073709551616.0,
    ] {
      let v = Fix256::from_f64(d);
      let n = v.write_spec(&mut buf, "%.18f");
      assert_eq!(core::str::from_utf8(&buf[..n]).unwrap(), format!("{d:.18}"), "format {d}");
      assert_eq!(v.to_f64(), d, "to_f64 {d}");
    }
  }

  #[test]
  fn saturates_and_absorbs_nan() {
    assert_eq!(Fix256::from_f64(f64::NAN), Fix256::ZERO);
    assert_eq!(Fix256::from_f64(f64::INFINITY), Fix256::MAX);
    assert_eq!(Fix256::from_f64(f64::NEG_INFINITY), Fix256::MIN);
    assert_eq!(Fix256::from_f64(TWO_POW_127), Fix256::MAX);
    assert_eq!(Fix256::from_f64(1e40), Fix256::MAX);
    assert_eq!(Fix256::from_f64(-1e40), Fix256::MIN);
  }

  #[test]
  fn boundary_values() {
    assert_eq!(Fix256::from_f64(0.0), Fix256::ZERO);
    assert_eq!(Fix256::from_f64(-0.0), Fix256::ZERO);
    assert_eq!(Fix256::from_f64(1.0), Fix256::ONE);
    assert_eq!(Fix256::from_f64(0.5).to_parts(), (1 << 127, 0));
    assert_eq!(Fix256::from_f64(-1.0), -Fix256::ONE);
    assert_eq!(Fix256::MIN.to_f64(), -TWO_POW_127);
    assert_eq!(Fix256::MAX.to_f64(), TWO_POW_127);
  }

  #[test]
  fn tiny_values_are_exact() {
    // 2⁻¹²⁸ is the smallest positive double-representable value we hold.
    let ulp = (-128.0f64).exp2();
    assert_eq!(Fix256::from_f64(ulp), Fix256::MIN_POSITIVE);
    assert_eq!(Fix256::MIN_POSITIVE.to_f64(), ulp);
    // Smaller doubles underflow to zero.
    assert_eq!(Fix256::from_f64((-129.0f64).exp2()), Fix256::ZERO);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]

    #[test]
    fn finite_doubles_round_trip(bits in any::<u64>()) {
      let d = f64::from_bits(bits);
      prop_assume!(d.is_finite() && d.abs() < TWO_POW_127 && d.abs() >= (-128.0f64).exp2());
      prop_assert_eq!(Fix256::from_f64(d).to_f64(), d);
    }

    #[test]
    fn to_f64_is_monotone_on_integers(a in any::<i64>(), b in any::<i64>()) {
      let (fa, fb) = (Fix256::from(a).to_f64(), Fix256::from(b).to_f64());
      let monotone = if a <= b { fa <= fb } else { fa >= fb };
      prop_assert!(monotone);
    }
  }
}
