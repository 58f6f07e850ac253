use super::super::*;

impl Fix256 {
  /// The exact fixed-point representation of `v`: sign-extended into the
  /// integer half, zero fraction.
  #[inline]
  pub const fn from_i64(v: i64) -> Self {
    Self { lo: 0, hi: v as i128 as u128 }
  }

  /// The integer part of `self`, truncated toward zero. Values whose
  /// integer part does not fit an `i64` wrap like an `as` cast.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// assert_eq!(Fix256::from_f64(1.75).to_i64(), 1);
  /// assert_eq!(Fix256::from_f64(-1.75).to_i64(), -1);
  /// ```
  #[inline]
  pub const fn to_i64(self) -> i64 {
    let int = self.hi as i128;
    // The halves encode floor(v) + fraction; for a negative value with a
    // non-zero fraction, truncation toward zero is that floor plus one.
    if int < 0 && self.lo != 0 {
      (int + 1) as i64
    } else {
      int as i64
    }
  }
}

impl From<i64> for Fix256 {
  #[inline]
  fn from(v: i64) -> Self {
    Self::from_i64(v)
  }
}

impl From<i32> for Fix256 {
  #[inline]
  fn from(v: i32) -> Self {
    Self::from_i64(v as i64)
  }
}
