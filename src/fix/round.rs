use super::*;

impl Fix256 {
  /// The largest integer-valued number not above `self`: the fraction half
  /// is cleared, which for a two's-complement representation is exactly
  /// rounding toward negative infinity.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// assert_eq!(Fix256::from_f64(1.75).floor(), Fix256::from(1i64));
  /// assert_eq!(Fix256::from_f64(-1.75).floor(), Fix256::from(-2i64));
  /// ```
  #[inline]
  pub const fn floor(self) -> Self {
    Self { lo: 0, hi: self.hi }
  }

  /// The smallest integer-valued number not below `self`.
  #[inline]
  pub const fn ceil(self) -> Self {
    Self { lo: 0, hi: self.hi.wrapping_add((self.lo != 0) as u128) }
  }

  /// Round to the nearest integer, halfway cases away from zero.
  ///
  /// For negative values the tie sits one ulp above the 0.5 fraction
  /// pattern, so the threshold shifts by one to keep ties moving away from
  /// zero.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// assert_eq!(Fix256::from_f64(2.5).round(), Fix256::from(3i64));
  /// assert_eq!(Fix256::from_f64(-2.5).round(), Fix256::from(-3i64));
  /// ```
  #[inline]
  pub const fn round(self) -> Self {
    let threshold = (1u128 << 127) + self.is_negative() as u128;
    Self { lo: 0, hi: self.hi.wrapping_add((self.lo >= threshold) as u128) }
  }
}
