use super::super::*;

impl Fix256 {
  /// The square root, correct to within a couple of ulps over the whole
  /// non-negative range. A negative input returns [`MIN`](Self::MIN) as the
  /// out-of-domain sentinel.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// assert_eq!(Fix256::from(100i64).sqrt(), Fix256::from(10i64));
  /// assert_eq!(Fix256::from(-1i64).sqrt(), Fix256::MIN);
  /// ```
  pub fn sqrt(self) -> Self {
    if self.is_negative() {
      return Self::MIN;
    }
    if self.is_zero() {
      return Self::ZERO;
    }

    // Seed by halving the exponent: √(m·2ᵉ) ≈ √m·2^(e/2), so shifting the
    // input by half its distance from the unit bit lands within one bit of
    // the true magnitude. Values above one shift right, values below one
    // shift left.
    let mut est = if self.hi != 0 {
      self.shr((127 - self.hi.leading_zeros()) >> 1)
    } else {
      self.shl((1 + self.lo.leading_zeros()) >> 1)
    };

    // Newton-Raphson: est ← (est + x/est) / 2. A one-bit seed doubles its
    // correct bits every round, so seven rounds cover all 256; stop early
    // once the iteration reaches a fixed point.
    for _ in 0..7 {
      let next = (self.div(est) + est).shr(1);
      if next == est {
        break;
      }
      est = next;
    }
    est
  }
}
