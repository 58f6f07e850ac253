use super::super::*;

/// 1.5 in fixed point, the constant of the Newton update for 1/√x.
const THREE_HALVES: Fix256 = Fix256 { lo: 1 << 127, hi: 1 };

impl Fix256 {
  /// The reciprocal square root `1/√self`, with at least 78 correct bits
  /// over the whole positive range (the seed is within one bit, and the
  /// iteration count is capped; most inputs converge much further). A
  /// non-positive input returns [`MIN`](Self::MIN) as the out-of-domain
  /// sentinel.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let r = Fix256::from_f64(0.25).rsqrt();
  /// assert_eq!(format!("{:.20}", r), "2.00000000000000000000");
  /// assert_eq!(Fix256::ZERO.rsqrt(), Fix256::MIN);
  /// ```
  pub fn rsqrt(self) -> Self {
    if self.is_negative() || self.is_zero() {
      return Self::MIN;
    }

    // Seed with a single bit at half the negated exponent: for x ≈ 2ᵉ,
    // 1/√x ≈ 2^(-e/2). Inputs above one seed in the fraction half, inputs
    // below one seed at or above one (mirrored).
    let mut est = if self.hi != 0 {
      let shift = (128 + self.hi.leading_zeros()) >> 1; // 64..=127
      Self { lo: 1 << shift, hi: 0 }
    } else {
      let shift = self.lo.leading_zeros() >> 1; // 0..=63
      Self { lo: 0, hi: 1 << shift }
    };

    // The division-free Newton update est ← est·(3/2 − (x/2)·est·est).
    // All quantities stay positive, so the wrapping multiplies below are
    // exact magnitude arithmetic.
    let half_x = self.shr(1);
    for _ in 0..7 {
      let next = est * (THREE_HALVES - half_x * est * est);
      if next == est {
        break;
      }
      est = next;
    }
    est
  }
}
