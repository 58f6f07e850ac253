use super::*;

use crate::wide::{div_wide, mul_wide};

impl Fix256 {
  /// Fixed-point division, truncating toward zero.
  ///
  /// Division by zero and quotients outside the representable range
  /// saturate: the result is [`MAX`](Self::MAX) for a non-negative quotient
  /// direction and [`MIN`](Self::MIN) for a negative one.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let q = Fix256::from(1i64) / Fix256::from(4i64);
  /// assert_eq!(q.to_f64(), 0.25);
  /// assert_eq!(Fix256::ONE / Fix256::ZERO, Fix256::MAX);
  /// assert_eq!(-Fix256::ONE / Fix256::ZERO, Fix256::MIN);
  /// ```
  pub fn div(self, rhs: Self) -> Self {
    if rhs.is_zero() {
      return if self.is_negative() { Self::MIN } else { Self::MAX };
    }

    let negative = self.is_negative() != rhs.is_negative();
    let q = match Self::udiv(self.abs(), rhs.abs()) {
      // The unsigned quotient must also fit the signed range.
      Some(q) if q.hi >> 127 == 0 => q,
      _ => return if negative { Self::MIN } else { Self::MAX },
    };
    if negative {
      -q
    } else {
      q
    }
  }

  /// Remainder: `self - trunc(self / rhs) · rhs`, where the quotient is
  /// truncated toward zero. A zero divisor saturates like
  /// [`div`](Self::div).
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let r = Fix256::from(7i64) % Fix256::from(2i64);
  /// assert_eq!(r, Fix256::ONE);
  /// ```
  pub fn rem(self, rhs: Self) -> Self {
    if rhs.is_zero() {
      return if self.is_negative() { Self::MIN } else { Self::MAX };
    }
    let q = self.div(rhs);
    let trunc = if q.is_negative() { q.ceil() } else { q.floor() };
    self - trunc * rhs
  }

  /// Unsigned quotient of the magnitudes: `(a·2¹²⁸) / b`, truncating.
  /// `None` when the quotient does not fit in 256 bits. The halves of `a`
  /// and `b` are read as plain unsigned here, so the wrapped magnitude of
  /// `MIN` (2¹²⁷, i.e. a raw high half of 2¹²⁷) divides correctly.
  fn udiv(a: Self, b: Self) -> Option<Self> {
    if b.hi == 0 {
      // 128-bit divisor: two chained base-2¹²⁸ digit steps through the
      // 256÷128 kernel. The first step requires its numerator head to be
      // below the divisor; when it is not, the quotient needs more than
      // 256 bits.
      if a.hi >= b.lo {
        return None;
      }
      let (q1, r) = div_wide(a.hi, a.lo, b.lo);
      let (q0, _) = div_wide(r, 0, b.lo);
      Some(Self { lo: q0, hi: q1 })
    } else {
      // 256-bit divisor: base-2¹²⁸ long division with two quotient digits.
      // The numerator a·2¹²⁸ is below b·2²⁵⁶, so the quotient always fits.
      Some(Self::udiv_big(a, b))
    }
  }

  /// Long division of `a·2¹²⁸` by a divisor with a non-zero high half,
  /// using 128-bit digits. The same trial-and-refine scheme as the base-2⁶⁴
  /// kernel, one level up: trial digits come from the 256÷128 kernel over
  /// the divisor's high half, then are corrected against the full divisor.
  fn udiv_big(a: Self, b: Self) -> Self {
    debug_assert!(b.hi != 0);

    // Normalise the divisor so its top bit is set; pre-shift the numerator
    // by the same amount, its overflow spilling into a fifth digit `n3`.
    let s = b.hi.leading_zeros();
    let d = b.shl(s);
    let n3 = if s == 0 { 0 } else { a.hi >> (128 - s) };
    let shifted = a.shl(s);

    let (q1, r1, r0) = Self::udiv_digit(n3, shifted.hi, shifted.lo, d.hi, d.lo);
    let (q0, _, _) = Self::udiv_digit(r1, r0, 0, d.hi, d.lo);
    Self { lo: q0, hi: q1 }
  }

  /// One base-2¹²⁸ digit step: divides the three-digit numerator
  /// `(u2, u1, u0)` by the normalised two-digit divisor `(d1, d0)`,
  /// returning the quotient digit and two-digit remainder. Requires the
  /// top bit of `d1` set and `(u2, u1) < (d1, d0)`.
  fn udiv_digit(u2: u128, u1: u128, u0: u128, d1: u128, d0: u128) -> (u128, u128, u128) {
    // Trial digit over `d1` alone, capped at the largest digit when the
    // leading digits coincide. `of` marks a remainder that outgrew one
    // digit, at which point no further correction can be needed.
    let (mut qhat, mut rhat, mut of) = if u2 == d1 {
      let (rhat, of) = u1.overflowing_add(d1);
      (u128::MAX, rhat, of)
    } else {
      let (qhat, rhat) = div_wide(u2, u1, d1);
      (qhat, rhat, false)
    };

    // Refine against the low divisor digit; at most two rounds, and the
    // digit is exact afterwards because the test uses the full divisor.
    let (mut p_hi, mut p_lo) = mul_wide(qhat, d0);
    while !of && (p_hi > rhat || (p_hi == rhat && p_lo > u0)) {
      qhat -= 1;
      let (r, carry) = rhat.overflowing_add(d1);
      rhat = r;
      of = carry;
      let (p, borrow) = p_lo.overflowing_sub(d0);
      p_lo = p;
      p_hi -= borrow as u128;
    }

    // Remainder = (u2, u1, u0) - qhat·(d1, d0). The top limb cancels, so
    // 256-bit wrapping arithmetic computes it exactly.
    let (t_hi, t_lo) = mul_wide(qhat, d1);
    let (p_hi2, p_lo2) = mul_wide(qhat, d0);
    // prod limbs of qhat·d, least significant first: (p_lo2, mid, _top)
    let (mid, c) = t_lo.overflowing_add(p_hi2);
    let _ = (t_hi, c); // top limb checked only via the debug assert below

    let (r0, b0) = u0.overflowing_sub(p_lo2);
    let r1 = u1.wrapping_sub(mid).wrapping_sub(b0 as u128);
    #[cfg(debug_assertions)]
    {
      let borrow1 = (u1 < mid) || (u1 == mid && b0);
      debug_assert_eq!(u2.wrapping_sub(t_hi).wrapping_sub(c as u128), borrow1 as u128);
      debug_assert!(r1 < d1 || (r1 == d1 && r0 < d0));
    }
    (qhat, r1, r0)
  }
}

mk_ops!{Div, DivAssign, div, div_assign}
mk_ops!{Rem, RemAssign, rem, rem_assign}
