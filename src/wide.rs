//! Unsigned wide-integer kernels hidden underneath the public fixed-point
//! type: the exact 128×128→256 multiply and the 256÷128→128 divide. The
//! fixed-point multiply, divide, string formatter, and string parser are all
//! built out of these two routines.
//!
//! Some notation used in the comments:
//!
//!   - **Digit**: a 64-bit limb of a wider number, base 2⁶⁴.
//!   - **Normalised divisor**: shifted left until its top bit is set, which
//!     is what makes the long-division trial digits accurate.

/// Multiply two unsigned 128-bit values into their exact 256-bit product,
/// returned as `(hi, lo)`.
#[inline]
pub(crate) fn mul_wide(a: u128, b: u128) -> (u128, u128) {
  const MASK: u128 = u64::MAX as u128;

  // Schoolbook: split each operand into 64-bit halves and form the four
  // partial products. With a = a1·2⁶⁴ + a0 and b = b1·2⁶⁴ + b0:
  //
  //   a·b = a1·b1·2¹²⁸ + (a1·b0 + a0·b1)·2⁶⁴ + a0·b0
  let (a1, a0) = (a >> 64, a & MASK);
  let (b1, b0) = (b >> 64, b & MASK);

  let p00 = a0 * b0;
  let p01 = a0 * b1;
  let p10 = a1 * b0;
  let p11 = a1 * b1;

  // The three terms landing on bits 64..192 sum to at most 3·(2⁶⁴-1)·(2⁶⁴-1),
  // which fits a u128 with room to spare, so `mid` cannot overflow.
  let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);

  let lo = (p00 & MASK) | (mid << 64);
  let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
  (hi, lo)
}

/// Divide the 256-bit value `n_hi·2¹²⁸ + n_lo` by `d`, returning the 128-bit
/// quotient and remainder.
///
/// The caller must guarantee `d != 0` and `n_hi < d`; the latter is exactly
/// the condition for the quotient to fit in 128 bits. Callers that can
/// overflow check first and saturate.
pub(crate) fn div_wide(n_hi: u128, n_lo: u128, d: u128) -> (u128, u128) {
  debug_assert!(d != 0);
  debug_assert!(n_hi < d);

  if n_hi == 0 {
    return (n_lo / d, n_lo % d);
  }

  // Normalise so the divisor's top bit is set. The numerator is shifted by
  // the same amount; it still fits in 256 bits because `n_hi < d` keeps
  // holding for the shifted pair.
  let s = d.leading_zeros();
  let d = d << s;
  let n_hi = if s == 0 { n_hi } else { (n_hi << s) | (n_lo >> (128 - s)) };
  let n_lo = n_lo << s;

  let d1 = (d >> 64) as u64;
  let d0 = d as u64;

  // Two quotient digits: bits 64..128, then bits 0..64. Each step consumes
  // one more numerator digit and leaves a remainder below the divisor.
  let (q1, r) = div_digit(n_hi, (n_lo >> 64) as u64, d1, d0);
  let (q0, r) = div_digit(r, n_lo as u64, d1, d0);

  (((q1 as u128) << 64) | q0 as u128, r >> s)
}

/// One base-2⁶⁴ long-division step: divides the three-digit numerator
/// `u_hi·2⁶⁴ + u0` by the normalised two-digit divisor `d1·2⁶⁴ + d0`,
/// returning the quotient digit and the 128-bit remainder.
///
/// Requires `d1` to have its top bit set and `u_hi < d1·2⁶⁴ + d0`, which
/// guarantees the quotient fits one digit.
fn div_digit(u_hi: u128, u0: u64, d1: u64, d0: u64) -> (u64, u128) {
  // Trial digit from the top two numerator digits over `d1` alone, capped at
  // the largest digit when the leading digits coincide.
  let (mut qhat, mut rhat) = if (u_hi >> 64) as u64 == d1 {
    // qhat = 2⁶⁴-1, so u_hi - qhat·d1 = (u_hi mod 2⁶⁴) + d1.
    (u64::MAX, (u_hi & u64::MAX as u128) + d1 as u128)
  } else {
    ((u_hi / d1 as u128) as u64, u_hi % d1 as u128)
  };

  // Refine against the low divisor digit. The test compares qhat·d with the
  // full numerator, so the loop exits with the exact digit; once `rhat`
  // outgrows 64 bits the right-hand side exceeds any possible left-hand
  // side and no further correction is possible. At most two rounds run.
  while rhat >> 64 == 0 && qhat as u128 * d0 as u128 > ((rhat << 64) | u0 as u128) {
    qhat -= 1;
    rhat += d1 as u128;
  }

  // Remainder = numerator - qhat·(d1·2⁶⁴ + d0). The true value fits in 128
  // bits (it is below the divisor), so computing modulo 2¹²⁸ is exact.
  let rem = ((u_hi.wrapping_sub(qhat as u128 * d1 as u128) << 64) | u0 as u128)
    .wrapping_sub(qhat as u128 * d0 as u128);
  debug_assert!(rem < ((d1 as u128) << 64 | d0 as u128));
  (qhat, rem)
}
