use super::*;

use crate::wide::mul_wide;
use core::fmt;

/// How a non-negative number announces its sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SignMode {
  /// No sign character; only negative values get a `-`.
  #[default]
  Minus,
  /// A leading space for non-negative values.
  Space,
  /// A leading `+` for non-negative values.
  Plus,
}

/// Formatting options for [`Fix256::write_to`]. The defaults correspond to
/// the printf specifier `"%f"`.
#[derive(Clone, Copy, Debug)]
pub struct FormatOpts {
  /// Sign character for non-negative values.
  pub sign: SignMode,
  /// Minimum number of bytes to produce.
  pub width: u32,
  /// Number of decimal places. `None` means *auto*: at most 39 places,
  /// trailing zeros trimmed. 39 places distinguish every representable
  /// value, so parsing an auto-formatted string recovers it exactly.
  pub precision: Option<u32>,
  /// Pad to `width` with leading zeros instead of spaces (right-aligned
  /// output only).
  pub zero_pad: bool,
  /// Always write the decimal point, even with no fractional digits.
  pub always_decimal: bool,
  /// Left-align within `width`.
  pub left_align: bool,
  /// The decimal point byte; `b'.'` unless a caller localises it.
  pub decimal_point: u8,
}

impl Default for FormatOpts {
  fn default() -> Self {
    Self {
      sign: SignMode::Minus,
      width: 0,
      precision: None,
      zero_pad: false,
      always_decimal: false,
      left_align: false,
      decimal_point: b'.',
    }
  }
}

impl FormatOpts {
  /// Parse a printf-style specifier subset:
  /// `[%][' '|'+'|'0'|'-'|'#']*[width]['.'precision]['f']`.
  ///
  /// Characters that do not fit the grammar are ignored, as is the
  /// conversion letter.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::FormatOpts;
  /// let opts = FormatOpts::from_spec("%+08.3f");
  /// assert_eq!(opts.width, 8);
  /// assert_eq!(opts.precision, Some(3));
  /// assert!(opts.zero_pad);
  /// ```
  pub fn from_spec(spec: &str) -> Self {
    let mut out = Self::default();
    let mut bytes = spec.bytes().peekable();

    if bytes.peek() == Some(&b'%') {
      bytes.next();
    }
    // Flags, in any order and repetition.
    while let Some(&b) = bytes.peek() {
      match b {
        b' ' => {
          if out.sign != SignMode::Plus {
            out.sign = SignMode::Space;
          }
        }
        b'+' => out.sign = SignMode::Plus,
        b'0' => out.zero_pad = true,
        b'-' => out.left_align = true,
        b'#' => out.always_decimal = true,
        _ => break,
      }
      bytes.next();
    }
    // Width digits.
    while let Some(&b) = bytes.peek() {
      if !b.is_ascii_digit() {
        break;
      }
      out.width = out.width.saturating_mul(10).saturating_add((b - b'0') as u32);
      bytes.next();
    }
    // Optional precision; a bare '.' means zero places.
    if bytes.peek() == Some(&b'.') {
      bytes.next();
      let mut precision = 0u32;
      while let Some(&b) = bytes.peek() {
        if !b.is_ascii_digit() {
          break;
        }
        precision = precision.saturating_mul(10).saturating_add((b - b'0') as u32);
        bytes.next();
      }
      out.precision = Some(precision);
    }
    // The conversion letter and anything after it are ignored.
    out
  }
}

/// Decimal places produced in auto-precision mode; enough that parsing the
/// output recovers every bit (2⁻¹²⁸ ≈ 2.9·10⁻³⁹).
const AUTO_PRECISION: usize = 39;

/// Fractional digits held in the scratch buffer. An exact fraction ends
/// within 128 places; precision beyond this bound can only ever append
/// zeros, which the emitter writes directly.
const FRAC_DIGITS_MAX: usize = 215;

/// Byte-at-a-time output with truncation handled by the implementation.
trait Sink {
  fn push(&mut self, byte: u8);
}

/// Writes into a caller buffer, silently dropping bytes past its end.
struct Cursor<'a> {
  dst: &'a mut [u8],
  len: usize,
}

impl Sink for Cursor<'_> {
  #[inline]
  fn push(&mut self, byte: u8) {
    if self.len < self.dst.len() {
      self.dst[self.len] = byte;
    }
    self.len += 1;
  }
}

/// Adapts a [`core::fmt::Formatter`]; errors are latched and re-raised.
struct FmtSink<'a, 'b> {
  f: &'a mut fmt::Formatter<'b>,
  result: fmt::Result,
}

impl Sink for FmtSink<'_, '_> {
  #[inline]
  fn push(&mut self, byte: u8) {
    if self.result.is_ok() {
      self.result = fmt::Write::write_char(self.f, byte as char);
    }
  }
}

impl Fix256 {
  /// Write `self` as a decimal string into `dst` under `opts`, returning
  /// the number of bytes the full rendering occupies. Output beyond the
  /// buffer's capacity is dropped; comparing the return value against
  /// `dst.len()` detects the truncation.
  ///
  /// With a `width`, the rendering takes `max(width, len)` bytes where
  /// `len` is at most `precision + 45` for an explicit precision and at
  /// most 84 for the auto default.
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::{Fix256, FormatOpts};
  /// let mut buf = [0u8; 32];
  /// let n = Fix256::from_f64(-1.5).write_to(&mut buf, &FormatOpts::default());
  /// assert_eq!(&buf[..n], b"-1.5");
  /// ```
  pub fn write_to(&self, dst: &mut [u8], opts: &FormatOpts) -> usize {
    let mut cursor = Cursor { dst, len: 0 };
    format_into(*self, opts, &mut cursor)
  }

  /// As [`write_to`](Self::write_to), with the options given as a printf
  /// specifier (see [`FormatOpts::from_spec`]).
  ///
  /// # Example
  ///
  /// ```
  /// # use fix256::Fix256;
  /// let mut buf = [0u8; 32];
  /// let n = Fix256::from_f64(0.25).write_spec(&mut buf, "%+.3f");
  /// assert_eq!(&buf[..n], b"+0.250");
  /// ```
  pub fn write_spec(&self, dst: &mut [u8], spec: &str) -> usize {
    self.write_to(dst, &FormatOpts::from_spec(spec))
  }
}

/// The digit engine shared by [`Fix256::write_to`] and the `Display` impl.
/// Returns the untruncated output length.
fn format_into<S: Sink>(v: Fix256, opts: &FormatOpts, out: &mut S) -> usize {
  let negative = v.is_negative();
  let m = v.abs();
  let mut int_part = m.hi;
  let mut frac = m.lo;

  let (precision, auto) = match opts.precision {
    Some(p) => (p as usize, false),
    None => (AUTO_PRECISION, true),
  };
  let bounded = precision.min(FRAC_DIGITS_MAX);
  // Digits past the scratch bound are necessarily zeros: the fraction is a
  // multiple of 2⁻¹²⁸ and terminates within 128 places.
  let surplus_zeros = precision - bounded;

  // Fractional digit production, left to right: multiplying the fraction by
  // ten pushes the next decimal digit into the high half of the product and
  // leaves the rest as the new remainder. Auto mode stops once the
  // remainder is exhausted.
  let mut digits = [0u8; FRAC_DIGITS_MAX];
  let mut n_frac = 0;
  while n_frac < bounded && !(auto && frac == 0) {
    let (digit, rest) = mul_wide(frac, 10);
    digits[n_frac] = b'0' + digit as u8;
    frac = rest;
    n_frac += 1;
  }

  // Round at the cutoff: a remainder at or above half a ulp of the last
  // place carries into the printed digits, walking left over any nines and
  // possibly into the integer part.
  if frac >> 127 != 0 {
    let mut i = n_frac;
    loop {
      if i == 0 {
        int_part = int_part.wrapping_add(1);
        break;
      }
      i -= 1;
      if digits[i] == b'9' {
        digits[i] = b'0';
      } else {
        digits[i] += 1;
        break;
      }
    }
  }

  if auto {
    while n_frac > 0 && digits[n_frac - 1] == b'0' {
      n_frac -= 1;
    }
  }

  // Integer digit production, least significant first; at least one digit.
  let mut int_digits = [0u8; 40];
  let mut n_int = 0;
  loop {
    int_digits[n_int] = b'0' + (int_part % 10) as u8;
    int_part /= 10;
    n_int += 1;
    if int_part == 0 {
      break;
    }
  }

  let point = n_frac > 0 || surplus_zeros > 0 || opts.always_decimal;
  let sign = if negative {
    Some(b'-')
  } else {
    match opts.sign {
      SignMode::Minus => None,
      SignMode::Space => Some(b' '),
      SignMode::Plus => Some(b'+'),
    }
  };

  let content = n_int + point as usize + n_frac + surplus_zeros + sign.is_some() as usize;
  let pad = (opts.width as usize).saturating_sub(content);

  let emit_digits = |out: &mut S| {
    for i in (0..n_int).rev() {
      out.push(int_digits[i]);
    }
    if point {
      out.push(opts.decimal_point);
    }
    for &d in &digits[..n_frac] {
      out.push(d);
    }
    for _ in 0..surplus_zeros {
      out.push(b'0');
    }
  };

  if opts.left_align {
    if let Some(s) = sign {
      out.push(s);
    }
    emit_digits(out);
    for _ in 0..pad {
      out.push(b' ');
    }
  } else if opts.zero_pad {
    if let Some(s) = sign {
      out.push(s);
    }
    for _ in 0..pad {
      out.push(b'0');
    }
    emit_digits(out);
  } else {
    for _ in 0..pad {
      out.push(b' ');
    }
    if let Some(s) = sign {
      out.push(s);
    }
    emit_digits(out);
  }

  content + pad
}

/// Formats with the standard parameters mapped onto [`FormatOpts`]:
/// `{:+10.4}`, `{:<8.2}`, and `{:08.3}` behave like their printf
/// counterparts, and a bare `{}` is the auto-precision default.
impl fmt::Display for Fix256 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let opts = FormatOpts {
      sign: if f.sign_plus() { SignMode::Plus } else { SignMode::Minus },
      width: f.width().unwrap_or(0) as u32,
      precision: f.precision().map(|p| p as u32),
      zero_pad: f.sign_aware_zero_pad(),
      always_decimal: false,
      left_align: matches!(f.align(), Some(fmt::Alignment::Left)),
      decimal_point: b'.',
    };
    let mut sink = FmtSink { f, result: Ok(()) };
    format_into(*self, &opts, &mut sink);
    sink.result
  }
}

/// Renders the raw halves in hex, which keeps boundary patterns readable.
impl fmt::Debug for Fix256 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Fix256(0x{:032x}.{:032x})", self.hi, self.lo)
  }
}
