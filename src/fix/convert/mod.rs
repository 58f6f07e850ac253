/// Conversions to and from machine integers.
mod int;

/// Conversions to and from `f64`.
mod float;
