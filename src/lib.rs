#![cfg_attr(not(test), no_std)]
//! This crate provides a correct, allocation-free software implementation of
//! **Q128.128 signed fixed-point arithmetic**: a 256-bit number with 128
//! integer bits (two's complement) and 128 fractional bits.
//!
//! # Introduction
//!
//! A [`Fix256`] holds the 256-bit pattern as two unsigned 128-bit halves; the
//! pattern, read as a two's-complement integer `N`, denotes the value
//! `N · 2⁻¹²⁸`. Every bit pattern is a legal number: there is no NaN, no
//! infinity, and no hidden state. The representable range is
//! `[-2¹²⁷, 2¹²⁷ - 2⁻¹²⁸]` with a uniform resolution of `2⁻¹²⁸`.
//!
//! Addition, subtraction, and multiplication wrap like machine integers;
//! division saturates on overflow and on a zero divisor. Out-of-domain
//! inputs to [`sqrt`](Fix256::sqrt) and [`rsqrt`](Fix256::rsqrt) return
//! [`Fix256::MIN`] as a sentinel. Nothing panics in release builds.
//!
//! # Usage
//!
//! ```
//! use fix256::Fix256;
//!
//! // Construct from integers, floats, or strings.
//! let a = Fix256::from(10i64);
//! let b: Fix256 = "3".parse().unwrap();
//!
//! // The usual operators are available, by value or by reference.
//! let q = a / b;
//! assert_eq!(q.floor(), Fix256::from(3i64));
//!
//! // Decimal formatting is exact; the default keeps enough places for a
//! // lossless parse round-trip.
//! assert_eq!(format!("{:.5}", q), "3.33333");
//! assert_eq!(Fix256::ONE / Fix256::MIN_POSITIVE, Fix256::MAX);
//! ```
//!
//! # Performance
//!
//! All kernels are branch-light integer code over `u64`/`u128`: the 256-bit
//! product is assembled from four 64×64 partial products, and division runs
//! base-2⁶⁴ long division with at most two trial-digit corrections. This
//! crate includes benchmarks; run them with `cargo bench -F bench`.

mod fix;
mod wide;

pub use fix::{Fix256, FormatOpts, ParseFixError, SignMode};

/// Number of proptest cases for the randomized tests. Debug builds run a
/// reduced count so `cargo test` stays quick.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = if cfg!(debug_assertions) { 0x800 } else { 0x2_0000 };

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
pub mod bench;
