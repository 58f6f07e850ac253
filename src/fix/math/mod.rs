/// Newton-Raphson square root.
mod sqrt;

/// Newton-Raphson reciprocal square root.
mod rsqrt;
