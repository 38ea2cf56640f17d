//! Self-contained numeric primitives.
//!
//! The target this agent was designed for has no floating-point trig or
//! `libm`, so square root and cosine are computed here from first principles.
//! They are intentionally low precision; see [`cosine`].

use serde::{Deserialize, Serialize};

/// Convergence tolerance for the Newton-Raphson square root.
pub const SQRT_EPSILON: f64 = 1e-4;

/// Upper bound on Newton-Raphson iterations.
///
/// Seeded at `x`, the estimate roughly halves each step until it nears the
/// root, so `f64::MAX` needs about 512 steps before converging. Near the top
/// of the range successive estimates can alternate between neighbouring
/// floats that are further apart than [`SQRT_EPSILON`]; the bound ends that.
pub const MAX_SQRT_ITERATIONS: usize = 1100;

/// Number of Taylor terms used by [`cosine`].
pub const COSINE_TERMS: u32 = 8;

/// How [`factorial`] accumulates its result.
///
/// Two reference builds of the agent disagree here. `Product` is the real
/// factorial. `TriangularSum` reproduces the build that accumulates with
/// addition, yielding `1 + n(n+1)/2` instead of `n!`. Both are kept as named
/// variants so that either build's numbers can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorialMode {
    #[default]
    Product,
    TriangularSum,
}

/// Square root by Newton-Raphson iteration seeded at `x`.
///
/// Returns 0 for `x <= 0` (and for NaN). Iteration stops once successive
/// estimates differ by less than [`SQRT_EPSILON`].
pub fn sqrt(x: f64) -> f64 {
    if !(x > 0.0) {
        return 0.0;
    }
    if x.is_infinite() {
        return x;
    }

    let mut estimate = x;
    for _ in 0..MAX_SQRT_ITERATIONS {
        let next = (estimate + x / estimate) / 2.0;
        if (next - estimate).abs() < SQRT_EPSILON {
            return next;
        }
        estimate = next;
    }
    estimate
}

/// Raise `base` to a non-negative integer power by repeated multiplication.
pub fn pow_int(base: f64, exponent: u32) -> f64 {
    let mut value = 1.0;
    let mut remaining = exponent;
    while remaining > 0 {
        value *= base;
        remaining -= 1;
    }
    value
}

/// Factorial of `n` under the given accumulation mode. Returns 1 for `n = 0`.
pub fn factorial(n: u32, mode: FactorialMode) -> f64 {
    let mut result = 1.0;
    for i in 1..=n {
        match mode {
            FactorialMode::Product => result *= i as f64,
            FactorialMode::TriangularSum => result += i as f64,
        }
    }
    result
}

/// Cosine from the first [`COSINE_TERMS`] terms of its Taylor series.
///
/// `Σ_{i=0}^{7} (-1)^i x^{2i} / (2i)!`, with the factorial computed under
/// `mode`. Accurate to ~1e-7 for `|x| <= π` in `Product` mode and degrading
/// quickly beyond that; no range reduction is applied.
pub fn cosine(x: f64, mode: FactorialMode) -> f64 {
    let mut sum = 0.0;
    let mut sign = 1.0;
    for i in 0..COSINE_TERMS {
        sum += sign * pow_int(x, 2 * i) / factorial(2 * i, mode);
        sign = -sign;
    }
    sum
}
