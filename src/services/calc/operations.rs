//! Binary arithmetic on two operands.
//!
//! These are the building blocks the sequence evaluators in `calculation`
//! fold over. Everything is plain `f64`; integer inputs are promoted by the
//! caller.

use super::error::CalcError;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

pub fn power(a: f64, b: f64) -> f64 {
    a.powf(b)
}

/// Real `n`-th root of `a`, i.e. `a^(1/n)`.
///
/// `powf` yields NaN for a negative base with a fractional exponent, so a
/// negative radicand with an odd integral degree is handled explicitly
/// (`root(-8, 3) == -2`).
pub fn root(a: f64, n: f64) -> Result<f64, CalcError> {
    if n == 0.0 {
        return Err(CalcError::DegreeZero);
    }
    if a < 0.0 && is_odd_integer(n) {
        return Ok(-(-a).powf(1.0 / n));
    }
    Ok(a.powf(1.0 / n))
}

fn is_odd_integer(n: f64) -> bool {
    n.fract() == 0.0 && n % 2.0 != 0.0
}
