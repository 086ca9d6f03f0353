//! Functions to construct and compute with exact [`Integer`]s and [`Rational`]s.

use crate::error::Error;
use rug::{ops::Pow, Integer, Rational};

/// The largest number of bits the numerator or denominator of a computed power may have.
pub const MAX_POWER_BITS: u64 = 1 << 16;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Returns true if the rational number is an integer.
pub fn is_integer(n: &Rational) -> bool {
    *n.denom() == 1
}

/// Raises `base` to the integer power `exp`, exactly.
///
/// Fails if `base` is zero and `exp` is negative, or if the result would be too large to
/// represent (see [`MAX_POWER_BITS`]).
pub fn pow(base: &Rational, exp: &Integer) -> Result<Rational, Error> {
    if base.cmp0().is_eq() && exp.cmp0().is_lt() {
        return Err(Error::DivisionByZero);
    }

    // powers of 1 and -1 never grow
    if *base.denom() == 1 && *base.numer() == 1 {
        return Ok(Rational::from(1));
    } else if *base.denom() == 1 && *base.numer() == -1 {
        return Ok(Rational::from(if exp.is_even() { 1 } else { -1 }));
    }

    let too_large = || Error::ExponentTooLarge(format!("{}^{}", base, exp));
    let magnitude = exp.clone().abs().to_u32().ok_or_else(too_large)?;
    let bits = u64::from(base.numer().significant_bits().max(base.denom().significant_bits()));
    if bits.saturating_mul(u64::from(magnitude)) > MAX_POWER_BITS {
        return Err(too_large());
    }

    let numer = base.numer().clone().pow(magnitude);
    let denom = base.denom().clone().pow(magnitude);
    if exp.cmp0().is_lt() {
        Ok(Rational::from((denom, numer)))
    } else {
        Ok(Rational::from((numer, denom)))
    }
}

/// Returns the exact `n`-th root of the rational number, if it has one.
///
/// Even roots of negative numbers have no real value and always return [`None`].
pub fn root(value: &Rational, n: u32) -> Option<Rational> {
    if n == 0 || (value.cmp0().is_lt() && n % 2 == 0) {
        return None;
    }

    let exact_root = |x: &Integer| {
        let root = x.clone().root(n);
        (root.clone().pow(n) == *x).then_some(root)
    };

    let numer = exact_root(&value.numer().clone().abs())?;
    let denom = exact_root(value.denom())?;
    let root = Rational::from((numer, denom));
    if value.cmp0().is_lt() {
        Some(-root)
    } else {
        Some(root)
    }
}
