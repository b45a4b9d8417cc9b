// Conversions between floats and integer pairs.

use crate::error::IrratError;
use crate::result::FResult;
use num_bigint::BigInt;
use num_traits::{Pow, ToPrimitive, Zero};

/// Splits `n` into a float mantissa of at most 64 significant bits and a
/// power-of-two scale.
fn scaled_to_f64(n: &BigInt) -> (f64, i64) {
    let shift = n.bits().saturating_sub(64);
    let mantissa = (n >> shift).to_f64().unwrap_or(f64::NAN);
    (mantissa, shift as i64)
}

/// Approximates `num / den` as a float, even when either side is far outside
/// the range of `f64`.
#[allow(clippy::float_arithmetic, clippy::cast_possible_truncation)]
pub(crate) fn ratio_to_f64(num: &BigInt, den: &BigInt) -> f64 {
    if num.is_zero() {
        return 0.0;
    }
    let (a, scale_a) = scaled_to_f64(num);
    let (b, scale_b) = scaled_to_f64(den);
    let scale = (scale_a - scale_b).clamp(-4000, 4000) as i32;
    // applied in two halves so an intermediate power of two can't overflow
    let half = scale / 2;
    a / b * 2_f64.powi(half) * 2_f64.powi(scale - half)
}

/// The binary exponent `e` of `x = m * 2^e`, with `0.5 <= |m| < 1`. Zero has
/// exponent 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn binary_exponent(x: f64) -> i32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    if biased == 0 {
        // subnormal: the value is mantissa * 2^-1074
        let mantissa = bits & ((1 << 52) - 1);
        let highest_bit = 63 - mantissa.leading_zeros() as i32;
        highest_bit + 1 - 1074
    } else {
        biased - 1022
    }
}

/// A conservative error margin for a float that is compared against an
/// approximated rational. Deliberately wider than the float's own rounding
/// error.
pub(crate) fn comparison_margin(x: f64) -> f64 {
    2_f64.powi(binary_exponent(x) + 1)
}

/// Rebuilds the shortest decimal literal that round-trips to `f` as an exact
/// `(numerator, denominator)` pair, e.g. `0.1` => `(1, 10)` rather than the
/// binary value `3602879701896397 / 36028797018963968`.
pub(crate) fn decimal_parts(f: f64) -> FResult<(BigInt, BigInt)> {
    if !f.is_finite() {
        return Err(IrratError::NotFinite(f.to_string()));
    }
    // LowerExp prints the shortest round-trip digits, e.g. "-1.25e-3"
    let formatted = format!("{:e}", f);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .ok_or_else(|| IrratError::NotFinite(formatted.clone()))?;
    let mut exponent: i64 = exponent
        .parse()
        .map_err(|_| IrratError::NotFinite(formatted.clone()))?;
    let digits = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => {
            exponent -= frac_part.len() as i64;
            format!("{}{}", int_part, frac_part)
        }
        None => mantissa.to_string(),
    };
    let digits: BigInt = digits
        .parse()
        .map_err(|_| IrratError::NotFinite(formatted.clone()))?;
    let ten = BigInt::from(10);
    let power = |e: i64| -> BigInt { Pow::pow(&ten, e.unsigned_abs()) };
    Ok(if exponent >= 0 {
        (digits * power(exponent), BigInt::from(1))
    } else {
        (digits, power(exponent))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(f: f64) -> (i64, i64) {
        let (n, d) = decimal_parts(f).unwrap();
        (n.to_i64().unwrap(), d.to_i64().unwrap())
    }

    #[test]
    fn test_decimal_parts() {
        assert_eq!(parts(0.1), (1, 10));
        assert_eq!(parts(2.5), (25, 10));
        assert_eq!(parts(-0.125), (-125, 1000));
        assert_eq!(parts(1200.0), (1200, 1));
        assert_eq!(parts(0.0), (0, 1));
        assert_eq!(parts(1e-5), (1, 100000));
        assert!(decimal_parts(f64::INFINITY).is_err());
        assert!(decimal_parts(f64::NAN).is_err());
    }

    #[test]
    fn test_binary_exponent() {
        // matches C's frexp
        assert_eq!(binary_exponent(0.0), 0);
        assert_eq!(binary_exponent(1.0), 1);
        assert_eq!(binary_exponent(0.5), 0);
        assert_eq!(binary_exponent(0.1), -3);
        assert_eq!(binary_exponent(9.9993), 4);
        assert_eq!(binary_exponent(-8.0), 4);
        assert_eq!(binary_exponent(f64::MIN_POSITIVE), -1021);
        assert_eq!(binary_exponent(f64::MIN_POSITIVE / 4.0), -1023);
    }

    #[test]
    fn test_comparison_margin() {
        assert_eq!(comparison_margin(0.1), 0.25);
        assert_eq!(comparison_margin(9.9993), 32.0);
    }

    #[test]
    fn test_ratio_to_f64() {
        let r = |a: i64, b: i64| ratio_to_f64(&BigInt::from(a), &BigInt::from(b));
        assert_eq!(r(5265, 38332), 0.1373526035688198);
        assert_eq!(r(1, 4), 0.25);
        assert_eq!(r(-3, 2), -1.5);
        assert_eq!(r(0, 7), 0.0);

        let huge = BigInt::from(3) << 3000_u32;
        let also_huge = BigInt::from(2) << 3000_u32;
        assert_eq!(ratio_to_f64(&huge, &also_huge), 1.5);
        assert_eq!(ratio_to_f64(&BigInt::from(1), &huge), 0.0);
        assert!(ratio_to_f64(&huge, &BigInt::from(1)).is_infinite());
    }
}
