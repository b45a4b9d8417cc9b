use crate::error::IrratError;
use crate::interrupt::{Interrupt, Never};
use crate::num::division::Division;
use crate::num::exact::Exact;
use crate::num::factorize::FactorizeOptions;
use crate::num::float::{comparison_margin, decimal_parts};
use crate::result::FResult;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::cell::{Ref, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// Relative slack for comparing an approximation against an integer. It only
// has to cover the rounding in `Division::approximation`.
const INTEGER_SLACK: f64 = 1.0 / (1u64 << 48) as f64;

// Powers are refused when the result would need more bits than this.
const MAX_POWER_BITS: u64 = 1 << 18;

/// An exact rational number.
///
/// Values are immutable: every operation returns a new `Rational`, and the
/// compound assignment operators rebind the left-hand side. Internally the
/// value is kept partially simplified, and is reduced to lowest terms the
/// first time it is displayed, compared, or asked for its numerator or
/// denominator.
#[derive(Clone)]
pub struct Rational {
    // only ever narrowed in place by full simplification, which never
    // changes the value
    division: RefCell<Division>,
}

impl Rational {
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> FResult<Self> {
        Ok(Self::from_division(Division::new(num.into(), den.into())?))
    }

    fn from_division(division: Division) -> Self {
        Self {
            division: RefCell::new(division),
        }
    }

    // `den` must be positive
    fn from_parts(num: BigInt, den: BigInt) -> Self {
        Self::from_division(Division::from_positive_denominator(num, den))
    }

    /// Converts a float through its shortest decimal representation, so
    /// `0.1` becomes exactly `1/10`.
    pub fn from_f64(f: f64) -> FResult<Self> {
        let (num, den) = decimal_parts(f)?;
        Ok(Self::from_parts(num, den))
    }

    fn division(&self) -> Ref<'_, Division> {
        self.division.borrow()
    }

    /// Reduces the stored pair to lowest terms.
    pub fn simplify(&self) -> FResult<()> {
        self.simplify_with(&FactorizeOptions::default(), &Never::default())
    }

    pub fn simplify_with_interrupt<I: Interrupt + ?Sized>(&self, int: &I) -> FResult<()> {
        self.simplify_with(&FactorizeOptions::default(), int)
    }

    pub fn simplify_with<I: Interrupt + ?Sized>(
        &self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<()> {
        self.division.borrow_mut().fully_simplify_with(options, int)
    }

    // for callers that can't return an error; the value stays correct, just
    // not in lowest terms
    fn simplify_or_warn(&self) {
        if let Err(e) = self.simplify() {
            tracing::warn!("unable to fully simplify {:?}: {}", self.division(), e);
        }
    }

    pub fn numerator(&self) -> BigInt {
        self.simplify_or_warn();
        self.division().numerator().clone()
    }

    /// Always positive.
    pub fn denominator(&self) -> BigInt {
        self.simplify_or_warn();
        self.division().denominator().clone()
    }

    pub fn to_f64(&self) -> f64 {
        self.division().approximation()
    }

    pub fn is_zero(&self) -> bool {
        self.division().numerator().is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.division().numerator().is_negative()
    }

    pub fn is_integer(&self) -> bool {
        // quick simplification already collapses any integer to `n/1`
        self.division().denominator().is_one()
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn recip(&self) -> FResult<Self> {
        let d = self.division();
        let res = Division::new(d.denominator().clone(), d.numerator().clone())?;
        Ok(Self::from_division(res))
    }

    /// Rounds to the nearest integer, with halves rounded away from zero.
    pub fn round_to_integer(&self) -> BigInt {
        let d = self.division();
        let (num, den) = (d.numerator(), d.denominator());
        let twice = if num.is_negative() {
            num * 2 - den
        } else {
            num * 2 + den
        };
        // BigInt division truncates towards zero
        twice / (den * 2)
    }

    /// The sum or difference, plus whether it came from cross-multiplying.
    fn combine(&self, rhs: &Self, subtract: bool) -> (Self, bool) {
        let a = self.division();
        let b = rhs.division();
        let combine = |x: BigInt, y: BigInt| if subtract { x - y } else { x + y };
        let (a_num, a_den) = (a.numerator(), a.denominator());
        let (b_num, b_den) = (b.numerator(), b.denominator());

        if a_den == b_den {
            let sum = combine(a_num.clone(), b_num.clone());
            return (Self::from_parts(sum, a_den.clone()), false);
        }
        if b_den.is_one() {
            let sum = combine(a_num.clone(), b_num * a_den);
            return (Self::from_parts(sum, a_den.clone()), false);
        }
        if a_den.is_one() {
            let sum = combine(a_num * b_den, b_num.clone());
            return (Self::from_parts(sum, b_den.clone()), false);
        }
        let sum = combine(a_num * b_den, b_num * a_den);
        (Self::from_parts(sum, a_den * b_den), true)
    }

    // Cross-multiplying introduces common factors of all sizes, so the full
    // reduction is paid for right away while the numbers are still small.
    fn add_or_sub(&self, rhs: &Self, subtract: bool) -> Self {
        let (res, cross) = self.combine(rhs, subtract);
        if cross {
            res.simplify_or_warn();
        }
        res
    }

    fn add_or_sub_with<I: Interrupt + ?Sized>(
        &self,
        rhs: &Self,
        subtract: bool,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<Self> {
        let (res, cross) = self.combine(rhs, subtract);
        if cross {
            res.simplify_with(options, int)?;
        }
        Ok(res)
    }

    /// Like `self + rhs`, but any factoring uses `options` and can be
    /// stopped through `int`.
    pub fn add_with<I: Interrupt + ?Sized>(
        &self,
        rhs: &Self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<Self> {
        self.add_or_sub_with(rhs, false, options, int)
    }

    /// Like `self - rhs`, but any factoring uses `options` and can be
    /// stopped through `int`.
    pub fn sub_with<I: Interrupt + ?Sized>(
        &self,
        rhs: &Self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<Self> {
        self.add_or_sub_with(rhs, true, options, int)
    }

    /// Exact ordering, reducing both sides with `options` first.
    pub fn cmp_with<I: Interrupt + ?Sized>(
        &self,
        other: &Self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<Ordering> {
        self.simplify_with(options, int)?;
        other.simplify_with(options, int)?;
        Ok(self.cross_cmp(other))
    }

    fn add_rational(&self, rhs: &Self) -> Self {
        self.add_or_sub(rhs, false)
    }

    fn sub_rational(&self, rhs: &Self) -> Self {
        self.add_or_sub(rhs, true)
    }

    fn mul_rational(&self, rhs: &Self) -> Self {
        let a = self.division();
        let b = rhs.division();
        Self::from_parts(
            a.numerator() * b.numerator(),
            a.denominator() * b.denominator(),
        )
    }

    /// Division that reports a zero divisor instead of panicking.
    pub fn checked_div(&self, rhs: &Self) -> FResult<Self> {
        let a = self.division();
        let b = rhs.division();
        let res = Division::new(
            a.numerator() * b.denominator(),
            a.denominator() * b.numerator(),
        )?;
        Ok(Self::from_division(res))
    }

    fn div_rational(&self, rhs: &Self) -> Self {
        match self.checked_div(rhs) {
            Ok(res) => res,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }

    /// The largest integer not greater than `self / rhs`.
    pub fn div_floor(&self, rhs: &Self) -> FResult<Self> {
        let quotient = self.checked_div(rhs)?;
        let d = quotient.division();
        let floor = Integer::div_floor(d.numerator(), d.denominator());
        Ok(Self::from(floor))
    }

    pub fn pow(&self, exponent: i64) -> FResult<Self> {
        let d = self.division();
        if d.numerator().is_zero() {
            return match exponent.cmp(&0) {
                Ordering::Equal => Err(IrratError::ZeroToThePowerOfZero),
                Ordering::Less => Err(IrratError::DivideByZero),
                Ordering::Greater => Ok(Self::default()),
            };
        }
        let e = exponent.unsigned_abs();
        // bits - 1 undercounts, so powers of +-1 are never refused
        let base_bits = d.numerator().bits().max(d.denominator().bits()) - 1;
        if base_bits.saturating_mul(e) > MAX_POWER_BITS {
            return Err(IrratError::ExponentTooLarge);
        }
        let num: BigInt = Pow::pow(d.numerator(), e);
        let den: BigInt = Pow::pow(d.denominator(), e);
        if exponent < 0 {
            Ok(Self::from_division(Division::new(den, num)?))
        } else {
            Ok(Self::from_parts(num, den))
        }
    }

    /// Raises to a float exponent. Exponents with a fractional part are
    /// rounded to the nearest integer and the result is flagged as inexact.
    pub fn pow_f64(&self, exponent: f64) -> FResult<Exact<Self>> {
        if !exponent.is_finite() {
            return Err(IrratError::NotFinite(exponent.to_string()));
        }
        let rounded = exponent.round();
        let exact = rounded == exponent;
        if !exact {
            tracing::warn!(
                "exponent {} is not an integer, rounding it to {}",
                exponent,
                rounded
            );
        }
        let e = rounded.to_i64().ok_or(IrratError::TooLarge)?;
        Ok(Exact::new(self.pow(e)?, exact))
    }

    pub fn to_significant_figures(&self, significant_figures: usize) -> FResult<String> {
        self.division().evaluate_to_string(significant_figures)
    }

    fn cross_cmp(&self, other: &Self) -> Ordering {
        let a = self.division();
        let b = other.division();
        (a.numerator() * b.denominator()).cmp(&(b.numerator() * a.denominator()))
    }
}

/// Settles an ordering from an approximation alone, when it is more than
/// `margin` away from `other`.
fn quick_cmp(approx: f64, other: f64, margin: f64) -> Option<Ordering> {
    if approx - margin > other {
        Some(Ordering::Greater)
    } else if approx + margin < other {
        Some(Ordering::Less)
    } else {
        None
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::from(0)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from(BigInt::from(n))
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_parts(n, BigInt::one())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.simplify_or_warn();
        let d = self.division();
        if d.denominator().is_one() {
            write!(f, "{}", d.numerator())
        } else {
            write!(f, "{}/{}", d.numerator(), d.denominator())
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.simplify_or_warn();
        let d = self.division();
        write!(f, "rat({}, {})", d.numerator(), d.denominator())
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        let d = self.division();
        Rational::from_parts(-d.numerator(), d.denominator().clone())
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

macro_rules! impl_binary_op {
    ($op_trait:ident, $op_fn:ident, $impl_fn:ident) => {
        impl $op_trait<&Rational> for &Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: &Rational) -> Rational {
                self.$impl_fn(rhs)
            }
        }

        impl $op_trait<Rational> for &Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: Rational) -> Rational {
                self.$impl_fn(&rhs)
            }
        }

        impl $op_trait<&Rational> for Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: &Rational) -> Rational {
                self.$impl_fn(rhs)
            }
        }

        impl $op_trait<Rational> for Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: Rational) -> Rational {
                self.$impl_fn(&rhs)
            }
        }

        impl $op_trait<i64> for &Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: i64) -> Rational {
                self.$impl_fn(&Rational::from(rhs))
            }
        }

        impl $op_trait<i64> for Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: i64) -> Rational {
                self.$impl_fn(&Rational::from(rhs))
            }
        }

        impl $op_trait<BigInt> for &Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: BigInt) -> Rational {
                self.$impl_fn(&Rational::from(rhs))
            }
        }

        impl $op_trait<BigInt> for Rational {
            type Output = Rational;

            fn $op_fn(self, rhs: BigInt) -> Rational {
                self.$impl_fn(&Rational::from(rhs))
            }
        }

        impl $op_trait<&Rational> for i64 {
            type Output = Rational;

            fn $op_fn(self, rhs: &Rational) -> Rational {
                Rational::from(self).$impl_fn(rhs)
            }
        }

        impl $op_trait<Rational> for i64 {
            type Output = Rational;

            fn $op_fn(self, rhs: Rational) -> Rational {
                Rational::from(self).$impl_fn(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_rational);
impl_binary_op!(Sub, sub, sub_rational);
impl_binary_op!(Mul, mul, mul_rational);
impl_binary_op!(Div, div, div_rational);

macro_rules! impl_assign_op {
    ($op_trait:ident, $op_fn:ident, $impl_fn:ident) => {
        impl $op_trait<&Rational> for Rational {
            fn $op_fn(&mut self, rhs: &Rational) {
                *self = self.$impl_fn(rhs);
            }
        }

        impl $op_trait<Rational> for Rational {
            fn $op_fn(&mut self, rhs: Rational) {
                *self = self.$impl_fn(&rhs);
            }
        }

        impl $op_trait<i64> for Rational {
            fn $op_fn(&mut self, rhs: i64) {
                *self = self.$impl_fn(&Rational::from(rhs));
            }
        }

        impl $op_trait<BigInt> for Rational {
            fn $op_fn(&mut self, rhs: BigInt) {
                *self = self.$impl_fn(&Rational::from(rhs));
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, add_rational);
impl_assign_op!(SubAssign, sub_assign, sub_rational);
impl_assign_op!(MulAssign, mul_assign, mul_rational);
impl_assign_op!(DivAssign, div_assign, div_rational);

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        if let (Ok(()), Ok(())) = (self.simplify(), other.simplify()) {
            let a = self.division();
            let b = other.division();
            return a.numerator() == b.numerator() && a.denominator() == b.denominator();
        }
        tracing::warn!(
            "comparing {:?} and {:?} without reducing them",
            self.division(),
            other.division()
        );
        self.cross_cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.simplify_or_warn();
        other.simplify_or_warn();
        self.cross_cmp(other)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        let d = self.division();
        d.denominator().is_one() && *d.numerator() == BigInt::from(*other)
    }
}

impl PartialOrd<i64> for Rational {
    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        let k = *other as f64;
        if let Some(ordering) = quick_cmp(self.to_f64(), k, k.abs() * INTEGER_SLACK) {
            return Some(ordering);
        }
        Some(self.cmp(&Self::from(*other)))
    }
}

impl PartialEq<f64> for Rational {
    fn eq(&self, other: &f64) -> bool {
        match Self::from_f64(*other) {
            Ok(other) => *self == other,
            Err(_) => false,
        }
    }
}

impl PartialOrd<f64> for Rational {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if other.is_nan() {
            return None;
        }
        if other.is_infinite() {
            return Some(if other.is_sign_positive() {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }
        if let Some(ordering) = quick_cmp(self.to_f64(), *other, comparison_margin(*other)) {
            return Some(ordering);
        }
        let other = Self::from_f64(*other).ok()?;
        Some(self.cmp(&other))
    }
}

impl PartialEq<Rational> for i64 {
    fn eq(&self, other: &Rational) -> bool {
        other == self
    }
}

impl PartialOrd<Rational> for i64 {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl PartialEq<Rational> for f64 {
    fn eq(&self, other: &Rational) -> bool {
        other == self
    }
}

impl PartialOrd<Rational> for f64 {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    // the stored pair, without triggering full simplification
    fn raw(r: &Rational) -> (BigInt, BigInt) {
        let d = r.division();
        (d.numerator().clone(), d.denominator().clone())
    }

    fn pair(num: i64, den: i64) -> (BigInt, BigInt) {
        (num.into(), den.into())
    }

    #[test]
    fn test_construction() {
        assert!(matches!(Rational::new(1, 0), Err(IrratError::DivideByZero)));
        assert_eq!(raw(&rat(2, -4)), pair(-1, 2));
        assert_eq!(raw(&rat(0, -4)), pair(0, 1));
        assert_eq!(raw(&Rational::from(7)), pair(7, 1));
        assert_eq!(raw(&Rational::default()), pair(0, 1));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(raw(&Rational::from_f64(0.1).unwrap()), pair(1, 10));
        assert_eq!(raw(&Rational::from_f64(-2.5).unwrap()), pair(-5, 2));
        assert_eq!(raw(&Rational::from_f64(0.0).unwrap()), pair(0, 1));
        assert_eq!(raw(&Rational::from_f64(1e3).unwrap()), pair(1000, 1));
        assert!(matches!(
            Rational::from_f64(f64::NAN),
            Err(IrratError::NotFinite(_))
        ));
        assert!(Rational::from_f64(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_addition_of_integers() {
        let five = Rational::from(5);
        assert_eq!(raw(&(&five + Rational::from(1))), pair(6, 1));
        assert_eq!(raw(&(&five + 1)), pair(6, 1));
        assert_eq!(raw(&(Rational::from(1) + &five)), pair(6, 1));
        assert_eq!(raw(&(1 + &five)), pair(6, 1));
        assert_eq!(raw(&(&five + BigInt::from(1))), pair(6, 1));
    }

    #[test]
    fn test_addition_of_fractions() {
        let two_thirds = rat(2, 3);
        assert_eq!(raw(&(&two_thirds + rat(1, 3))), pair(1, 1));
        assert_eq!(raw(&(&two_thirds + rat(2, 3))), pair(4, 3));
        assert_eq!(raw(&(rat(1, 137) + rat(1, 274))), pair(3, 274));
    }

    #[test]
    fn test_subtraction() {
        let five = Rational::from(5);
        assert_eq!(raw(&(&five - Rational::from(1))), pair(4, 1));
        assert_eq!(raw(&(&five - 1)), pair(4, 1));
        assert_eq!(raw(&(Rational::from(1) - &five)), pair(-4, 1));
        assert_eq!(raw(&(1 - &five)), pair(-4, 1));

        let seven_thirds = rat(7, 3);
        assert_eq!(raw(&(&seven_thirds - rat(4, 3))), pair(1, 1));
        assert_eq!(raw(&(&seven_thirds - 1)), pair(4, 3));
        assert_eq!(raw(&(&seven_thirds - rat(1, 2))), pair(11, 6));
    }

    #[test]
    fn test_multiplication() {
        let five = Rational::from(5);
        assert_eq!(raw(&(&five * Rational::from(2))), pair(10, 1));
        assert_eq!(raw(&(&five * 2)), pair(10, 1));
        assert_eq!(raw(&(2 * &five)), pair(10, 1));

        let seven_thirds = rat(7, 3);
        assert_eq!(raw(&(&seven_thirds * rat(3, 7))), pair(1, 1));
        assert_eq!(raw(&(&seven_thirds * Rational::from(3))), pair(7, 1));
        assert_eq!(raw(&(&seven_thirds * rat(11, 7))), pair(11, 3));
    }

    #[test]
    fn test_division() {
        let five = Rational::from(5);
        assert_eq!(raw(&(&five / Rational::from(2))), pair(5, 2));
        assert_eq!(raw(&(&five / 2)), pair(5, 2));
        assert_eq!(raw(&(Rational::from(2) / &five)), pair(2, 5));
        assert_eq!(raw(&(2 / &five)), pair(2, 5));

        let seven_thirds = rat(7, 3);
        assert_eq!(raw(&(&seven_thirds / rat(7, 3))), pair(1, 1));
        assert_eq!(raw(&(&seven_thirds / Rational::from(7))), pair(1, 3));
        assert_eq!(raw(&(&seven_thirds / rat(11, 7))), pair(49, 33));
        assert_eq!(raw(&(&seven_thirds / rat(-7, 2))), pair(-2, 3));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_division_by_zero_panics() {
        let _ = rat(1, 2) / Rational::from(0);
    }

    #[test]
    fn test_checked_div() {
        assert!(matches!(
            rat(1, 2).checked_div(&Rational::default()),
            Err(IrratError::DivideByZero)
        ));
        assert_eq!(rat(1, 2).checked_div(&rat(1, 4)).unwrap(), 2);
    }

    #[test]
    fn test_floor_division() {
        let seven_thirds = rat(7, 3);
        assert_eq!(raw(&seven_thirds.div_floor(&rat(7, 3)).unwrap()), pair(1, 1));
        assert_eq!(raw(&seven_thirds.div_floor(&Rational::from(7)).unwrap()), pair(0, 1));
        assert_eq!(raw(&seven_thirds.div_floor(&rat(11, 7)).unwrap()), pair(1, 1));
        assert_eq!(raw(&seven_thirds.div_floor(&rat(-1, 1)).unwrap()), pair(-3, 1));
        assert!(seven_thirds.div_floor(&Rational::default()).is_err());
    }

    #[test]
    fn test_compound_assignment_rebinds() {
        let mut five = Rational::from(5);
        let copy_of_five = five.clone();
        five += Rational::from(0);
        assert_eq!(raw(&five), raw(&copy_of_five));
        five += 8;
        assert_eq!(raw(&copy_of_five), pair(5, 1));
        assert_eq!(raw(&five), pair(13, 1));

        let mut five = Rational::from(5);
        five -= 8;
        assert_eq!(raw(&five), pair(-3, 1));

        let mut five = Rational::from(5);
        five *= rat(-2, 7);
        assert_eq!(raw(&five), pair(-10, 7));

        let mut five = Rational::from(5);
        five /= &rat(-2, 7);
        assert_eq!(raw(&five), pair(-35, 2));

        let mut x = rat(1, 3);
        x += BigInt::from(2);
        assert_eq!(raw(&x), pair(7, 3));
    }

    #[test]
    fn test_exact_cancellation() {
        let a = rat(5, 7);
        let b = rat(5476, 1053);
        let c = &a / &b;
        assert_eq!(format!("{:?}", c), "rat(5265, 38332)");
        assert_eq!(c.to_f64(), 0.1373526035688198);

        // 53 is above the quick simplification limit
        let d = rat(47 * 53, 3 * 3 * 23);
        let e = rat(3 * 19, 53 * 73);
        let f = &d * &e;
        assert_ne!(raw(&f), pair(893, 5037));
        assert_eq!(format!("{:?}", f), "rat(893, 5037)");
        assert_eq!(raw(&f), pair(893, 5037));
        assert_eq!(f.to_f64(), 893.0 / 5037.0);
    }

    #[test]
    fn test_accessors_reduce() {
        let r = rat(137 * 2, 137 * 3);
        assert_eq!(raw(&r), pair(274, 411));
        assert_eq!(r.numerator(), BigInt::from(2));
        assert_eq!(r.denominator(), BigInt::from(3));
        assert!(r.division().is_fully_simplified());
    }

    #[test]
    fn test_display() {
        assert_eq!(rat(137, 274).to_string(), "1/2");
        assert_eq!(rat(-6, 3).to_string(), "-2");
        assert_eq!(Rational::default().to_string(), "0");
        assert_eq!(format!("{:?}", Rational::from(4)), "rat(4, 1)");
    }

    #[test]
    fn test_accuracy_after_float_conversion() {
        let r = rat(23, 169);
        let f: f64 = r.to_f64().to_string().parse().unwrap();
        let diff = (&r - Rational::from_f64(f).unwrap()).abs();
        assert!(diff < rat(1, 1000));
    }

    #[test]
    fn test_comparison_operators() {
        let ten = Rational::from(10);
        let three_halves = rat(3, 2);
        let one_tenth = rat(1, 10);
        let ten_percent = rat(100, 1000);

        assert!(ten > three_halves);
        assert!(three_halves <= ten);
        assert!(1 < three_halves);
        assert!(ten > 9.9993);
        assert!(one_tenth < three_halves);
        assert!(one_tenth >= ten_percent);
        assert_eq!(one_tenth, ten_percent);
        assert_eq!(one_tenth, 0.1);
        assert_eq!(0.1, one_tenth);
    }

    #[test]
    fn test_comparison_needing_exact_path() {
        // both approximate to exactly 1.0
        let big = BigInt::from(10).pow(30_u32);
        let a = Rational::new(&big + 1, big.clone()).unwrap();
        let b = Rational::new(&big + 2, big).unwrap();
        assert_eq!(a.to_f64(), b.to_f64());
        assert!(a < b);
        assert_ne!(a, b);
        assert!(a > 1);
        assert!(a > 1.0);
        assert!(rat(1, 3) < 0.3333333333333334);
        assert!(rat(1, 3) > 0.3333333333333333);
    }

    #[test]
    fn test_comparison_with_integers() {
        assert_eq!(rat(8, 4), 2);
        assert_ne!(rat(7, 4), 2);
        assert!(rat(7, 4) < 2);
        assert!(rat(-7, 4) > -2);
        assert!(rat(1, 1) >= 1);
        assert_eq!(rat(1, 1).partial_cmp(&1), Some(Ordering::Equal));
        assert_eq!(rat(-1, 1000).partial_cmp(&0), Some(Ordering::Less));
    }

    #[test]
    fn test_comparison_with_special_floats() {
        let x = rat(1, 2);
        assert_eq!(x.partial_cmp(&f64::NAN), None);
        assert!(x != f64::NAN);
        assert!(x < f64::INFINITY);
        assert!(x > f64::NEG_INFINITY);
    }

    #[test]
    fn test_equality_of_large_values() {
        let p = BigInt::from(1_000_003_u64);
        let q = BigInt::from(1_000_033_u64);
        let a = Rational::new(&p * &q * 5, &p * &q * 11).unwrap();
        assert_eq!(a, rat(5, 11));
        assert_eq!(a.to_string(), "5/11");
    }

    #[test]
    fn test_abs_neg_recip() {
        assert_eq!(rat(-3, 4).abs(), rat(3, 4));
        assert_eq!(rat(3, 4).abs(), rat(3, 4));
        assert_eq!(-rat(3, 4), rat(-3, 4));
        assert_eq!(rat(-3, 4).recip().unwrap(), rat(-4, 3));
        assert!(matches!(
            Rational::default().recip(),
            Err(IrratError::DivideByZero)
        ));
    }

    #[test]
    fn test_is_integer() {
        assert!(rat(12, 4).is_integer());
        assert!(rat(137 * 2, 137).is_integer());
        assert!(!rat(1, 2).is_integer());
        assert!(Rational::default().is_zero());
        assert!(rat(-1, 2).is_negative());
    }

    #[test]
    fn test_round_to_integer() {
        let round = |n, d| rat(n, d).round_to_integer();
        assert_eq!(round(5, 2), BigInt::from(3));
        assert_eq!(round(-5, 2), BigInt::from(-3));
        assert_eq!(round(7, 3), BigInt::from(2));
        assert_eq!(round(5, 3), BigInt::from(2));
        assert_eq!(round(-5, 3), BigInt::from(-2));
        assert_eq!(round(4, 1), BigInt::from(4));
        assert_eq!(round(0, 1), BigInt::from(0));
    }

    #[test]
    fn test_pow() {
        assert_eq!(rat(2, 3).pow(3).unwrap(), rat(8, 27));
        assert_eq!(rat(2, 3).pow(-2).unwrap(), rat(9, 4));
        assert_eq!(rat(-2, 3).pow(-1).unwrap(), rat(-3, 2));
        assert_eq!(rat(5, 7).pow(0).unwrap(), 1);
        assert_eq!(Rational::default().pow(4).unwrap(), 0);
        assert!(matches!(
            Rational::default().pow(0),
            Err(IrratError::ZeroToThePowerOfZero)
        ));
        assert!(matches!(
            Rational::default().pow(-1),
            Err(IrratError::DivideByZero)
        ));
    }

    #[test]
    fn test_pow_refuses_huge_results() {
        assert_eq!(
            Rational::from(2).pow(30_000_000).unwrap_err(),
            IrratError::ExponentTooLarge
        );
        assert_eq!(
            rat(1, 3).pow(-30_000_000).unwrap_err(),
            IrratError::ExponentTooLarge
        );
        assert!(Rational::from(2).pow(200_000).is_ok());
        assert_eq!(Rational::from(-1).pow(1_000_001).unwrap(), -1);
        assert_eq!(Rational::from(1).pow(i64::MAX).unwrap(), 1);
    }

    #[test]
    fn test_pow_f64() {
        let x = rat(3, 2).pow_f64(2.0).unwrap();
        assert!(x.exact);
        assert_eq!(x.value, rat(9, 4));

        let y = rat(3, 2).pow_f64(1.6).unwrap();
        assert!(!y.exact);
        assert_eq!(y.value, rat(9, 4));

        assert!(rat(3, 2).pow_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_significant_figures_are_unsupported() {
        assert!(matches!(
            rat(1, 3).to_significant_figures(10),
            Err(IrratError::Unsupported(_))
        ));
    }

    #[test]
    fn test_add_with_polls_the_interrupt() {
        use crate::interrupt::tests::AfterPolls;

        let options = FactorizeOptions::default();
        let a = rat(1, 137 * 2);
        let b = rat(1, 137 * 3);
        assert_eq!(
            a.add_with(&b, &options, &AfterPolls::new(0)).unwrap_err(),
            IrratError::Interrupted
        );
        assert_eq!(
            raw(&a.add_with(&b, &options, &Never::default()).unwrap()),
            pair(5, 822)
        );
        assert_eq!(
            raw(&a.sub_with(&b, &options, &Never::default()).unwrap()),
            pair(1, 822)
        );
        // same denominator: nothing to factor
        let sum = a.add_with(&a, &options, &AfterPolls::new(0)).unwrap();
        assert_eq!(raw(&sum), pair(1, 137));
    }

    #[test]
    fn test_cmp_with() {
        use crate::interrupt::tests::AfterPolls;

        let options = FactorizeOptions::default();
        let a = rat(137 * 2, 137 * 3);
        let b = rat(2, 3);
        assert_eq!(
            a.cmp_with(&b, &options, &AfterPolls::new(0)),
            Err(IrratError::Interrupted)
        );
        assert_eq!(a.cmp_with(&b, &options, &Never::default()), Ok(Ordering::Equal));
        assert_eq!(
            rat(1, 3).cmp_with(&b, &options, &Never::default()),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn test_simplify_with_interrupt() {
        use crate::interrupt::tests::AfterPolls;

        let r = rat(137 * 139, 137 * 149);
        assert_eq!(
            r.simplify_with_interrupt(&AfterPolls::new(0)),
            Err(IrratError::Interrupted)
        );
        assert_eq!(raw(&r), pair(137 * 139, 137 * 149));
        assert_eq!(r.simplify_with_interrupt(&Never::default()), Ok(()));
        assert_eq!(raw(&r), pair(139, 149));
    }
}
