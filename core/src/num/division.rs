use crate::error::IrratError;
use crate::interrupt::{test_int, Interrupt, Never};
use crate::num::factorize::{
    cautious_factorize_with_interrupt, factorize_with_interrupt, FactorizeOptions,
};
use crate::num::float::ratio_to_f64;
use crate::num::sieve::primes_up_to;
use crate::result::FResult;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::mem;

/// A numerator/denominator pair that is kept in lower terms as cheaply as
/// possible.
///
/// The denominator is always positive. Construction removes every common
/// prime factor up to 23 (the "quick" pass), which is enough for most
/// fractions that come out of decimal literals and small-integer arithmetic.
/// Reduction to lowest terms (the "full" pass) factors the smaller of the two
/// magnitudes and is only done on request. Both passes only ever shrink the
/// pair; once fully simplified it is never changed again.
#[derive(Clone)]
pub struct Division {
    num: BigInt,
    den: BigInt,
    fully_simplified: bool,
}

impl Division {
    pub fn new(num: BigInt, den: BigInt) -> FResult<Self> {
        Self::new_with_options(num, den, &FactorizeOptions::default())
    }

    pub fn new_with_options(
        mut num: BigInt,
        mut den: BigInt,
        options: &FactorizeOptions,
    ) -> FResult<Self> {
        if den.is_zero() {
            return Err(IrratError::DivideByZero);
        }
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        Ok(Self::with_limit(num, den, options.quick_prime_limit))
    }

    /// For callers that already know `den > 0`, e.g. a product of two
    /// denominators.
    pub(crate) fn from_positive_denominator(num: BigInt, den: BigInt) -> Self {
        debug_assert!(den.is_positive());
        Self::with_limit(num, den, FactorizeOptions::default().quick_prime_limit)
    }

    fn with_limit(num: BigInt, den: BigInt, quick_prime_limit: u64) -> Self {
        let mut res = Self {
            num,
            den,
            fully_simplified: false,
        };
        res.quick_simplify(quick_prime_limit);
        res
    }

    pub fn numerator(&self) -> &BigInt {
        &self.num
    }

    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    pub fn is_fully_simplified(&self) -> bool {
        self.fully_simplified
    }

    /// Plain float division of the current pair. Good enough for ordering
    /// values that are far apart, never for equality.
    pub fn approximation(&self) -> f64 {
        ratio_to_f64(&self.num, &self.den)
    }

    fn quick_simplify(&mut self, prime_limit: u64) {
        if self.fully_simplified {
            return;
        }
        if self.num.is_zero() {
            self.den = BigInt::one();
            return;
        }
        // already an integer, or the reciprocal of one
        if self.num.abs().is_one() || self.den.is_one() {
            return;
        }
        if (&self.num % &self.den).is_zero() {
            self.num = mem::take(&mut self.num) / &self.den;
            self.den = BigInt::one();
            tracing::trace!(num = %self.num, "collapsed to an integer");
            return;
        }
        // best effort: a sieve that can't be allocated just leaves the pair as is
        let primes = match primes_up_to(prime_limit) {
            Ok(primes) => primes,
            Err(_) => return,
        };
        for p in primes {
            while (&self.num % p).is_zero() && (&self.den % p).is_zero() {
                self.num /= p;
                self.den /= p;
            }
        }
    }

    /// Reduces the pair to lowest terms. Does nothing if that has already
    /// happened.
    pub fn fully_simplify(&mut self) -> FResult<()> {
        self.fully_simplify_with(&FactorizeOptions::default(), &Never::default())
    }

    pub fn fully_simplify_with<I: Interrupt + ?Sized>(
        &mut self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<()> {
        if self.fully_simplified {
            return Ok(());
        }
        self.quick_simplify(options.quick_prime_limit);

        let negative = self.num.is_negative();
        let mut a = self.num.abs();
        let mut b = self.den.clone();
        if a.is_zero() || a.is_one() || b.is_one() {
            self.fully_simplified = true;
            return Ok(());
        }

        // Only the common factors matter, and those all divide the smaller
        // number, so the larger one is never factored.
        let inverted = a > b;
        if inverted {
            mem::swap(&mut a, &mut b);
        }
        let a_factors = if a < BigInt::from(options.direct_threshold) {
            factorize_with_interrupt(&a, int)?
        } else {
            cautious_factorize_with_interrupt(&a, options, int)?
        };
        for (f, &multiplicity) in &a_factors {
            let mut remaining = multiplicity;
            while remaining > 0 && (&b % f).is_zero() {
                test_int(int)?;
                a /= f;
                b /= f;
                remaining -= 1;
            }
        }
        if inverted {
            mem::swap(&mut a, &mut b);
        }

        self.num = if negative { -a } else { a };
        self.den = b;
        self.fully_simplified = true;
        tracing::trace!(num = %self.num, den = %self.den, "fully simplified");
        Ok(())
    }

    /// Decimal rendering to a given number of significant figures.
    pub fn evaluate_to_string(&self, _significant_figures: usize) -> FResult<String> {
        Err(IrratError::Unsupported("decimal rendering to arbitrary precision"))
    }
}

impl fmt::Debug for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)?;
        if !self.fully_simplified {
            write!(f, " (partially simplified)")?;
        }
        Ok(())
    }
}
