use num_bigint::BigInt;
use num_traits::{One, Pow};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// The prime factorization of a positive integer, as a map from prime to
/// exponent.
///
/// Keys are prime by construction (they come out of the factorization
/// engine) and exponents are never zero. Two factorizations compare equal when
/// they hold the same primes with the same exponents.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Factors {
    factors: BTreeMap<BigInt, u32>,
}

impl Factors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more power of `prime`.
    pub(crate) fn push(&mut self, prime: impl Into<BigInt>) {
        let exponent = self.factors.entry(prime.into()).or_insert(0);
        *exponent += 1;
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Primes and their exponents, smallest prime first.
    pub fn iter(&self) -> btree_map::Iter<'_, BigInt, u32> {
        self.factors.iter()
    }

    /// Multiplies the factorization back out. An empty factorization is 1.
    pub fn product(&self) -> BigInt {
        self.factors
            .iter()
            .fold(BigInt::one(), |acc, (p, &e)| acc * Pow::pow(p, e))
    }
}

impl<'a> IntoIterator for &'a Factors {
    type Item = (&'a BigInt, &'a u32);
    type IntoIter = btree_map::Iter<'a, BigInt, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "1");
        }
        for (i, (prime, exponent)) in self.factors.iter().enumerate() {
            if i != 0 {
                write!(f, " * ")?;
            }
            if *exponent == 1 {
                write!(f, "{}", prime)?;
            } else {
                write!(f, "{}^{}", prime, exponent)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.factors.iter()).finish()
    }
}
