use crate::error::IrratError;
use crate::interrupt::{test_int, Interrupt, Never};
use crate::num::factors::Factors;
use crate::num::growable::GrowablePrimes;
use crate::num::sieve::primes_up_to;
use crate::result::FResult;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

/// Tunables for factorization and simplification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorizeOptions {
    /// Primes up to this bound are tried by the quick simplification pass.
    pub quick_prime_limit: u64,
    /// Numbers below this are factored directly; larger ones cautiously.
    pub direct_threshold: u64,
    /// Number of equal steps used when cautiously factoring a number below
    /// `direct_threshold`.
    pub moderate_steps: u64,
    /// First sieve bound used when cautiously factoring a large number.
    pub first_bound: u64,
    /// Each further sieve bound is this many times the previous one.
    pub growth_factor: u64,
}

impl Default for FactorizeOptions {
    fn default() -> Self {
        Self {
            quick_prime_limit: 23,
            direct_threshold: 10000 * 10000,
            moderate_steps: 5,
            first_bound: 1000,
            growth_factor: 10,
        }
    }
}

fn check_positive(n: &BigInt) -> FResult<()> {
    if n.is_positive() {
        Ok(())
    } else {
        Err(IrratError::NotPositive(n.to_string()))
    }
}

fn to_bound(n: &BigInt) -> FResult<u64> {
    n.to_u64().ok_or(IrratError::TooLarge)
}

// Roots beyond u64 can never be sieved anyway, so they only need to compare
// as "larger than any bound".
fn saturating_root(n: &BigInt) -> u64 {
    n.sqrt().to_u64().unwrap_or(u64::MAX)
}

/// Divides every power of `p` out of `remaining`, recording each one.
fn divide_out(remaining: &mut BigInt, p: u64, factors: &mut Factors) {
    while (&*remaining % p).is_zero() {
        *remaining /= p;
        factors.push(p);
    }
}

/// Factors `n` by trial division with every prime up to `sqrt(n)`.
///
/// The whole sieve is allocated at once, so this is meant for numbers whose
/// square root is cheap to sieve.
pub fn factorize(n: &BigInt) -> FResult<Factors> {
    factorize_with_interrupt(n, &Never::default())
}

pub fn factorize_with_interrupt<I: Interrupt + ?Sized>(n: &BigInt, int: &I) -> FResult<Factors> {
    check_positive(n)?;
    let mut remaining = n.clone();
    let mut factors = Factors::new();
    for p in primes_up_to(to_bound(&n.sqrt())?)? {
        test_int(int)?;
        divide_out(&mut remaining, p, &mut factors);
        if BigInt::from(p) * p > remaining {
            break;
        }
    }
    // nothing up to its square root divides it, so it is prime
    if !remaining.is_one() {
        factors.push(remaining);
    }
    Ok(factors)
}

/// The sieve bounds `cautious_factorize` escalates through, smallest first.
/// The last bound is always `sqrt(n)`.
fn bound_sequence(n: &BigInt, options: &FactorizeOptions) -> Vec<u64> {
    let upper = saturating_root(n);
    let mut bounds = vec![];
    if *n < BigInt::from(options.direct_threshold) {
        let steps = options.moderate_steps.max(1);
        for i in 1..=steps {
            // i * upper / steps, without overflowing
            let bound = (u128::from(upper) * u128::from(i) / u128::from(steps)) as u64;
            if bounds.last() != Some(&bound) {
                bounds.push(bound);
            }
        }
    } else {
        let growth = options.growth_factor.max(2);
        let mut bound = options.first_bound.max(2);
        while bound < upper {
            bounds.push(bound);
            bound = match bound.checked_mul(growth) {
                Some(b) => b,
                None => break,
            };
        }
        bounds.push(upper);
    }
    bounds
}

/// Factors `n` while allocating sieve memory only as it is needed.
///
/// Primes are produced in batches with increasing upper bounds. Each batch is
/// divided out of `n` before the next is generated, and escalation stops as
/// soon as the remaining cofactor's square root is covered by the primes
/// already tried. A number with only small factors therefore never pays for a
/// sieve anywhere near `sqrt(n)`.
pub fn cautious_factorize(n: &BigInt) -> FResult<Factors> {
    cautious_factorize_with_interrupt(n, &FactorizeOptions::default(), &Never::default())
}

pub fn cautious_factorize_with_interrupt<I: Interrupt + ?Sized>(
    n: &BigInt,
    options: &FactorizeOptions,
    int: &I,
) -> FResult<Factors> {
    check_positive(n)?;
    let bounds = bound_sequence(n, options);
    let mut remaining = n.clone();
    let mut factors = Factors::new();
    let mut primes = GrowablePrimes::new(0)?;

    for bound in bounds {
        let remaining_root = saturating_root(&remaining);
        if remaining_root <= primes.limit() {
            tracing::debug!(
                bound = primes.limit(),
                "cofactor covered by current sieve, stopping early"
            );
            break;
        }
        let bound = bound.min(remaining_root);
        tracing::debug!(bound, "raising sieve bound");
        primes.increase_bound(bound)?;
        while let Some(p) = primes.next() {
            test_int(int)?;
            divide_out(&mut remaining, p, &mut factors);
            if BigInt::from(p) * p > remaining {
                break;
            }
        }
    }

    if !remaining.is_one() {
        factors.push(remaining);
    }
    Ok(factors)
}

/// Converts a float to an integer, rejecting anything with a fractional part.
pub fn integer_from_f64(f: f64) -> FResult<BigInt> {
    if !f.is_finite() {
        return Err(IrratError::NotFinite(f.to_string()));
    }
    if f.fract() != 0.0 {
        return Err(IrratError::NotAnInteger(f.to_string()));
    }
    BigInt::from_f64(f).ok_or_else(|| IrratError::NotAnInteger(f.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::tests::AfterPolls;

    fn factor_list(factors: &Factors) -> Vec<(u64, u32)> {
        factors
            .iter()
            .map(|(p, e)| (p.to_u64().unwrap(), *e))
            .collect()
    }

    #[test]
    fn test_20() {
        let n = BigInt::from(20);
        assert_eq!(factor_list(&factorize(&n).unwrap()), vec![(2, 2), (5, 1)]);
        assert_eq!(
            factor_list(&cautious_factorize(&n).unwrap()),
            vec![(2, 2), (5, 1)]
        );
    }

    #[test]
    fn test_small_numbers() {
        assert!(factorize(&BigInt::from(1)).unwrap().is_empty());
        assert!(cautious_factorize(&BigInt::from(1)).unwrap().is_empty());
        for n in 2..300_u64 {
            let n = BigInt::from(n);
            let direct = factorize(&n).unwrap();
            assert_eq!(direct.product(), n);
            assert_eq!(cautious_factorize(&n).unwrap(), direct);
        }
    }

    #[test]
    fn test_primes_are_their_own_factorization() {
        for p in [2_u64, 3, 97, 7919, 1_000_000_007] {
            let n = BigInt::from(p);
            assert_eq!(factor_list(&factorize(&n).unwrap()), vec![(p, 1)]);
            assert_eq!(factor_list(&cautious_factorize(&n).unwrap()), vec![(p, 1)]);
        }
    }

    #[test]
    fn test_large_composite() {
        // 2^10 * 3^4 * 1000003 * 1000033
        let n = BigInt::from(1024_u64 * 81) * 1_000_003_u64 * 1_000_033_u64;
        let factors = cautious_factorize(&n).unwrap();
        assert_eq!(
            factor_list(&factors),
            vec![(2, 10), (3, 4), (1_000_003, 1), (1_000_033, 1)]
        );
        assert_eq!(factors.product(), n);

        let n = BigInt::from(1_000_003_u64) * 1_000_033_u64;
        assert_eq!(factorize(&n).unwrap(), cautious_factorize(&n).unwrap());
    }

    #[test]
    fn test_huge_number_with_small_factors() {
        // 2^200 * 3: the square root is far too large to sieve, but the
        // cofactor collapses after the first bound
        let n = BigInt::from(3) << 200;
        let factors = cautious_factorize(&n).unwrap();
        assert_eq!(factor_list(&factors), vec![(2, 200), (3, 1)]);
        assert_eq!(factorize(&n), Err(IrratError::TooLarge));
    }

    #[test]
    fn test_non_positive_is_rejected() {
        assert!(matches!(
            factorize(&BigInt::from(0)),
            Err(IrratError::NotPositive(_))
        ));
        assert!(matches!(
            cautious_factorize(&BigInt::from(-12)),
            Err(IrratError::NotPositive(_))
        ));
    }

    #[test]
    fn test_bound_sequence() {
        let options = FactorizeOptions::default();
        assert_eq!(
            bound_sequence(&BigInt::from(10000), &options),
            vec![20, 40, 60, 80, 100]
        );
        assert_eq!(
            bound_sequence(&BigInt::from(10_u64.pow(12)), &options),
            vec![1000, 10000, 100000, 1000000]
        );
        assert_eq!(bound_sequence(&BigInt::from(3), &options), vec![0, 1]);
        let huge = bound_sequence(&(BigInt::from(1) << 200), &options);
        assert_eq!(huge.first(), Some(&1000));
        assert_eq!(huge.last(), Some(&u64::MAX));

        let options = FactorizeOptions {
            first_bound: 0,
            ..FactorizeOptions::default()
        };
        assert_eq!(
            bound_sequence(&BigInt::from(10_u64.pow(12)), &options),
            vec![2, 20, 200, 2000, 20000, 200000, 1000000]
        );
    }

    #[test]
    fn test_interrupt() {
        let n = BigInt::from(1_000_003_u64) * 1_000_033_u64;
        let int = AfterPolls::new(10);
        assert_eq!(
            cautious_factorize_with_interrupt(&n, &FactorizeOptions::default(), &int),
            Err(IrratError::Interrupted)
        );
        assert_eq!(
            factorize_with_interrupt(&n, &AfterPolls::new(10)),
            Err(IrratError::Interrupted)
        );
    }

    #[test]
    fn test_integer_from_f64() {
        assert_eq!(integer_from_f64(12.0).unwrap(), BigInt::from(12));
        assert_eq!(integer_from_f64(-3.0).unwrap(), BigInt::from(-3));
        assert!(matches!(
            integer_from_f64(0.5),
            Err(IrratError::NotAnInteger(_))
        ));
        assert!(matches!(
            integer_from_f64(f64::NAN),
            Err(IrratError::NotFinite(_))
        ));
    }
}
