use super::{cautious_factorize, factorize, primes_up_to, GrowablePrimes, Rational};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};
use proptest::prelude::*;

fn is_prime_naive(n: u64) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn signed(magnitude: i64, negative: bool) -> i64 {
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

proptest! {
    #[test]
    fn sieve_matches_trial_division(limit in 0_u64..3000) {
        let primes: Vec<u64> = primes_up_to(limit).unwrap().collect();
        let expected: Vec<u64> = (0..=limit).filter(|&n| is_prime_naive(n)).collect();
        prop_assert_eq!(primes, expected);
    }

    #[test]
    fn growable_ramp_matches_direct_sieve(limit in 3_u64..5000, first_third in any::<bool>()) {
        let start = if first_third { limit / 3 } else { 0 };
        let mut gen = GrowablePrimes::new(start).unwrap();
        let mut primes: Vec<u64> = gen.by_ref().collect();
        gen.increase_bound(limit).unwrap();
        primes.extend(gen.by_ref());
        let direct: Vec<u64> = primes_up_to(limit).unwrap().collect();
        prop_assert_eq!(primes, direct);
    }

    #[test]
    fn factorizations_agree_and_multiply_back(n in 1_u64..2_000_000) {
        let n = BigInt::from(n);
        let direct = factorize(&n).unwrap();
        let cautious = cautious_factorize(&n).unwrap();
        prop_assert_eq!(&direct, &cautious);
        prop_assert_eq!(direct.product(), n);
        for (p, &e) in &direct {
            prop_assert!(is_prime_naive(p.to_u64().unwrap()));
            prop_assert!(e > 0);
        }
    }

    #[test]
    fn rationals_come_out_reduced(
        a in -100_000_i64..100_000,
        b in 1_i64..100_000,
        negative in any::<bool>(),
    ) {
        let b = signed(b, negative);
        let r = Rational::new(a, b).unwrap();
        let (num, den) = (r.numerator(), r.denominator());
        prop_assert!(den.is_positive());
        prop_assert!(num.gcd(&den).is_one());
        prop_assert_eq!(&num * b, &den * a);
    }

    #[test]
    fn simplification_is_idempotent(a in 1_i64..10_000, b in 1_i64..10_000, k in 24_i64..2000) {
        let r = Rational::new(a * k, b * k).unwrap();
        r.simplify().unwrap();
        let once = (r.numerator(), r.denominator());
        r.simplify().unwrap();
        prop_assert_eq!((r.numerator(), r.denominator()), once);
    }

    #[test]
    fn arithmetic_matches_cross_multiplication(
        a in -1000_i64..1000,
        b in 1_i64..1000,
        c in -1000_i64..1000,
        d in 1_i64..1000,
    ) {
        let x = Rational::new(a, b).unwrap();
        let y = Rational::new(c, d).unwrap();
        prop_assert_eq!(&x + &y, Rational::new(a * d + c * b, b * d).unwrap());
        prop_assert_eq!(&x - &y, Rational::new(a * d - c * b, b * d).unwrap());
        prop_assert_eq!(&x * &y, Rational::new(a * c, b * d).unwrap());
        prop_assert_eq!(x.cmp(&y), (a * d).cmp(&(c * b)));
        if c != 0 {
            prop_assert_eq!(&x / &y, Rational::new(a * d, b * c).unwrap());
        }
    }
}
