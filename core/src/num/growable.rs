use crate::num::sieve::{
    from_sieve_index, mark_odd_multiples, sieve_len, to_sieve_index, SieveBits,
};
use crate::result::FResult;

/// A prime cursor whose upper bound can be raised after it runs dry.
///
/// `next()` returns `None` once every prime up to the current limit has been
/// produced. That is not the end of the sequence: after
/// [`increase_bound`](Self::increase_bound) the cursor resumes strictly after
/// the last position it resolved, reusing the sieve built so far. This lets a
/// caller pay for sieve memory in steps instead of committing to `sqrt(n)`
/// up front.
#[derive(Debug, Clone)]
pub struct GrowablePrimes {
    limit: u64,
    is_prime: SieveBits,
    // last number the cursor has decided on, prime or composite
    last_resolved: Option<u64>,
}

impl GrowablePrimes {
    pub fn new(limit: u64) -> FResult<Self> {
        let mut is_prime = SieveBits::default();
        is_prime.extend(sieve_len(limit)?)?;
        Ok(Self {
            limit,
            is_prime,
            last_resolved: None,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    fn next_candidate(&self) -> u64 {
        match self.last_resolved {
            None => 2,
            Some(2) => 3,
            Some(n) => n + 2,
        }
    }

    /// Raises the upper bound to `new_limit`. Does nothing if `new_limit` is not
    /// larger than the current bound.
    ///
    /// Composites in the new range are struck out by every prime the cursor
    /// has already yielded, exactly as if the sieve had been started with the
    /// larger bound. Primes that have not been yielded yet strike out their
    /// own multiples when they are reached.
    pub fn increase_bound(&mut self, new_limit: u64) -> FResult<()> {
        if new_limit <= self.limit {
            return Ok(());
        }
        let old_len = self.is_prime.len();
        self.is_prime.extend(sieve_len(new_limit)?)?;
        let first_new_number = from_sieve_index(old_len as u64);
        let last_yielded = self.last_resolved.unwrap_or(0);

        for idx in 0..old_len {
            let p = from_sieve_index(idx as u64);
            if p > last_yielded {
                break;
            }
            if !self.is_prime.get(idx) {
                continue;
            }
            // smallest odd multiple of p that is >= first_new_number
            let mut multiple = first_new_number / p;
            if first_new_number % p != 0 {
                multiple += 1;
            }
            if multiple % 2 == 0 {
                multiple += 1;
            }
            if let Some(start) = p.checked_mul(multiple) {
                mark_odd_multiples(&mut self.is_prime, p, start, new_limit);
            }
        }

        self.limit = new_limit;
        Ok(())
    }
}

impl Iterator for GrowablePrimes {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            let candidate = self.next_candidate();
            if candidate > self.limit {
                return None;
            }
            self.last_resolved = Some(candidate);
            if candidate == 2 {
                return Some(2);
            }
            if !self.is_prime.get(to_sieve_index(candidate) as usize) {
                continue;
            }
            if let Some(start) = candidate.checked_mul(3) {
                mark_odd_multiples(&mut self.is_prime, candidate, start, self.limit);
            }
            return Some(candidate);
        }
    }
}
