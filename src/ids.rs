//! Photo ID sampling
//!
//! IDs are drawn uniformly and independently from a closed range. Duplicates
//! are possible and harmless; this is sampling, not enumeration.

use crate::error::{Error, Result};
use crate::types::PhotoId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of random photo IDs
///
/// Owns its random number generator so a run can be replayed by passing the
/// same seed.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    range: RangeInclusive<u32>,
}

impl IdGenerator {
    /// Generator over `[lower, lower + span - 1]` with a fixed seed
    pub fn with_seed(lower: u32, span: u32, seed: u64) -> Result<Self> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            range: id_range(lower, span)?,
        })
    }

    /// Generator seeded once from the current time
    pub fn from_clock(lower: u32, span: u32) -> Result<Self> {
        Self::with_seed(lower, span, clock_seed())
    }

    /// The closed range IDs are drawn from
    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }

    /// Draw a single ID
    pub fn next_id(&mut self) -> PhotoId {
        PhotoId(self.rng.gen_range(self.range.clone()))
    }

    /// Draw `count` IDs
    ///
    /// Fails with [`Error::IdAllocation`] if storage for `count` IDs cannot be
    /// reserved.
    pub fn generate(&mut self, count: usize) -> Result<Vec<PhotoId>> {
        let mut ids = Vec::new();
        ids.try_reserve_exact(count)
            .map_err(|_| Error::IdAllocation { requested: count })?;
        for _ in 0..count {
            ids.push(self.next_id());
        }
        Ok(ids)
    }
}

fn id_range(lower: u32, span: u32) -> Result<RangeInclusive<u32>> {
    if span == 0 {
        return Err(Error::config("id_span", "must be greater than zero"));
    }
    let upper = lower
        .checked_add(span - 1)
        .ok_or_else(|| Error::config("id_span", "sampling range overflows a 32-bit photo ID"))?;
    Ok(lower..=upper)
}

fn clock_seed() -> u64 {
    // A clock before the epoch only costs entropy
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: u32 = 2_000_000;
    const SPAN: u32 = 10_000;

    #[test]
    fn test_generate_exact_count_within_range() {
        let mut generator = IdGenerator::with_seed(LOWER, SPAN, 7).unwrap();
        for count in [0, 1, 5, 1000] {
            let ids = generator.generate(count).unwrap();
            assert_eq!(ids.len(), count);
            assert!(
                ids.iter()
                    .all(|id| (2_000_000..=2_009_999).contains(&id.get())),
                "id out of range in {:?}",
                ids
            );
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut generator = IdGenerator::from_clock(LOWER, SPAN).unwrap();
        assert!(generator.generate(0).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = IdGenerator::with_seed(LOWER, SPAN, 42).unwrap();
        let mut b = IdGenerator::with_seed(LOWER, SPAN, 42).unwrap();
        assert_eq!(a.generate(20).unwrap(), b.generate(20).unwrap());
    }

    #[test]
    fn test_single_value_range() {
        let mut generator = IdGenerator::with_seed(LOWER, 1, 3).unwrap();
        assert_eq!(generator.range(), &(LOWER..=LOWER));
        assert!(generator.generate(10).unwrap().iter().all(|id| id.get() == LOWER));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(IdGenerator::with_seed(LOWER, 0, 1).is_err());
        assert!(IdGenerator::with_seed(u32::MAX, 2, 1).is_err());
        assert!(IdGenerator::with_seed(u32::MAX, 1, 1).is_ok());
    }

    #[test]
    fn test_unallocatable_count_reports_error() {
        let mut generator = IdGenerator::with_seed(LOWER, SPAN, 1).unwrap();
        match generator.generate(usize::MAX) {
            Err(Error::IdAllocation { requested }) => assert_eq!(requested, usize::MAX),
            other => panic!("expected allocation error, got {:?}", other.map(|v| v.len())),
        }
    }
}
