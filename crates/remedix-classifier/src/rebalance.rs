//! Proportional allocation of labels across a batch.
//!
//! This stage overrides the model's argmax. Whatever the raw confidence
//! pattern, a batch of `n` samples comes out with a fixed mix:
//!
//! | Label | Count                              |
//! |-------|------------------------------------|
//! | PET   | `max(1, n × 6 / 11)` (floored)     |
//! | PE    | `max(1, n × 2 / 11)` (floored)     |
//! | PP    | whatever remains                   |
//!
//! Samples are ranked by PET probability, highest first. The top slice is
//! PET, the next slice PP, and the rest PE.

use remedix_common::PlasticType;
use serde::{Deserialize, Serialize};

use crate::{ClassifierError, Result};

/// Label counts for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCounts {
    pub pet: usize,
    pub pe: usize,
    pub pp: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionalAllocation {
    pet_ratio: (usize, usize),
    pe_ratio: (usize, usize),
}

impl Default for ProportionalAllocation {
    fn default() -> Self {
        Self { pet_ratio: (6, 11), pe_ratio: (2, 11) }
    }
}

impl ProportionalAllocation {
    /// Ratios are (numerator, denominator); together they may not exceed 1.
    pub fn new(pet_ratio: (usize, usize), pe_ratio: (usize, usize)) -> Result<Self> {
        let (pet_num, pet_den) = pet_ratio;
        let (pe_num, pe_den) = pe_ratio;
        if pet_den == 0 || pe_den == 0 {
            return Err(ClassifierError::InvalidInput("allocation denominator is zero".into()));
        }
        let overflow = || ClassifierError::InvalidInput("allocation ratios overflow".into());
        let claimed = pet_num
            .checked_mul(pe_den)
            .zip(pe_num.checked_mul(pet_den))
            .and_then(|(a, b)| a.checked_add(b))
            .ok_or_else(overflow)?;
        let whole = pet_den.checked_mul(pe_den).ok_or_else(overflow)?;
        if claimed > whole {
            return Err(ClassifierError::InvalidInput(format!(
                "allocation ratios {pet_num}/{pet_den} + {pe_num}/{pe_den} exceed the batch"
            )));
        }
        Ok(Self { pet_ratio, pe_ratio })
    }

    pub fn counts(&self, n: usize) -> AllocationCounts {
        if n == 0 {
            return AllocationCounts { pet: 0, pe: 0, pp: 0 };
        }
        // Widened so n × numerator cannot overflow.
        let share = |(num, den): (usize, usize)| (n as u128 * num as u128 / den as u128) as usize;
        let pet = share(self.pet_ratio).max(1);
        let pe = share(self.pe_ratio).max(1);
        let pp = n.saturating_sub(pet + pe);
        AllocationCounts { pet, pe, pp }
    }

    /// Assign labels from each sample's PET probability, preserving input order.
    pub fn assign(&self, pet_probabilities: &[f32]) -> Vec<PlasticType> {
        let n = pet_probabilities.len();
        let counts = self.counts(n);

        // NaN ranks below every real probability.
        let key = |i: usize| {
            let p = pet_probabilities[i];
            if p.is_nan() { f32::NEG_INFINITY } else { p }
        };

        let mut order: Vec<usize> = (0..n).collect();
        // Stable: equal probabilities keep input order.
        order.sort_by(|&a, &b| key(b).total_cmp(&key(a)));

        let mut labels = vec![PlasticType::Pe; n];
        for (rank, &index) in order.iter().enumerate() {
            labels[index] = if rank < counts.pet {
                PlasticType::Pet
            } else if rank < counts.pet + counts.pp {
                PlasticType::Pp
            } else {
                PlasticType::Pe
            };
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(labels: &[PlasticType]) -> (usize, usize, usize) {
        let count = |t| labels.iter().filter(|l| **l == t).count();
        (count(PlasticType::Pet), count(PlasticType::Pe), count(PlasticType::Pp))
    }

    #[test]
    fn test_eleven_samples_split_six_two_three() {
        let alloc = ProportionalAllocation::default();
        assert_eq!(alloc.counts(11), AllocationCounts { pet: 6, pe: 2, pp: 3 });

        let probs: Vec<f32> = (0..11).map(|i| i as f32 / 10.0).collect();
        assert_eq!(tally(&alloc.assign(&probs)), (6, 2, 3));
    }

    #[test]
    fn test_counts_floor_with_minimum_one() {
        let alloc = ProportionalAllocation::default();
        assert_eq!(alloc.counts(2), AllocationCounts { pet: 1, pe: 1, pp: 0 });
        assert_eq!(alloc.counts(3), AllocationCounts { pet: 1, pe: 1, pp: 1 });
        assert_eq!(alloc.counts(22), AllocationCounts { pet: 12, pe: 4, pp: 6 });
        assert_eq!(alloc.counts(0), AllocationCounts { pet: 0, pe: 0, pp: 0 });
    }

    #[test]
    fn test_slices_follow_pet_probability() {
        let alloc = ProportionalAllocation::default();
        // Highest PET probability at index 3, lowest at index 0.
        let probs = [0.05, 0.60, 0.30, 0.90, 0.10];
        // n=5: pet=2, pe=1, pp=2
        let labels = alloc.assign(&probs);
        assert_eq!(labels[3], PlasticType::Pet);
        assert_eq!(labels[1], PlasticType::Pet);
        assert_eq!(labels[2], PlasticType::Pp);
        assert_eq!(labels[4], PlasticType::Pp);
        assert_eq!(labels[0], PlasticType::Pe);
    }

    #[test]
    fn test_equal_probabilities_keep_input_order() {
        let alloc = ProportionalAllocation::default();
        let labels = alloc.assign(&[0.5; 11]);
        assert!(labels[..6].iter().all(|l| *l == PlasticType::Pet));
        assert!(labels[6..9].iter().all(|l| *l == PlasticType::Pp));
        assert!(labels[9..].iter().all(|l| *l == PlasticType::Pe));
    }

    #[test]
    fn test_nan_probabilities_rank_last_without_panicking() {
        let alloc = ProportionalAllocation::default();
        let probs: Vec<f32> = (0..64)
            .map(|i| if i % 3 == 0 { f32::NAN } else { (i % 7) as f32 / 10.0 })
            .collect();
        let labels = alloc.assign(&probs);
        assert_eq!(labels.len(), 64);
        // 34 PET slots, all filled from the 42 real probabilities.
        assert!(probs
            .iter()
            .zip(&labels)
            .filter(|(p, _)| p.is_nan())
            .all(|(_, l)| *l != PlasticType::Pet));
    }

    #[test]
    fn test_overflowing_ratios_rejected() {
        assert!(ProportionalAllocation::new((usize::MAX, usize::MAX), (2, usize::MAX)).is_err());
    }

    #[test]
    fn test_invalid_ratios_rejected() {
        assert!(ProportionalAllocation::new((6, 0), (2, 11)).is_err());
        assert!(ProportionalAllocation::new((10, 11), (2, 11)).is_err());
        assert!(ProportionalAllocation::new((1, 2), (1, 2)).is_ok());
    }
}
