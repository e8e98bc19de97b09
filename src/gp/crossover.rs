//! Crossover operator for rule-set programs.

// State ids are small; casts between the state count and u8 are intentional
#![allow(clippy::cast_possible_truncation)]

use crate::sim::{NUM_STATES, Program, WallPattern};

/// Number of low states the first parent contributes.
const SPLIT: u8 = NUM_STATES.div_ceil(2) as u8;

/// Combine two parent programs into a child.
///
/// The child copies states `0..SPLIT` from `parent1` and the remaining states
/// from `parent2`. Pure function: neither parent is modified, and complete
/// parents yield a complete child.
#[must_use]
pub fn crossover(parent1: &Program, parent2: &Program) -> Program {
    let mut child = Program::new();
    for state in 0..NUM_STATES as u8 {
        let donor = if state < SPLIT { parent1 } else { parent2 };
        for pattern in WallPattern::ALL {
            if let Some(rule) = donor.get(state, pattern) {
                child.set(state, pattern, rule);
            }
        }
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_split_point() {
        assert_eq!(SPLIT, 3);
    }

    #[test]
    fn test_child_takes_low_states_from_first_parent() {
        let mut rng = SmallRng::seed_from_u64(21);
        let a = Program::random(&mut rng);
        let b = Program::random(&mut rng);

        let child = crossover(&a, &b);

        for state in 0..NUM_STATES as u8 {
            let donor = if state < SPLIT { &a } else { &b };
            for pattern in WallPattern::ALL {
                assert_eq!(child.get(state, pattern), donor.get(state, pattern));
            }
        }
    }

    #[test]
    fn test_parents_unchanged_and_child_complete() {
        let mut rng = SmallRng::seed_from_u64(22);
        let a = Program::random(&mut rng);
        let b = Program::random(&mut rng);
        let (a_before, b_before) = (a, b);

        let child = crossover(&a, &b);

        assert!(child.is_complete());
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_crossover_with_self_is_identity() {
        let mut rng = SmallRng::seed_from_u64(23);
        let a = Program::random(&mut rng);
        assert_eq!(crossover(&a, &a), a);
    }
}
