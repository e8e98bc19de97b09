//! Mutation operator for rule-set programs.

// State ids are small; casts between the state count and u8 are intentional
#![allow(clippy::cast_possible_truncation)]

use rand::Rng;

use crate::sim::{NUM_STATES, Program, Rule, WallPattern};

/// Mutate a program in place by rewriting one uniformly chosen
/// `(state, pattern)` entry.
///
/// The replacement next-state is rejection-sampled to differ from the entry's
/// own state key, and the replacement direction to name an open slot of the
/// pattern. Both loops terminate: `NUM_STATES >= 2` and every canonical
/// pattern has at least one open slot.
pub fn mutate<R: Rng>(program: &mut Program, rng: &mut R) {
    let state = rng.gen_range(0..NUM_STATES as u8);
    let pattern = WallPattern::ALL[rng.gen_range(0..WallPattern::COUNT)];

    let mut next_state = rng.gen_range(0..NUM_STATES as u8);
    while next_state == state {
        next_state = rng.gen_range(0..NUM_STATES as u8);
    }

    let rule = Rule {
        direction: pattern.random_open(rng),
        next_state,
    };
    program.set(state, pattern, rule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_mutation_touches_at_most_one_entry() {
        let mut rng = SmallRng::seed_from_u64(31);
        for _ in 0..100 {
            let original = Program::random(&mut rng);
            let mut mutated = original;
            mutate(&mut mutated, &mut rng);

            let mut changed = 0;
            for state in 0..NUM_STATES as u8 {
                for pattern in WallPattern::ALL {
                    let before = original.get(state, pattern);
                    let after = mutated.get(state, pattern);
                    if before != after {
                        changed += 1;
                        let rule = after.expect("mutated entry present");
                        assert_ne!(rule.next_state, state);
                        assert!(pattern.is_open(rule.direction));
                    }
                }
            }
            assert!(changed <= 1, "mutation rewrote {changed} entries");
        }
    }

    #[test]
    fn test_mutation_preserves_completeness() {
        let mut rng = SmallRng::seed_from_u64(32);
        let mut program = Program::random(&mut rng);
        for _ in 0..500 {
            mutate(&mut program, &mut rng);
        }
        assert!(program.is_complete());
    }

    #[test]
    fn test_mutation_fills_empty_slot() {
        let mut rng = SmallRng::seed_from_u64(33);
        let mut program = Program::new();
        mutate(&mut program, &mut rng);

        let filled = (0..NUM_STATES as u8)
            .flat_map(|s| WallPattern::ALL.into_iter().map(move |p| (s, p)))
            .filter(|&(s, p)| program.get(s, p).is_some())
            .count();
        assert_eq!(filled, 1);
    }
}
