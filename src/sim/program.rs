//! Rule-set programs driving the grid agent.
//!
//! A [`Program`] is a finite-state automaton: for every pair of automaton
//! state and local wall pattern it stores the move to make and the state to
//! enter next. The table is a fixed-size array indexed by
//! `(state, pattern-index)`, so a fully populated program can never fail a
//! lookup — the `Option` per slot exists only to represent the empty table a
//! program starts from before randomization.

// State ids are small; casts between the state count and u8 are intentional
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::pattern::{Direction, WallPattern};

/// Number of automaton states.
pub const NUM_STATES: usize = 5;

/// A single table entry: where to move and which state to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Move direction; must name an open slot of the pattern this rule is
    /// stored under.
    pub direction: Direction,
    /// Automaton state after the move.
    pub next_state: u8,
}

/// A complete control program: one [`Rule`] per `(state, pattern)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    rules: [[Option<Rule>; WallPattern::COUNT]; NUM_STATES],
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Create an empty program with no rules.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: [[None; WallPattern::COUNT]; NUM_STATES],
        }
    }

    /// Create a complete random program.
    ///
    /// Every `(state, pattern)` slot gets a uniformly drawn next-state and a
    /// direction rejection-sampled to name an open slot of the pattern.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut program = Self::new();
        for state in 0..NUM_STATES as u8 {
            for pattern in WallPattern::ALL {
                let rule = Rule {
                    direction: pattern.random_open(rng),
                    next_state: rng.gen_range(0..NUM_STATES as u8),
                };
                program.set(state, pattern, rule);
            }
        }
        program
    }

    /// Get the raw table entry for a `(state, pattern)` pair.
    ///
    /// Returns `None` for unpopulated slots and out-of-range states.
    #[must_use]
    pub fn get(&self, state: u8, pattern: WallPattern) -> Option<Rule> {
        self.rules
            .get(usize::from(state))
            .and_then(|row| row[pattern.index()])
    }

    /// Look up the rule for a `(state, pattern)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MissingRule`] if the slot is unpopulated. This is
    /// unreachable for programs built by [`Program::random`] or crossover.
    pub fn rule_for(&self, state: u8, pattern: WallPattern) -> SimResult<Rule> {
        self.get(state, pattern)
            .ok_or(SimError::MissingRule { state, pattern })
    }

    /// Set the table entry for a `(state, pattern)` pair.
    ///
    /// Returns `false` if `state` is out of range.
    pub fn set(&mut self, state: u8, pattern: WallPattern, rule: Rule) -> bool {
        if let Some(row) = self.rules.get_mut(usize::from(state)) {
            row[pattern.index()] = Some(rule);
            true
        } else {
            false
        }
    }

    /// Check that every `(state, pattern)` slot is populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rules
            .iter()
            .all(|row| row.iter().all(Option::is_some))
    }
}

impl fmt::Display for Program {
    /// Lists present rules sorted by `(state, pattern)`, one per line, in the
    /// form `state pattern -> direction newstate`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..NUM_STATES as u8 {
            for pattern in WallPattern::ALL {
                if let Some(rule) = self.get(state, pattern) {
                    writeln!(
                        f,
                        "{state} {pattern} -> {} {}",
                        rule.direction, rule.next_state
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_random_program_is_complete() {
        let mut rng = SmallRng::seed_from_u64(42);
        let program = Program::random(&mut rng);
        assert!(program.is_complete());
    }

    #[test]
    fn test_random_program_directions_are_open() {
        let mut rng = SmallRng::seed_from_u64(42);
        let program = Program::random(&mut rng);
        for state in 0..NUM_STATES as u8 {
            for pattern in WallPattern::ALL {
                let rule = program.rule_for(state, pattern).expect("complete");
                assert!(pattern.is_open(rule.direction));
                assert!(usize::from(rule.next_state) < NUM_STATES);
            }
        }
    }

    #[test]
    fn test_missing_rule_error() {
        let program = Program::new();
        let err = program.rule_for(0, WallPattern::Open).unwrap_err();
        assert_eq!(
            err,
            crate::error::SimError::MissingRule {
                state: 0,
                pattern: WallPattern::Open
            }
        );
    }

    #[test]
    fn test_set_rejects_out_of_range_state() {
        let mut program = Program::new();
        let rule = Rule {
            direction: Direction::East,
            next_state: 0,
        };
        assert!(!program.set(NUM_STATES as u8, WallPattern::Open, rule));
    }

    #[test]
    fn test_equality_is_entry_wise() {
        let mut rng = SmallRng::seed_from_u64(9);
        let a = Program::random(&mut rng);
        let mut b = a;
        assert_eq!(a, b);

        let rule = b.rule_for(2, WallPattern::North).expect("complete");
        let flipped = Rule {
            direction: rule.direction,
            next_state: (rule.next_state + 1) % NUM_STATES as u8,
        };
        b.set(2, WallPattern::North, flipped);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_format_and_order() {
        let mut program = Program::new();
        program.set(
            1,
            WallPattern::North,
            Rule {
                direction: Direction::South,
                next_state: 3,
            },
        );
        program.set(
            0,
            WallPattern::Open,
            Rule {
                direction: Direction::East,
                next_state: 0,
            },
        );
        assert_eq!(program.to_string(), "0 xxxx -> E 0\n1 Nxxx -> S 3\n");
    }

    #[test]
    fn test_display_lists_all_entries_sorted() {
        let mut rng = SmallRng::seed_from_u64(11);
        let program = Program::random(&mut rng);
        let text = program.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), NUM_STATES * WallPattern::COUNT);

        let keys: Vec<(String, String)> = lines
            .iter()
            .map(|line| {
                let mut parts = line.split_whitespace();
                let state = parts.next().expect("state").to_string();
                let pattern = parts.next().expect("pattern").to_string();
                (state, pattern)
            })
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
