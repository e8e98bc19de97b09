//! Selection: ranking, elite preservation, and the parent pool.

// Fitness statistics trade counts for f64; the precision loss is intentional
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

/// Which individuals the breeding loop may draw parents from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentPool {
    /// Parents come only from the preserved elites.
    EliteOnly,
    /// Parents come from the whole partially-built next population, so
    /// children bred earlier in the same generation may themselves be picked.
    Growing,
}

/// Configuration for selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Fraction of the population preserved as elites.
    pub elite_fraction: f64,
    /// Parent pool the breeding loop samples from.
    pub parent_pool: ParentPool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            elite_fraction: 0.10,
            parent_pool: ParentPool::EliteOnly,
        }
    }
}

/// Number of elites preserved for a population of `popsize`.
///
/// One more than the floor of `popsize * fraction`, capped at `popsize`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn elite_count(popsize: usize, fraction: f64) -> usize {
    ((popsize as f64 * fraction) as usize + 1).min(popsize)
}

/// Rank individuals by fitness, best first.
///
/// Sorts strictly on the numeric fitness key; the sort is stable, so ties
/// keep their original index order. Individuals never participate in the
/// comparison themselves.
#[must_use]
pub fn rank_by_fitness(fitness: &[f64]) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = fitness.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.into_iter().map(|(i, _)| i).collect()
}

/// Fitness statistics for one generation.
#[derive(Debug, Clone, Copy)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let sum: f64 = fitness.iter().sum();
        let mean = sum / fitness.len() as f64;

        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);

        let variance: f64 =
            fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / fitness.len() as f64;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elite_count_floor_plus_one() {
        assert_eq!(elite_count(200, 0.10), 21);
        assert_eq!(elite_count(100, 0.10), 11);
        assert_eq!(elite_count(9, 0.10), 1);
    }

    #[test]
    fn test_elite_count_capped_at_popsize() {
        assert_eq!(elite_count(2, 0.9), 2);
        assert_eq!(elite_count(1, 0.5), 1);
    }

    #[test]
    fn test_ranking_is_descending() {
        let fitness = vec![0.3, 0.9, 0.1, 0.8, 0.5];
        assert_eq!(rank_by_fitness(&fitness), vec![1, 3, 4, 0, 2]);
    }

    #[test]
    fn test_ranking_ties_keep_index_order() {
        let fitness = vec![0.5, 0.9, 0.5, 0.9, 0.1];
        assert_eq!(rank_by_fitness(&fitness), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_selection_stats() {
        let fitness = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SelectionStats::from_fitness(&fitness);

        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert!((stats.best_fitness - 5.0).abs() < 0.001);
        assert!((stats.worst_fitness - 1.0).abs() < 0.001);
        assert!((stats.fitness_std - 2.0_f64.sqrt()).abs() < 0.001);
    }

    #[test]
    fn test_selection_stats_empty() {
        let stats = SelectionStats::from_fitness(&[]);
        assert!(stats.mean_fitness.abs() < f64::EPSILON);
        assert!(stats.best_fitness.abs() < f64::EPSILON);
    }
}
