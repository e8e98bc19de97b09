//! End-to-end tests for the generational search.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use gridbot::World;
use gridbot::gp::{
    EvolutionConfig, FitnessConfig, ParentPool, SelectionConfig, evolve, load_program,
    save_program,
};

fn small_config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 12,
        generations: 4,
        seed,
        verbose: false,
        fitness: FitnessConfig {
            trials: 3,
            steps: 100,
            ..FitnessConfig::default()
        },
        ..EvolutionConfig::default()
    }
}

#[test]
fn search_produces_a_runnable_program() {
    let (best, stats) = evolve(&small_config(101), |_| {}).unwrap();

    assert!(best.is_complete());
    assert_eq!(stats.generations.len(), 4);

    // The evolved program must drive a full-length run without errors
    let mut world = World::new(&best, 25, 25, 12, 12).unwrap();
    world.run(800).unwrap();
    assert!(world.fraction_visited() > 0.0);
}

#[test]
fn search_is_reproducible_for_a_fixed_seed() {
    let (a, _) = evolve(&small_config(202), |_| {}).unwrap();
    let (b, _) = evolve(&small_config(202), |_| {}).unwrap();
    assert_eq!(a, b);

    let (c, _) = evolve(&small_config(203), |_| {}).unwrap();
    // Different seeds almost surely diverge; equality here would mean the
    // seed is being ignored somewhere
    assert_ne!(a, c);
}

#[test]
fn growing_pool_is_reproducible_too() {
    let config = EvolutionConfig {
        selection: SelectionConfig {
            parent_pool: ParentPool::Growing,
            ..SelectionConfig::default()
        },
        ..small_config(303)
    };
    let (a, _) = evolve(&config, |_| {}).unwrap();
    let (b, _) = evolve(&config, |_| {}).unwrap();
    assert_eq!(a, b);
    assert!(a.is_complete());
}

#[test]
fn generation_stats_are_consistent() {
    let (_, stats) = evolve(&small_config(404), |_| {}).unwrap();

    for (i, generation) in stats.generations.iter().enumerate() {
        assert_eq!(generation.generation, i);
        assert!(generation.best_fitness >= generation.mean_fitness);
        assert!((0.0..=1.0).contains(&generation.best_fitness));
        assert!((0.0..=1.0).contains(&generation.mean_fitness));
    }

    let last = stats.generations.last().unwrap();
    assert!((stats.best_fitness - last.best_fitness).abs() < f64::EPSILON);
}

#[test]
fn best_program_round_trips_through_disk() {
    let (best, _) = evolve(&small_config(505), |_| {}).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");
    save_program(&best, &path).unwrap();
    let loaded = load_program(&path).unwrap();

    assert_eq!(best, loaded);

    // The reloaded program behaves identically
    let mut a = World::new(&best, 25, 25, 5, 5).unwrap();
    let mut b = World::new(&loaded, 25, 25, 5, 5).unwrap();
    a.run(200).unwrap();
    b.run(200).unwrap();
    assert_eq!(a.position(), b.position());
    assert_eq!(a.visited_count(), b.visited_count());
}
