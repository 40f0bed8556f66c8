//! Property-based tests for the enumeration and the incremental engine.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use nalgebra::DMatrix;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::dense::{max_abs_diff, random_matrix};
    use crate::engine::IncrementalInverse;
    use crate::gray::{binomial, GeneratorConfig, GrayGenerator};
    use crate::join::{GrayJoin, JoinConfig};
    use crate::selection::{Replacement, Selection};

    // (size, pick) with 0 < pick < size
    fn generator_config(max_size: u32) -> impl Strategy<Value = GeneratorConfig> {
        (2..=max_size)
            .prop_flat_map(|size| (Just(size), 1..size))
            .prop_map(|(size, pick)| GeneratorConfig { size, pick })
    }

    fn join_config() -> impl Strategy<Value = JoinConfig> {
        (generator_config(7), generator_config(5))
            .prop_map(|(large, small)| JoinConfig { large, small })
    }

    fn dominant_universe(seed: u64, n: usize) -> DMatrix<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        random_matrix(&mut rng, n) + DMatrix::identity(n, n) * (n as f64)
    }

    fn within(a: &DMatrix<f64>, b: &DMatrix<f64>, tol: f64) -> bool {
        max_abs_diff(a, b) <= tol * b.amax().max(1.0)
    }

    proptest! {
        #[test]
        fn sweep_visits_every_combination_once(config in generator_config(12)) {
            let mut g = GrayGenerator::new(config).unwrap();
            let n = binomial(config.size, config.pick);
            prop_assert_eq!(g.combinations(), n);

            let mut seen = HashSet::new();
            let mut previous: Option<u64> = None;
            for _ in 0..n {
                let v = g.value();
                prop_assert_eq!(v.count_ones(), config.pick);
                prop_assert!(v >> config.size == 0);
                if let Some(p) = previous {
                    prop_assert_eq!((p ^ v).count_ones(), 2);
                }
                seen.insert(v);
                previous = Some(v);
                g.advance();
            }
            prop_assert_eq!(seen.len() as u64, n);
        }

        #[test]
        fn reverse_phase_is_minimal_change(config in generator_config(10)) {
            let mut g = GrayGenerator::new(config).unwrap();
            let n = g.combinations();
            // Forward sweep plus the turnaround stall.
            for _ in 0..n {
                g.advance();
            }
            let mut previous = g.value();
            for _ in 1..n {
                g.advance();
                let v = g.value();
                prop_assert_eq!((previous ^ v).count_ones(), 2);
                previous = v;
            }
        }

        #[test]
        fn joined_pass_is_distinct_single_replacements(config in join_config()) {
            let selections: Vec<Selection> = GrayJoin::new(config)
                .unwrap()
                .take(config.combinations() as usize)
                .collect();
            let distinct: HashSet<_> = selections.iter().collect();
            prop_assert_eq!(distinct.len(), selections.len());
            for s in &selections {
                prop_assert_eq!(s.len(), config.pick());
            }
            for pair in selections.windows(2) {
                let r = pair[0].replacement_to(&pair[1]);
                prop_assert!(matches!(r, Ok(Some(_))), "{} -> {}", pair[0], pair[1]);
            }
        }

        #[test]
        fn incremental_inverse_matches_direct(seed in any::<u64>(), config in join_config()) {
            let universe = dominant_universe(seed, config.universe_size());
            let mut join = GrayJoin::new(config).unwrap();
            let first = join.next_selection();
            let mut engine = IncrementalInverse::new(&universe, &first).unwrap();
            for _ in 1..config.combinations() {
                let next = join.next_selection();
                engine.advance_to(&next).unwrap();
                prop_assert!(engine.index_map().is_consistent());
                let direct = engine.direct_inverse().unwrap();
                prop_assert!(within(engine.inverse(), &direct, 1e-9));
            }
        }

        #[test]
        fn swap_and_swap_back_restores_state(
            seed in any::<u64>(),
            removed_pick in 0usize..4,
            added_pick in 0usize..4,
        ) {
            let universe = dominant_universe(seed, 8);
            let start = Selection::from_positions(&[0, 2, 4, 6], 8).unwrap();
            let mut engine = IncrementalInverse::new(&universe, &start).unwrap();
            let matrix = engine.matrix().clone();
            let inverse = engine.inverse().clone();

            let swap = Replacement { removed: 2 * removed_pick, added: 2 * added_pick + 1 };
            engine.replace(swap).unwrap();
            engine.replace(swap.reversed()).unwrap();

            prop_assert_eq!(engine.matrix(), &matrix);
            prop_assert!(within(engine.inverse(), &inverse, 1e-9));
            prop_assert_eq!(engine.selection(), start);
        }

        #[test]
        fn map_round_trips_after_replacements(steps in 0usize..200) {
            let config = JoinConfig::default();
            let universe = dominant_universe(1, config.universe_size());
            let mut join = GrayJoin::new(config).unwrap();
            let first = join.next_selection();
            let mut engine = IncrementalInverse::new(&universe, &first).unwrap();
            for _ in 0..steps {
                engine.advance_to(&join.next_selection()).unwrap();
            }
            let map = engine.index_map();
            for pos in engine.selection().iter() {
                let slot = map.local(pos).unwrap();
                prop_assert_eq!(map.universe(slot), pos);
            }
        }
    }
}
