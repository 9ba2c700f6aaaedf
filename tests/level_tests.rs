//! Level generation tests

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use water_sort::level::{deal_tubes, generate_levels};
use water_sort::{GameConfig, GameEngine, LiquidColor, Tube};

fn color_counts(tubes: &[Tube]) -> HashMap<LiquidColor, usize> {
    let mut counts = HashMap::new();
    for tube in tubes {
        for color in tube.layers() {
            *counts.entry(*color).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn test_every_color_appears_exactly_capacity_times() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        for tube_count in 3..=10 {
            for capacity in [1, 3, 4, 6] {
                let tubes = deal_tubes(tube_count, capacity, 8, &mut rng);
                let total: usize = tubes.iter().map(Tube::len).sum();
                assert_eq!(total, (tube_count - 2) * capacity);

                let counts = color_counts(&tubes);
                assert_eq!(counts.len(), tube_count - 2);
                for (color, count) in counts {
                    assert_eq!(count, capacity, "color {color} in {tube_count} tubes");
                }
            }
        }
    }
}

#[test]
fn test_colors_follow_palette_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let tubes = deal_tubes(6, 4, 8, &mut rng);
    let mut colors: Vec<usize> = color_counts(&tubes).keys().map(|c| c.id()).collect();
    colors.sort();
    assert_eq!(colors, vec![0, 1, 2, 3]);
}

#[test]
fn test_same_seed_same_layout() {
    let first = deal_tubes(8, 4, 8, &mut StdRng::seed_from_u64(42));
    let second = deal_tubes(8, 4, 8, &mut StdRng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn test_shuffle_mixes_layers() {
    // With 6 colors the chance that every seed deals sorted tubes is negligible.
    let mixed = (0..10).any(|seed| {
        let tubes = deal_tubes(8, 4, 8, &mut StdRng::seed_from_u64(seed));
        tubes.iter().any(|t| !t.is_empty() && !t.is_sorted())
    });
    assert!(mixed);
}

#[test]
fn test_level_list_uses_configured_range() {
    let config = GameConfig {
        level_count: 200,
        min_tubes: 5,
        max_tubes: 9,
        palette_size: 8,
        ..GameConfig::default()
    };
    let levels = generate_levels(&config, &mut StdRng::seed_from_u64(9));
    assert_eq!(levels.len(), 200);
    assert!(levels.iter().all(|l| (5..=9).contains(&l.tube_count)));
    // 200 uniform draws over five values hit both ends.
    assert!(levels.iter().any(|l| l.tube_count == 5));
    assert!(levels.iter().any(|l| l.tube_count == 9));
}

#[test]
fn test_engine_levels_satisfy_layout_invariants() {
    let config = GameConfig::default();
    let mut engine = GameEngine::new(config.clone(), StdRng::seed_from_u64(1)).unwrap();
    let levels = engine.levels().to_vec();
    for level in levels {
        assert!(engine.init_level(level.index));
        let state = engine.get_state();
        assert_eq!(state.tube_count(), level.tube_count);
        assert_eq!(state.total_layers(), level.color_count() * config.capacity);
        assert!(state.tubes()[level.color_count()..].iter().all(Tube::is_empty));
        assert_eq!(state.moves(), 0);
        assert_eq!(state.hints_used(), 0);
    }
}

#[test]
fn test_engines_with_same_seed_agree() {
    let config = GameConfig::default();
    let a = GameEngine::new(config.clone(), StdRng::seed_from_u64(77)).unwrap();
    let b = GameEngine::new(config, StdRng::seed_from_u64(77)).unwrap();
    assert_eq!(a.levels(), b.levels());
    assert_eq!(a.get_state(), b.get_state());
}

#[test]
fn test_seeded_config_is_reproducible() {
    let config = GameConfig {
        seed: Some(123),
        ..GameConfig::default()
    };
    let a = GameEngine::from_config(config.clone()).unwrap();
    let b = GameEngine::from_config(config).unwrap();
    assert_eq!(a.levels(), b.levels());
    assert_eq!(
        a.get_state().get_text_representation(),
        b.get_state().get_text_representation()
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig {
        capacity: 0,
        ..GameConfig::default()
    };
    assert!(GameEngine::new(config, StdRng::seed_from_u64(0)).is_err());
}

#[test]
fn test_oversized_config_is_rejected() {
    let config = GameConfig {
        capacity: usize::MAX / 2,
        ..GameConfig::default()
    };
    assert!(GameEngine::new(config, StdRng::seed_from_u64(1)).is_err());

    let config = GameConfig {
        level_count: usize::MAX,
        ..GameConfig::default()
    };
    assert!(GameEngine::new(config, StdRng::seed_from_u64(1)).is_err());
}
