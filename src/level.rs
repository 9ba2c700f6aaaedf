//! Level generation.
//!
//! A level is only a tube count; the layout is dealt each time the level starts.
//! Every dealt level has `tube_count - 2` full tubes and two empty ones, and each
//! color appears exactly `capacity` times.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{EMPTY_TUBES, GameConfig};
use crate::model::{LiquidColor, Tube};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// 1-based position in the level list.
    pub index: usize,
    pub tube_count: usize,
}

impl Level {
    /// Number of tubes that start full, one per color.
    pub fn color_count(&self) -> usize {
        self.tube_count.saturating_sub(EMPTY_TUBES)
    }
}

/// Draw the tube count of every level uniformly from the configured range.
pub fn generate_levels<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Level> {
    (1..=config.level_count)
        .map(|index| Level {
            index,
            tube_count: rng.random_range(config.min_tubes..=config.max_tubes),
        })
        .collect()
}

/// Shuffle `capacity` copies of each of the first `tube_count - 2` palette colors
/// and deal them into the leading tubes. The last two tubes stay empty.
pub fn deal_tubes<R: Rng + ?Sized>(
    tube_count: usize,
    capacity: usize,
    palette_size: usize,
    rng: &mut R,
) -> Vec<Tube> {
    let filled = tube_count.saturating_sub(EMPTY_TUBES);
    let palette_size = palette_size.max(1);

    let mut layers: Vec<LiquidColor> = (0..filled)
        .flat_map(|i| std::iter::repeat_n(LiquidColor::new(i % palette_size), capacity))
        .collect();
    layers.shuffle(rng);

    let mut tubes: Vec<Tube> = (0..tube_count).map(|_| Tube::new(capacity)).collect();
    for tube in tubes.iter_mut().take(filled) {
        for _ in 0..capacity {
            if let Some(color) = layers.pop() {
                tube.push_layer(color);
            }
        }
    }

    debug!(
        "Dealt {} tubes: {}",
        tube_count,
        tubes
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    tubes
}
