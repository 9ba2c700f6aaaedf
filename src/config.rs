//! Game configuration.
//!
//! The defaults reproduce the classic game: four layers per tube, fifty levels with
//! five to eight tubes each, eight colors, and a scolding once more than three
//! hints were used on a level.

use std::error::Error;
use std::fmt;

use crate::model::DEFAULT_CAPACITY;

/// Largest palette the renderer can draw distinct colors for.
pub const MAX_PALETTE_SIZE: usize = 16;

/// Number of tubes left empty at the start of every level.
pub const EMPTY_TUBES: usize = 2;

/// Deepest tube allowed; tubes are allocated up front at full capacity.
pub const MAX_CAPACITY: usize = 16;

/// Most levels that can be generated at startup.
pub const MAX_LEVELS: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Layers per tube.
    pub capacity: usize,
    /// Number of levels generated at startup.
    pub level_count: usize,
    /// Smallest tube count a level can get (inclusive).
    pub min_tubes: usize,
    /// Largest tube count a level can get (inclusive).
    pub max_tubes: usize,
    /// Number of distinct colors cycled through when dealing.
    pub palette_size: usize,
    /// Hints allowed before a win counts as "too many hints".
    pub hint_threshold: usize,
    /// Fixed seed for level generation. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            level_count: 50,
            min_tubes: 5,
            max_tubes: 8,
            palette_size: 8,
            hint_threshold: 3,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity outside `1..=MAX_CAPACITY`.
    Capacity(usize),

    /// Level count outside `1..=MAX_LEVELS`.
    LevelCount(usize),

    /// The tube count range is reversed.
    TubeRange { min: usize, max: usize },

    /// Palette size outside `1..=MAX_PALETTE_SIZE`.
    PaletteSize(usize),

    /// Some level could need more colors than the palette has, which would put
    /// more than one tube's worth of a color on the board.
    PaletteTooSmall { needed: usize, available: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Capacity(capacity) => {
                write!(f, "tube capacity {capacity} is not within 1..={MAX_CAPACITY}")
            }
            ConfigError::LevelCount(count) => {
                write!(f, "level count {count} is not within 1..={MAX_LEVELS}")
            }
            ConfigError::TubeRange { min, max } => {
                write!(f, "minimum tube count {min} is larger than maximum {max}")
            }
            ConfigError::PaletteSize(size) => {
                write!(f, "palette size {size} is not within 1..={MAX_PALETTE_SIZE}")
            }
            ConfigError::PaletteTooSmall { needed, available } => write!(
                f,
                "levels may need {needed} colors but the palette only has {available}"
            ),
        }
    }
}

impl Error for ConfigError {}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(ConfigError::Capacity(self.capacity));
        }
        if !(1..=MAX_LEVELS).contains(&self.level_count) {
            return Err(ConfigError::LevelCount(self.level_count));
        }
        if self.min_tubes > self.max_tubes {
            return Err(ConfigError::TubeRange {
                min: self.min_tubes,
                max: self.max_tubes,
            });
        }
        if self.palette_size == 0 || self.palette_size > MAX_PALETTE_SIZE {
            return Err(ConfigError::PaletteSize(self.palette_size));
        }
        let needed = self.max_tubes.saturating_sub(EMPTY_TUBES);
        if needed > self.palette_size {
            return Err(ConfigError::PaletteTooSmall {
                needed,
                available: self.palette_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_reversed_range() {
        let config = GameConfig {
            min_tubes: 9,
            max_tubes: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TubeRange { min: 9, max: 5 })
        );
    }

    #[test]
    fn test_palette_must_cover_largest_level() {
        let config = GameConfig {
            max_tubes: 12,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PaletteTooSmall {
                needed: 10,
                available: 8
            })
        );
    }

    #[test]
    fn test_capacity_bounds() {
        for capacity in [0, MAX_CAPACITY + 1, usize::MAX / 2] {
            let config = GameConfig {
                capacity,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::Capacity(capacity)));
        }
        let config = GameConfig {
            capacity: MAX_CAPACITY,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_level_count_bounds() {
        for level_count in [0, MAX_LEVELS + 1, usize::MAX] {
            let config = GameConfig {
                level_count,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::LevelCount(level_count)));
        }
    }

    #[test]
    fn test_degenerate_tube_counts_are_allowed() {
        let config = GameConfig {
            min_tubes: 0,
            max_tubes: 2,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
