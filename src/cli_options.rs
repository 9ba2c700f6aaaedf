//! Process command-line options.
//!
//! Every knob of [`GameConfig`] can be set from the command line. `--ls` prints the
//! generated level list and exits, which is mostly useful together with `--seed`.
//!
//! # Examples
//!
//! List three levels with five to nine tubes. The same seed always prints the
//! same list:
//!
//! ```text
//! $ water_sort --seed 7 --levels 3 --max-tubes 9 --ls
//! Level 1 - <n> tubes
//! Level 2 - <n> tubes
//! Level 3 - <n> tubes
//! ```
//!
//! Play the same levels, starting on the second one, with debug messages:
//!
//! ```text
//! $ water_sort --seed 7 --levels 3 --max-tubes 9 --level 2 --debug
//! ```

use clap::Parser;
use log::debug;
use std::env;

use water_sort::GameConfig;

/// Sort colored liquids until every tube holds a single color.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Seed for the level generator, for reproducible levels
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of levels to generate
    #[arg(short = 'n', long, default_value_t = GameConfig::default().level_count)]
    levels: usize,

    /// Layers per tube
    #[arg(short, long, default_value_t = GameConfig::default().capacity)]
    capacity: usize,

    /// Smallest number of tubes in a level
    #[arg(long, default_value_t = GameConfig::default().min_tubes)]
    min_tubes: usize,

    /// Largest number of tubes in a level
    #[arg(long, default_value_t = GameConfig::default().max_tubes)]
    max_tubes: usize,

    /// Number of distinct colors
    #[arg(long, default_value_t = GameConfig::default().palette_size)]
    colors: usize,

    /// Hints allowed per level before a win is scolded
    #[arg(long, default_value_t = GameConfig::default().hint_threshold)]
    hint_limit: usize,

    /// Level to start on (1-based)
    #[arg(short, long, default_value_t = 1)]
    level: usize,

    /// List the generated levels and exit
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

pub struct LaunchOptions {
    pub config: GameConfig,
    pub start_level: usize,
    pub list_levels: bool,
}

/// Parse the command line and set up logging.
///
/// Returns the exit code to use when the configuration is unusable.
pub fn parse() -> Result<LaunchOptions, u8> {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let config = GameConfig {
        capacity: args.capacity,
        level_count: args.levels,
        min_tubes: args.min_tubes,
        max_tubes: args.max_tubes,
        palette_size: args.colors,
        hint_threshold: args.hint_limit,
        seed: args.seed,
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return Err(2);
    }
    debug!("Configuration: {config:?}");

    Ok(LaunchOptions {
        config,
        start_level: args.level,
        list_levels: args.ls,
    })
}
