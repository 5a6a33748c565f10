pub mod config_file;
pub mod mapgen;
pub mod session;
pub mod types;

pub use config_file::{ConfigFormat, ConfigLoadError, load_biome_config, save_biome_config};
pub use mapgen::{BiomeConfig, ConfigError, Level, LevelGenerator, generate, generate_level};
pub use session::LevelSession;
pub use types::*;
