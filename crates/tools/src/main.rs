use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tilegen::config_file::{ConfigFormat, render_biome_config};
use tilegen::{Biome, BiomeConfig, Level, LevelGenerator, generate_level, load_biome_config};
use tilegen_tools::logging::init_logging;
use tilegen_tools::report::LevelSummary;
use tilegen_tools::seed::SeedChoice;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Procedural tile-map generator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one level from a biome preset or a config file
    Generate {
        #[arg(short, long, default_value = "cave")]
        biome: Biome,
        #[arg(short, long)]
        seed: Option<u64>,
        /// TOML or JSON biome config replacing the preset
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print a JSON summary instead of the ASCII preview
        #[arg(long)]
        json: bool,
    },
    /// Print a biome preset for editing
    Preset {
        biome: Biome,
        #[arg(long)]
        json: bool,
    },
    /// Generate level `index` of the run started with `run_seed`
    Level {
        #[arg(long)]
        run_seed: Option<u64>,
        #[arg(short, long, default_value_t = 0)]
        index: u32,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    match args.command {
        Command::Generate { biome, seed, config, json } => {
            let config = match config {
                Some(path) => load_biome_config(&path)
                    .with_context(|| format!("Failed to load biome config: {}", path.display()))?,
                None => BiomeConfig::preset(biome),
            };
            let seed = SeedChoice::resolve(seed);
            info!(biome = %config.biome, seed = seed.value(), source = seed.source(), "generating");
            let generator = LevelGenerator::new(config).context("Biome config rejected")?;
            print_level(&generator.generate(seed.value()), json)
        }
        Command::Preset { biome, json } => {
            let format = if json { ConfigFormat::Json } else { ConfigFormat::Toml };
            let text = render_biome_config(&BiomeConfig::preset(biome), format)
                .with_context(|| format!("Failed to render {biome} preset"))?;
            println!("{text}");
            Ok(())
        }
        Command::Level { run_seed, index, json } => {
            let run_seed = SeedChoice::resolve(run_seed);
            info!(run_seed = run_seed.value(), source = run_seed.source(), index, "generating");
            print_level(&generate_level(run_seed.value(), index), json)
        }
    }
}

fn print_level(level: &Level, json: bool) -> Result<()> {
    let summary = LevelSummary::of(level);
    if json {
        let text = serde_json::to_string_pretty(&summary)
            .with_context(|| "Failed to serialize level summary")?;
        println!("{text}");
        return Ok(());
    }

    for row in &summary.rows {
        println!("{row}");
    }
    println!("Biome: {}", summary.biome);
    println!("Seed: {}", summary.seed);
    println!("Size: {}x{}", summary.width, summary.height);
    println!("Hubs: {}", summary.hubs.len());
    println!("Entity spawns: {}", summary.entity_spawns.len());
    println!("Fingerprint: {}", summary.fingerprint);
    Ok(())
}
