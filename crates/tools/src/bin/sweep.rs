use anyhow::{Result, bail};
use clap::Parser;
use tilegen::{Biome, LevelGenerator, generate_level};
use tilegen_tools::logging::init_logging;
use tilegen_tools::report::audit_level;
use tracing::{debug, info};

/// Generates many levels and stops at the first broken invariant.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    start_seed: u64,
    #[arg(short = 'n', long, default_value_t = 200)]
    seeds: u64,
    /// Restrict the sweep to one biome; all biomes otherwise
    #[arg(short, long)]
    biome: Option<Biome>,
    /// Also walk this many levels of a run per seed
    #[arg(long, default_value_t = 0)]
    run_depth: u32,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let biomes: Vec<Biome> = match args.biome {
        Some(biome) => vec![biome],
        None => Biome::ALL.to_vec(),
    };
    let generators: Vec<LevelGenerator> =
        biomes.iter().map(|&biome| LevelGenerator::for_biome(biome)).collect();

    info!(start = args.start_seed, seeds = args.seeds, biomes = biomes.len(), "sweep started");
    let mut checked = 0_u64;
    for seed in args.start_seed..args.start_seed.saturating_add(args.seeds) {
        for generator in &generators {
            let level = generator.generate(seed);
            let problems = audit_level(&level, generator.config().border);
            if !problems.is_empty() {
                bail!("{} seed {seed}: {}", level.biome(), problems.join("; "));
            }
            debug!(biome = %level.biome(), seed, fingerprint = level.fingerprint(), "ok");
            checked += 1;
        }
        for level_index in 0..args.run_depth {
            let level = generate_level(seed, level_index);
            let border = LevelGenerator::for_biome(level.biome()).config().border;
            let problems = audit_level(&level, border);
            if !problems.is_empty() {
                bail!("run {seed} level {level_index}: {}", problems.join("; "));
            }
            checked += 1;
        }
    }

    info!(levels = checked, "sweep completed successfully");
    Ok(())
}
