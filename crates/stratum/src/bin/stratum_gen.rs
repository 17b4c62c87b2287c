//! # STRATUM Generator
//!
//! Headless world generation.
//!
//! ```text
//! stratum_gen [config.toml] [out_dir]
//! ```
//!
//! Writes `biome.png` and `height.png` into `out_dir` (default: current
//! directory), builds the world and prints a block census. Set `RUST_LOG`
//! to see stage logs.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use stratum::{generate_maps, generate_world, GenerateError, GeneratorConfig};
use stratum_world::{NullSink, OreType};

fn run(config_path: Option<PathBuf>, out_dir: PathBuf) -> Result<(), GenerateError> {
    let config = match &config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    std::fs::create_dir_all(&out_dir).map_err(|source| GenerateError::Io { path: out_dir.clone(), source })?;

    let started = Instant::now();
    let maps = generate_maps(&config);
    maps.save(&out_dir)?;
    println!("  Maps      {}x{} ({:?})", config.map.width, config.map.height, started.elapsed());
    println!("  Map seed  {}", maps.map_seed.value());
    println!("  Noise     {}", maps.noise_seed);

    let started = Instant::now();
    let world = generate_world(&config, &maps, NullSink::new())?;
    println!("  World     seed {} ({:?})", world.seed().value(), started.elapsed());
    println!();

    let census = world.census();
    for ore in OreType::ALL {
        let count = census[ore as usize];
        if count > 0 {
            println!("  {:<10} {count:>9}", ore.name());
        }
    }
    println!("  {:<10} {:>9}", "visible", world.grid().visible_count());
    println!("  {:<10} {:>9}", "instances", world.sink().live());
    println!();
    println!("  Wrote {} and {}", out_dir.join(stratum::REGION_MAP_FILE).display(), out_dir.join(stratum::HEIGHT_MAP_FILE).display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                 STRATUM - Procedural World Generator             ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    match run(config_path, out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
