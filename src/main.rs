//! Terrain-patch demo: lay noise-displaced ground, plant trees, print an
//! overview map.

use clap::Parser;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;

use arbor_blocks::BlockRegistry;
use arbor_blocks::types::Block;
use arbor_rng::WorldRng;
use arbor_trees::{TreeSpecies, grow_tree};
use arbor_world::{ChunkStore, VoxelGrid};

const GROUND_LEVEL: i32 = 64;
const WORLD_TOP: i32 = 256;

#[derive(Parser, Debug)]
#[command(name = "arbor", about = "Plant procedural trees into a voxel patch")]
struct Args {
    /// World seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Patch half-extent in blocks; the patch spans [-extent, extent).
    #[arg(long, default_value_t = 24)]
    extent: i32,

    /// Planting attempts.
    #[arg(long, default_value_t = 16)]
    trees: u32,

    /// Species to plant (oak, birch, spruce, jungle, acacia, dark_oak);
    /// a seeded mix when omitted.
    #[arg(long)]
    species: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.extent < 1 {
        log::error!("extent must be at least 1");
        std::process::exit(2);
    }

    let reg = match BlockRegistry::from_toml_str(include_str!("../assets/blocks.toml")) {
        Ok(reg) => reg,
        Err(e) => {
            log::error!("failed to load block definitions: {e}");
            std::process::exit(1);
        }
    };

    let species = match args.species.as_deref() {
        None => None,
        Some(name) => match TreeSpecies::from_name(name) {
            Some(sp) => Some(sp),
            None => {
                log::error!("unknown species {name:?}");
                std::process::exit(2);
            }
        },
    };

    let mut store = ChunkStore::new(16, 16, 16, 0, WORLD_TOP);
    let heights = lay_ground(&mut store, &reg, &args);
    log::info!(
        "ground laid over {}x{} columns, seed {}",
        args.extent * 2,
        args.extent * 2,
        args.seed
    );

    let mut rng = WorldRng::new(args.seed);
    let mix = [
        TreeSpecies::Oak,
        TreeSpecies::Birch,
        TreeSpecies::Spruce,
        TreeSpecies::Jungle,
    ];
    let span = (args.extent as u32) * 2;
    for _ in 0..args.trees {
        let x = rng.next_bounded_int(span) as i32 - args.extent;
        let z = rng.next_bounded_int(span) as i32 - args.extent;
        let y = heights[&(x, z)] + 1;
        let sp = species.unwrap_or_else(|| mix[rng.next_bounded_int(mix.len() as u32) as usize]);
        log::debug!("planting {} at ({x}, {y}, {z})", sp.name());
        grow_tree(&mut store, &reg, x, y, z, &mut rng, Some(sp));
    }

    report(&store, &reg, args.extent);
}

/// Noise-displaced ground: stone body, dirt shoulder, grass skin.
/// Returns the surface height per column.
fn lay_ground(
    store: &mut ChunkStore,
    reg: &BlockRegistry,
    args: &Args,
) -> HashMap<(i32, i32), i32> {
    let mut noise = FastNoiseLite::with_seed(args.seed as i32);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(0.03));

    let b = |name: &str| reg.make_block_by_name(name).unwrap_or(Block::AIR);
    let (stone, dirt, grass) = (b("stone"), b("dirt"), b("grass"));

    let mut heights = HashMap::new();
    for x in -args.extent..args.extent {
        for z in -args.extent..args.extent {
            let n = noise.get_noise_2d(x as f32, z as f32);
            let h = GROUND_LEVEL + (n * 4.0) as i32;
            for y in h - 4..h - 1 {
                store.set_block_at(x, y, z, stone);
            }
            store.set_block_at(x, h - 1, z, dirt);
            store.set_block_at(x, h, z, grass);
            heights.insert((x, z), h);
        }
    }
    heights
}

fn report(store: &ChunkStore, reg: &BlockRegistry, extent: i32) {
    let snapshot = store.snapshot_all();
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for (_, b) in &snapshot {
        if let Some(ty) = reg.get(b.id) {
            *tally.entry(ty.name.as_str()).or_insert(0) += 1;
        }
    }
    let mut parts: Vec<String> = tally
        .iter()
        .map(|(name, n)| format!("{name}: {n}"))
        .collect();
    parts.sort();
    log::info!("{} blocks stored ({})", snapshot.len(), parts.join(", "));

    for z in -extent..extent {
        let mut row = String::with_capacity((extent * 2) as usize);
        for x in -extent..extent {
            row.push(surface_glyph(store, reg, x, z));
        }
        println!("{row}");
    }
}

/// Top-down glyph for a column: canopy `*`, trunk `#`, grass `.`,
/// dirt `:`, anything else `^`.
fn surface_glyph(store: &ChunkStore, reg: &BlockRegistry, x: i32, z: i32) -> char {
    for y in (0..WORLD_TOP).rev() {
        let blk = store.block_at(x, y, z);
        if blk == Block::AIR {
            continue;
        }
        let Some(ty) = reg.get(blk.id) else {
            return '?';
        };
        return if ty.leaves {
            '*'
        } else if ty.name.ends_with("_log") {
            '#'
        } else if ty.name == "grass" {
            '.'
        } else if ty.name == "dirt" {
            ':'
        } else {
            '^'
        };
    }
    ' '
}
