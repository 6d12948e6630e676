use anyhow::Result;
use clap::{Parser, ValueEnum};
use game_core::mapgen::{generate_cave, generate_dungeon};
use game_core::tilemap::TileMap;
use game_core::types::Tile;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Generator {
    Dungeon,
    Cave,
}

/// Dump a generated map as ASCII for eyeballing generator changes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 64)]
    width: usize,
    #[arg(long, default_value_t = 64)]
    height: usize,
    #[arg(short, long, value_enum, default_value_t = Generator::Dungeon)]
    generator: Generator,
}

fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Floor => '.',
        Tile::Water => '~',
    }
}

fn print_map(map: &TileMap) {
    for y in 0..map.height() {
        let row: String =
            (0..map.width()).map(|x| glyph(map.tile_at(x as i32, y as i32))).collect();
        println!("{row}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let map = match args.generator {
        Generator::Dungeon => {
            let dungeon = generate_dungeon(&mut rng, args.width, args.height);
            println!("seed {}  rooms {}", args.seed, dungeon.rooms.len());
            dungeon.map
        }
        Generator::Cave => {
            println!("seed {}", args.seed);
            generate_cave(&mut rng, args.width, args.height)
        }
    };

    print_map(&map);
    println!(
        "open tiles: {} / {}   fingerprint: 0x{:016x}",
        map.open_tile_count(),
        map.width() * map.height(),
        map.fingerprint()
    );

    Ok(())
}
