use anyhow::Result;
use clap::Parser;
use game_core::cast_walls;
use game_core::raycast::{MIN_WALL_DIST, RenderContext};
use game_core::sim::{FrameCommands, Simulation};
use game_core::types::GamePhase;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Headless soak: drive seeded runs with random held inputs and assert the
/// simulation invariants every frame.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to soak.
    #[arg(short, long, default_value_t = 8)]
    runs: u64,
    /// Frames per run at a fixed 60 Hz step.
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,
}

const DT: f64 = 1.0 / 60.0;

fn random_commands(rng: &mut ChaCha8Rng) -> FrameCommands {
    let bits = rng.next_u64();
    FrameCommands {
        forward: bits & 1 != 0,
        backward: bits & 2 != 0,
        strafe_left: bits & 4 != 0,
        strafe_right: bits & 8 != 0,
        turn_left: bits & 16 != 0,
        turn_right: bits & 32 != 0,
        shoot: bits & 64 != 0,
        turn_delta: 0.0,
    }
}

fn soak_one(seed: u64, frames: u32) {
    let mut sim = Simulation::new(seed);
    sim.start();
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED_F00D);
    let mut ctx = RenderContext::new(160, 100);
    let mut last_score = 0;

    for frame in 0..frames {
        sim.update(&random_commands(&mut rng), DT);
        if sim.phase != GamePhase::Playing {
            println!("  seed {seed}: run ended in {:?} at frame {frame}", sim.phase);
            return;
        }

        let pos = sim.player.pos();
        assert!(
            !sim.map.is_blocking(pos.x as i32, pos.y as i32),
            "Invariant failed: player inside wall at {pos:?} (seed {seed}, frame {frame})"
        );
        assert!(
            sim.player.health <= sim.player.max_health,
            "Invariant failed: HP above max (seed {seed}, frame {frame})"
        );
        assert!(
            sim.player.score >= last_score,
            "Invariant failed: score decreased (seed {seed}, frame {frame})"
        );
        last_score = sim.player.score;

        if frame % 30 == 0 {
            ctx.reset(160, 100);
            cast_walls(&mut ctx, &sim.map, &sim.player.camera);
            for &depth in &ctx.depth {
                assert!(
                    depth >= MIN_WALL_DIST,
                    "Invariant failed: depth below clamp (seed {seed}, frame {frame})"
                );
            }
        }
    }
    println!("  seed {seed}: survived {frames} frames, score {}", sim.player.score);
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Soaking {} seeds from {} for {} frames each...", args.runs, args.seed, args.frames);

    for seed in args.seed..args.seed.wrapping_add(args.runs) {
        soak_one(seed, args.frames);
    }

    println!("Soak completed successfully.");
    Ok(())
}
