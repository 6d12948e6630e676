use game_app::render::{WallStyle, draw_world, resolve_wall_style};
use game_app::run_state_file::{
    OUTCOME_GAME_OVER, OUTCOME_VICTORY, RUN_STATE_FORMAT_VERSION, RunStateFile, now_unix_ms,
};
use game_app::window_config::build_window_conf;
use game_app::{APP_NAME, format_fingerprint, format_seed, frame_input, hud, seed};
use game_core::raycast::RenderContext;
use game_core::sim::Simulation;
use game_core::types::GamePhase;
use macroquad::prelude::*;

/// Ceiling on the per-frame step so a long stall (window drag, breakpoint)
/// cannot teleport entities through walls.
const MAX_FRAME_DT: f64 = 0.1;

fn center_text(text: &str, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, y, font_size, color);
}

fn draw_title_screen(run_seed: u64, previous_run: Option<&RunStateFile>) {
    clear_background(BLACK);
    let mid = screen_height() / 2.0;
    center_text(APP_NAME, mid - 80.0, 64.0, WHITE);
    center_text(&format!("seed {}", format_seed(run_seed)), mid - 30.0, 24.0, GRAY);
    if let Some(previous) = previous_run {
        let line = format!(
            "last run: {}  score {}  kills {}",
            previous.outcome, previous.score, previous.kills
        );
        center_text(&line, mid + 10.0, 24.0, DARKGRAY);
    }
    center_text("ENTER to descend   ESC to quit", mid + 60.0, 28.0, LIGHTGRAY);
}

fn draw_end_screen(sim: &Simulation) {
    let mid = screen_height() / 2.0;
    let (headline, color) = match sim.phase {
        GamePhase::Victory => ("THE HALL IS CLEARED", GOLD),
        _ => ("YOU DIED", RED),
    };
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.6));
    center_text(headline, mid - 40.0, 56.0, color);
    center_text(
        &format!("score {}   kills {}", sim.player.score, sim.player.kills),
        mid + 10.0,
        28.0,
        WHITE,
    );
    center_text("ENTER for a new dungeon   ESC to quit", mid + 60.0, 24.0, LIGHTGRAY);
}

fn record_run(sim: &Simulation) {
    let Some(path) = RunStateFile::get_default_path() else {
        return;
    };
    let outcome = match sim.phase {
        GamePhase::Victory => OUTCOME_VICTORY,
        _ => OUTCOME_GAME_OVER,
    };
    let state = RunStateFile {
        format_version: RUN_STATE_FORMAT_VERSION,
        run_seed: sim.seed(),
        map_fingerprint_hex: format_fingerprint(sim.map.fingerprint()),
        score: sim.player.score,
        kills: sim.player.kills,
        outcome: outcome.to_string(),
        updated_at_unix_ms: now_unix_ms(),
    };
    // Persistence failures are reported but never end the game loop.
    if let Err(error) = state.write_atomic(&path) {
        eprintln!("could not record run state at {}: {error}", path.display());
    }
}

#[macroquad::main(build_window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed_choice = match seed::resolve_seed_from_args(&args, seed::generate_runtime_seed()) {
        Ok(choice) => choice,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    let wall_style: WallStyle = match resolve_wall_style(&args).await {
        Ok(style) => style,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let previous_run =
        RunStateFile::get_default_path().and_then(|path| RunStateFile::load(&path).ok());

    let mut sim = Simulation::new(seed_choice.value());
    let mut ctx = RenderContext::new(screen_width() as usize, screen_height() as usize);
    let mut run_recorded = false;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        let dt = f64::from(get_frame_time()).min(MAX_FRAME_DT);

        match sim.phase {
            GamePhase::Title => {
                draw_title_screen(sim.seed(), previous_run.as_ref());
                if is_key_pressed(KeyCode::Enter) {
                    sim.start();
                    set_cursor_grab(true);
                    show_mouse(false);
                }
            }
            GamePhase::Playing => {
                let commands = frame_input::capture_frame_commands();
                sim.update(&commands, dt);
                draw_world(&mut ctx, &sim, &wall_style);
                hud::draw_hud(&sim);
            }
            GamePhase::Victory | GamePhase::GameOver => {
                if !run_recorded {
                    record_run(&sim);
                    run_recorded = true;
                    set_cursor_grab(false);
                    show_mouse(true);
                }
                draw_world(&mut ctx, &sim, &wall_style);
                draw_end_screen(&sim);
                if is_key_pressed(KeyCode::Enter) {
                    sim = Simulation::new(seed::generate_runtime_seed());
                    sim.start();
                    run_recorded = false;
                    set_cursor_grab(true);
                    show_mouse(false);
                }
            }
        }

        next_frame().await;
    }
}
