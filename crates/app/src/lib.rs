pub mod frame_input;
pub mod hud;
pub mod render;
pub mod run_state_file;
pub mod seed;
pub mod window_config;

pub const APP_NAME: &str = "Grimhall";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a map fingerprint as `0x` followed by exactly 16 lowercase hex
/// digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}
