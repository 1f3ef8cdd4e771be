//! `tigger [config.json]`
//!
//! Keys: I/K fly, J/L turn the camera, A/D aim, C ready a shot, F fire it,
//! G heavier spheres, Escape quits. Set `RUST_LOG=debug` for more output.

use std::path::PathBuf;

use tigger::config::GameConfig;

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> tigger::Result<()> {
    let (config, source) = GameConfig::resolve(std::env::args_os().nth(1).map(PathBuf::from))?;
    match &source {
        Some(path) => log::info!("config: {}", path.display()),
        None => log::info!("config: built-in defaults"),
    }
    tigger::window::run(config)
}
