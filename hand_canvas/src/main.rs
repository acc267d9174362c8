//! hand_canvas — interactive entry point.
//!
//! Usage: `hand_canvas [--config FILE] [--image PICTURE] [--record DIR] [--no-mirror] [--quick]`

use hand_canvas::app::run;
use hand_canvas::config::{config_path, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Canvas — zoom, rotate and draw by gesture        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard/mouse simulation  (use --features leap for hardware)");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    println!("  Opening window…");
    println!();

    if let Err(e) = run(cfg) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &[String]) -> Result<AppConfig, String> {
    let mut cfg = match config_path(args) {
        Some(path) if !args.iter().any(|a| a == "--quick") => AppConfig::load(&path)?,
        _ => AppConfig::default(),
    };
    cfg.apply_args(args.iter().cloned())?;
    Ok(cfg)
}
