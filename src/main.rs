// Sidelog - main.rs
//
// Preview binary: runs the viewer window standalone, seeded with demo
// entries, as a manual test harness for the widget. The real product is the
// library surface; hosts never run this.
//
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. config.toml loading
// 4. Window launch on the main thread

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use sidelog::platform::config;
use sidelog::util::{constants, logging};
use sidelog::viewer::window::{run_blocking, SharedState, WindowCommand};
use sidelog::viewer::ViewerOptions;
use std::sync::Arc;

/// Sidelog preview - standalone log-viewer window with demo entries.
#[derive(Parser, Debug)]
#[command(name = "sidelog-preview", version, about)]
struct Cli {
    /// Number of demo entries to seed.
    #[arg(short = 'n', long = "entries", default_value_t = 12)]
    entries: usize,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let paths = config::PlatformPaths::resolve();
    let (cfg, warnings) = config::load_config(&paths.config_dir);
    logging::init(cli.debug, cfg.log_level.as_deref());
    for w in &warnings {
        tracing::warn!("{}", w);
    }

    tracing::info!(
        version = constants::APP_VERSION,
        entries = cli.entries,
        "Sidelog preview starting"
    );

    let options = ViewerOptions {
        max_entries: cfg.max_entries,
        width: cfg.window_width,
        height: cfg.window_height,
        ..ViewerOptions::default()
    };

    let shared = Arc::new(SharedState::new(options.max_entries));
    seed_demo_entries(&shared, cli.entries);

    // The window is created hidden; queue a Show so the first frame centres
    // and reveals it.
    shared.send(WindowCommand::Show);

    if let Err(e) = run_blocking(shared, &options) {
        tracing::error!(error = %e, "Failed to launch preview window");
        eprintln!("Error: failed to launch sidelog preview: {e}");
        std::process::exit(1);
    }
}

/// Seed entries cycling through the severity spellings a host typically
/// sends, timestamped with the local clock.
fn seed_demo_entries(shared: &SharedState, count: usize) {
    const LEVELS: [&str; 6] = ["INFO", "DEBUG", "WARN", "ERROR", "FATAL", "notice"];

    let now = chrono::Local::now();
    for i in 0..count {
        let t = now + chrono::Duration::seconds(i as i64);
        shared.append(
            &t.format("%H:%M:%S").to_string(),
            LEVELS[i % LEVELS.len()],
            &format!("Demo entry {i}: everything is operating within parameters"),
        );
    }
}
