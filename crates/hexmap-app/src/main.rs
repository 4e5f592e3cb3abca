//! Command-line entry point: replay a session and report the result.

use clap::Parser;
use hexmap_app::{App, AppConfig, AppResult, ShortcutRegistry, load_session};
use hexmap_core::MapConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexmap", version, about = "Replay a battlemap editing session")]
struct Args {
    /// Session script (JSON array of events) to replay
    session: Option<PathBuf>,
    /// Map configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Write the final frame as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// List keyboard shortcuts and exit
    #[arg(long)]
    shortcuts: bool,
}

fn run(args: Args) -> AppResult<()> {
    if args.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let map_config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    let config = AppConfig {
        width: args.width,
        height: args.height,
        ..AppConfig::default()
    };
    let mut app = App::new(&map_config, config);

    if let Some(path) = &args.session {
        let events = load_session(path)?;
        app.replay(&events);
    }

    if let Some(path) = &args.svg {
        app.export_svg(path)?;
    }

    let summary = app.summary()?;
    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        println!("{json}");
    } else {
        let counts = &summary.ui.counts;
        println!(
            "{:?} grid, radius {}, {:?} mode, zoom {}%",
            summary.ui.grid_kind, summary.ui.map_radius, summary.ui.mode, summary.ui.zoom_percent
        );
        println!(
            "{} units, {} markers, {} numbers, {} arrows",
            counts.units, counts.markers, counts.numbers, counts.arrows
        );
        if let Some(index) = summary.ui.selected {
            println!("Selected unit #{index}");
        }
        println!("{} draw commands", summary.draw_commands);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting hexmap");

    if let Err(err) = run(Args::parse()) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
