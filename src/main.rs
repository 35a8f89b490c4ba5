mod app;
mod dot;
mod layout;
mod util;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use app::{GraphViewConfig, SceneModel};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Call graph file to open at startup.
    dot_file: Option<PathBuf>,

    /// Number of ambient agents on the canvas; 0 disables them.
    #[arg(long, default_value_t = 6)]
    agents: usize,

    /// Animation tick period in milliseconds.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Fixed seed for agent movement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the laid-out scene of DOT_FILE as JSON and exit.
    #[arg(long, requires = "dot_file")]
    dump_scene: bool,
}

fn dump_scene(path: &Path) -> Result<()> {
    let text = dot::read_graph_source(path)?;
    let scene = SceneModel::from_dot_text(&text);
    println!("{}", app::scene_to_json(&scene)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.dump_scene {
        let path = args
            .dot_file
            .as_deref()
            .context("--dump-scene needs a graph file")?;
        return dump_scene(path);
    }

    let config = GraphViewConfig {
        agent_count: args.agents,
        tick_period: Duration::from_millis(args.tick_ms),
        seed: args.seed,
    };
    info!("starting viewer with {} agents", config.agent_count);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("callgraph-view"),
        ..Default::default()
    };

    eframe::run_native(
        "callgraph-view",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CallGraphApp::new(
                cc,
                &config,
                args.dot_file.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
