use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use room_viewer::app::App;
use room_viewer::cli::Cli;
use room_viewer::SceneConfig;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scene = match &cli.scene {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::bedroom(),
    };
    log::info!(
        "scene loaded: {} objects, starting at {:?}",
        scene.objects.len(),
        scene.camera_position
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(scene, cli.width, cli.height);

    println!("Controls: WASD to move, mouse to look, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
