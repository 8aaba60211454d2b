//! # engine_app — headless demo
//!
//! Builds a small scene — a spinning colored cube, a textured cube, and a
//! bare transform — and runs the fixed-timestep loop against a headless
//! window for a fixed number of frames.

use anyhow::Result;
use clap::Parser;
use glam::{Quat, Vec3};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use engine_components::{Color, Mesh, Texture, Transform};
use engine_runtime::{Engine, EngineConfig, HeadlessWindow, Scene, Script, ScriptHandle};
use engine_store::{ComponentStore, Entity};

#[derive(Parser, Debug)]
#[command(name = "engine_app", about = "Headless demo of the simulation engine core")]
struct Args {
    /// Target simulation ticks per second.
    #[arg(long, default_value_t = 60)]
    max_ups: u32,

    /// Target render frames per second.
    #[arg(long, default_value_t = 60)]
    max_fps: u32,

    /// Catch-up cap: most ticks dispatched in one loop iteration.
    #[arg(long, default_value_t = 500)]
    max_updates_per_frame: u32,

    /// Frames to run before the headless window reports closed.
    #[arg(long, default_value_t = 120)]
    frames: u64,
}

/// Spins an entity's transform around the Y axis at a fixed angular speed.
struct SpinScript {
    /// Radians per second.
    speed: f32,
}

impl Script for SpinScript {
    fn invoke(&self, entity: Entity, store: &mut ComponentStore, dt: f64) {
        let Ok(Some(transform)) = store.get::<Transform>(entity) else {
            return;
        };
        let spun = transform.rotated(Quat::from_rotation_y(self.speed * dt as f32));
        if let Err(err) = store.put(entity, spun) {
            warn!(%entity, %err, "spin script could not write transform");
        }
    }
}

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();

    let spinner = scene.registry().create();
    let store = scene.store_mut();
    store.put(spinner, Mesh::unit_cube())?;
    store.put(spinner, Transform::from_position(Vec3::new(-1.5, 0.0, -5.0)))?;
    store.put(spinner, Color::rgb(0.9, 0.3, 0.2))?;
    store.put(spinner, ScriptHandle::new(SpinScript { speed: 1.0 }))?;

    let textured = scene.registry().create();
    let store = scene.store_mut();
    store.put(textured, Mesh::unit_cube())?;
    store.put(textured, Transform::from_position(Vec3::new(1.5, 0.0, -5.0)))?;
    store.put(
        textured,
        Texture::new("bricks.png", vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]),
    )?;

    let marker = scene.registry().create();
    scene
        .store_mut()
        .put(marker, Transform::from_position(Vec3::ZERO))?;

    Ok(scene)
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let args = Args::parse();
    let config = EngineConfig {
        max_updates_per_second: args.max_ups,
        max_frames_per_second: args.max_fps,
        max_updates_per_frame: args.max_updates_per_frame,
    };

    info!(
        ups = config.max_updates_per_second,
        fps = config.max_frames_per_second,
        frames = args.frames,
        "engine demo starting"
    );

    let mut engine = Engine::new(config);
    engine.attach_scene(build_scene()?);
    engine.attach_window(HeadlessWindow::new(args.frames));
    engine.run()?;

    info!(
        ticks = engine.tick_count(),
        frames = engine.frame_count(),
        "engine demo finished"
    );
    Ok(())
}
