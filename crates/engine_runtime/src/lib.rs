//! # engine_runtime
//!
//! The fixed-timestep runtime for the simulation engine: wall-clock
//! sampling, the tick/render scheduling policy, dispatch seams for the
//! script and render collaborators, and the engine loop itself.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use engine_runtime::{Engine, EngineConfig, HeadlessWindow, Scene};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.attach_scene(Scene::new());
//! engine.attach_window(HeadlessWindow::new(120));
//! engine.run().unwrap();
//! ```

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod scene;
pub mod scheduler;
pub mod script;
pub mod window;

pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use config::EngineConfig;
pub use dispatch::{
    DefaultScriptSystem, NoopRenderSystem, NoopScriptSystem, RenderSystem, ScriptSystem,
};
pub use engine::{Engine, State, StateHandle};
pub use error::EngineError;
pub use scene::Scene;
pub use scheduler::{FixedStepScheduler, TickBatch};
pub use script::{Script, ScriptHandle, ScriptSource};
pub use window::{HeadlessWindow, Window};
