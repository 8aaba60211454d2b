//! The engine: state, collaborators, and the main loop.
//!
//! Per iteration the loop:
//!
//! 1. Samples wall-clock time once.
//! 2. Drains whole tick intervals through the script system, each with the
//!    same fixed `dt`, bounded by the catch-up cap.
//! 3. Dispatches one render frame if the render interval has elapsed.
//! 4. When the host does not vertical-sync, takes one coarse nap so render
//!    output stays under the cap.
//!
//! The loop terminates when the window reports closed, checked between
//! iterations only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info};

use crate::clock::{SystemTimeSource, TimeSource};
use crate::config::EngineConfig;
use crate::dispatch::{DefaultScriptSystem, NoopRenderSystem, RenderSystem, ScriptSystem};
use crate::error::EngineError;
use crate::scene::Scene;
use crate::scheduler::FixedStepScheduler;
use crate::window::Window;

/// Length of the rate-limiting nap, matching the original's coarse
/// one-millisecond granularity.
const RATE_LIMIT_NAP: Duration = Duration::from_millis(1);

/// Engine state, settable at any time — including from a collaborator
/// holding a [`StateHandle`] while the loop runs. While paused, ticks are
/// withheld and the accumulator is frozen; rendering continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ticks and frames dispatch normally.
    Running,
    /// Ticks are withheld; frames continue.
    Paused,
}

/// Shared pause switch for a running engine.
///
/// Cloned out via [`Engine::state_handle`] and handed to collaborators (an
/// input callback, a script) so they can toggle the state while the loop
/// holds the engine exclusively. The loop re-reads it every iteration.
#[derive(Debug, Clone, Default)]
pub struct StateHandle(Arc<AtomicBool>);

impl StateHandle {
    /// Set the engine state.
    pub fn set(&self, state: State) {
        self.0.store(state == State::Paused, Ordering::Relaxed);
    }

    /// The current engine state.
    #[must_use]
    pub fn state(&self) -> State {
        if self.0.load(Ordering::Relaxed) {
            State::Paused
        } else {
            State::Running
        }
    }
}

/// Owns the scene, the collaborators, and the fixed-timestep loop.
pub struct Engine {
    config: EngineConfig,
    state: StateHandle,
    scene: Option<Scene>,
    window: Option<Box<dyn Window>>,
    script_system: Box<dyn ScriptSystem>,
    render_system: Box<dyn RenderSystem>,
    time: Arc<dyn TimeSource>,
    tick_count: u64,
    frame_count: u64,
}

impl Engine {
    /// Create an engine with the given rate configuration, the default
    /// script system, and no render backend.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: StateHandle::default(),
            scene: None,
            window: None,
            script_system: Box::new(DefaultScriptSystem),
            render_system: Box::new(NoopRenderSystem),
            time: Arc::new(SystemTimeSource::new()),
            tick_count: 0,
            frame_count: 0,
        }
    }

    /// Replace the script system.
    #[must_use]
    pub fn with_script_system(mut self, script_system: impl ScriptSystem + 'static) -> Self {
        self.script_system = Box::new(script_system);
        self
    }

    /// Replace the render system.
    #[must_use]
    pub fn with_render_system(mut self, render_system: impl RenderSystem + 'static) -> Self {
        self.render_system = Box::new(render_system);
        self
    }

    /// Replace the time source. Tests drive the loop with a manual clock.
    #[must_use]
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Attach the scene the loop will operate on. Required before `run`.
    pub fn attach_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    /// Attach the window collaborator. Required before `run`.
    pub fn attach_window(&mut self, window: impl Window + 'static) {
        self.window = Some(Box::new(window));
    }

    /// The current engine state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state.state()
    }

    /// Set the engine state.
    pub fn set_state(&self, state: State) {
        self.state.set(state);
    }

    /// A shared handle to the engine state, for toggling pause while the
    /// loop runs.
    #[must_use]
    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    /// The attached scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Mutable access to the attached scene, if any.
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Total ticks dispatched across all runs.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total frames dispatched across all runs.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run the main loop until the window reports closed.
    ///
    /// # Errors
    ///
    /// Fails fast with a configuration error before the first iteration if
    /// the rates are invalid or a scene or window is missing. These are
    /// fatal and not retried.
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.config.validate()?;
        let Some(mut scene) = self.scene.take() else {
            return Err(EngineError::MissingScene);
        };
        let Some(mut window) = self.window.take() else {
            self.scene = Some(scene);
            return Err(EngineError::MissingWindow);
        };

        let mut scheduler = FixedStepScheduler::new(&self.config, self.time.now());
        info!(
            ups = self.config.max_updates_per_second,
            fps = self.config.max_frames_per_second,
            catch_up_cap = self.config.max_updates_per_frame,
            "engine loop starting"
        );

        while !window.is_closed() {
            let now = self.time.now();

            let batch = scheduler.begin(now, self.state.state() == State::Paused);
            for _ in 0..batch.count {
                self.script_system.update(&mut scene, batch.dt_seconds());
                self.tick_count += 1;
            }

            if scheduler.poll_render(now) {
                self.render_system.update(&scene, window.as_ref());
                window.swap();
                self.frame_count += 1;
                debug!(
                    frame = self.frame_count,
                    ticks = self.tick_count,
                    "frame dispatched"
                );
            } else if !window.is_vsync_enabled() {
                // The single yield point per iteration: a coarse nap while
                // the next frame is not yet due.
                let wait = scheduler.until_next_render(now);
                if !wait.is_zero() {
                    self.time.sleep(wait.min(RATE_LIMIT_NAP));
                }
            }
        }

        info!(
            ticks = self.tick_count,
            frames = self.frame_count,
            "engine loop stopped"
        );

        self.scene = Some(scene);
        self.window = Some(window);
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.state.state())
            .field("scene", &self.scene.is_some())
            .field("window", &self.window.is_some())
            .field("tick_count", &self.tick_count)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use engine_store::{ComponentStore, Entity};

    use super::*;
    use crate::clock::ManualTimeSource;
    use crate::script::{Script, ScriptHandle};
    use crate::window::HeadlessWindow;

    struct CountingScript(Arc<AtomicU64>);

    impl Script for CountingScript {
        fn invoke(&self, _entity: Entity, _store: &mut ComponentStore, _dt: f64) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_run_without_scene_fails_fast() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.attach_window(HeadlessWindow::new(1));
        assert_eq!(engine.run(), Err(EngineError::MissingScene));
    }

    #[test]
    fn test_run_without_window_fails_fast_and_keeps_scene() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.attach_scene(Scene::new());
        assert_eq!(engine.run(), Err(EngineError::MissingWindow));
        assert!(engine.scene().is_some());
    }

    #[test]
    fn test_run_with_invalid_config_fails_fast() {
        let config = EngineConfig {
            max_frames_per_second: 0,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config);
        engine.attach_scene(Scene::new());
        engine.attach_window(HeadlessWindow::new(1));
        assert_eq!(
            engine.run(),
            Err(EngineError::InvalidConfig("max_frames_per_second"))
        );
    }

    #[test]
    fn test_headless_run_dispatches_ticks_and_frames() {
        let clock = Arc::new(ManualTimeSource::new());
        let mut engine =
            Engine::new(EngineConfig::default()).with_time_source(clock.clone());

        let mut scene = Scene::new();
        let calls = Arc::new(AtomicU64::new(0));
        let entity = scene.registry().create();
        scene
            .store_mut()
            .put(entity, ScriptHandle::new(CountingScript(Arc::clone(&calls))))
            .unwrap();

        engine.attach_scene(scene);
        engine.attach_window(HeadlessWindow::new(5));
        engine.run().unwrap();

        assert_eq!(engine.frame_count(), 5);
        // At matched tick and render rates, roughly one tick per frame.
        assert!(engine.tick_count() >= 4);
        assert_eq!(calls.load(Ordering::Relaxed), engine.tick_count());
    }

    struct PausingScript {
        state: StateHandle,
        calls: Arc<AtomicU64>,
    }

    impl Script for PausingScript {
        fn invoke(&self, _entity: Entity, _store: &mut ComponentStore, _dt: f64) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.state.set(State::Paused);
        }
    }

    #[test]
    fn test_script_can_pause_a_running_engine() {
        let clock = Arc::new(ManualTimeSource::new());
        let mut engine = Engine::new(EngineConfig::default()).with_time_source(clock.clone());
        let calls = Arc::new(AtomicU64::new(0));

        let mut scene = Scene::new();
        let entity = scene.registry().create();
        scene
            .store_mut()
            .put(
                entity,
                ScriptHandle::new(PausingScript {
                    state: engine.state_handle(),
                    calls: Arc::clone(&calls),
                }),
            )
            .unwrap();

        engine.attach_scene(scene);
        engine.attach_window(HeadlessWindow::new(10));
        engine.run().unwrap();

        // The first tick pauses the loop; rendering continues to the frame
        // budget while ticks stay withheld.
        assert_eq!(engine.tick_count(), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(engine.frame_count(), 10);
        assert_eq!(engine.state(), State::Paused);
    }

    #[test]
    fn test_paused_engine_renders_without_ticking() {
        let clock = Arc::new(ManualTimeSource::new());
        let mut engine =
            Engine::new(EngineConfig::default()).with_time_source(clock.clone());
        engine.set_state(State::Paused);

        engine.attach_scene(Scene::new());
        engine.attach_window(HeadlessWindow::new(3));
        engine.run().unwrap();

        assert_eq!(engine.frame_count(), 3);
        assert_eq!(engine.tick_count(), 0);
    }
}
