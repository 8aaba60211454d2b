//! Tick and frame dispatch adapters.
//!
//! Thin seams between the scheduler and the external script/render
//! collaborators. Both see a consistent snapshot of the scene: all ticks
//! scheduled within one iteration execute before that iteration's frame
//! dispatch, in wall-clock order.

use crate::scene::Scene;
use crate::script::ScriptSource;
use crate::window::Window;

/// Invoked once per simulation tick with a fixed `dt` in seconds.
pub trait ScriptSystem {
    /// Run one tick over the scene.
    fn update(&self, scene: &mut Scene, dt: f64);
}

/// Invoked once per frame dispatch with read access to the full store.
pub trait RenderSystem {
    /// Translate the scene's renderable entities into draw calls.
    fn update(&mut self, scene: &Scene, window: &dyn Window);
}

/// Runs the script of every entity declaring [`ScriptSource`] each tick.
///
/// The lookup goes through the same capability the query does, so every
/// kind declaring it is invoked, not just the stock handle. The entity set
/// is snapshotted before iteration, so a script creating entities mid-tick
/// affects the next tick, not the current one.
#[derive(Debug, Default)]
pub struct DefaultScriptSystem;

impl ScriptSystem for DefaultScriptSystem {
    fn update(&self, scene: &mut Scene, dt: f64) {
        let store = scene.store_mut();
        for entity in store.entities_with::<dyn ScriptSource>() {
            let Ok(Some(source)) = store.get::<dyn ScriptSource>(entity) else {
                continue;
            };
            let script = source.script();
            script.invoke(entity, store, dt);
        }
    }
}

/// Script system that does nothing. Useful for render-only scenes.
#[derive(Debug, Default)]
pub struct NoopScriptSystem;

impl ScriptSystem for NoopScriptSystem {
    fn update(&self, _scene: &mut Scene, _dt: f64) {}
}

/// Render system that does nothing. The default for headless runs; a real
/// graphics backend replaces it.
#[derive(Debug, Default)]
pub struct NoopRenderSystem;

impl RenderSystem for NoopRenderSystem {
    fn update(&mut self, _scene: &Scene, _window: &dyn Window) {}
}
