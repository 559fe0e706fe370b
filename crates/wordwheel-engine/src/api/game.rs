use std::error::Error;

use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of vector vertices per frame (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 256.0,
            world_height: 256.0,
            max_vector_vertices: 16384,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Replace game-specific settings from a JSON document supplied by the host.
    /// Called before `init`; a failure leaves the previous settings in place.
    fn load_settings(&mut self, _json: &str) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Setup initial state and start listening for input.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Consume input, advance timers, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Stop listening for input and release anything acquired in `init`.
    /// The runner calls this exactly once, on every teardown path.
    fn dispose(&mut self, _ctx: &mut EngineContext) {}

    /// Serialized view state for hosts that paint text themselves.
    fn state_json(&self) -> Option<String> {
        None
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub events: Vec<GameEvent>,
    /// Fixed delta of the current update step, in seconds.
    pub dt: f32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context sized for the given config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            events: Vec::with_capacity(config.max_events),
            dt: config.fixed_dt,
        }
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
    pub world_width: f32,
    pub world_height: f32,
    #[cfg(not(feature = "vectors"))]
    pub _marker: std::marker::PhantomData<&'a ()>,
}
