use wordwheel_engine::bridge::protocol::{
    HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_VECTOR_VERTEX_COUNT,
};
use wordwheel_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    ProtocolLayout, RenderContext,
};
#[cfg(feature = "vectors")]
use wordwheel_engine::VectorState;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs.
/// Dropping the runner disposes the game, so input listeners are released
/// on every teardown path.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    running: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(config.max_vector_vertices),
            timestep: FixedTimestep::new(config.fixed_dt),
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            running: false,
            game,
            layout,
            config,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.running {
            return;
        }
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx = EngineContext::with_config(&self.config);
        #[cfg(feature = "vectors")]
        {
            self.vectors = VectorState::new(self.config.max_vector_vertices);
        }
        self.header = [0.0; HEADER_FLOATS];
        self.layout.write_header(&self.config, &mut self.header);
        self.game.init(&mut self.ctx);
        self.running = true;
    }

    /// Apply host settings. A running game is disposed and started again
    /// so the new settings take effect from a fresh session.
    pub fn load_settings(&mut self, json: &str) -> bool {
        let was_running = self.running;
        self.dispose();
        let applied = match self.game.load_settings(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("settings rejected, keeping previous: {e}");
                false
            }
        };
        if was_running {
            self.init();
        }
        applied
    }

    /// Push an input event into the queue. Ignored unless the game is running.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.running {
            self.input.push(event);
        } else {
            log::debug!("input before init or after dispose dropped: {event:?}");
        }
    }

    /// Run one frame tick: update game, render vectors, publish counts.
    pub fn tick(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Queued input is consumed by the first step only
            self.input.clear();
        }

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "{} game events this frame, keeping the first {}",
                self.ctx.events.len(),
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            let mut render_ctx = RenderContext {
                vectors: &mut self.vectors,
                world_width: self.config.world_width,
                world_height: self.config.world_height,
            };
            self.game.render(&mut render_ctx);
        }
        #[cfg(not(feature = "vectors"))]
        {
            let mut render_ctx = RenderContext {
                world_width: self.config.world_width,
                world_height: self.config.world_height,
                _marker: std::marker::PhantomData,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame = self.frame.wrapping_add(1);
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count() as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
    }

    /// Stop the game and drop pending input. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if !self.running {
            return;
        }
        self.game.dispose(&mut self.ctx);
        self.input.clear();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Events emitted during the last tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn state_json(&self) -> String {
        self.game.state_json().unwrap_or_else(|| "null".to_string())
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices(&self) -> &[f32] {
        self.vectors.as_slice()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        #[cfg(feature = "vectors")]
        {
            self.vectors.vertex_count() as u32
        }
        #[cfg(not(feature = "vectors"))]
        {
            0
        }
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }
}

impl<G: Game> Drop for GameRunner<G> {
    fn drop(&mut self) {
        self.dispose();
    }
}
