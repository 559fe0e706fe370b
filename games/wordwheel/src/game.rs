use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use glam::Vec2;
use wordwheel_engine::*;

#[cfg(feature = "vectors")]
use crate::board::Board;
use crate::commit::RejectReason;
use crate::settings::WheelSettings;
use crate::state::{GameState, StateChange};

const WORLD_WIDTH: f32 = 256.0;
const WORLD_HEIGHT: f32 = 400.0;

// Board area below the ring
#[cfg(feature = "vectors")]
const BOARD_TOP: f32 = 264.0;
#[cfg(feature = "vectors")]
const BOARD_MARGIN: f32 = 10.0;
#[cfg(feature = "vectors")]
const CELL_GAP: f32 = 4.0;

// Game event kinds (Rust → host)
pub const EVENT_WORD_COMMITTED: f32 = 1.0;
pub const EVENT_COINS: f32 = 2.0;
pub const EVENT_SELECTION: f32 = 3.0;
pub const EVENT_SHUFFLE: f32 = 4.0;
pub const EVENT_REJECTED: f32 = 5.0;

// EVENT_SHUFFLE phases, carried in `a`
pub const SHUFFLE_STARTED: f32 = 0.0;
pub const SHUFFLE_REORDERED: f32 = 1.0;
pub const SHUFFLE_SETTLED: f32 = 2.0;

// Custom event kinds (host → Rust)
pub const CUSTOM_SHUFFLE: u32 = 1;

pub struct WordWheel {
    settings: WheelSettings,
    state: Option<GameState>,
    /// Changes announced by the state since the last flush.
    outbox: Rc<RefCell<Vec<StateChange>>>,
}

impl WordWheel {
    pub fn new() -> Self {
        Self {
            settings: WheelSettings::default(),
            state: None,
            outbox: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    /// The running session, once `init` has been called.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    fn handle_input(state: &mut GameState, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                state.pointer_down(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => {
                state.pointer_move(Vec2::new(x, y));
            }
            InputEvent::PointerUp { .. } => {
                state.pointer_up();
            }
            InputEvent::Custom { kind: CUSTOM_SHUFFLE, .. } => {
                if !state.shuffle() {
                    log::debug!("shuffle ignored, one is already running");
                }
            }
            InputEvent::Custom { kind, .. } => {
                log::debug!("unknown custom event kind {kind}");
            }
        }
    }

    /// Translate queued state changes into host events. A run of selection
    /// changes collapses into one event carrying the final length.
    fn flush_outbox(&self, ctx: &mut EngineContext) {
        let mut selection: Option<usize> = None;
        for change in self.outbox.borrow_mut().drain(..) {
            let event = match change {
                StateChange::SelectionChanged { word } => {
                    log::debug!("selection {word:?}");
                    selection = Some(word.chars().count());
                    continue;
                }
                StateChange::WordCommitted { cell, word } => GameEvent::new(
                    EVENT_WORD_COMMITTED,
                    cell.row as f32,
                    cell.col as f32,
                    word.chars().count() as f32,
                ),
                StateChange::CoinsChanged { coins } => {
                    GameEvent::new(EVENT_COINS, coins as f32, 0.0, 0.0)
                }
                StateChange::WordRejected { word, reason } => {
                    let code = match reason {
                        RejectReason::TooShort => 0.0,
                        RejectReason::BoardFull => 1.0,
                    };
                    GameEvent::new(EVENT_REJECTED, code, word.chars().count() as f32, 0.0)
                }
                StateChange::ShuffleStarted => {
                    log::info!("shuffling letters");
                    GameEvent::new(EVENT_SHUFFLE, SHUFFLE_STARTED, 0.0, 0.0)
                }
                StateChange::LettersReordered => {
                    GameEvent::new(EVENT_SHUFFLE, SHUFFLE_REORDERED, 0.0, 0.0)
                }
                StateChange::ShuffleSettled => {
                    log::debug!("shuffle settled");
                    GameEvent::new(EVENT_SHUFFLE, SHUFFLE_SETTLED, 0.0, 0.0)
                }
                StateChange::LineMoved
                | StateChange::GestureEnded
                | StateChange::Activated
                | StateChange::Deactivated { .. } => continue,
            };
            if let Some(len) = selection.take() {
                ctx.emit_event(GameEvent::new(EVENT_SELECTION, len as f32, 0.0, 0.0));
            }
            ctx.emit_event(event);
        }
        if let Some(len) = selection {
            ctx.emit_event(GameEvent::new(EVENT_SELECTION, len as f32, 0.0, 0.0));
        }
    }
}

impl Default for WordWheel {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-left corner and size of a board cell in world space.
#[cfg(feature = "vectors")]
fn cell_rect(board: &Board, row: usize, col: usize) -> (Vec2, Vec2) {
    let cols = board.cols().max(1) as f32;
    let rows = board.rows().max(1) as f32;
    let width = (WORLD_WIDTH - 2.0 * BOARD_MARGIN - (cols - 1.0) * CELL_GAP) / cols;
    let height = (WORLD_HEIGHT - BOARD_TOP - BOARD_MARGIN - (rows - 1.0) * CELL_GAP) / rows;
    let pos = Vec2::new(
        BOARD_MARGIN + col as f32 * (width + CELL_GAP),
        BOARD_TOP + row as f32 * (height + CELL_GAP),
    );
    (pos, Vec2::new(width, height))
}

impl Game for WordWheel {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            max_vector_vertices: 16384,
            ..GameConfig::default()
        }
    }

    fn load_settings(&mut self, json: &str) -> Result<(), Box<dyn Error>> {
        self.settings = WheelSettings::from_json(json)?;
        log::info!("settings loaded: {} letters", self.settings.letters.len());
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.outbox.borrow_mut().clear();

        let mut state = GameState::new(&self.settings);
        let outbox = self.outbox.clone();
        state.subscribe(move |change| outbox.borrow_mut().push(change.clone()));
        state.activate();
        self.state = Some(state);

        self.flush_outbox(ctx);
        log::info!("Word Wheel initialized");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        for event in input.iter() {
            Self::handle_input(state, event);
        }
        state.tick(ctx.dt);
        self.flush_outbox(ctx);
    }

    #[cfg(feature = "vectors")]
    fn render(&self, ctx: &mut RenderContext) {
        let Some(state) = &self.state else {
            return;
        };
        let ring = state.ring();
        let tracker = state.tracker();
        let visual = ring.visual();
        let highlight = VectorColor::rgb8(0x3b, 0x82, 0xf6);

        ctx.vectors
            .stroke_circle(ring.center(), ring.radius(), 2.0, VectorColor::LIGHT_GRAY);

        // Path under the tiles
        let path: Vec<Vec2> = tracker.selected().iter().map(|s| s.pos).collect();
        if path.len() > 1 {
            ctx.vectors.stroke_polyline(&path, 6.0, highlight);
        }
        if let Some(line) = tracker.line() {
            ctx.vectors
                .stroke_polyline(&[line.from, line.to], 4.0, highlight.with_alpha(0.6));
        }

        let tile_radius = ring.tile_radius() * visual.scale;
        for (letter, center) in ring.placements() {
            let fill = if tracker.contains(letter.ch) {
                highlight
            } else {
                VectorColor::WHITE
            };
            ctx.vectors
                .fill_circle(center, tile_radius, fill.with_alpha(visual.opacity));
            ctx.vectors.stroke_circle(
                center,
                tile_radius,
                1.5,
                VectorColor::DARK_GRAY.with_alpha(visual.opacity),
            );
        }

        let board = state.board();
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let (pos, size) = cell_rect(board, row, col);
                if board.get(row, col).is_some() {
                    ctx.vectors.fill_rect(pos, size, VectorColor::LIGHT_GRAY);
                }
                ctx.vectors.stroke_rect(pos, size, 1.0, VectorColor::DARK_GRAY);
            }
        }
    }

    fn dispose(&mut self, ctx: &mut EngineContext) {
        if let Some(state) = self.state.as_mut() {
            state.deactivate();
        }
        self.flush_outbox(ctx);
        log::info!("Word Wheel disposed");
    }

    fn state_json(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        match serde_json::to_string(&state.snapshot()) {
            Ok(json) => Some(json),
            Err(err) => {
                log::warn!("failed to serialize state: {err}");
                None
            }
        }
    }
}
