use wasm_bindgen::prelude::*;
use wordwheel_engine::*;

pub mod board;
pub mod commit;
pub mod game;
pub mod gesture;
pub mod ring;
pub mod score;
pub mod settings;
pub mod state;

pub use board::{Board, CellRef};
pub use commit::{CommitOutcome, RejectReason, WordCommitter};
pub use game::WordWheel;
pub use gesture::{GesturePhase, GestureStep, GestureTracker, LetterLocator};
pub use ring::{Letter, LetterRing};
pub use score::Coins;
pub use settings::{SettingsError, WheelSettings};
pub use state::{GameState, ObserverId, StateChange, StateSnapshot};

#[cfg(feature = "vectors")]
wordwheel_web::export_game!(WordWheel, "wordwheel", vectors);
#[cfg(not(feature = "vectors"))]
wordwheel_web::export_game!(WordWheel, "wordwheel");
