pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod extensions;
#[cfg(feature = "vectors")]
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::GameEvent;
pub use crate::core::rng::Rng;
pub use crate::core::time::{Countdown, FixedTimestep};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

pub use extensions::{Easing, lerp, ease};
