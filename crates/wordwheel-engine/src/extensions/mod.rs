// extensions/mod.rs
//
// Optional helpers decoupled from the game loop. Games opt in by calling them.

pub mod easing;

pub use easing::{Easing, lerp, ease};
