// src/animation/mod.rs

pub mod easing;
pub mod timeline;

pub use easing::Easing;
pub use timeline::{Channel, Timeline, Track, TransitionKind};
