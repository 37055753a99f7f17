//! Animated 3D scenes embedded in page cards.
//!
//! Every container found on a [`host::Page`] gets its own scene, camera and
//! renderer. One [`cards::AnimationDriver`] advances and renders the scenes
//! that are on screen; hover, pointer and resize events reshape them.

pub mod cards;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod host;
pub mod math;
pub mod window;

pub use cards::{CardScenes, Orchestrator};
pub use config::SceneConfig;
pub use error::{Result, SceneError};
