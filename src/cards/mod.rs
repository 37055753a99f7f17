//! Per-container scene lifecycle: provisioning, interaction, visibility,
//! resizing and the shared animation loop.

pub mod driver;
pub mod factory;
pub mod interaction;
pub mod orchestrator;
pub mod record;
pub mod resize;
pub mod visibility;

pub use driver::{advance, AnimationDriver, TickReport};
pub use factory::SceneFactory;
pub use interaction::{apply_hover, apply_tilt, HoverStyle, InteractionBinder};
pub use orchestrator::{CardScenes, Orchestrator, SetupFailure};
pub use record::{Ordinal, Registry, SceneRecord};
pub use resize::ResizeReactor;
pub use visibility::VisibilityTracker;
