//! Rendering engine contract consumed by the card scenes, plus a CPU
//! implementation of it.

pub mod camera;
pub mod geometry;
pub mod scene;
pub mod software;

pub use camera::PerspectiveCamera;
pub use geometry::{PolyhedronGeometry, MAX_DETAIL};
pub use scene::{BasicMaterial, Mesh, Node, NodeId, Points, PointsMaterial, Scene, Transform};
pub use software::{SoftwareContext, SoftwareRenderer};

use crate::core::Canvas;
use crate::error::Result;
use crate::math::Size;

/// Identity of a renderer's output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// Options requested when acquiring a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererOptions {
    /// Clear to transparent so the page shows through
    pub alpha: bool,
    pub antialias: bool,
}

/// Per-instance renderer drawing one scene onto its own surface
pub trait Renderer {
    /// Resize the surface to `size` CSS pixels
    fn set_size(&mut self, size: Size);

    /// Current size in CSS pixels
    fn size(&self) -> Size;

    /// Device pixels per CSS pixel for the drawing buffer
    fn set_pixel_ratio(&mut self, ratio: f32);

    fn pixel_ratio(&self) -> f32;

    /// Draw `scene` as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()>;

    fn surface_id(&self) -> SurfaceId;

    /// CPU pixels of the last frame, when the backend keeps them
    fn output(&self) -> Option<&Canvas> {
        None
    }
}

/// Source of renderers; acquisition can fail per instance
pub trait RenderContext {
    fn create_renderer(&mut self, options: &RendererOptions) -> Result<Box<dyn Renderer>>;
}
