//! Host page contract: element queries, observers and frame scheduling.

pub mod compositor;
pub mod page;

pub use compositor::compose;
pub use page::{CardPage, PageLayout};

use std::fmt;

use glam::Vec2;

use crate::engine::SurfaceId;
use crate::math::{Rect, Size};

/// Stable identity of an element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access to the page plus the one mutation the scenes need
pub trait Page {
    /// Elements carrying `class`, in document order
    fn query_all(&self, class: &str) -> Vec<ElementId>;

    /// Nearest element carrying `class`, starting with `element` itself
    fn closest(&self, element: ElementId, class: &str) -> Option<ElementId>;

    /// Inner size of the element in CSS pixels
    fn client_size(&self, element: ElementId) -> Size;

    /// Border box relative to the viewport
    fn bounding_rect(&self, element: ElementId) -> Rect;

    fn device_pixel_ratio(&self) -> f32;

    /// Attach a renderer surface as the last child of `container`
    fn append_surface(&mut self, container: ElementId, surface: SurfaceId);
}

/// Host hook that runs the next animation frame
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// One target's visibility report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Visible fraction of the target's area
    pub ratio: f32,
}

/// One target's new content size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEntry {
    pub target: ElementId,
    pub size: Size,
}

/// Events the page delivers to the scenes between frames
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    PointerEnter { card: ElementId },
    PointerLeave { card: ElementId },
    /// Pointer position in viewport coordinates
    PointerMove { card: ElementId, position: Vec2 },
    Intersection(Vec<IntersectionEntry>),
    Resize(Vec<ResizeEntry>),
}
