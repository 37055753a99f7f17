use std::sync::Arc;

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::window::Window as WinitWindow;

use crate::host::{CardPage, FrameScheduler, PageEvent};
use crate::math::Size;

/// Pixels scrolled per wheel line
pub const LINE_HEIGHT: f32 = 40.0;

/// Wrapper around the winit window that also schedules animation frames
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    pub fn inner_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.inner.inner_size()
    }

    pub fn scale_factor(&self) -> f32 {
        self.inner.scale_factor() as f32
    }

    /// Window size in CSS-like logical pixels
    pub fn logical_size(&self) -> Size {
        let physical = self.inner_size();
        let scale = self.scale_factor();
        Size::new(physical.width as f32 / scale, physical.height as f32 / scale)
    }
}

impl FrameScheduler for Window {
    fn request_frame(&self) {
        self.inner.request_redraw();
    }
}

/// Physical cursor position to logical page coordinates
pub fn to_logical(position: PhysicalPosition<f64>, scale: f32) -> Vec2 {
    Vec2::new(position.x as f32 / scale, position.y as f32 / scale)
}

/// Wheel delta to a downward scroll distance in logical pixels
pub fn scroll_distance(delta: MouseScrollDelta, scale: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, lines) => -lines * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pixels) => -(pixels.y as f32) / scale,
    }
}

/// Feed pointer and wheel input to the page; returns the resulting page events
pub fn route_input(page: &mut CardPage, event: &WindowEvent, scale: f32) -> Vec<PageEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => page.pointer_moved(to_logical(*position, scale)),
        WindowEvent::CursorLeft { .. } => page.pointer_left(),
        WindowEvent::MouseWheel { delta, .. } => page.scroll_by(scroll_distance(*delta, scale)),
        _ => Vec::new(),
    }
}
