use std::collections::HashMap;

use glam::Vec2;

use super::{ElementId, IntersectionEntry, Page, PageEvent, ResizeEntry};
use crate::config::SceneConfig;
use crate::engine::SurfaceId;
use crate::math::{Rect, Size};

/// Grid metrics for the card page, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub columns: usize,
    pub gap: f32,
    pub card_height: f32,
    /// Inset of the scene container inside its card
    pub padding: f32,
    pub container_height: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            gap: 24.0,
            card_height: 280.0,
            padding: 16.0,
            container_height: 180.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    class: String,
    parent: Option<ElementId>,
    /// Position in page coordinates, unaffected by scrolling
    rect: Rect,
}

/// Native stand-in for a document of glass cards, each hosting a scene container.
///
/// Bare containers (no card ancestor) follow the cards in document order.
/// The page also plays the part of the browser's intersection and resize
/// observers: `intersection_entries` and `resize_entries` report only what
/// changed since the previous call, everything on the first call.
pub struct CardPage {
    layout: PageLayout,
    viewport: Size,
    scroll_y: f32,
    device_pixel_ratio: f32,
    card_class: String,
    container_class: String,
    visibility_threshold: f32,
    cards: usize,
    bare: usize,
    elements: Vec<Element>,
    surfaces: HashMap<SurfaceId, ElementId>,
    reported_visible: HashMap<ElementId, bool>,
    reported_sizes: HashMap<ElementId, Size>,
    pointer: Option<Vec2>,
    hovered: Option<ElementId>,
}

impl CardPage {
    pub fn new(cards: usize, bare: usize, layout: PageLayout, viewport: Size, config: &SceneConfig) -> Self {
        let mut page = Self {
            layout,
            viewport,
            scroll_y: 0.0,
            device_pixel_ratio: 1.0,
            card_class: config.card_class.clone(),
            container_class: config.container_class.clone(),
            visibility_threshold: config.visibility_threshold,
            cards,
            bare,
            elements: Vec::new(),
            surfaces: HashMap::new(),
            reported_visible: HashMap::new(),
            reported_sizes: HashMap::new(),
            pointer: None,
            hovered: None,
        };
        page.build_elements();
        page
    }

    fn build_elements(&mut self) {
        for _ in 0..self.cards {
            let card = ElementId(self.elements.len() as u32);
            self.elements.push(Element {
                class: self.card_class.clone(),
                parent: None,
                rect: Rect::default(),
            });
            self.elements.push(Element {
                class: self.container_class.clone(),
                parent: Some(card),
                rect: Rect::default(),
            });
        }
        for _ in 0..self.bare {
            self.elements.push(Element {
                class: self.container_class.clone(),
                parent: None,
                rect: Rect::default(),
            });
        }
        self.layout_elements();
    }

    fn column_width(&self) -> f32 {
        let columns = self.layout.columns.max(1) as f32;
        (self.viewport.width - self.layout.gap * (columns + 1.0)) / columns
    }

    fn cell(&self, index: usize) -> Rect {
        let columns = self.layout.columns.max(1);
        let width = self.column_width();
        let (col, row) = (index % columns, index / columns);
        Rect::new(
            self.layout.gap + col as f32 * (width + self.layout.gap),
            self.layout.gap + row as f32 * (self.layout.card_height + self.layout.gap),
            width,
            self.layout.card_height,
        )
    }

    fn layout_elements(&mut self) {
        let pad = self.layout.padding;
        let mut slot = 0;
        let mut i = 0;
        while i < self.elements.len() {
            let cell = self.cell(slot);
            let is_card = self.elements[i].parent.is_none() && self.elements[i].class == self.card_class;
            if is_card && i + 1 < self.elements.len() {
                self.elements[i].rect = cell;
                if let Some(container) = self.elements.get_mut(i + 1) {
                    container.rect =
                        Rect::new(cell.left + pad, cell.top + pad, cell.width - 2.0 * pad, self.layout.container_height);
                }
                i += 2;
            } else {
                self.elements[i].rect = Rect::new(cell.left, cell.top, cell.width, self.layout.container_height);
                i += 1;
            }
            slot += 1;
        }
    }

    /// Apply a new viewport size and recompute the grid
    pub fn relayout(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.layout_elements();
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.device_pixel_ratio = ratio;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn content_height(&self) -> f32 {
        self.elements.iter().map(|e| e.rect.bottom()).fold(0.0, f32::max) + self.layout.gap
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    /// Scroll vertically; returns hover changes for a stationary pointer
    pub fn scroll_by(&mut self, dy: f32) -> Vec<PageEvent> {
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll());
        match self.pointer {
            Some(position) => self.update_hover(position),
            None => Vec::new(),
        }
    }

    pub fn cards(&self) -> Vec<ElementId> {
        self.query_all(&self.card_class)
    }

    fn card_at(&self, position: Vec2) -> Option<ElementId> {
        self.cards()
            .into_iter()
            .find(|card| self.bounding_rect(*card).contains(position))
    }

    fn update_hover(&mut self, position: Vec2) -> Vec<PageEvent> {
        let target = self.card_at(position);
        let mut events = Vec::new();
        if target != self.hovered {
            if let Some(card) = self.hovered {
                events.push(PageEvent::PointerLeave { card });
            }
            if let Some(card) = target {
                events.push(PageEvent::PointerEnter { card });
            }
            self.hovered = target;
        }
        events
    }

    /// Pointer moved to `position` in viewport coordinates
    pub fn pointer_moved(&mut self, position: Vec2) -> Vec<PageEvent> {
        self.pointer = Some(position);
        let mut events = self.update_hover(position);
        if let Some(card) = self.hovered {
            events.push(PageEvent::PointerMove { card, position });
        }
        events
    }

    /// Pointer left the viewport
    pub fn pointer_left(&mut self) -> Vec<PageEvent> {
        self.pointer = None;
        self.hovered
            .take()
            .map(|card| PageEvent::PointerLeave { card })
            .into_iter()
            .collect()
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Containers whose visibility crossed the threshold since the last call
    pub fn intersection_entries(&mut self) -> Vec<IntersectionEntry> {
        let root = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        let threshold = self.visibility_threshold;
        let mut entries = Vec::new();

        for target in self.query_all(&self.container_class) {
            let ratio = self.bounding_rect(target).intersection_ratio(&root);
            let visible = ratio > 0.0 && ratio >= threshold;
            if self.reported_visible.insert(target, visible) != Some(visible) {
                entries.push(IntersectionEntry { target, ratio });
            }
        }
        entries
    }

    /// Containers whose size changed since the last call
    pub fn resize_entries(&mut self) -> Vec<ResizeEntry> {
        let mut entries = Vec::new();
        for target in self.query_all(&self.container_class) {
            let size = self.client_size(target);
            if self.reported_sizes.insert(target, size) != Some(size) {
                entries.push(ResizeEntry { target, size });
            }
        }
        entries
    }

    /// Container a surface was appended to
    pub fn surface_parent(&self, surface: SurfaceId) -> Option<ElementId> {
        self.surfaces.get(&surface).copied()
    }

    pub fn surfaces_in(&self, container: ElementId) -> Vec<SurfaceId> {
        let mut surfaces: Vec<SurfaceId> = self
            .surfaces
            .iter()
            .filter(|(_, parent)| **parent == container)
            .map(|(surface, _)| *surface)
            .collect();
        surfaces.sort_by_key(|s| s.0);
        surfaces
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }
}

impl Page for CardPage {
    fn query_all(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.class == class)
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }

    fn closest(&self, element: ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(id) = current {
            let node = self.element(id)?;
            if node.class == class {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn client_size(&self, element: ElementId) -> Size {
        self.element(element).map(|e| e.rect.size()).unwrap_or_default()
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.element(element)
            .map(|e| e.rect.translated(Vec2::new(0.0, -self.scroll_y)))
            .unwrap_or_default()
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn append_surface(&mut self, container: ElementId, surface: SurfaceId) {
        self.surfaces.insert(surface, container);
    }
}
