#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use card_scenes::config::SceneConfig;
use card_scenes::engine::{PerspectiveCamera, RenderContext, Renderer, RendererOptions, Scene, SurfaceId};
use card_scenes::error::{Result, SceneError};
use card_scenes::host::{ElementId, FrameScheduler, Page};
use card_scenes::math::{Rect, Size};
use card_scenes::{CardScenes, Orchestrator};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Surfaces rendered, in call order, shared by every mock renderer of a context
pub type RenderLog = Rc<RefCell<Vec<SurfaceId>>>;

pub struct MockRenderer {
    id: SurfaceId,
    size: Size,
    pixel_ratio: f32,
    log: RenderLog,
    fail: bool,
}

impl Renderer for MockRenderer {
    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<()> {
        if self.fail {
            return Err(SceneError::Render {
                reason: "device lost".to_string(),
            });
        }
        self.log.borrow_mut().push(self.id);
        Ok(())
    }

    fn surface_id(&self) -> SurfaceId {
        self.id
    }
}

/// Context that refuses chosen acquisitions and can hand out failing renderers
#[derive(Default)]
pub struct MockContext {
    pub calls: u32,
    pub refuse: HashSet<u32>,
    pub failing_renders: HashSet<u32>,
    pub log: RenderLog,
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(calls: &[u32]) -> Self {
        Self {
            refuse: calls.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn rendered(&self) -> Vec<SurfaceId> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl RenderContext for MockContext {
    fn create_renderer(&mut self, _options: &RendererOptions) -> Result<Box<dyn Renderer>> {
        let call = self.calls;
        self.calls += 1;
        if self.refuse.contains(&call) {
            return Err(SceneError::ContextRefused {
                reason: "too many active contexts".to_string(),
            });
        }
        Ok(Box::new(MockRenderer {
            id: SurfaceId(call),
            size: Size::default(),
            pixel_ratio: 1.0,
            log: self.log.clone(),
            fail: self.failing_renders.contains(&call),
        }))
    }
}

struct MockElement {
    class: &'static str,
    parent: Option<ElementId>,
    rect: Rect,
}

/// Hand-built page: cards and containers with fixed rectangles
pub struct MockPage {
    elements: Vec<MockElement>,
    pub dpr: f32,
    pub appended: Vec<(ElementId, SurfaceId)>,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            dpr: 1.0,
            appended: Vec::new(),
        }
    }

    fn push(&mut self, class: &'static str, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.elements.push(MockElement { class, parent, rect });
        ElementId(self.elements.len() as u32 - 1)
    }

    /// A glass card at `rect`; returns the card
    pub fn card(&mut self, rect: Rect) -> ElementId {
        self.push("glass", None, rect)
    }

    /// A container of `size` inside `card`, placed at the card's origin
    pub fn container_in(&mut self, card: ElementId, size: Size) -> ElementId {
        let origin = self.elements[card.0 as usize].rect;
        self.push(
            "three-canvas-container",
            Some(card),
            Rect::new(origin.left, origin.top, size.width, size.height),
        )
    }

    /// A container with no card ancestor
    pub fn bare_container(&mut self, size: Size) -> ElementId {
        self.push("three-canvas-container", None, Rect::new(0.0, 0.0, size.width, size.height))
    }

    pub fn set_size(&mut self, element: ElementId, size: Size) {
        let rect = &mut self.elements[element.0 as usize].rect;
        rect.width = size.width;
        rect.height = size.height;
    }
}

impl Page for MockPage {
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
            let e = self.elements.get(id.0 as usize)?;
            if e.class == class {
                return Some(id);
            }
            current = e.parent;
        }
        None
    }

    fn client_size(&self, element: ElementId) -> Size {
        self.elements[element.0 as usize].rect.size()
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.elements[element.0 as usize].rect
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn append_surface(&mut self, container: ElementId, surface: SurfaceId) {
        self.appended.push((container, surface));
    }
}

/// Counts frame requests instead of scheduling anything
#[derive(Default)]
pub struct CountingScheduler {
    pub requests: Cell<u32>,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// Start scenes on `page` with the default configuration and a fixed seed
pub fn start(page: &mut MockPage, context: &mut MockContext, scheduler: &CountingScheduler) -> CardScenes {
    let mut rng = StdRng::seed_from_u64(42);
    Orchestrator::new(SceneConfig::default())
        .start(page, context, scheduler, &mut rng)
        .expect("scenes start")
}

/// `count` cards in a row, each with one 300x180 container
pub fn card_row(count: usize) -> (MockPage, Vec<ElementId>, Vec<ElementId>) {
    let mut page = MockPage::new();
    let mut cards = Vec::new();
    let mut containers = Vec::new();
    for i in 0..count {
        let card = page.card(Rect::new(i as f32 * 340.0, 0.0, 320.0, 280.0));
        containers.push(page.container_in(card, Size::new(300.0, 180.0)));
        cards.push(card);
    }
    (page, cards, containers)
}
