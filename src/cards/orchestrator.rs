use log::{info, warn};
use rand::Rng;

use super::driver::{AnimationDriver, TickReport};
use super::factory::SceneFactory;
use super::interaction::InteractionBinder;
use super::record::{Ordinal, Registry, SceneRecord};
use super::resize::ResizeReactor;
use super::visibility::VisibilityTracker;
use crate::config::SceneConfig;
use crate::engine::RenderContext;
use crate::error::{Result, SceneError};
use crate::host::{ElementId, FrameScheduler, Page, PageEvent};

/// A container whose scene could not be built
#[derive(Debug)]
pub struct SetupFailure {
    pub ordinal: Ordinal,
    pub container: ElementId,
    pub error: SceneError,
}

/// Discovers containers and wires every component for them
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: SceneConfig,
}

impl Orchestrator {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Build one scene per container in document order, then start the shared
    /// loop. Containers that fail keep their ordinal and are reported in
    /// `CardScenes::failures`; the loop starts regardless.
    pub fn start(
        &self,
        page: &mut dyn Page,
        context: &mut dyn RenderContext,
        scheduler: &dyn FrameScheduler,
        rng: &mut impl Rng,
    ) -> Result<CardScenes> {
        let factory = SceneFactory::new(self.config.clone());
        let mut registry = Registry::new();
        let mut interactions = InteractionBinder::new(&self.config);
        let mut visibility = VisibilityTracker::new(self.config.visibility_threshold);
        let mut resize = ResizeReactor::new();
        let mut failures = Vec::new();

        let containers = page.query_all(&self.config.container_class);
        for container in containers {
            let built = factory.build(page, container, context, rng);
            let record = match built {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!("container {container}: {error}; continuing without a scene");
                    failures.push(SetupFailure {
                        ordinal: Ordinal(registry.slot_count()),
                        container,
                        error,
                    });
                    None
                }
            };
            let live = record.is_some();
            let ordinal = registry.push(record);
            if live {
                interactions.bind(&*page, container, ordinal);
                visibility.observe(container, ordinal);
                resize.observe(container, ordinal);
            }
        }

        info!(
            "{} scene(s) across {} container(s), {} failed",
            registry.len(),
            registry.slot_count(),
            failures.len()
        );

        let mut driver = AnimationDriver::new(registry);
        driver.start(scheduler)?;

        Ok(CardScenes {
            driver,
            interactions,
            visibility,
            resize,
            failures,
        })
    }
}

/// Running card scenes: the driver plus the handlers that feed it
#[derive(Debug)]
pub struct CardScenes {
    driver: AnimationDriver,
    interactions: InteractionBinder,
    visibility: VisibilityTracker,
    resize: ResizeReactor,
    failures: Vec<SetupFailure>,
}

impl CardScenes {
    /// Route one host event to the component that owns it
    pub fn handle_event(&mut self, page: &dyn Page, event: &PageEvent) {
        let registry = self.driver.registry_mut();
        match event {
            PageEvent::PointerEnter { card } => self.interactions.pointer_enter(registry, *card),
            PageEvent::PointerLeave { card } => self.interactions.pointer_leave(registry, *card),
            PageEvent::PointerMove { card, position } => {
                let rect = page.bounding_rect(*card);
                self.interactions.pointer_move(registry, *card, &rect, *position);
            }
            PageEvent::Intersection(entries) => self.visibility.handle(registry, entries),
            PageEvent::Resize(entries) => {
                self.resize.handle(registry, entries);
            }
        }
    }

    pub fn on_frame(&mut self, scheduler: &dyn FrameScheduler) -> TickReport {
        self.driver.on_frame(scheduler)
    }

    pub fn tick(&mut self) -> TickReport {
        self.driver.tick()
    }

    pub fn registry(&self) -> &Registry {
        self.driver.registry()
    }

    pub fn record(&self, ordinal: Ordinal) -> Option<&SceneRecord> {
        self.driver.registry().get(ordinal)
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.driver
    }

    pub fn interactions(&self) -> &InteractionBinder {
        &self.interactions
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn resize(&self) -> &ResizeReactor {
        &self.resize
    }

    pub fn failures(&self) -> &[SetupFailure] {
        &self.failures
    }
}
