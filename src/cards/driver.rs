use std::collections::HashSet;

use log::{info, trace, warn};

use super::record::{Ordinal, Registry, SceneRecord};
use crate::error::{Result, SceneError};
use crate::host::FrameScheduler;

/// Outcome of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub frame: u64,
    pub rendered: usize,
    /// Records skipped because they are off screen
    pub skipped: usize,
    pub failed: usize,
}

/// Advance one visible record by a frame of motion
pub fn advance(record: &mut SceneRecord) {
    let speed = record.rotation_speed;
    let hover = record.hover;
    if let Some(mesh) = record.mesh_mut() {
        mesh.transform.rotation.y += speed;
        // While hovered the pointer owns the x tilt
        if !hover {
            mesh.transform.rotation.x += speed * 0.5;
        }
    }
    if let Some(particles) = record.particles_mut() {
        particles.transform.rotation.y -= speed * 0.5;
    }
}

/// The one shared frame loop; owns every scene record
#[derive(Debug)]
pub struct AnimationDriver {
    registry: Registry,
    started: bool,
    frame: u64,
    reported_failures: HashSet<Ordinal>,
}

impl AnimationDriver {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            started: false,
            frame: 0,
            reported_failures: HashSet::new(),
        }
    }

    /// Schedule the first frame. The loop then runs for the life of the page.
    pub fn start(&mut self, scheduler: &dyn FrameScheduler) -> Result<()> {
        if self.started {
            return Err(SceneError::DriverAlreadyStarted);
        }
        self.started = true;
        info!("animation driver started with {} scene(s)", self.registry.len());
        scheduler.request_frame();
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Frame callback: queue the next frame, then run this one
    pub fn on_frame(&mut self, scheduler: &dyn FrameScheduler) -> TickReport {
        if self.started {
            scheduler.request_frame();
        }
        self.tick()
    }

    /// Advance and render every visible record once
    pub fn tick(&mut self) -> TickReport {
        self.frame += 1;
        let mut report = TickReport {
            frame: self.frame,
            ..Default::default()
        };

        for (ordinal, record) in self.registry.iter_mut() {
            if !record.visible {
                report.skipped += 1;
                continue;
            }

            advance(record);

            match record.renderer.render(&record.scene, &record.camera) {
                Ok(()) => report.rendered += 1,
                Err(e) => {
                    report.failed += 1;
                    if self.reported_failures.insert(ordinal) {
                        warn!("scene {ordinal} failed to render: {e}");
                    }
                }
            }
        }

        trace!("{report:?}");
        report
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
